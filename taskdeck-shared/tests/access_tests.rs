/// Integration tests for the access layer
///
/// These run the ownership and cascade logic against the in-memory store:
/// - Non-owners are denied and denied operations leave state untouched
/// - Absent identifiers surface as not-found
/// - Ownership is always derived from the verified identity, never from
///   the request payload
/// - Task access resolves transitively through the parent project
/// - Project deletion cascades over child tasks
/// - Orphaned tasks (interrupted cascade) surface as not-found

use std::sync::Arc;

use serde_json::{json, Value};
use taskdeck_shared::access::{project::ProjectAccess, task::TaskAccess, AccessError};
use taskdeck_shared::models::AttrMap;
use taskdeck_shared::store::{memory::MemStore, ProjectStore, TaskStore};
use uuid::Uuid;

fn attrs(value: Value) -> AttrMap {
    value.as_object().expect("object literal").clone()
}

fn services() -> (Arc<MemStore>, ProjectAccess, TaskAccess) {
    let store = Arc::new(MemStore::new());
    let projects = ProjectAccess::new(store.clone());
    let tasks = TaskAccess::new(store.clone());
    (store, projects, tasks)
}

#[tokio::test]
async fn test_create_forces_owner_from_identity() {
    let (_, projects, _) = services();
    let user = Uuid::new_v4();

    // Payload tries to claim a different owner under both spellings.
    let project = projects
        .create(
            user,
            attrs(json!({
                "name": "Website Redesign",
                "owner": Uuid::new_v4().to_string(),
                "user": Uuid::new_v4().to_string()
            })),
        )
        .await
        .unwrap();

    assert_eq!(project.owner, user);
    assert!(project.attributes.get("owner").is_none());
    assert!(project.attributes.get("user").is_none());
    assert_eq!(project.attributes["name"], "Website Redesign");
}

#[tokio::test]
async fn test_non_owner_is_forbidden_and_state_unchanged() {
    let (store, projects, _) = services();
    let owner = Uuid::new_v4();
    let intruder = Uuid::new_v4();

    let project = projects
        .create(owner, attrs(json!({"name": "private"})))
        .await
        .unwrap();

    for result in [
        projects.get(project.id, intruder).await.err(),
        projects
            .update(project.id, intruder, attrs(json!({"name": "stolen"})))
            .await
            .err(),
        projects.delete(project.id, intruder).await.err(),
    ] {
        assert!(matches!(result, Some(AccessError::NotOwner)));
    }

    // Denied operations left the project untouched.
    let stored = store.find_project_by_id(project.id).await.unwrap().unwrap();
    assert_eq!(stored.owner, owner);
    assert_eq!(stored.attributes["name"], "private");
}

#[tokio::test]
async fn test_absent_project_is_not_found() {
    let (_, projects, _) = services();
    let user = Uuid::new_v4();
    let missing = Uuid::new_v4();

    assert!(matches!(
        projects.get(missing, user).await,
        Err(AccessError::ProjectNotFound(id)) if id == missing
    ));
    assert!(matches!(
        projects.update(missing, user, AttrMap::new()).await,
        Err(AccessError::ProjectNotFound(_))
    ));
    assert!(matches!(
        projects.delete(missing, user).await,
        Err(AccessError::ProjectNotFound(_))
    ));
}

#[tokio::test]
async fn test_list_is_scoped_to_owner() {
    let (_, projects, _) = services();
    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();

    projects.create(alice, attrs(json!({"name": "a1"}))).await.unwrap();
    projects.create(alice, attrs(json!({"name": "a2"}))).await.unwrap();
    projects.create(bob, attrs(json!({"name": "b1"}))).await.unwrap();

    let alices = projects.list(alice).await.unwrap();
    assert_eq!(alices.len(), 2);
    assert!(alices.iter().all(|p| p.owner == alice));

    assert_eq!(projects.list(bob).await.unwrap().len(), 1);
    assert!(projects.list(Uuid::new_v4()).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_update_merges_partially_and_owner_is_immutable() {
    let (_, projects, _) = services();
    let owner = Uuid::new_v4();

    let project = projects
        .create(owner, attrs(json!({"name": "Website", "status": "active"})))
        .await
        .unwrap();

    let updated = projects
        .update(
            project.id,
            owner,
            attrs(json!({"status": "archived", "owner": Uuid::new_v4().to_string()})),
        )
        .await
        .unwrap();

    // Keys absent from the patch survive; the ownership key is dropped.
    assert_eq!(updated.attributes["name"], "Website");
    assert_eq!(updated.attributes["status"], "archived");
    assert_eq!(updated.owner, owner);
}

#[tokio::test]
async fn test_task_operations_authorize_through_parent() {
    let (_, projects, tasks) = services();
    let owner = Uuid::new_v4();
    let intruder = Uuid::new_v4();

    let project = projects
        .create(owner, attrs(json!({"name": "Website"})))
        .await
        .unwrap();
    let task = tasks
        .create(project.id, owner, attrs(json!({"title": "Design mockups"})))
        .await
        .unwrap();
    assert_eq!(task.project_id, project.id);

    // The owner can reach the task through every operation.
    assert_eq!(tasks.get(task.id, owner).await.unwrap().id, task.id);
    assert_eq!(tasks.list(project.id, owner).await.unwrap().len(), 1);
    tasks
        .update(task.id, owner, attrs(json!({"done": true})))
        .await
        .unwrap();

    // Everyone else is denied on every operation.
    assert!(matches!(
        tasks.get(task.id, intruder).await,
        Err(AccessError::NotOwner)
    ));
    assert!(matches!(
        tasks.list(project.id, intruder).await,
        Err(AccessError::NotOwner)
    ));
    assert!(matches!(
        tasks.create(project.id, intruder, AttrMap::new()).await,
        Err(AccessError::NotOwner)
    ));
    assert!(matches!(
        tasks.update(task.id, intruder, AttrMap::new()).await,
        Err(AccessError::NotOwner)
    ));
    assert!(matches!(
        tasks.delete(task.id, intruder).await,
        Err(AccessError::NotOwner)
    ));
}

#[tokio::test]
async fn test_task_operations_under_absent_project_are_not_found() {
    let (_, _, tasks) = services();
    let user = Uuid::new_v4();
    let missing = Uuid::new_v4();

    assert!(matches!(
        tasks.list(missing, user).await,
        Err(AccessError::ProjectNotFound(_))
    ));
    assert!(matches!(
        tasks.create(missing, user, AttrMap::new()).await,
        Err(AccessError::ProjectNotFound(_))
    ));
}

#[tokio::test]
async fn test_absent_task_is_not_found() {
    let (_, _, tasks) = services();
    let user = Uuid::new_v4();
    let missing = Uuid::new_v4();

    assert!(matches!(
        tasks.get(missing, user).await,
        Err(AccessError::TaskNotFound(id)) if id == missing
    ));
    assert!(matches!(
        tasks.update(missing, user, AttrMap::new()).await,
        Err(AccessError::TaskNotFound(_))
    ));
    assert!(matches!(
        tasks.delete(missing, user).await,
        Err(AccessError::TaskNotFound(_))
    ));
}

#[tokio::test]
async fn test_task_update_cannot_move_between_projects() {
    let (_, projects, tasks) = services();
    let owner = Uuid::new_v4();

    let home = projects.create(owner, attrs(json!({"name": "home"}))).await.unwrap();
    let other = projects.create(owner, attrs(json!({"name": "other"}))).await.unwrap();
    let task = tasks
        .create(home.id, owner, attrs(json!({"title": "stay put"})))
        .await
        .unwrap();

    let updated = tasks
        .update(
            task.id,
            owner,
            attrs(json!({
                "project_id": other.id.to_string(),
                "project": other.id.to_string(),
                "title": "renamed"
            })),
        )
        .await
        .unwrap();

    assert_eq!(updated.project_id, home.id);
    assert_eq!(updated.attributes["title"], "renamed");
    assert!(updated.attributes.get("project").is_none());

    assert_eq!(tasks.list(home.id, owner).await.unwrap().len(), 1);
    assert!(tasks.list(other.id, owner).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_task_returns_it() {
    let (store, projects, tasks) = services();
    let owner = Uuid::new_v4();

    let project = projects.create(owner, AttrMap::new()).await.unwrap();
    let task = tasks
        .create(project.id, owner, attrs(json!({"title": "ephemeral"})))
        .await
        .unwrap();

    let deleted = tasks.delete(task.id, owner).await.unwrap();
    assert_eq!(deleted.id, task.id);
    assert_eq!(deleted.attributes["title"], "ephemeral");

    assert!(store.find_task_by_id(task.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_project_delete_cascades_over_tasks() {
    let (store, projects, tasks) = services();
    let owner = Uuid::new_v4();

    let doomed = projects.create(owner, attrs(json!({"name": "doomed"}))).await.unwrap();
    let survivor = projects
        .create(owner, attrs(json!({"name": "survivor"})))
        .await
        .unwrap();

    let mut doomed_tasks = Vec::new();
    for i in 0..3 {
        let task = tasks
            .create(doomed.id, owner, attrs(json!({"title": format!("t{}", i)})))
            .await
            .unwrap();
        doomed_tasks.push(task.id);
    }
    let kept = tasks.create(survivor.id, owner, AttrMap::new()).await.unwrap();

    projects.delete(doomed.id, owner).await.unwrap();

    // The project and every one of its tasks are gone.
    assert!(matches!(
        projects.get(doomed.id, owner).await,
        Err(AccessError::ProjectNotFound(_))
    ));
    for task_id in doomed_tasks {
        assert!(matches!(
            tasks.get(task_id, owner).await,
            Err(AccessError::TaskNotFound(_))
        ));
    }
    assert!(store
        .list_tasks_by_project(doomed.id)
        .await
        .unwrap()
        .is_empty());

    // The sibling project and its task are untouched.
    assert!(tasks.get(kept.id, owner).await.is_ok());
}

#[tokio::test]
async fn test_orphaned_task_is_not_found() {
    let (store, projects, tasks) = services();
    let owner = Uuid::new_v4();

    let project = projects.create(owner, AttrMap::new()).await.unwrap();
    let task = tasks.create(project.id, owner, AttrMap::new()).await.unwrap();

    // Simulate an interrupted cascade: the project row vanishes while the
    // task row stays behind. The raw store delete bypasses the cascade.
    store.delete_project_by_id(project.id).await.unwrap();

    assert!(matches!(
        tasks.get(task.id, owner).await,
        Err(AccessError::ParentProjectMissing(id)) if id == task.id
    ));
    assert!(matches!(
        tasks.update(task.id, owner, AttrMap::new()).await,
        Err(AccessError::ParentProjectMissing(_))
    ));
    assert!(matches!(
        tasks.delete(task.id, owner).await,
        Err(AccessError::ParentProjectMissing(_))
    ));
}
