/// In-memory store backend
///
/// HashMap-backed implementation of the store traits with the same observable
/// semantics as the Postgres backend. Used by the test suites (so they run
/// without infrastructure) and handy for demos.
///
/// Locking: one `std::sync::RwLock` around all three maps. It is only held
/// across pure map operations, never across an await point.
///
/// # Example
///
/// ```
/// use taskdeck_shared::models::project::CreateProject;
/// use taskdeck_shared::models::AttrMap;
/// use taskdeck_shared::store::{memory::MemStore, ProjectStore};
/// use uuid::Uuid;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store = MemStore::new();
/// let project = store
///     .create_project(CreateProject {
///         owner: Uuid::new_v4(),
///         attributes: AttrMap::new(),
///     })
///     .await?;
/// assert!(store.find_project_by_id(project.id).await?.is_some());
/// # Ok(())
/// # }
/// ```

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

use super::{ProjectStore, Store, StoreError, TaskStore, UserStore};
use crate::models::{
    merge_attributes,
    project::{CreateProject, Project},
    task::{CreateTask, Task},
    user::{CreateUser, User},
    AttrMap,
};

#[derive(Default)]
struct Inner {
    users: HashMap<Uuid, User>,
    projects: HashMap<Uuid, Project>,
    tasks: HashMap<Uuid, Task>,
}

/// HashMap-backed implementation of [`Store`]
#[derive(Default)]
pub struct MemStore {
    inner: RwLock<Inner>,
}

impl MemStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Inner> {
        self.inner.read().expect("memory store lock poisoned")
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Inner> {
        self.inner.write().expect("memory store lock poisoned")
    }
}

#[async_trait]
impl ProjectStore for MemStore {
    async fn list_projects_by_owner(&self, owner: Uuid) -> Result<Vec<Project>, StoreError> {
        let mut projects: Vec<Project> = self
            .read()
            .projects
            .values()
            .filter(|p| p.owner == owner)
            .cloned()
            .collect();
        projects.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(projects)
    }

    async fn find_project_by_id(&self, id: Uuid) -> Result<Option<Project>, StoreError> {
        Ok(self.read().projects.get(&id).cloned())
    }

    async fn create_project(&self, data: CreateProject) -> Result<Project, StoreError> {
        let now = Utc::now();
        let project = Project {
            id: Uuid::new_v4(),
            owner: data.owner,
            attributes: JsonValue::Object(data.attributes),
            created_at: now,
            updated_at: now,
        };
        self.write().projects.insert(project.id, project.clone());
        Ok(project)
    }

    async fn update_project_by_id(
        &self,
        id: Uuid,
        patch: AttrMap,
    ) -> Result<Option<Project>, StoreError> {
        let mut inner = self.write();
        let Some(project) = inner.projects.get_mut(&id) else {
            return Ok(None);
        };
        merge_attributes(&mut project.attributes, &patch);
        project.updated_at = Utc::now();
        Ok(Some(project.clone()))
    }

    async fn delete_project_by_id(&self, id: Uuid) -> Result<bool, StoreError> {
        Ok(self.write().projects.remove(&id).is_some())
    }
}

#[async_trait]
impl TaskStore for MemStore {
    async fn list_tasks_by_project(&self, project_id: Uuid) -> Result<Vec<Task>, StoreError> {
        let mut tasks: Vec<Task> = self
            .read()
            .tasks
            .values()
            .filter(|t| t.project_id == project_id)
            .cloned()
            .collect();
        tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(tasks)
    }

    async fn find_task_by_id(&self, id: Uuid) -> Result<Option<Task>, StoreError> {
        Ok(self.read().tasks.get(&id).cloned())
    }

    async fn create_task(&self, data: CreateTask) -> Result<Task, StoreError> {
        let now = Utc::now();
        let task = Task {
            id: Uuid::new_v4(),
            project_id: data.project_id,
            attributes: JsonValue::Object(data.attributes),
            created_at: now,
            updated_at: now,
        };
        self.write().tasks.insert(task.id, task.clone());
        Ok(task)
    }

    async fn update_task_by_id(
        &self,
        id: Uuid,
        patch: AttrMap,
    ) -> Result<Option<Task>, StoreError> {
        let mut inner = self.write();
        let Some(task) = inner.tasks.get_mut(&id) else {
            return Ok(None);
        };
        merge_attributes(&mut task.attributes, &patch);
        task.updated_at = Utc::now();
        Ok(Some(task.clone()))
    }

    async fn delete_task_by_id(&self, id: Uuid) -> Result<bool, StoreError> {
        Ok(self.write().tasks.remove(&id).is_some())
    }

    async fn delete_tasks_by_project(&self, project_id: Uuid) -> Result<u64, StoreError> {
        let mut inner = self.write();
        let before = inner.tasks.len();
        inner.tasks.retain(|_, t| t.project_id != project_id);
        Ok((before - inner.tasks.len()) as u64)
    }
}

#[async_trait]
impl UserStore for MemStore {
    async fn create_user(&self, data: CreateUser) -> Result<User, StoreError> {
        let mut inner = self.write();
        if inner.users.values().any(|u| u.email == data.email) {
            return Err(StoreError::Conflict(format!(
                "email {} already registered",
                data.email
            )));
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            email: data.email,
            password_hash: data.password_hash,
            name: data.name,
            created_at: now,
            updated_at: now,
        };
        inner.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        Ok(self.read().users.get(&id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(self
            .read()
            .users
            .values()
            .find(|u| u.email == email)
            .cloned())
    }
}

#[async_trait]
impl Store for MemStore {
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn attrs(value: JsonValue) -> AttrMap {
        value.as_object().expect("object literal").clone()
    }

    #[tokio::test]
    async fn test_project_crud_roundtrip() {
        let store = MemStore::new();
        let owner = Uuid::new_v4();

        let project = store
            .create_project(CreateProject {
                owner,
                attributes: attrs(json!({"name": "Website"})),
            })
            .await
            .unwrap();

        let listed = store.list_projects_by_owner(owner).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, project.id);

        let updated = store
            .update_project_by_id(project.id, attrs(json!({"name": "Renamed"})))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.attributes["name"], "Renamed");

        assert!(store.delete_project_by_id(project.id).await.unwrap());
        assert!(store
            .find_project_by_id(project.id)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_update_missing_project_returns_none() {
        let store = MemStore::new();
        let result = store
            .update_project_by_id(Uuid::new_v4(), AttrMap::new())
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_delete_tasks_by_project_counts() {
        let store = MemStore::new();
        let project_id = Uuid::new_v4();
        let other_project = Uuid::new_v4();

        for _ in 0..3 {
            store
                .create_task(CreateTask {
                    project_id,
                    attributes: AttrMap::new(),
                })
                .await
                .unwrap();
        }
        let keeper = store
            .create_task(CreateTask {
                project_id: other_project,
                attributes: AttrMap::new(),
            })
            .await
            .unwrap();

        let removed = store.delete_tasks_by_project(project_id).await.unwrap();
        assert_eq!(removed, 3);

        // Tasks of other projects are untouched.
        assert!(store.find_task_by_id(keeper.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let store = MemStore::new();
        let data = CreateUser {
            email: "user@example.com".to_string(),
            password_hash: "hash".to_string(),
            name: None,
        };

        store.create_user(data.clone()).await.unwrap();
        let err = store.create_user(data).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
    }
}
