/// Task access service
///
/// Mediates every operation on a task. Tasks carry no owner of their own, so
/// every decision resolves the parent project and defers to its owner — the
/// transitive half of the ownership model.
///
/// Path-scoped operations (`list`, `create`) authorize through
/// [`ProjectAccess::get`] on the project ID from the request path and
/// propagate its errors unchanged. ID-scoped operations (`get`, `update`,
/// `delete`) resolve the task first, then its parent by the task's stored
/// `project_id`; a missing parent is a data-integrity anomaly (orphaned
/// task) and surfaces as `ParentProjectMissing`, not as a silent success.

use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

use super::{project::ProjectAccess, AccessError};
use crate::models::{
    project::Project,
    task::{CreateTask, Task},
    AttrMap,
};
use crate::store::Store;

/// Ownership-scoped operations on tasks
#[derive(Clone)]
pub struct TaskAccess {
    store: Arc<dyn Store>,
    projects: ProjectAccess,
}

impl TaskAccess {
    /// Creates the service over a store.
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            projects: ProjectAccess::new(store.clone()),
            store,
        }
    }

    /// Lists all tasks of a project the caller owns.
    ///
    /// Propagates `ProjectNotFound`/`NotOwner` from the parent resolution.
    pub async fn list(&self, project_id: Uuid, user_id: Uuid) -> Result<Vec<Task>, AccessError> {
        self.projects.get(project_id, user_id).await?;
        Ok(self.store.list_tasks_by_project(project_id).await?)
    }

    /// Resolves a task and verifies the caller owns its parent project.
    ///
    /// # Errors
    ///
    /// - `TaskNotFound` if no task with `task_id` exists
    /// - `ParentProjectMissing` if the task exists but its parent does not
    /// - `NotOwner` if the parent exists and belongs to someone else
    pub async fn get(&self, task_id: Uuid, user_id: Uuid) -> Result<Task, AccessError> {
        let task = self
            .store
            .find_task_by_id(task_id)
            .await?
            .ok_or(AccessError::TaskNotFound(task_id))?;

        self.resolve_parent(&task, user_id).await?;
        Ok(task)
    }

    /// Creates a task under a project the caller owns.
    ///
    /// The parent binding always comes from the request path; any parent key
    /// in `attributes` is stripped before the store sees it.
    pub async fn create(
        &self,
        project_id: Uuid,
        user_id: Uuid,
        attributes: AttrMap,
    ) -> Result<Task, AccessError> {
        self.projects.get(project_id, user_id).await?;

        let task = self
            .store
            .create_task(CreateTask {
                project_id,
                attributes: Task::sanitize(attributes),
            })
            .await?;

        debug!(task_id = %task.id, %project_id, "task created");
        Ok(task)
    }

    /// Partially updates a task whose parent the caller owns.
    ///
    /// `attributes` is applied as a shallow merge. The parent binding is not
    /// part of the attribute bag, so a patch naming another project cannot
    /// move the task.
    pub async fn update(
        &self,
        task_id: Uuid,
        user_id: Uuid,
        attributes: AttrMap,
    ) -> Result<Task, AccessError> {
        self.get(task_id, user_id).await?;

        self.store
            .update_task_by_id(task_id, Task::sanitize(attributes))
            .await?
            .ok_or(AccessError::TaskNotFound(task_id))
    }

    /// Deletes a task whose parent the caller owns and returns it.
    pub async fn delete(&self, task_id: Uuid, user_id: Uuid) -> Result<Task, AccessError> {
        let task = self.get(task_id, user_id).await?;
        self.store.delete_task_by_id(task_id).await?;

        debug!(%task_id, "task deleted");
        Ok(task)
    }

    /// Resolves the parent project of `task` and checks ownership.
    async fn resolve_parent(&self, task: &Task, user_id: Uuid) -> Result<Project, AccessError> {
        let project = self
            .store
            .find_project_by_id(task.project_id)
            .await?
            .ok_or_else(|| {
                warn!(task_id = %task.id, project_id = %task.project_id, "orphaned task");
                AccessError::ParentProjectMissing(task.id)
            })?;

        if !project.is_owned_by(user_id) {
            debug!(task_id = %task.id, %user_id, "task ownership check failed");
            return Err(AccessError::NotOwner);
        }

        Ok(project)
    }
}
