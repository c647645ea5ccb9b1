/// Project access service
///
/// Mediates every operation on a single project, enforcing identity-based
/// ownership. Handlers never touch the project store directly.
///
/// # Authorization model
///
/// `list` filters by owner at the store, so there is nothing further to
/// check. Every other operation resolves the project first and then compares
/// its owner against the caller: absent → `ProjectNotFound`, wrong owner →
/// `NotOwner`. The existence check runs before the ownership check, so a
/// caller probing someone else's project ID learns that it exists but
/// nothing more — matching the behavior of the rest of the API surface.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use taskdeck_shared::access::project::ProjectAccess;
/// use taskdeck_shared::models::AttrMap;
/// use taskdeck_shared::store::memory::MemStore;
/// use uuid::Uuid;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let projects = ProjectAccess::new(Arc::new(MemStore::new()));
/// let user_id = Uuid::new_v4();
///
/// let project = projects.create(user_id, AttrMap::new()).await?;
/// assert_eq!(project.owner, user_id);
/// # Ok(())
/// # }
/// ```

use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use super::AccessError;
use crate::models::{
    project::{CreateProject, Project},
    AttrMap,
};
use crate::store::Store;

/// Ownership-scoped operations on projects
#[derive(Clone)]
pub struct ProjectAccess {
    store: Arc<dyn Store>,
}

impl ProjectAccess {
    /// Creates the service over a store.
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Lists all projects owned by `user_id`.
    ///
    /// The owner filter happens at the store; no project belonging to
    /// another user can appear in the result.
    pub async fn list(&self, user_id: Uuid) -> Result<Vec<Project>, AccessError> {
        Ok(self.store.list_projects_by_owner(user_id).await?)
    }

    /// Resolves a project and verifies the caller owns it.
    ///
    /// # Errors
    ///
    /// - `ProjectNotFound` if no project with `project_id` exists
    /// - `NotOwner` if it exists but `user_id` is not its owner
    pub async fn get(&self, project_id: Uuid, user_id: Uuid) -> Result<Project, AccessError> {
        let project = self
            .store
            .find_project_by_id(project_id)
            .await?
            .ok_or(AccessError::ProjectNotFound(project_id))?;

        if !project.is_owned_by(user_id) {
            debug!(%project_id, %user_id, "project ownership check failed");
            return Err(AccessError::NotOwner);
        }

        Ok(project)
    }

    /// Creates a project owned by `user_id`.
    ///
    /// The owner always comes from the verified identity; any ownership key
    /// in `attributes` is stripped before the store sees it.
    pub async fn create(
        &self,
        user_id: Uuid,
        attributes: AttrMap,
    ) -> Result<Project, AccessError> {
        let project = self
            .store
            .create_project(CreateProject {
                owner: user_id,
                attributes: Project::sanitize(attributes),
            })
            .await?;

        debug!(project_id = %project.id, owner = %user_id, "project created");
        Ok(project)
    }

    /// Partially updates a project the caller owns.
    ///
    /// `attributes` is applied as a shallow merge; the owner field is not
    /// part of the attribute bag and cannot be changed by any patch. The
    /// check-then-write sequence is not atomic: if the project vanishes
    /// between the two store calls this returns `ProjectNotFound`.
    pub async fn update(
        &self,
        project_id: Uuid,
        user_id: Uuid,
        attributes: AttrMap,
    ) -> Result<Project, AccessError> {
        self.get(project_id, user_id).await?;

        self.store
            .update_project_by_id(project_id, Project::sanitize(attributes))
            .await?
            .ok_or(AccessError::ProjectNotFound(project_id))
    }

    /// Deletes a project the caller owns, cascading over its tasks.
    ///
    /// The cascade is two sequential store calls with no transaction around
    /// them: all child tasks first, then the project row. A crash between
    /// the two leaves the project without tasks (harmless); a partial
    /// failure inside the first can leave orphaned tasks, which later
    /// surface as `ParentProjectMissing` on access.
    pub async fn delete(&self, project_id: Uuid, user_id: Uuid) -> Result<(), AccessError> {
        self.get(project_id, user_id).await?;

        let removed = self.store.delete_tasks_by_project(project_id).await?;
        self.store.delete_project_by_id(project_id).await?;

        debug!(%project_id, tasks_removed = removed, "project deleted with cascade");
        Ok(())
    }
}
