/// Document-store abstraction
///
/// Persistence is an external collaborator behind object-safe async traits:
/// the access layer (and everything above it) only ever sees `Arc<dyn Store>`
/// and cannot tell a Postgres pool from a HashMap. Each entity gets its own
/// repository trait with the operations the system actually performs:
///
/// - find-by-filter (`list_by_*`)
/// - find-by-id
/// - create
/// - update-by-id (shallow merge into the attribute bag)
/// - delete-by-id
/// - delete-by-filter (`delete_by_project`, the task cascade step)
///
/// # Backends
///
/// - [`postgres::PgStore`]: sqlx/PostgreSQL with JSONB attribute bags
/// - [`memory::MemStore`]: HashMap-backed, for tests and demos
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use taskdeck_shared::store::{memory::MemStore, Store};
///
/// let store: Arc<dyn Store> = Arc::new(MemStore::new());
/// ```

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{
    project::{CreateProject, Project},
    task::{CreateTask, Task},
    user::{CreateUser, User},
    AttrMap,
};

/// Error type for store operations
///
/// The store only distinguishes what the layers above can act on: a unique
/// constraint violation (`Conflict`, surfaced as 409) versus everything else
/// (`Backend`, surfaced as 500 without internal detail).
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Unique constraint violation (e.g. duplicate email)
    #[error("conflict: {0}")]
    Conflict(String),

    /// Any other backend failure
    #[error("store backend error: {0}")]
    Backend(String),
}

/// Repository operations for projects
#[async_trait]
pub trait ProjectStore: Send + Sync {
    /// Returns all projects owned by `owner`, newest first.
    async fn list_projects_by_owner(&self, owner: Uuid) -> Result<Vec<Project>, StoreError>;

    /// Finds a project by ID.
    async fn find_project_by_id(&self, id: Uuid) -> Result<Option<Project>, StoreError>;

    /// Creates a project and returns it with store-assigned fields filled in.
    async fn create_project(&self, data: CreateProject) -> Result<Project, StoreError>;

    /// Shallow-merges `patch` into the project's attribute bag.
    ///
    /// Returns `None` if no project with that ID exists (including the case
    /// where it was deleted between an ownership check and this call).
    async fn update_project_by_id(
        &self,
        id: Uuid,
        patch: AttrMap,
    ) -> Result<Option<Project>, StoreError>;

    /// Deletes a project row. Returns whether a row was removed.
    ///
    /// This is the raw single-document delete; the task cascade lives in the
    /// access layer, not here.
    async fn delete_project_by_id(&self, id: Uuid) -> Result<bool, StoreError>;
}

/// Repository operations for tasks
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Returns all tasks belonging to `project_id`, newest first.
    async fn list_tasks_by_project(&self, project_id: Uuid) -> Result<Vec<Task>, StoreError>;

    /// Finds a task by ID.
    async fn find_task_by_id(&self, id: Uuid) -> Result<Option<Task>, StoreError>;

    /// Creates a task and returns it with store-assigned fields filled in.
    async fn create_task(&self, data: CreateTask) -> Result<Task, StoreError>;

    /// Shallow-merges `patch` into the task's attribute bag.
    async fn update_task_by_id(&self, id: Uuid, patch: AttrMap)
        -> Result<Option<Task>, StoreError>;

    /// Deletes a task row. Returns whether a row was removed.
    async fn delete_task_by_id(&self, id: Uuid) -> Result<bool, StoreError>;

    /// Deletes every task belonging to `project_id`, returning the count.
    ///
    /// The delete-many half of the project cascade.
    async fn delete_tasks_by_project(&self, project_id: Uuid) -> Result<u64, StoreError>;
}

/// Repository operations for users
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Creates a user. A duplicate email yields `StoreError::Conflict`.
    async fn create_user(&self, data: CreateUser) -> Result<User, StoreError>;

    /// Finds a user by ID.
    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError>;

    /// Finds a user by email (exact match).
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
}

/// The complete store surface consumed by the application
#[async_trait]
pub trait Store: ProjectStore + TaskStore + UserStore {
    /// Cheap connectivity probe for health checks.
    async fn ping(&self) -> Result<(), StoreError>;
}
