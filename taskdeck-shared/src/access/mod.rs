/// Ownership-scoped access services
///
/// This module is the authorization core of Taskdeck. Every operation on a
/// project or task goes through one of two services:
///
/// - [`project::ProjectAccess`]: resolves a project and enforces that the
///   requesting user is its owner
/// - [`task::TaskAccess`]: resolves a task, resolves its parent project, and
///   enforces ownership transitively through the parent
///
/// The services sit between the HTTP handlers (which supply a verified user
/// ID from the auth middleware) and the store (which knows nothing about
/// ownership). Authorization failures are deliberate, typed outcomes — never
/// swallowed, never retried.
///
/// # Ownership comparison
///
/// Every ownership decision in this module reduces to
/// [`Project::is_owned_by`](crate::models::project::Project::is_owned_by):
/// typed `Uuid` equality on both sides. There is exactly one comparison site
/// per service path and no string coercion anywhere.

pub mod project;
pub mod task;

use uuid::Uuid;

use crate::store::StoreError;

/// Error type for access-layer operations
///
/// `NotFound`-class and `Forbidden`-class variants are expected outcomes
/// produced by authorization checks; `Store` wraps unexpected backend
/// failures and maps to an internal error at the HTTP boundary.
#[derive(Debug, thiserror::Error)]
pub enum AccessError {
    /// No project with this ID exists
    #[error("project {0} not found")]
    ProjectNotFound(Uuid),

    /// No task with this ID exists
    #[error("task {0} not found")]
    TaskNotFound(Uuid),

    /// The task exists but its parent project does not (orphaned task, a
    /// data-integrity anomaly left by an interrupted cascade)
    #[error("no parent project found for task {0}")]
    ParentProjectMissing(Uuid),

    /// The resource exists but the caller is not its effective owner
    #[error("not authorized to access this resource")]
    NotOwner,

    /// Unexpected store failure
    #[error(transparent)]
    Store(#[from] StoreError),
}
