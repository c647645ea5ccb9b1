/// Task endpoints
///
/// Ownership-scoped CRUD over tasks. Authorization is transitive: the access
/// layer resolves each task's parent project and defers to its owner. The
/// collection endpoints are nested under the parent project path; the
/// by-id endpoints take a bare task ID.
///
/// # Endpoints
///
/// - `GET    /v1/projects/:project_id/tasks` - List tasks of an owned project
/// - `POST   /v1/projects/:project_id/tasks` - Create task under an owned project
/// - `GET    /v1/tasks/:task_id` - Get task
/// - `PUT    /v1/tasks/:task_id` - Partial-merge update
/// - `DELETE /v1/tasks/:task_id` - Delete, returns the deleted task

use crate::{app::AppState, error::ApiResult};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use taskdeck_shared::{auth::middleware::AuthContext, models::task::Task, models::AttrMap};
use uuid::Uuid;

/// List tasks of a project the caller owns
///
/// # Endpoint
///
/// ```text
/// GET /v1/projects/:project_id/tasks
/// Authorization: Bearer <jwt_token>
/// ```
///
/// # Errors
///
/// - `404 Not Found`: No project with this ID
/// - `403 Forbidden`: Project belongs to another user
pub async fn list_tasks(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(project_id): Path<Uuid>,
) -> ApiResult<Json<Vec<Task>>> {
    let tasks = state.tasks.list(project_id, auth.user_id).await?;
    Ok(Json(tasks))
}

/// Create a task under a project the caller owns
///
/// The task is bound to the project from the path; any parent key in the
/// body is ignored.
///
/// # Endpoint
///
/// ```text
/// POST /v1/projects/:project_id/tasks
/// Authorization: Bearer <jwt_token>
/// Content-Type: application/json
///
/// {
///   "title": "Design mockups",
///   "done": false
/// }
/// ```
///
/// # Errors
///
/// - `404 Not Found`: No project with this ID
/// - `403 Forbidden`: Project belongs to another user
pub async fn create_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(project_id): Path<Uuid>,
    Json(attributes): Json<AttrMap>,
) -> ApiResult<(StatusCode, Json<Task>)> {
    let task = state
        .tasks
        .create(project_id, auth.user_id, attributes)
        .await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// Get a task by ID
///
/// # Errors
///
/// - `404 Not Found`: No task with this ID, or its parent project is missing
/// - `403 Forbidden`: Parent project belongs to another user
pub async fn get_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(task_id): Path<Uuid>,
) -> ApiResult<Json<Task>> {
    let task = state.tasks.get(task_id, auth.user_id).await?;
    Ok(Json(task))
}

/// Partially update a task
///
/// Top-level keys in the body are merged into the attribute bag. The parent
/// binding cannot be changed: a payload naming another project does not move
/// the task.
///
/// # Errors
///
/// - `404 Not Found`: No task with this ID, or its parent project is missing
/// - `403 Forbidden`: Parent project belongs to another user
pub async fn update_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(task_id): Path<Uuid>,
    Json(attributes): Json<AttrMap>,
) -> ApiResult<Json<Task>> {
    let task = state
        .tasks
        .update(task_id, auth.user_id, attributes)
        .await?;
    Ok(Json(task))
}

/// Delete a task
///
/// Returns the deleted task.
///
/// # Errors
///
/// - `404 Not Found`: No task with this ID, or its parent project is missing
/// - `403 Forbidden`: Parent project belongs to another user
pub async fn delete_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(task_id): Path<Uuid>,
) -> ApiResult<Json<Task>> {
    let task = state.tasks.delete(task_id, auth.user_id).await?;
    Ok(Json(task))
}
