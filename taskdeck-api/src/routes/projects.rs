/// Project endpoints
///
/// Ownership-scoped CRUD over projects. Every handler receives the verified
/// identity injected by the JWT guard and delegates to the access layer; no
/// authorization decision is made here.
///
/// # Endpoints
///
/// - `GET    /v1/projects` - List caller's projects
/// - `POST   /v1/projects` - Create project
/// - `GET    /v1/projects/:project_id` - Get owned project
/// - `PUT    /v1/projects/:project_id` - Partial-merge update
/// - `DELETE /v1/projects/:project_id` - Delete with task cascade
///
/// Request bodies for create/update are plain JSON objects — the attribute
/// bag. Reserved keys (`id`, `owner`, `user`, timestamps) are stripped by
/// the access layer, so a payload cannot assign ownership.

use crate::{app::AppState, error::ApiResult};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use taskdeck_shared::{auth::middleware::AuthContext, models::project::Project, models::AttrMap};
use uuid::Uuid;

/// List projects owned by the caller
///
/// # Endpoint
///
/// ```text
/// GET /v1/projects
/// Authorization: Bearer <jwt_token>
/// ```
pub async fn list_projects(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<Vec<Project>>> {
    let projects = state.projects.list(auth.user_id).await?;
    Ok(Json(projects))
}

/// Create a project
///
/// The new project is owned by the caller; any ownership key in the body is
/// ignored.
///
/// # Endpoint
///
/// ```text
/// POST /v1/projects
/// Authorization: Bearer <jwt_token>
/// Content-Type: application/json
///
/// {
///   "name": "Website Redesign",
///   "color": "blue"
/// }
/// ```
///
/// # Errors
///
/// - `401 Unauthorized`: Missing or invalid token
pub async fn create_project(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(attributes): Json<AttrMap>,
) -> ApiResult<(StatusCode, Json<Project>)> {
    let project = state.projects.create(auth.user_id, attributes).await?;
    Ok((StatusCode::CREATED, Json(project)))
}

/// Get a project by ID
///
/// # Errors
///
/// - `404 Not Found`: No project with this ID
/// - `403 Forbidden`: Project belongs to another user
pub async fn get_project(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(project_id): Path<Uuid>,
) -> ApiResult<Json<Project>> {
    let project = state.projects.get(project_id, auth.user_id).await?;
    Ok(Json(project))
}

/// Partially update a project
///
/// Top-level keys in the body are merged into the attribute bag; keys not
/// present are left untouched. Ownership cannot be changed.
///
/// # Errors
///
/// - `404 Not Found`: No project with this ID
/// - `403 Forbidden`: Project belongs to another user
pub async fn update_project(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(project_id): Path<Uuid>,
    Json(attributes): Json<AttrMap>,
) -> ApiResult<Json<Project>> {
    let project = state
        .projects
        .update(project_id, auth.user_id, attributes)
        .await?;
    Ok(Json(project))
}

/// Delete a project and all of its tasks
///
/// Cascades over every task referencing the project, then deletes the
/// project itself. Returns no content.
///
/// # Errors
///
/// - `404 Not Found`: No project with this ID
/// - `403 Forbidden`: Project belongs to another user
pub async fn delete_project(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(project_id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state.projects.delete(project_id, auth.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
