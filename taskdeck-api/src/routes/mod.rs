/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Health check endpoint
/// - `auth`: Authentication endpoints (register, login, refresh)
/// - `projects`: Ownership-scoped project CRUD
/// - `tasks`: Ownership-scoped task CRUD (transitive through the parent project)

pub mod auth;
pub mod health;
pub mod projects;
pub mod tasks;
