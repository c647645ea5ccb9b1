/// Authentication primitives
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and strength validation
/// - [`jwt`]: JWT token generation and validation
/// - [`middleware`]: Request context and errors for the HTTP auth guard
///
/// The guard itself (an axum middleware layer) lives in the API crate, where
/// the application state is; this module supplies the pieces it composes:
/// token validation and the [`middleware::AuthContext`] injected into request
/// extensions after a successful check.

pub mod jwt;
pub mod middleware;
pub mod password;
