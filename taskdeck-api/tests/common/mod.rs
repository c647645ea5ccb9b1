/// Common test utilities for integration tests
///
/// This module provides shared infrastructure for the end-to-end suite:
/// - An in-memory store, so tests run without infrastructure
/// - Test user creation and JWT token generation
/// - Request building and response decoding helpers

use axum::body::Body;
use axum::http::Request;
use std::sync::Arc;
use taskdeck_api::app::{build_router, AppState};
use taskdeck_api::config::{ApiConfig, Config, DatabaseConfig, JwtConfig};
use taskdeck_shared::auth::jwt::{create_token, Claims, TokenType};
use taskdeck_shared::models::user::{CreateUser, User};
use taskdeck_shared::store::{memory::MemStore, UserStore};
use tower::Service as _;
use uuid::Uuid;

/// Test context containing all necessary resources
pub struct TestContext {
    pub store: Arc<MemStore>,
    pub app: axum::Router,
    pub config: Config,
    pub user: User,
    pub jwt_token: String,
}

impl TestContext {
    /// Creates a new test context with a fresh in-memory store and one
    /// authenticated user.
    pub async fn new() -> anyhow::Result<Self> {
        let config = test_config();
        let store = Arc::new(MemStore::new());

        // Create test user directly in the store; the auth flow has its own
        // tests, CRUD tests just need an identity.
        let user = store
            .create_user(CreateUser {
                email: format!("test-{}@example.com", Uuid::new_v4()),
                password_hash: "test_hash".to_string(),
                name: Some("Test User".to_string()),
            })
            .await?;

        // Generate JWT token
        let claims = Claims::new(user.id, TokenType::Access);
        let jwt_token = create_token(&claims, &config.jwt.secret)?;

        // Build app
        let state = AppState::new(store.clone(), config.clone());
        let app = build_router(state);

        Ok(TestContext {
            store,
            app,
            config,
            user,
            jwt_token,
        })
    }

    /// Returns the authorization header value for the context user.
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.jwt_token)
    }

    /// Creates another user with their own token (for cross-user tests).
    pub async fn other_user(&self) -> anyhow::Result<(User, String)> {
        let user = self
            .store
            .create_user(CreateUser {
                email: format!("other-{}@example.com", Uuid::new_v4()),
                password_hash: "test_hash".to_string(),
                name: None,
            })
            .await?;

        let claims = Claims::new(user.id, TokenType::Access);
        let token = create_token(&claims, &self.config.jwt.secret)?;
        Ok((user, format!("Bearer {}", token)))
    }

    /// Sends a request through the router.
    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        auth: Option<&str>,
        body: Option<serde_json::Value>,
    ) -> axum::response::Response {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(auth) = auth {
            builder = builder.header("authorization", auth);
        }

        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        self.app.clone().call(request).await.unwrap()
    }
}

/// Decodes a response body as JSON.
pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Hermetic configuration; no environment variables involved.
fn test_config() -> Config {
    Config {
        api: ApiConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            cors_origins: vec!["*".to_string()],
        },
        database: DatabaseConfig {
            url: "unused-in-tests".to_string(),
            max_connections: 1,
        },
        jwt: JwtConfig {
            secret: "integration-test-secret-at-least-32-bytes".to_string(),
        },
    }
}
