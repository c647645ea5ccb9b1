/// PostgreSQL store backend
///
/// Implements the store traits on top of sqlx/Postgres. Attribute bags live
/// in JSONB columns; partial updates use the JSONB `||` operator so the merge
/// happens in a single statement on the server.
///
/// # Example
///
/// ```no_run
/// use taskdeck_shared::store::postgres::{DatabaseConfig, PgStore};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store = PgStore::connect(DatabaseConfig {
///     url: "postgresql://localhost/taskdeck".to_string(),
///     ..Default::default()
/// })
/// .await?;
///
/// store.run_migrations().await?;
/// # Ok(())
/// # }
/// ```

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;
use tracing::info;
use uuid::Uuid;

use super::{ProjectStore, Store, StoreError, TaskStore, UserStore};
use crate::models::{
    project::{CreateProject, Project},
    task::{CreateTask, Task},
    user::{CreateUser, User},
    AttrMap,
};

/// Connection pool configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// How long to wait for a connection before failing the request
    pub acquire_timeout: Duration,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "postgresql://localhost/taskdeck".to_string(),
            max_connections: 10,
            acquire_timeout: Duration::from_secs(5),
        }
    }
}

/// sqlx/PostgreSQL implementation of [`Store`]
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Connects to Postgres and builds the connection pool.
    pub async fn connect(config: DatabaseConfig) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout)
            .connect(&config.url)
            .await
            .map_err(map_sqlx_error)?;

        info!(
            max_connections = config.max_connections,
            "database pool created"
        );

        Ok(Self { pool })
    }

    /// Wraps an existing pool (used when the caller manages the pool itself).
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Runs the embedded schema migrations.
    pub async fn run_migrations(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| StoreError::Backend(format!("migration failed: {}", e)))?;

        info!("database migrations applied");
        Ok(())
    }

    /// Returns the underlying pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Maps sqlx errors into the store taxonomy.
///
/// Unique constraint violations become `Conflict`; everything else is an
/// opaque `Backend` failure.
fn map_sqlx_error(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(ref db_err) = err {
        if db_err.is_unique_violation() {
            return StoreError::Conflict(
                db_err
                    .constraint()
                    .map(|c| format!("unique constraint {} violated", c))
                    .unwrap_or_else(|| "unique constraint violated".to_string()),
            );
        }
    }
    StoreError::Backend(format!("database error: {}", err))
}

#[async_trait]
impl ProjectStore for PgStore {
    async fn list_projects_by_owner(&self, owner: Uuid) -> Result<Vec<Project>, StoreError> {
        sqlx::query_as::<_, Project>(
            r#"
            SELECT id, owner_id AS owner, attributes, created_at, updated_at
            FROM projects
            WHERE owner_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(owner)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)
    }

    async fn find_project_by_id(&self, id: Uuid) -> Result<Option<Project>, StoreError> {
        sqlx::query_as::<_, Project>(
            r#"
            SELECT id, owner_id AS owner, attributes, created_at, updated_at
            FROM projects
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)
    }

    async fn create_project(&self, data: CreateProject) -> Result<Project, StoreError> {
        sqlx::query_as::<_, Project>(
            r#"
            INSERT INTO projects (owner_id, attributes)
            VALUES ($1, $2)
            RETURNING id, owner_id AS owner, attributes, created_at, updated_at
            "#,
        )
        .bind(data.owner)
        .bind(JsonValue::Object(data.attributes))
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)
    }

    async fn update_project_by_id(
        &self,
        id: Uuid,
        patch: AttrMap,
    ) -> Result<Option<Project>, StoreError> {
        sqlx::query_as::<_, Project>(
            r#"
            UPDATE projects
            SET attributes = attributes || $2,
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, owner_id AS owner, attributes, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(JsonValue::Object(patch))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)
    }

    async fn delete_project_by_id(&self, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl TaskStore for PgStore {
    async fn list_tasks_by_project(&self, project_id: Uuid) -> Result<Vec<Task>, StoreError> {
        sqlx::query_as::<_, Task>(
            r#"
            SELECT id, project_id, attributes, created_at, updated_at
            FROM tasks
            WHERE project_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(project_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)
    }

    async fn find_task_by_id(&self, id: Uuid) -> Result<Option<Task>, StoreError> {
        sqlx::query_as::<_, Task>(
            r#"
            SELECT id, project_id, attributes, created_at, updated_at
            FROM tasks
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)
    }

    async fn create_task(&self, data: CreateTask) -> Result<Task, StoreError> {
        sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (project_id, attributes)
            VALUES ($1, $2)
            RETURNING id, project_id, attributes, created_at, updated_at
            "#,
        )
        .bind(data.project_id)
        .bind(JsonValue::Object(data.attributes))
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)
    }

    async fn update_task_by_id(
        &self,
        id: Uuid,
        patch: AttrMap,
    ) -> Result<Option<Task>, StoreError> {
        sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET attributes = attributes || $2,
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, project_id, attributes, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(JsonValue::Object(patch))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)
    }

    async fn delete_task_by_id(&self, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_tasks_by_project(&self, project_id: Uuid) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM tasks WHERE project_id = $1")
            .bind(project_id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(result.rows_affected())
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn create_user(&self, data: CreateUser) -> Result<User, StoreError> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, password_hash, name)
            VALUES ($1, $2, $3)
            RETURNING id, email, password_hash, name, created_at, updated_at
            "#,
        )
        .bind(data.email)
        .bind(data.password_hash)
        .bind(data.name)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)
    }

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, name, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, name, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)
    }
}

#[async_trait]
impl Store for PgStore {
    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(())
    }
}
