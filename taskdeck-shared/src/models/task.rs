/// Task model
///
/// A task belongs to exactly one project and has no owner field of its own:
/// its effective owner is the owner of its parent project, and every access
/// decision resolves through that parent. The parent binding (`project_id`)
/// is assigned at creation from the request path and is immutable afterward.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE tasks (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     project_id UUID NOT NULL,
///     attributes JSONB NOT NULL DEFAULT '{}',
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// There is deliberately no foreign key from `project_id` to `projects`:
/// referential integrity between tasks and projects is enforced by the
/// application-level cascade, and a task whose parent row has vanished must
/// remain representable (it surfaces as `NotFound`, see the access layer).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use uuid::Uuid;

use super::{strip_reserved, AttrMap};

/// Attribute keys that name identity or the parent binding. `project` is
/// stripped alongside `project_id` so the parent cannot be changed under an
/// alternate spelling.
const RESERVED_KEYS: &[&str] = &["id", "project", "project_id", "created_at", "updated_at"];

/// Task entity
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Unique task ID
    pub id: Uuid,

    /// Owning project. Immutable after creation.
    pub project_id: Uuid,

    /// Caller-controlled attribute bag (JSON object)
    pub attributes: JsonValue,

    /// When the task was created
    pub created_at: DateTime<Utc>,

    /// When the task was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new task
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTask {
    /// Owning project, taken from the request path after the parent's
    /// ownership has been verified
    pub project_id: Uuid,

    /// Initial attribute bag (already sanitized)
    pub attributes: AttrMap,
}

impl Task {
    /// Strips reserved keys from a caller-supplied attribute object.
    ///
    /// A patch carrying `{"project_id": <other>}` (or `{"project": <other>}`)
    /// therefore cannot move a task between projects.
    pub fn sanitize(attrs: AttrMap) -> AttrMap {
        strip_reserved(attrs, RESERVED_KEYS)
    }
}
