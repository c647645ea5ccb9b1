/// Project model
///
/// A project is a top-level resource owned by exactly one user. Ownership is
/// assigned at creation from the verified identity of the caller and never
/// changes afterward; the API exposes no operation that transfers a project
/// to another owner.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE projects (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     owner_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     attributes JSONB NOT NULL DEFAULT '{}',
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// # Example
///
/// ```
/// use taskdeck_shared::models::project::Project;
/// use serde_json::json;
///
/// let attrs = json!({"name": "Website Redesign", "owner": "spoofed"});
/// let cleaned = Project::sanitize(attrs.as_object().unwrap().clone());
///
/// // Reserved keys never reach the attribute bag.
/// assert!(!cleaned.contains_key("owner"));
/// assert!(cleaned.contains_key("name"));
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use uuid::Uuid;

use super::{strip_reserved, AttrMap};

/// Attribute keys that name identity or ownership and must never enter the
/// attribute bag. `user` is stripped alongside `owner` so ownership cannot be
/// smuggled in under an alternate spelling.
const RESERVED_KEYS: &[&str] = &["id", "owner", "user", "created_at", "updated_at"];

/// Project entity
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Project {
    /// Unique project ID
    pub id: Uuid,

    /// Owning user. Immutable after creation.
    pub owner: Uuid,

    /// Caller-controlled attribute bag (JSON object)
    pub attributes: JsonValue,

    /// When the project was created
    pub created_at: DateTime<Utc>,

    /// When the project was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProject {
    /// Owning user, taken from the verified identity of the caller
    pub owner: Uuid,

    /// Initial attribute bag (already sanitized)
    pub attributes: AttrMap,
}

impl Project {
    /// Checks whether `user_id` is the owner of this project.
    ///
    /// This is the single ownership comparison used everywhere in the access
    /// layer: typed `Uuid` equality on both sides, never a string form.
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.owner == user_id
    }

    /// Strips reserved keys from a caller-supplied attribute object.
    ///
    /// Applied to both create and update payloads before they reach the
    /// store, so the identity and ownership of a project are always derived
    /// from the request context rather than the request body.
    pub fn sanitize(attrs: AttrMap) -> AttrMap {
        strip_reserved(attrs, RESERVED_KEYS)
    }
}
