/// Entity models for Taskdeck
///
/// This module contains the persistent entity types and the helpers that
/// operate on their attribute bags.
///
/// # Models
///
/// - `user`: User accounts backing the identity layer
/// - `project`: Top-level resources, each owned by exactly one user
/// - `task`: Nested resources, each belonging to exactly one project
///
/// Projects and tasks carry a caller-controlled JSON object (the "attribute
/// bag") next to their typed identity columns. Identity and ownership are
/// never stored inside the bag; the reserved key names are stripped on the
/// way in (see [`project::Project::sanitize`] and [`task::Task::sanitize`]).

pub mod project;
pub mod task;
pub mod user;

use serde_json::{Map, Value};

/// Caller-supplied attribute object for creates and partial updates.
pub type AttrMap = Map<String, Value>;

/// Applies `patch` to `base` as a shallow merge.
///
/// Top-level keys present in `patch` replace (or add to) the corresponding
/// keys in `base`; keys absent from `patch` are left untouched. Values are
/// not merged recursively, matching the semantics of Postgres JSONB `||`.
///
/// If `base` is not a JSON object it is replaced by one.
pub fn merge_attributes(base: &mut Value, patch: &AttrMap) {
    if !base.is_object() {
        *base = Value::Object(Map::new());
    }
    let target = base.as_object_mut().expect("base coerced to object above");
    for (key, value) in patch {
        target.insert(key.clone(), value.clone());
    }
}

/// Removes the given reserved keys from an attribute bag.
///
/// Shared implementation behind the per-entity `sanitize` functions.
pub(crate) fn strip_reserved(mut attrs: AttrMap, reserved: &[&str]) -> AttrMap {
    for key in reserved {
        attrs.remove(*key);
    }
    attrs
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(value: Value) -> AttrMap {
        value.as_object().expect("object literal").clone()
    }

    #[test]
    fn test_merge_replaces_and_preserves_keys() {
        let mut base = json!({"name": "Website", "status": "active"});
        let patch = map(json!({"status": "archived", "color": "blue"}));

        merge_attributes(&mut base, &patch);

        assert_eq!(base["name"], "Website");
        assert_eq!(base["status"], "archived");
        assert_eq!(base["color"], "blue");
    }

    #[test]
    fn test_merge_is_shallow() {
        let mut base = json!({"meta": {"a": 1, "b": 2}});
        let patch = map(json!({"meta": {"a": 9}}));

        merge_attributes(&mut base, &patch);

        // Nested objects are replaced wholesale, not merged.
        assert_eq!(base["meta"], json!({"a": 9}));
    }

    #[test]
    fn test_merge_with_empty_patch_is_noop() {
        let mut base = json!({"name": "Website"});
        merge_attributes(&mut base, &AttrMap::new());
        assert_eq!(base, json!({"name": "Website"}));
    }

    #[test]
    fn test_merge_coerces_non_object_base() {
        let mut base = Value::Null;
        let patch = map(json!({"name": "Website"}));

        merge_attributes(&mut base, &patch);

        assert_eq!(base, json!({"name": "Website"}));
    }

    #[test]
    fn test_strip_reserved() {
        let attrs = map(json!({"name": "ok", "id": "spoofed", "user": "spoofed"}));
        let cleaned = strip_reserved(attrs, &["id", "user"]);

        assert_eq!(cleaned.len(), 1);
        assert!(cleaned.contains_key("name"));
    }
}
