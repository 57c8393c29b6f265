//! Formatting-preserving, path-addressed JSON mutation.
//!
//! Given JSON document text, a path addressing a node inside it, and
//! replacement JSON text, [`mutate`] returns updated document text where
//! everything outside the minimal edited region is byte-identical —
//! whitespace, key order, and layout of untouched nodes survive.
//!
//! When both the addressed node and the proposed value are objects the
//! proposed keys are reconciled into the target one by one (a key-level
//! merge); in every other pairing the whole subtree is replaced. The
//! engine is stateless and synchronous: text in, text out, nothing cached
//! between calls. Callers own the document store, any mirrored views, and
//! the serialization of concurrent mutation requests.

mod edit;
pub mod merge;
mod render;
mod scan;
pub mod rows;
pub mod types;

pub use json_node_path::{
    locate, parse_display_string, to_display_string, validate, PathError, PathSegment,
};
pub use merge::{decide, Strategy};
pub use rows::normalize_rows;
pub use types::{JsonKind, MutationError, NodeRow, TextEdit};

use serde_json::Value;

/// Apply one mutation to `document_text`, returning the new text.
///
/// `proposed_json_text` must be valid JSON; if it is not,
/// [`MutationError::InvalidInput`] is returned before anything else
/// happens. `document_text` failing to parse is a caller-side invariant
/// violation reported as [`MutationError::Parse`]. Path-not-found is not
/// an error: it routes to replace semantics. The call either returns a
/// complete new text or an error with no intermediate state.
pub fn mutate(
    document_text: &str,
    path: &[PathSegment],
    proposed_json_text: &str,
) -> Result<String, MutationError> {
    let proposed: Value = serde_json::from_str(proposed_json_text)
        .map_err(|e| MutationError::InvalidInput(e.to_string()))?;
    let document: Value = serde_json::from_str(document_text)
        .map_err(|e| MutationError::Parse(e.to_string()))?;

    let target = locate(&document, path);
    match (decide(target, &proposed), &proposed) {
        (Strategy::Merge, Value::Object(entries)) => {
            // Each per-key edit shifts offsets after it, so every edit is
            // computed against the text the previous one produced.
            let mut working = document_text.to_string();
            for (key, value) in entries {
                let mut key_path = path.to_vec();
                key_path.push(PathSegment::Key(key.clone()));
                working = edit::set_at_path(&working, &key_path, value)?;
            }
            Ok(working)
        }
        _ => edit::set_at_path(document_text, path, &proposed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn key(k: &str) -> PathSegment {
        PathSegment::Key(k.to_string())
    }

    #[test]
    fn merge_adds_key_and_keeps_existing() {
        let out = mutate(r#"{"a": 1}"#, &[], r#"{"b": 2}"#).unwrap();
        assert_eq!(out, r#"{"a": 1, "b": 2}"#);
    }

    #[test]
    fn replace_array_target_with_object() {
        let out = mutate(r#"{"xs": [1, 2, 3]}"#, &[key("xs")], r#"{"b": 2}"#).unwrap();
        let parsed: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed["xs"], json!({"b": 2}));
    }

    #[test]
    fn root_scalar_replace() {
        let out = mutate(r#"{"a": 1}"#, &[], "42").unwrap();
        assert_eq!(out.trim(), "42");
    }

    #[test]
    fn invalid_proposed_text_is_rejected_up_front() {
        let err = mutate(r#"{"a": 1}"#, &[], "{invalid").unwrap_err();
        assert!(matches!(err, MutationError::InvalidInput(_)));
    }

    #[test]
    fn unparseable_document_is_a_parse_error() {
        let err = mutate("{broken", &[], "1").unwrap_err();
        assert!(matches!(err, MutationError::Parse(_)));
    }

    #[test]
    fn merge_updates_existing_key_in_place() {
        let out = mutate(r#"{"a": 1, "b": 2}"#, &[], r#"{"a": 9}"#).unwrap();
        assert_eq!(out, r#"{"a": 9, "b": 2}"#);
    }

    #[test]
    fn merge_at_nested_path() {
        let doc = r#"{"user": {"name": "Ada", "age": 36}}"#;
        let out = mutate(doc, &[key("user")], r#"{"age": 37}"#).unwrap();
        assert_eq!(out, r#"{"user": {"name": "Ada", "age": 37}}"#);
    }

    #[test]
    fn absent_target_replaces_not_merges() {
        // Path does not exist: the proposed object lands whole.
        let out = mutate(r#"{"a": 1}"#, &[key("new")], r#"{"b": 2}"#).unwrap();
        assert_eq!(out, r#"{"a": 1, "new": {"b":2}}"#);
    }

    #[test]
    fn proposed_array_replaces_object_target() {
        let out = mutate(r#"{"a": {"x": 1}}"#, &[key("a")], "[1]").unwrap();
        let parsed: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed["a"], json!([1]));
    }

    #[test]
    fn root_array_target_never_merges() {
        let out = mutate("[1, 2, 3]", &[], r#"{"b": 2}"#).unwrap();
        let parsed: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed, json!({"b": 2}));
    }
}
