//! Node-row normalization: flattened scalar fields → editable JSON text.

use crate::types::NodeRow;
use serde_json::{Map, Value};

/// Render a node's rows as canonical JSON text for display and editing.
///
/// - No rows → `{}`.
/// - Exactly one keyless row → that value rendered bare (a root scalar
///   node; strings come out JSON-quoted).
/// - Otherwise → an object built from the keyed scalar rows, rendered with
///   two-space indentation. Container-kind rows are dropped: nested
///   structure is presented elsewhere in the tree, not inlined here.
///
/// Pure; the inverse is simply re-parsing the returned text.
pub fn normalize_rows(rows: &[NodeRow]) -> String {
    if rows.is_empty() {
        return "{}".to_string();
    }
    if rows.len() == 1 && rows[0].key.is_none() {
        return serde_json::to_string(&rows[0].value).unwrap_or_default();
    }
    let mut obj = Map::new();
    for row in rows {
        if row.kind.is_container() {
            continue;
        }
        if let Some(key) = &row.key {
            obj.insert(key.clone(), row.value.clone());
        }
    }
    serde_json::to_string_pretty(&Value::Object(obj)).unwrap_or_default()
}
