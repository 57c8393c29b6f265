//! Read-only lookup of the value a path addresses.

use crate::path::PathSegment;
use serde_json::Value;

/// Walk `doc` one segment at a time and return the addressed value.
///
/// Returns `None` as soon as any lookup is absent; `Some(&Value::Null)`
/// means the path exists and holds `null`, which is a different outcome.
/// Absence is expected (a key the caller is about to create) and never an
/// error. Index segments applied to objects look up the decimal string key.
pub fn locate<'a>(doc: &'a Value, path: &[PathSegment]) -> Option<&'a Value> {
    let mut current = doc;
    for segment in path {
        current = match (current, segment) {
            (Value::Object(map), PathSegment::Key(k)) => map.get(k)?,
            (Value::Object(map), PathSegment::Index(i)) => map.get(&i.to_string())?,
            (Value::Array(arr), PathSegment::Index(i)) => arr.get(*i)?,
            _ => return None,
        };
    }
    Some(current)
}
