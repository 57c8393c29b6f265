//! Replacement-fragment rendering.
//!
//! Only the inserted or replaced fragment is ever re-rendered. [`inline`]
//! is the compact single-line form; [`render`] is the multi-line form with
//! two-space indent steps on top of the base indentation of the line being
//! edited (scalars and empty containers come out compact either way). The
//! edit layer picks the form that matches the surrounding text.

use serde_json::Value;

/// Compact single-line rendering.
pub(crate) fn inline(value: &Value) -> String {
    serde_json::to_string(value).unwrap_or_default()
}

/// JSON-quoted object key.
pub(crate) fn quote_key(key: &str) -> String {
    serde_json::to_string(key).unwrap_or_default()
}

/// Multi-line rendering at `base_indent`. The first line carries no
/// indent; the caller places it at the edit position.
pub(crate) fn render(value: &Value, base_indent: &str) -> String {
    let mut out = String::new();
    let mut indent = base_indent.to_string();
    write_value(&mut out, value, &mut indent);
    out
}

fn write_value(out: &mut String, value: &Value, indent: &mut String) {
    match value {
        Value::Object(map) if !map.is_empty() => {
            out.push_str("{\n");
            indent.push_str("  ");
            for (i, (key, member)) in map.iter().enumerate() {
                if i > 0 {
                    out.push_str(",\n");
                }
                out.push_str(indent);
                out.push_str(&quote_key(key));
                out.push_str(": ");
                write_value(out, member, indent);
            }
            indent.truncate(indent.len() - 2);
            out.push('\n');
            out.push_str(indent);
            out.push('}');
        }
        Value::Array(items) if !items.is_empty() => {
            out.push_str("[\n");
            indent.push_str("  ");
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(",\n");
                }
                out.push_str(indent);
                write_value(out, item, indent);
            }
            indent.truncate(indent.len() - 2);
            out.push('\n');
            out.push_str(indent);
            out.push(']');
        }
        _ => out.push_str(&inline(value)),
    }
}
