//! Edit computation: one scan target becomes one localized [`TextEdit`].

use crate::render::{inline, quote_key, render};
use crate::scan::{self, ScanTarget, Span};
use crate::types::{MutationError, TextEdit};
use json_node_path::PathSegment;
use serde_json::{Map, Value};

/// Set the value at `path` inside `text` with a single localized edit.
///
/// Total over paths: a missing key inserts a member, an index at or past
/// an array's end appends, and a node of the wrong kind partway along the
/// path is replaced by the synthesized remainder. Everything outside the
/// edit range is returned byte-identical.
pub(crate) fn set_at_path(
    text: &str,
    path: &[PathSegment],
    value: &Value,
) -> Result<String, MutationError> {
    let target = scan::resolve(text, path).map_err(|e| MutationError::Parse(e.to_string()))?;
    Ok(build_edit(text, target, value).apply(text))
}

fn build_edit(text: &str, target: ScanTarget, value: &Value) -> TextEdit {
    match target {
        ScanTarget::Exact { span } => replace_span(text, span, value.clone()),
        ScanTarget::Mismatch { span, remaining } => {
            replace_span(text, span, synthesize(&remaining, value))
        }
        ScanTarget::MissingKey {
            object,
            last_member_end,
            last_key_start,
            remaining,
        } => {
            let key = remaining[0].to_key();
            let inner = synthesize(&remaining[1..], value);
            match (last_member_end, last_key_start) {
                (Some(end), Some(key_start)) => {
                    if is_multiline(text, object) {
                        let indent = line_indent_at(text, key_start);
                        let fragment = format!(
                            ",\n{indent}{}: {}",
                            quote_key(&key),
                            render(&inner, indent)
                        );
                        TextEdit {
                            range: end..end,
                            text: fragment,
                        }
                    } else {
                        TextEdit {
                            range: end..end,
                            text: format!(", {}: {}", quote_key(&key), inline(&inner)),
                        }
                    }
                }
                // empty object: rewrite it with its first member
                _ => {
                    let mut map = Map::new();
                    map.insert(key, inner);
                    replace_span(text, object, Value::Object(map))
                }
            }
        }
        ScanTarget::Append {
            array,
            last_elem_end,
            last_elem_start,
            remaining,
        } => {
            let inner = synthesize(&remaining[1..], value);
            match (last_elem_end, last_elem_start) {
                (Some(end), Some(elem_start)) => {
                    if is_multiline(text, array) {
                        let indent = line_indent_at(text, elem_start);
                        TextEdit {
                            range: end..end,
                            text: format!(",\n{indent}{}", render(&inner, indent)),
                        }
                    } else {
                        TextEdit {
                            range: end..end,
                            text: format!(", {}", inline(&inner)),
                        }
                    }
                }
                _ => replace_span(text, array, Value::Array(vec![inner])),
            }
        }
    }
}

/// The replaced fragment keeps the style of the text it replaces:
/// multi-line spans are re-rendered indented from the line's own base
/// indent, single-line spans stay on one line. This also makes re-applying
/// the same value a textual fixed point.
fn replace_span(text: &str, span: Span, value: Value) -> TextEdit {
    let fragment = if is_multiline(text, span) {
        render(&value, line_indent_at(text, span.start))
    } else {
        inline(&value)
    };
    TextEdit {
        range: span.start..span.end,
        text: fragment,
    }
}

/// Wrap `value` in containers for the path segments that do not exist in
/// the document yet. Key segments become single-member objects; index
/// segments become single-element arrays, since an index offset cannot be
/// honored inside a container being created.
fn synthesize(remaining: &[PathSegment], value: &Value) -> Value {
    let mut acc = value.clone();
    for segment in remaining.iter().rev() {
        acc = match segment {
            PathSegment::Key(k) => {
                let mut map = Map::new();
                map.insert(k.clone(), acc);
                Value::Object(map)
            }
            PathSegment::Index(_) => Value::Array(vec![acc]),
        };
    }
    acc
}

fn is_multiline(text: &str, span: Span) -> bool {
    text[span.start..span.end].contains('\n')
}

/// Leading whitespace of the line containing `offset`.
fn line_indent_at(text: &str, offset: usize) -> &str {
    let line_start = text[..offset].rfind('\n').map(|i| i + 1).unwrap_or(0);
    let bytes = text.as_bytes();
    let mut end = line_start;
    while end < offset && matches!(bytes[end], b' ' | b'\t') {
        end += 1;
    }
    &text[line_start..end]
}
