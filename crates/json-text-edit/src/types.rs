//! Core types shared across the engine.

use serde_json::Value;
use std::ops::Range;
use thiserror::Error;

// ── Error ─────────────────────────────────────────────────────────────────

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MutationError {
    /// The user-supplied replacement text is not valid JSON. Detected
    /// before any document text is touched.
    #[error("invalid replacement JSON: {0}")]
    InvalidInput(String),
    /// The stored document text itself fails to parse. Defensive: the
    /// store's canonical text should always parse.
    #[error("document parse failed: {0}")]
    Parse(String),
}

// ── JSON value kinds ──────────────────────────────────────────────────────

/// Tagged union over the six JSON value kinds. Decision sites dispatch on
/// these tags instead of probing value shapes inline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonKind {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl JsonKind {
    pub fn of(value: &Value) -> JsonKind {
        match value {
            Value::Null => JsonKind::Null,
            Value::Bool(_) => JsonKind::Bool,
            Value::Number(_) => JsonKind::Number,
            Value::String(_) => JsonKind::String,
            Value::Array(_) => JsonKind::Array,
            Value::Object(_) => JsonKind::Object,
        }
    }

    /// True for the container kinds that the row normalizer excludes.
    pub fn is_container(&self) -> bool {
        matches!(self, JsonKind::Array | JsonKind::Object)
    }
}

// ── Node rows ─────────────────────────────────────────────────────────────

/// A flattened view of one of a node's direct fields, as presented by a
/// tree view. Container-kind rows stand in for nested structure and carry
/// no editable scalar.
#[derive(Debug, Clone)]
pub struct NodeRow {
    pub key: Option<String>,
    pub value: Value,
    pub kind: JsonKind,
}

// ── Text edits ────────────────────────────────────────────────────────────

/// One localized text transformation against a specific document snapshot.
/// Within a multi-edit operation each edit is computed against the text
/// produced by the previous one, since applying an edit shifts every
/// offset after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    pub range: Range<usize>,
    pub text: String,
}

impl TextEdit {
    /// Apply the edit, returning the new text. Everything outside
    /// `self.range` is carried over byte-identical.
    pub fn apply(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len() + self.text.len());
        out.push_str(&text[..self.range.start]);
        out.push_str(&self.text);
        out.push_str(&text[self.range.end..]);
        out
    }
}
