//! Path segments and the bracketed display codec.
//!
//! The display form renders the root as `$` and every segment as a bracketed
//! index expression: `$["customer"][0]["name"]`. Keys are JSON-quoted,
//! indices are bare decimal.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("path contains an empty key segment")]
    EmptyKey,
    #[error("display path must start with '$'")]
    MissingRoot,
    #[error("malformed display path at byte {0}")]
    Malformed(usize),
}

/// One step of a node path: an object key or an array index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl PathSegment {
    /// The segment as an object member key. Index segments address objects
    /// by their decimal string key, matching dynamic `obj[3]` lookup.
    pub fn to_key(&self) -> String {
        match self {
            PathSegment::Key(k) => k.clone(),
            PathSegment::Index(i) => i.to_string(),
        }
    }
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        PathSegment::Key(key.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(key: String) -> Self {
        PathSegment::Key(key)
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        PathSegment::Index(index)
    }
}

/// Render a path as its bracketed display string. The empty path renders
/// as the bare root marker `$`.
pub fn to_display_string(path: &[PathSegment]) -> String {
    if path.is_empty() {
        return "$".to_string();
    }
    let mut out = String::from("$");
    for segment in path {
        out.push('[');
        match segment {
            PathSegment::Key(k) => out.push_str(&serde_json::to_string(k).unwrap_or_default()),
            PathSegment::Index(i) => out.push_str(&i.to_string()),
        }
        out.push(']');
    }
    out
}

/// Parse a bracketed display string back into segments.
///
/// Accepts exactly the strings [`to_display_string`] produces: `$` followed
/// by zero or more `["key"]` / `[3]` groups.
pub fn parse_display_string(display: &str) -> Result<Vec<PathSegment>, PathError> {
    let bytes = display.as_bytes();
    if bytes.first() != Some(&b'$') {
        return Err(PathError::MissingRoot);
    }
    let mut pos = 1usize;
    let mut out = Vec::new();
    while pos < bytes.len() {
        if bytes[pos] != b'[' {
            return Err(PathError::Malformed(pos));
        }
        pos += 1;
        if pos >= bytes.len() {
            return Err(PathError::Malformed(pos));
        }
        if bytes[pos] == b'"' {
            let end = find_string_end(bytes, pos).ok_or(PathError::Malformed(pos))?;
            let key: String = serde_json::from_str(&display[pos..end])
                .map_err(|_| PathError::Malformed(pos))?;
            out.push(PathSegment::Key(key));
            pos = end;
        } else {
            let start = pos;
            while pos < bytes.len() && bytes[pos].is_ascii_digit() {
                pos += 1;
            }
            if pos == start {
                return Err(PathError::Malformed(pos));
            }
            let index: usize = display[start..pos]
                .parse()
                .map_err(|_| PathError::Malformed(start))?;
            out.push(PathSegment::Index(index));
        }
        if pos >= bytes.len() || bytes[pos] != b']' {
            return Err(PathError::Malformed(pos));
        }
        pos += 1;
    }
    Ok(out)
}

/// Offset one past the closing quote of the JSON string starting at `start`.
fn find_string_end(bytes: &[u8], start: usize) -> Option<usize> {
    let mut pos = start + 1;
    while pos < bytes.len() {
        match bytes[pos] {
            b'\\' => pos += 2,
            b'"' => return Some(pos + 1),
            _ => pos += 1,
        }
    }
    None
}

/// Reject paths whose shape cannot address a node: the only invalid shape
/// representable in [`PathSegment`] is an empty object key.
pub fn validate(path: &[PathSegment]) -> Result<(), PathError> {
    for segment in path {
        if matches!(segment, PathSegment::Key(k) if k.is_empty()) {
            return Err(PathError::EmptyKey);
        }
    }
    Ok(())
}
