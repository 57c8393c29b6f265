//! Byte-position scanner that resolves a path to a span of document text.
//!
//! The document is parsed (and therefore known valid) before the scanner
//! runs, so the scanner only has to track positions, not recover from
//! malformed input. [`ScanError`] exists for the defensive cases an
//! already-validated document cannot hit.

use json_node_path::PathSegment;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unexpected document text at byte {0}")]
pub(crate) struct ScanError(pub usize);

/// Byte range of a region of document text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Span {
    pub start: usize,
    pub end: usize,
}

/// Where a path lands in the document text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ScanTarget {
    /// The full path resolved to a value; `span` is its exact extent.
    Exact { span: Span },
    /// An object was reached but `remaining[0]` is not one of its keys.
    /// `last_member_end` / `last_key_start` describe the final existing
    /// member (absent for an empty object).
    MissingKey {
        object: Span,
        last_member_end: Option<usize>,
        last_key_start: Option<usize>,
        remaining: Vec<PathSegment>,
    },
    /// An array was reached but `remaining[0]` indexes at or past its end.
    Append {
        array: Span,
        last_elem_end: Option<usize>,
        last_elem_start: Option<usize>,
        remaining: Vec<PathSegment>,
    },
    /// Traversal stopped on a node that cannot contain `remaining[0]`
    /// (a scalar, or a key segment against an array).
    Mismatch { span: Span, remaining: Vec<PathSegment> },
}

/// Resolve `path` against `text`, which must already have parsed as JSON.
pub(crate) fn resolve(text: &str, path: &[PathSegment]) -> Result<ScanTarget, ScanError> {
    let mut scanner = Scanner::new(text);
    scanner.skip_ws();
    resolve_at(&mut scanner, path, 0)
}

/// Precondition: the scanner is positioned at the start of the value
/// addressed by `path[..depth]`.
fn resolve_at(s: &mut Scanner, path: &[PathSegment], depth: usize) -> Result<ScanTarget, ScanError> {
    if depth == path.len() {
        return Ok(ScanTarget::Exact {
            span: s.scan_value()?,
        });
    }
    match s.peek() {
        Some(b'{') => resolve_in_object(s, path, depth),
        Some(b'[') if matches!(path[depth], PathSegment::Index(_)) => {
            resolve_in_array(s, path, depth)
        }
        Some(_) => Ok(ScanTarget::Mismatch {
            span: s.scan_value()?,
            remaining: path[depth..].to_vec(),
        }),
        None => Err(ScanError(s.pos)),
    }
}

fn resolve_in_object(
    s: &mut Scanner,
    path: &[PathSegment],
    depth: usize,
) -> Result<ScanTarget, ScanError> {
    let start = s.pos;
    s.expect(b'{')?;
    s.skip_ws();
    if s.peek() == Some(b'}') {
        s.bump();
        return Ok(ScanTarget::MissingKey {
            object: Span { start, end: s.pos },
            last_member_end: None,
            last_key_start: None,
            remaining: path[depth..].to_vec(),
        });
    }
    let wanted = path[depth].to_key();
    let mut last_member_end = None;
    let mut last_key_start = None;
    loop {
        s.skip_ws();
        let key_start = s.pos;
        let key = s.read_key()?;
        s.skip_ws();
        s.expect(b':')?;
        s.skip_ws();
        if key == wanted {
            return resolve_at(s, path, depth + 1);
        }
        let value = s.scan_value()?;
        last_member_end = Some(value.end);
        last_key_start = Some(key_start);
        s.skip_ws();
        match s.peek() {
            Some(b',') => s.bump(),
            Some(b'}') => {
                s.bump();
                return Ok(ScanTarget::MissingKey {
                    object: Span { start, end: s.pos },
                    last_member_end,
                    last_key_start,
                    remaining: path[depth..].to_vec(),
                });
            }
            _ => return Err(ScanError(s.pos)),
        }
    }
}

fn resolve_in_array(
    s: &mut Scanner,
    path: &[PathSegment],
    depth: usize,
) -> Result<ScanTarget, ScanError> {
    let start = s.pos;
    s.expect(b'[')?;
    s.skip_ws();
    if s.peek() == Some(b']') {
        s.bump();
        return Ok(ScanTarget::Append {
            array: Span { start, end: s.pos },
            last_elem_end: None,
            last_elem_start: None,
            remaining: path[depth..].to_vec(),
        });
    }
    let wanted = match path[depth] {
        PathSegment::Index(i) => i,
        // resolve_at only routes index segments here
        PathSegment::Key(_) => return Err(ScanError(s.pos)),
    };
    let mut index = 0usize;
    let mut last_elem_end = None;
    let mut last_elem_start = None;
    loop {
        s.skip_ws();
        if index == wanted {
            return resolve_at(s, path, depth + 1);
        }
        let elem_start = s.pos;
        let elem = s.scan_value()?;
        last_elem_end = Some(elem.end);
        last_elem_start = Some(elem_start);
        s.skip_ws();
        match s.peek() {
            Some(b',') => {
                s.bump();
                index += 1;
            }
            Some(b']') => {
                s.bump();
                return Ok(ScanTarget::Append {
                    array: Span { start, end: s.pos },
                    last_elem_end,
                    last_elem_start,
                    remaining: path[depth..].to_vec(),
                });
            }
            _ => return Err(ScanError(s.pos)),
        }
    }
}

// ── Scanner ───────────────────────────────────────────────────────────────

struct Scanner<'a> {
    text: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(text: &'a str) -> Self {
        Scanner {
            text,
            bytes: text.as_bytes(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn bump(&mut self) {
        self.pos += 1;
    }

    fn expect(&mut self, byte: u8) -> Result<(), ScanError> {
        if self.peek() == Some(byte) {
            self.bump();
            Ok(())
        } else {
            Err(ScanError(self.pos))
        }
    }

    fn skip_ws(&mut self) {
        while matches!(self.peek(), Some(b' ' | b'\t' | b'\n' | b'\r')) {
            self.bump();
        }
    }

    /// Skip one whole value, returning its span.
    fn scan_value(&mut self) -> Result<Span, ScanError> {
        let start = self.pos;
        match self.peek() {
            Some(b'{') | Some(b'[') => self.skip_container()?,
            Some(b'"') => self.skip_string()?,
            Some(_) => self.skip_scalar(),
            None => return Err(ScanError(self.pos)),
        }
        Ok(Span {
            start,
            end: self.pos,
        })
    }

    /// Positioned at `{` or `[`; skips to one past the matching close
    /// bracket. Bracket kinds need no individual matching because the text
    /// already parsed.
    fn skip_container(&mut self) -> Result<(), ScanError> {
        let mut nesting = 0usize;
        loop {
            match self.peek() {
                None => return Err(ScanError(self.pos)),
                Some(b'"') => self.skip_string()?,
                Some(b'{' | b'[') => {
                    nesting += 1;
                    self.bump();
                }
                Some(b'}' | b']') => {
                    nesting -= 1;
                    self.bump();
                    if nesting == 0 {
                        return Ok(());
                    }
                }
                Some(_) => self.bump(),
            }
        }
    }

    fn skip_string(&mut self) -> Result<(), ScanError> {
        self.expect(b'"')?;
        loop {
            match self.peek() {
                None => return Err(ScanError(self.pos)),
                Some(b'\\') => {
                    // escape introducer plus its (ASCII) payload byte
                    self.pos += 2;
                }
                Some(b'"') => {
                    self.bump();
                    return Ok(());
                }
                Some(_) => self.bump(),
            }
        }
    }

    fn skip_scalar(&mut self) {
        while let Some(byte) = self.peek() {
            if matches!(byte, b' ' | b'\t' | b'\n' | b'\r' | b',' | b'}' | b']') {
                break;
            }
            self.bump();
        }
    }

    /// Read an object key, unescaped.
    fn read_key(&mut self) -> Result<String, ScanError> {
        let start = self.pos;
        self.skip_string()?;
        serde_json::from_str(&self.text[start..self.pos]).map_err(|_| ScanError(start))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(k: &str) -> PathSegment {
        PathSegment::Key(k.to_string())
    }

    fn exact_span(text: &str, path: &[PathSegment]) -> Span {
        match resolve(text, path).unwrap() {
            ScanTarget::Exact { span } => span,
            other => panic!("expected exact target, got {other:?}"),
        }
    }

    #[test]
    fn root_span_excludes_surrounding_whitespace() {
        let span = exact_span("  {\"a\": 1}\n", &[]);
        assert_eq!((span.start, span.end), (2, 10));
    }

    #[test]
    fn resolves_nested_value_span() {
        let text = r#"{"customer": [{"name": "Ada"}]}"#;
        let path = vec![key("customer"), PathSegment::Index(0), key("name")];
        let span = exact_span(text, &path);
        assert_eq!(&text[span.start..span.end], "\"Ada\"");
    }

    #[test]
    fn resolves_container_span() {
        let text = r#"{"a": [1, 2, 3], "b": 2}"#;
        let span = exact_span(text, &[key("a")]);
        assert_eq!(&text[span.start..span.end], "[1, 2, 3]");
    }

    #[test]
    fn escaped_keys_match_decoded_form() {
        let text = r#"{"a\"b": 7}"#;
        let span = exact_span(text, &[key("a\"b")]);
        assert_eq!(&text[span.start..span.end], "7");
    }

    #[test]
    fn missing_key_reports_last_member() {
        let text = r#"{"a": 1, "b": 2}"#;
        match resolve(text, &[key("c")]).unwrap() {
            ScanTarget::MissingKey {
                object,
                last_member_end,
                last_key_start,
                remaining,
            } => {
                assert_eq!((object.start, object.end), (0, text.len()));
                assert_eq!(last_member_end, Some(text.len() - 1));
                assert_eq!(last_key_start, Some(9));
                assert_eq!(remaining, vec![key("c")]);
            }
            other => panic!("expected missing key, got {other:?}"),
        }
    }

    #[test]
    fn missing_key_on_empty_object() {
        match resolve("{}", &[key("a")]).unwrap() {
            ScanTarget::MissingKey {
                object,
                last_member_end,
                ..
            } => {
                assert_eq!((object.start, object.end), (0, 2));
                assert_eq!(last_member_end, None);
            }
            other => panic!("expected missing key, got {other:?}"),
        }
    }

    #[test]
    fn index_past_end_appends() {
        let text = "[1, 2]";
        match resolve(text, &[PathSegment::Index(5)]).unwrap() {
            ScanTarget::Append {
                array,
                last_elem_end,
                last_elem_start,
                remaining,
            } => {
                assert_eq!((array.start, array.end), (0, 6));
                assert_eq!(last_elem_end, Some(5));
                assert_eq!(last_elem_start, Some(4));
                assert_eq!(remaining, vec![PathSegment::Index(5)]);
            }
            other => panic!("expected append, got {other:?}"),
        }
    }

    #[test]
    fn scalar_mid_path_is_mismatch() {
        let text = r#"{"a": 1}"#;
        match resolve(text, &[key("a"), key("b")]).unwrap() {
            ScanTarget::Mismatch { span, remaining } => {
                assert_eq!(&text[span.start..span.end], "1");
                assert_eq!(remaining, vec![key("b")]);
            }
            other => panic!("expected mismatch, got {other:?}"),
        }
    }

    #[test]
    fn key_into_array_is_mismatch_on_whole_array() {
        let text = r#"{"a": [1, 2]}"#;
        match resolve(text, &[key("a"), key("x")]).unwrap() {
            ScanTarget::Mismatch { span, remaining } => {
                assert_eq!(&text[span.start..span.end], "[1, 2]");
                assert_eq!(remaining, vec![key("x")]);
            }
            other => panic!("expected mismatch, got {other:?}"),
        }
    }

    #[test]
    fn index_segment_matches_object_string_key() {
        let text = r#"{"0": "zero"}"#;
        let span = exact_span(text, &[PathSegment::Index(0)]);
        assert_eq!(&text[span.start..span.end], "\"zero\"");
    }

    #[test]
    fn skips_strings_containing_brackets() {
        let text = r#"{"a": "}]", "b": 2}"#;
        let span = exact_span(text, &[key("b")]);
        assert_eq!(&text[span.start..span.end], "2");
    }

    #[test]
    fn multibyte_text_spans_stay_on_boundaries() {
        let text = r#"{"α": "βγ", "b": 1}"#;
        let span = exact_span(text, &[key("b")]);
        assert_eq!(&text[span.start..span.end], "1");
        let span = exact_span(text, &[key("α")]);
        assert_eq!(&text[span.start..span.end], "\"βγ\"");
    }
}
