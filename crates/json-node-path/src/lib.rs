//! Typed node paths for JSON documents.
//!
//! A [`PathSegment`] is either an object key or an array index; a slice of
//! segments addresses at most one node in a document, with the empty slice
//! addressing the root. This crate covers the path side only: the display
//! codec (`$["customer"][0]["name"]`), shape validation, and read-only
//! lookup of the addressed value inside a parsed [`serde_json::Value`].

pub mod locate;
pub mod path;

pub use locate::locate;
pub use path::{parse_display_string, to_display_string, validate, PathError, PathSegment};
