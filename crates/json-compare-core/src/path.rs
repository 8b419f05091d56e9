//! Path model: structural addresses into a JSON tree.
//!
//! A serialized path is dot-joined for object keys and bracketed for array
//! segments, e.g. `results[id=7].user.email`. Paths are recomputed on every
//! comparison and never persisted across tree mutations.

use regex::Regex;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("empty path")]
    Empty,
    #[error("invalid array index")]
    InvalidIndex,
}

/// One segment of a parsed path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// Object key, e.g. `user`.
    Key(String),
    /// Numeric array index, e.g. `[0]`.
    Index(usize),
    /// Composite-key array-element selector, e.g. `[id=7]` or
    /// `[domain=learning,policy=read]`.
    KeyMatch(Vec<(String, String)>),
}

/// Append `key` to a serialized path (`key` alone at the root).
pub fn join_key(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{path}.{key}")
    }
}

/// Strip every bracket segment from a serialized path.
///
/// Selection paths are declared once per array, without indices, so
/// `results[0].user.email` and `results[id=7].user.email` both normalize to
/// `results.user.email`.
///
/// # Example
///
/// ```
/// use json_compare_core::path::strip_brackets;
///
/// assert_eq!(strip_brackets("results[0].user.email"), "results.user.email");
/// assert_eq!(strip_brackets("friends[vorname=stefan].age"), "friends.age");
/// assert_eq!(strip_brackets("plain.path"), "plain.path");
/// ```
pub fn strip_brackets(path: &str) -> String {
    if !path.contains('[') {
        return path.to_string();
    }
    let mut out = String::with_capacity(path.len());
    let mut in_bracket = false;
    for c in path.chars() {
        match c {
            '[' => in_bracket = true,
            ']' => in_bracket = false,
            _ if !in_bracket => out.push(c),
            _ => {}
        }
    }
    out
}

/// Parse a serialized path into segments.
///
/// Grammar per segment: a bare key, `[digits]`, or `[k=v]` with one or more
/// comma-separated pairs. Unparseable bracket content is treated as a
/// key-match selector; an empty input is an error.
pub fn parse_path(path: &str) -> Result<Vec<PathSegment>, PathError> {
    let mut segments = Vec::new();
    for caps in segment_regex().captures_iter(path) {
        if let Some(key) = caps.get(1) {
            segments.push(PathSegment::Key(key.as_str().to_string()));
        } else if let Some(index) = caps.get(2) {
            let value = index
                .as_str()
                .parse()
                .map_err(|_| PathError::InvalidIndex)?;
            segments.push(PathSegment::Index(value));
        } else if let Some(body) = caps.get(3) {
            let pairs = body
                .as_str()
                .split(',')
                .map(|pair| {
                    let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
                    (key.trim().to_string(), value.trim().to_string())
                })
                .collect();
            segments.push(PathSegment::KeyMatch(pairs));
        }
    }
    if segments.is_empty() {
        return Err(PathError::Empty);
    }
    Ok(segments)
}

// key | [index] | [key=value,...]
fn segment_regex() -> &'static Regex {
    use std::sync::OnceLock;
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"([^.\[\]]+)|\[(\d+)\]|\[([^\]]+)\]").unwrap())
}
