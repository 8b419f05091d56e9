//! Position Locator: map a serialized path to the byte range of its value
//! inside pretty-printed JSON text.
//!
//! Navigation is purely textual, one path segment at a time, over the exact
//! 2-space convention of [`crate::pretty::to_pretty_string`]. Reformatting
//! the text breaks this module; the coupling is deliberate. Any structural
//! mismatch yields `None`, never a panic.

use regex::Regex;

use crate::path::{parse_path, PathSegment};

/// Half-open byte range `[start, end)` of a located value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

/// Find the value addressed by `path` in `text`.
///
/// Key segments search for `"name":` from the cursor; index segments walk
/// the next array element by element; key-match segments test each top-level
/// object candidate against every declared pair. The final cursor position
/// is classified by its first character to determine the value's extent.
pub fn locate(text: &str, path: &str) -> Option<Span> {
    let segments = parse_path(path).ok()?;
    let bytes = text.as_bytes();
    let mut pos = 0usize;

    for segment in &segments {
        match segment {
            PathSegment::Key(name) => {
                let pattern =
                    Regex::new(&format!(r#""{}"\s*:"#, regex::escape(name))).ok()?;
                let found = pattern.find(&text[pos..])?;
                pos += found.end();
                pos = skip_whitespace(bytes, pos);
            }
            PathSegment::Index(index) => {
                pos = seek_index(bytes, pos, *index)?;
            }
            PathSegment::KeyMatch(pairs) => {
                pos = seek_key_match(text, pos, pairs)?;
            }
        }
    }
    classify(bytes, pos)
}

// Enter the next array and stop on the start of element `index`.
fn seek_index(bytes: &[u8], from: usize, index: usize) -> Option<usize> {
    let mut pos = find_byte(bytes, from, b'[')? + 1;
    pos = skip_whitespace(bytes, pos);
    let mut count = 0usize;
    loop {
        if *bytes.get(pos)? == b']' {
            return None;
        }
        if count == index {
            return Some(pos);
        }
        pos = skip_element(bytes, pos)?;
        pos = skip_whitespace(bytes, pos);
        if *bytes.get(pos)? != b',' {
            return None;
        }
        pos = skip_whitespace(bytes, pos + 1);
        count += 1;
    }
}

// Enter the next array and stop on the first top-level object whose text
// satisfies every `"key": value` pair.
fn seek_key_match(text: &str, from: usize, pairs: &[(String, String)]) -> Option<usize> {
    let bytes = text.as_bytes();
    let patterns = pairs
        .iter()
        .map(|(key, value)| {
            let key = regex::escape(key);
            let value = regex::escape(value);
            // String and bare-primitive renderings both qualify.
            Regex::new(&format!(r#""{key}"\s*:\s*("{value}"|{value})"#)).ok()
        })
        .collect::<Option<Vec<Regex>>>()?;

    let mut pos = find_byte(bytes, from, b'[')? + 1;
    loop {
        pos = skip_whitespace(bytes, pos);
        match *bytes.get(pos)? {
            b']' => return None,
            b'{' => {
                let end = skip_balanced(bytes, pos)?;
                let candidate = &text[pos..end];
                if patterns.iter().all(|p| p.is_match(candidate)) {
                    return Some(pos);
                }
                pos = end;
            }
            _ => pos = skip_element(bytes, pos)?,
        }
        pos = skip_whitespace(bytes, pos);
        if *bytes.get(pos)? != b',' {
            return None;
        }
        pos += 1;
    }
}

// Extent of the value starting at `start`, by its first character.
fn classify(bytes: &[u8], start: usize) -> Option<Span> {
    let end = match bytes.get(start)? {
        b'"' => skip_string(bytes, start)?,
        b'{' | b'[' => skip_balanced(bytes, start)?,
        _ => {
            let mut pos = start;
            while pos < bytes.len() && !matches!(bytes[pos], b',' | b'}' | b']')
                && !bytes[pos].is_ascii_whitespace()
            {
                pos += 1;
            }
            if pos == start {
                return None;
            }
            pos
        }
    };
    Some(Span { start, end })
}

// Skip one element of any shape, returning the position just past it.
fn skip_element(bytes: &[u8], pos: usize) -> Option<usize> {
    match *bytes.get(pos)? {
        b'"' => skip_string(bytes, pos),
        b'{' | b'[' => skip_balanced(bytes, pos),
        _ => {
            let mut end = pos;
            while end < bytes.len() && !matches!(bytes[end], b',' | b'}' | b']')
                && !bytes[end].is_ascii_whitespace()
            {
                end += 1;
            }
            (end > pos).then_some(end)
        }
    }
}

// Skip a balanced container. String contents are skipped atomically so
// brackets inside string values cannot unbalance the count.
fn skip_balanced(bytes: &[u8], mut pos: usize) -> Option<usize> {
    let mut depth = 0usize;
    while pos < bytes.len() {
        match bytes[pos] {
            b'"' => {
                pos = skip_string(bytes, pos)?;
                continue;
            }
            b'{' | b'[' => depth += 1,
            b'}' | b']' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(pos + 1);
                }
            }
            _ => {}
        }
        pos += 1;
    }
    None
}

// Skip a string literal starting at its opening quote.
fn skip_string(bytes: &[u8], mut pos: usize) -> Option<usize> {
    pos += 1;
    while pos < bytes.len() {
        match bytes[pos] {
            b'\\' => pos += 2,
            b'"' => return Some(pos + 1),
            _ => pos += 1,
        }
    }
    None
}

fn skip_whitespace(bytes: &[u8], mut pos: usize) -> usize {
    while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
        pos += 1;
    }
    pos
}

fn find_byte(bytes: &[u8], from: usize, needle: u8) -> Option<usize> {
    bytes.get(from..)?.iter().position(|&b| b == needle).map(|i| from + i)
}
