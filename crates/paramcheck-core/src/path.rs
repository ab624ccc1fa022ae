//! Dotted/bracketed path resolution against a source document
//!
//! A path such as `user.tags[2]` is split on `.`; a segment ending in
//! `[<digits>]` groups contributes the key followed by each index.
//! Resolution never fails: a missing step, a `null`, or a scalar in the
//! middle of the walk makes the whole path resolve to `None`.
//!
//! Copyright (c) 2025 Paramcheck Team
//! Licensed under the Apache-2.0 license

use serde_json::Value;
use std::fmt;

/// One step of a parsed path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// Object key (also accepted by arrays when it is a canonical index)
    Key(String),
    /// Bracketed index (also accepted by objects as its decimal key)
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(key) => write!(f, "{}", key),
            PathSegment::Index(index) => write!(f, "[{}]", index),
        }
    }
}

/// A parsed parameter path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamPath {
    raw: String,
    segments: Vec<PathSegment>,
}

impl ParamPath {
    /// Parse a dotted/bracketed path
    pub fn parse(path: &str) -> Self {
        let segments = path.split('.').flat_map(split_segment).collect();
        Self {
            raw: path.to_string(),
            segments,
        }
    }

    /// The path as written
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Parsed components, in walk order
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Walk `source` along this path
    pub fn resolve<'a>(&self, source: &'a Value) -> Option<&'a Value> {
        let mut current = source;
        for segment in &self.segments {
            current = step(current, segment)?;
        }
        tracing::trace!(path = %self.raw, found = !current.is_null(), "Resolved path");
        Some(current)
    }
}

impl fmt::Display for ParamPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Resolve `path` against `source` without keeping the parsed form
pub fn resolve<'a>(source: &'a Value, path: &str) -> Option<&'a Value> {
    ParamPath::parse(path).resolve(source)
}

/// Path of the element at `index` inside the array found at `path`
pub fn index_path(path: &str, index: usize) -> String {
    format!("{}[{}]", path, index)
}

/// Split a dot-separated segment into its key and trailing indices.
///
/// Trailing `[<digits>]` groups are peeled off from the right, so
/// `matrix[1][0]` walks `matrix`, then `1`, then `0`.
fn split_segment(segment: &str) -> Vec<PathSegment> {
    let mut key = segment;
    let mut indices = Vec::new();
    while let Some(body) = key.strip_suffix(']') {
        let Some(open) = body.rfind('[') else { break };
        let digits = &body[open + 1..];
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            break;
        }
        indices.push(index_segment(digits));
        key = &body[..open];
    }

    let mut segments = Vec::with_capacity(indices.len() + 1);
    segments.push(PathSegment::Key(key.to_string()));
    segments.extend(indices.into_iter().rev());
    segments
}

fn index_segment(digits: &str) -> PathSegment {
    match parse_canonical_index(digits) {
        Some(index) => PathSegment::Index(index),
        None => PathSegment::Key(digits.to_string()),
    }
}

/// Parse a decimal index with no leading zeros (`"0"`, `"12"`, not `"012"`)
fn parse_canonical_index(text: &str) -> Option<usize> {
    if text.is_empty() || (text.len() > 1 && text.starts_with('0')) {
        return None;
    }
    text.parse().ok()
}

fn step<'a>(current: &'a Value, segment: &PathSegment) -> Option<&'a Value> {
    match (current, segment) {
        (Value::Object(map), PathSegment::Key(key)) => map.get(key),
        (Value::Object(map), PathSegment::Index(index)) => map.get(&index.to_string()),
        (Value::Array(items), PathSegment::Index(index)) => items.get(*index),
        (Value::Array(items), PathSegment::Key(key)) => {
            parse_canonical_index(key).and_then(|index| items.get(index))
        }
        _ => None,
    }
}
