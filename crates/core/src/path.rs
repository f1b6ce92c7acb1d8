//! Flat metadata paths
//!
//! A [`Path`] locates one leaf of a nested metadata document. It is an ordered
//! sequence of [`PathSegment`]s; a segment is a plain key (`workflow`) or a key
//! decorated with a 1-based list index (`codes#2`).
//!
//! # Encoded Form
//!
//! | Syntax | Meaning | Example |
//! |--------|---------|---------|
//! | `key` | Mapping key | `workflow` |
//! | `key#n` | n-th element (1-based) of the list under `key` | `codes#2` |
//! | `a.b` | Nested key | `workflow.name` |
//! | `\.` `\#` `\\` | Literal `.`, `#`, `\` inside a key | `v1\.2` |
//!
//! Escaping makes the encoding a bijection: `decode(encode(p)) == p` for every
//! non-root path, and two distinct paths never share an encoding. The root
//! (empty) path has no encoded form.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Separator between segments
pub const SEGMENT_SEPARATOR: char = '.';

/// Marker between a key and its list index
pub const INDEX_MARKER: char = '#';

const ESCAPE: char = '\\';

/// Error type for encoded path parsing
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathParseError {
    /// Empty input
    #[error("empty path")]
    Empty,
    /// Segment with no key name
    #[error("empty key in path at position {0}")]
    EmptySegment(usize),
    /// Index that is not a decimal number
    #[error("invalid list index at position {0}: '{1}'")]
    InvalidIndex(usize, String),
    /// Index zero (indices are 1-based)
    #[error("list index at position {0} must be 1 or greater")]
    ZeroIndex(usize),
    /// Backslash at the end of the input
    #[error("dangling escape at position {0}")]
    DanglingEscape(usize),
    /// Backslash followed by a character that needs no escaping
    #[error("unknown escape '\\{0}' at position {1}")]
    UnknownEscape(char, usize),
}

/// A segment in a metadata path
///
/// # Examples
///
/// ```
/// use simdb_meta_core::path::PathSegment;
///
/// let key = PathSegment::key("workflow");
/// let element = PathSegment::indexed("codes", 2);
/// assert_eq!(element.to_string(), "codes#2");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PathSegment {
    name: String,
    index: Option<usize>,
}

impl PathSegment {
    /// Plain mapping key
    pub fn key(name: impl Into<String>) -> Self {
        PathSegment {
            name: name.into(),
            index: None,
        }
    }

    /// Key decorated with a 1-based list index
    pub fn indexed(name: impl Into<String>, index: usize) -> Self {
        PathSegment {
            name: name.into(),
            index: Some(index),
        }
    }

    /// The key name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The 1-based list index, if any
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// Check if this segment carries a list index
    pub fn is_indexed(&self) -> bool {
        self.index.is_some()
    }

    /// Same key, index replaced
    pub fn with_index(&self, index: usize) -> Self {
        PathSegment::indexed(self.name.clone(), index)
    }

    /// Check whether `self` is selected by a query pattern segment
    ///
    /// A plain pattern selects the key whatever its index; an indexed pattern
    /// selects only the same index.
    pub fn matches(&self, pattern: &PathSegment) -> bool {
        self.name == pattern.name && (pattern.index.is_none() || pattern.index == self.index)
    }

    fn encode_into(&self, out: &mut String) {
        for c in self.name.chars() {
            if c == SEGMENT_SEPARATOR || c == INDEX_MARKER || c == ESCAPE {
                out.push(ESCAPE);
            }
            out.push(c);
        }
        if let Some(index) = self.index {
            out.push(INDEX_MARKER);
            out.push_str(&index.to_string());
        }
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        self.encode_into(&mut out);
        f.write_str(&out)
    }
}

/// A path to one leaf of a metadata document
///
/// # Examples
///
/// ```
/// use simdb_meta_core::path::Path;
///
/// let path = Path::root().key("codes").indexed("codes", 2);
/// assert!(path.segments()[1].is_indexed());
///
/// let commit: Path = "codes#2.commit".parse().unwrap();
/// assert_eq!(commit.encode(), "codes#2.commit");
/// assert_eq!(commit.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Path {
    segments: Vec<PathSegment>,
}

impl Path {
    /// Create the root path (empty path)
    pub fn root() -> Self {
        Path {
            segments: Vec::new(),
        }
    }

    /// Create a path from a vector of segments
    pub fn from_segments(segments: Vec<PathSegment>) -> Self {
        Path { segments }
    }

    /// Get the path segments
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Get the number of segments in the path
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Check if this is the root path (empty)
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Append a plain key segment (builder pattern)
    pub fn key(mut self, name: impl Into<String>) -> Self {
        self.segments.push(PathSegment::key(name));
        self
    }

    /// Append an indexed segment (builder pattern)
    pub fn indexed(mut self, name: impl Into<String>, index: usize) -> Self {
        self.segments.push(PathSegment::indexed(name, index));
        self
    }

    /// Push a segment (mutating)
    pub fn push(&mut self, segment: PathSegment) {
        self.segments.push(segment);
    }

    /// Remove and return the last segment (mutating)
    pub fn pop(&mut self) -> Option<PathSegment> {
        self.segments.pop()
    }

    /// Get the first segment (None if root)
    pub fn first_segment(&self) -> Option<&PathSegment> {
        self.segments.first()
    }

    /// Get the last segment (None if root)
    pub fn last_segment(&self) -> Option<&PathSegment> {
        self.segments.last()
    }

    /// Get the parent path (None if root)
    pub fn parent(&self) -> Option<Path> {
        if self.segments.is_empty() {
            None
        } else {
            let mut parent = self.clone();
            parent.segments.pop();
            Some(parent)
        }
    }

    /// Check if every segment of `pattern` selects the leading segments of `self`
    pub fn starts_with_pattern(&self, pattern: &Path) -> bool {
        pattern.len() <= self.len()
            && self
                .segments
                .iter()
                .zip(pattern.segments.iter())
                .all(|(seg, pat)| seg.matches(pat))
    }

    /// Check if every segment of `pattern` selects the trailing segments of `self`
    pub fn ends_with_pattern(&self, pattern: &Path) -> bool {
        pattern.len() <= self.len()
            && self.segments[self.len() - pattern.len()..]
                .iter()
                .zip(pattern.segments.iter())
                .all(|(seg, pat)| seg.matches(pat))
    }

    /// Encode to the canonical textual form
    pub fn encode(&self) -> String {
        let mut out = String::new();
        for (i, seg) in self.segments.iter().enumerate() {
            if i > 0 {
                out.push(SEGMENT_SEPARATOR);
            }
            seg.encode_into(&mut out);
        }
        out
    }

    /// Decode the canonical textual form
    pub fn decode(s: &str) -> Result<Path, PathParseError> {
        s.parse()
    }
}

impl FromStr for Path {
    type Err = PathParseError;

    /// Parse an encoded path
    ///
    /// Rejects empty input, empty keys, malformed or zero indices and bad
    /// escapes.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(PathParseError::Empty);
        }

        let mut segments = Vec::new();
        let mut name = String::new();
        let mut index: Option<String> = None;
        let mut seg_start = 0;
        let mut chars = s.char_indices();

        while let Some((pos, c)) = chars.next() {
            if let Some(digits) = index.as_mut() {
                // After '#' only digits until the next separator
                if c == SEGMENT_SEPARATOR {
                    segments.push(finish_segment(&mut name, index.take(), seg_start)?);
                    seg_start = pos + 1;
                } else {
                    digits.push(c);
                }
                continue;
            }

            match c {
                ESCAPE => match chars.next() {
                    Some((_, e)) if e == SEGMENT_SEPARATOR || e == INDEX_MARKER || e == ESCAPE => {
                        name.push(e)
                    }
                    Some((p, other)) => return Err(PathParseError::UnknownEscape(other, p)),
                    None => return Err(PathParseError::DanglingEscape(pos)),
                },
                SEGMENT_SEPARATOR => {
                    segments.push(finish_segment(&mut name, None, seg_start)?);
                    seg_start = pos + 1;
                }
                INDEX_MARKER => index = Some(String::new()),
                other => name.push(other),
            }
        }
        segments.push(finish_segment(&mut name, index, seg_start)?);

        Ok(Path { segments })
    }
}

fn finish_segment(
    name: &mut String,
    index: Option<String>,
    seg_start: usize,
) -> Result<PathSegment, PathParseError> {
    if name.is_empty() {
        return Err(PathParseError::EmptySegment(seg_start));
    }
    let name = std::mem::take(name);
    match index {
        None => Ok(PathSegment::key(name)),
        Some(digits) => {
            if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
                return Err(PathParseError::InvalidIndex(seg_start, digits));
            }
            let idx = digits
                .parse::<usize>()
                .map_err(|_| PathParseError::InvalidIndex(seg_start, digits.clone()))?;
            if idx == 0 {
                return Err(PathParseError::ZeroIndex(seg_start));
            }
            Ok(PathSegment::indexed(name, idx))
        }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl Serialize for Path {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.encode())
    }
}

impl<'de> Deserialize<'de> for Path {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
