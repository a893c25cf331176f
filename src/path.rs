//! Field path tokenizer
//!
//! Supports:
//! - `time` (single key, fast path)
//! - `features.properties.mag` (dot notation)
//! - `features[0].properties.mag` (bracket index)
//! - `features.0.properties.mag` (dot-number index)
//!
//! Does NOT support:
//! - `$` roots, wildcards, filters, slices
//! - nested brackets (`a[0][1]` is a malformed index)

use std::fmt;
use std::str::FromStr;

/// Bracket suffix of a segment (`name[idx]`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BracketIndex {
    /// `[3]` → 3. Digit strings too large for usize saturate to `usize::MAX`.
    Position(usize),
    /// `[x]`, `[]`, `[-1]`... kept verbatim for diagnostics
    Malformed(String),
}

/// One `.`-delimited unit of a path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    raw: String,
    name: String,
    bracket: Option<BracketIndex>,
}

impl Segment {
    fn parse(raw: &str) -> Self {
        // Split at the first '[' only when the segment also ends in ']'
        if raw.ends_with(']') {
            if let Some((name, rest)) = raw.split_once('[') {
                let idx = &rest[..rest.len() - 1];
                let bracket = match parse_digits(idx) {
                    Some(pos) => BracketIndex::Position(pos),
                    None => BracketIndex::Malformed(idx.to_string()),
                };
                return Self {
                    raw: raw.to_string(),
                    name: name.to_string(),
                    bracket: Some(bracket),
                };
            }
        }

        Self {
            raw: raw.to_string(),
            name: raw.to_string(),
            bracket: None,
        }
    }

    /// Segment text as written in the path
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Key looked up in the current mapping
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bracket(&self) -> Option<&BracketIndex> {
        self.bracket.as_ref()
    }

    /// Digits inside the brackets, as written
    pub fn bracket_digits(&self) -> Option<&str> {
        self.bracket
            .as_ref()
            .map(|_| &self.raw[self.name.len() + 1..self.raw.len() - 1])
    }

    /// Index denoted by a pure-digit segment (`features.0`)
    pub fn as_position(&self) -> Option<usize> {
        parse_digits(&self.raw)
    }
}

/// Parsed dotted/bracketed path
///
/// Parsing never fails: a malformed bracket index only becomes an error
/// when traversal reaches its segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath {
    source: String,
    segments: Vec<Segment>,
}

impl FieldPath {
    /// Tokenize a path string
    ///
    /// Examples:
    /// - "time" → [time]
    /// - "features[0].properties.time" → [features[0], properties, time]
    /// - "features[0]" → [features[0]]
    pub fn parse(path: &str) -> Self {
        let segments = path.split('.').map(Segment::parse).collect();
        Self {
            source: path.to_string(),
            segments,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// No `.` and no `[`: a direct key lookup
    pub fn is_simple(&self) -> bool {
        !self.source.contains('.') && !self.source.contains('[')
    }
}

impl FromStr for FieldPath {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// ASCII digits only, non-empty. Overflow saturates so it is always out of range.
///
/// Unicode decimal digits (e.g. Arabic-Indic `٣`) are not indices here, so
/// `a[٣]` is a malformed bracket rather than index 3.
fn parse_digits(s: &str) -> Option<usize> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(s.parse::<usize>().unwrap_or(usize::MAX))
}
