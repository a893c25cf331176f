//! Nested-path resolution over JSON responses
//!
//! One walker, two policies: lenient lookups fall back to a default,
//! strict lookups surface the first [`LookupFailure`].
//!
//! ```
//! use paramws::resolve::{get, require};
//! use serde_json::json;
//!
//! let flat = json!({"ev_mag_value": 4.2});
//! let collection = json!({"features": [{"properties": {"mag": 4.2}}]});
//!
//! assert_eq!(get(&flat, "ev_mag_value"), Some(&json!(4.2)));
//! assert_eq!(get(&collection, "features[0].properties.mag"), Some(&json!(4.2)));
//! assert!(require(&collection, "features[0].properties.depth").is_err());
//! ```

use std::fmt;

use serde_json::{Map, Value};

use crate::error::ParamwsError;
use crate::path::{BracketIndex, FieldPath, Segment};

/// Resolution policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Inconclusive resolution returns the caller's default
    #[default]
    Lenient,
    /// Inconclusive resolution is an error
    Strict,
}

impl Mode {
    pub fn from_required(required: bool) -> Self {
        if required {
            Mode::Strict
        } else {
            Mode::Lenient
        }
    }
}

/// Why a path stopped resolving
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    /// Bracket content is not a digit string
    MalformedIndex(String),
    /// Mapping has no such key
    MissingKey,
    /// Key step against a sequence or scalar
    NotAMapping { found: &'static str },
    /// `index` holds the digits as written in the path
    IndexOutOfRange { index: String, len: usize },
    /// No index given and nothing to fall back to
    EmptySequence,
}

/// Path, segment and reason of a failed lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupFailure {
    pub path: String,
    /// Key name of the offending segment
    pub segment: String,
    /// Zero-based segment position in the path
    pub position: usize,
    pub kind: FailureKind,
}

impl fmt::Display for LookupFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (path, segment) = (&self.path, &self.segment);
        match &self.kind {
            FailureKind::MalformedIndex(idx) => {
                write!(f, "Invalid list index '{idx}' at segment '{segment}' in path '{path}'")
            }
            FailureKind::MissingKey => {
                write!(f, "Field path '{path}' not found at '{segment}'")
            }
            FailureKind::NotAMapping { found } => write!(
                f,
                "Field path '{path}' not found at segment '{segment}' (cannot look up a key in {found})"
            ),
            FailureKind::IndexOutOfRange { index, len } => write!(
                f,
                "Index {index} out of range at segment '{segment}' for path '{path}' (length {len})"
            ),
            FailureKind::EmptySequence => {
                write!(f, "List at segment '{segment}' is empty for path '{path}'")
            }
        }
    }
}

impl std::error::Error for LookupFailure {}

/// Closed view over the three shapes a response node can take
#[derive(Debug, Clone, Copy)]
pub enum Shape<'a> {
    Mapping(&'a Map<String, Value>),
    Sequence(&'a [Value]),
    Scalar(&'a Value),
}

impl<'a> Shape<'a> {
    pub fn of(value: &'a Value) -> Self {
        match value {
            Value::Object(map) => Shape::Mapping(map),
            Value::Array(items) => Shape::Sequence(items),
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {
                Shape::Scalar(value)
            }
        }
    }

    /// Human-readable shape name for diagnostics
    pub fn describe(&self) -> &'static str {
        match self {
            Shape::Mapping(_) => "an object",
            Shape::Sequence(_) => "a list",
            Shape::Scalar(Value::Null) => "null",
            Shape::Scalar(Value::Bool(_)) => "a boolean",
            Shape::Scalar(Value::Number(_)) => "a number",
            Shape::Scalar(_) => "a string",
        }
    }

    fn step_key(self, name: &str) -> Result<&'a Value, FailureKind> {
        match self {
            Shape::Mapping(map) => map.get(name).ok_or(FailureKind::MissingKey),
            Shape::Sequence(_) | Shape::Scalar(_) => Err(FailureKind::NotAMapping {
                found: self.describe(),
            }),
        }
    }
}

fn step_index<'a>(items: &'a [Value], index: usize, written: &str) -> Result<&'a Value, FailureKind> {
    items.get(index).ok_or_else(|| FailureKind::IndexOutOfRange {
        index: written.to_string(),
        len: items.len(),
    })
}

fn failure(path: &FieldPath, segment: &Segment, position: usize, kind: FailureKind) -> LookupFailure {
    LookupFailure {
        path: path.as_str().to_string(),
        segment: segment.name().to_string(),
        position,
        kind,
    }
}

/// Walk `data` along `path`
///
/// A key step that lands on a list immediately indexes into it: the
/// segment's bracket index, else a following pure-digit segment (which is
/// consumed), else the first element.
pub fn lookup<'a>(data: &'a Value, path: &FieldPath) -> Result<&'a Value, LookupFailure> {
    let segments = path.segments();

    // Plain key: no implicit list step
    if path.is_simple() {
        return Shape::of(data)
            .step_key(path.as_str())
            .map_err(|kind| failure(path, &segments[0], 0, kind));
    }

    let mut cursor = data;
    let mut i = 0;

    while i < segments.len() {
        let segment = &segments[i];
        let position = i;

        let bracket = match segment.bracket() {
            Some(BracketIndex::Malformed(idx)) => {
                return Err(failure(
                    path,
                    segment,
                    position,
                    FailureKind::MalformedIndex(idx.clone()),
                ));
            }
            Some(BracketIndex::Position(index)) => Some(*index),
            None => None,
        };

        cursor = Shape::of(cursor)
            .step_key(segment.name())
            .map_err(|kind| failure(path, segment, position, kind))?;

        if let Shape::Sequence(items) = Shape::of(cursor) {
            let next_position = segments.get(i + 1).and_then(Segment::as_position);

            let stepped = match (bracket, next_position) {
                (Some(index), _) => {
                    step_index(items, index, segment.bracket_digits().unwrap_or_default())
                }
                (None, Some(index)) => {
                    let written = segments[i + 1].raw();
                    i += 1;
                    step_index(items, index, written)
                }
                (None, None) => items.first().ok_or(FailureKind::EmptySequence),
            };
            cursor = stepped.map_err(|kind| failure(path, segment, position, kind))?;
        }

        i += 1;
    }

    Ok(cursor)
}

/// Resolve a pre-parsed path under the given policy
pub fn resolve_path<'a>(
    data: &'a Value,
    path: &FieldPath,
    default: Option<&'a Value>,
    mode: Mode,
) -> Result<Option<&'a Value>, ParamwsError> {
    match lookup(data, path) {
        Ok(value) => Ok(Some(value)),
        Err(failure) => match mode {
            Mode::Strict => Err(failure.into()),
            Mode::Lenient => {
                tracing::trace!(%failure, "path unresolved, using default");
                Ok(default)
            }
        },
    }
}

/// Resolve `path` against `data`
///
/// Lenient mode returns `default` (verbatim) when the path does not
/// resolve; strict mode returns [`ParamwsError::Lookup`].
pub fn resolve<'a>(
    data: &'a Value,
    path: &str,
    default: Option<&'a Value>,
    mode: Mode,
) -> Result<Option<&'a Value>, ParamwsError> {
    resolve_path(data, &FieldPath::parse(path), default, mode)
}

/// Lenient lookup with no default
pub fn get<'a>(data: &'a Value, path: &str) -> Option<&'a Value> {
    lookup(data, &FieldPath::parse(path)).ok()
}

/// Lenient lookup with a default
pub fn get_or<'a>(data: &'a Value, path: &str, default: &'a Value) -> &'a Value {
    get(data, path).unwrap_or(default)
}

/// Strict lookup
pub fn require<'a>(data: &'a Value, path: &str) -> Result<&'a Value, ParamwsError> {
    Ok(lookup(data, &FieldPath::parse(path))?)
}
