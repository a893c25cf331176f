//! paramws - nested-path accessors for seismic web-service responses

pub mod error;
pub mod feltreport;
pub mod field_map;
pub mod path;
pub mod record;
pub mod resolve;

pub use error::{FixSuggestion, ParamwsError};
pub use feltreport::{FeltReportEvent, FeltReportIntensities, FeltReportIntensity, IntensityPoint};
pub use field_map::{Candidates, FieldMap};
pub use path::{BracketIndex, FieldPath, Segment};
pub use record::{is_truthy, Record};
pub use resolve::{get, get_or, lookup, require, resolve, FailureKind, LookupFailure, Mode, Shape};
