//! Error types with fix suggestions

use thiserror::Error;

use crate::resolve::LookupFailure;

/// Trait for errors that provide fix suggestions
pub trait FixSuggestion {
    fn fix_suggestion(&self) -> Option<&str>;
}

#[derive(Error, Debug)]
pub enum ParamwsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ─────────────────────────────────────────────────────────────
    // Path resolution (PWS-010)
    // ─────────────────────────────────────────────────────────────

    #[error("PWS-010: {0}")]
    Lookup(#[from] LookupFailure),

    // ─────────────────────────────────────────────────────────────
    // Response decoding (PWS-020 to PWS-022)
    // ─────────────────────────────────────────────────────────────

    #[error("PWS-020: Invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("PWS-021: Expected {expected} response, got {found}")]
    UnexpectedShape {
        expected: &'static str,
        found: &'static str,
    },

    #[error("PWS-022: Response contains no event")]
    EmptyResponse,

    // ─────────────────────────────────────────────────────────────
    // Field maps (PWS-030 to PWS-031)
    // ─────────────────────────────────────────────────────────────

    #[error("PWS-030: Field map parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("PWS-031: Field '{field}' is not declared in the field map")]
    UnknownField { field: String },
}

impl FixSuggestion for ParamwsError {
    fn fix_suggestion(&self) -> Option<&str> {
        match self {
            ParamwsError::Io(_) => Some("Check file path and permissions"),
            ParamwsError::Lookup(_) => {
                Some("Check the path against the response, or drop --required to fall back to a default")
            }
            ParamwsError::Json(_) => Some("Ensure the response body is valid JSON (try parsing with jq)"),
            ParamwsError::UnexpectedShape { .. } => {
                Some("Event responses must be a JSON object or a list of objects")
            }
            ParamwsError::EmptyResponse => Some("The service returned an empty list; check the query"),
            ParamwsError::Yaml(_) => Some("Check YAML syntax: `service:` plus a `fields:` mapping"),
            ParamwsError::UnknownField { .. } => {
                Some("Add the field to `fields:` in the map, or check its spelling")
            }
        }
    }
}
