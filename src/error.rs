//! Error types with fix suggestions (v0.1)

use std::fmt;

use thiserror::Error;

/// Trait for errors that provide fix suggestions
pub trait FixSuggestion {
    fn fix_suggestion(&self) -> Option<&str>;
}

/// Which argument of an operation failed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgPosition {
    First,
    Second,
    /// Element `n` of a variadic argument list
    Index(usize),
}

impl fmt::Display for ArgPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgPosition::First => f.write_str("first argument"),
            ArgPosition::Second => f.write_str("second argument"),
            ArgPosition::Index(n) => write!(f, "argument at index {}", n),
        }
    }
}

#[derive(Error, Debug)]
pub enum UtilError {
    // ─────────────────────────────────────────────────────────────
    // Argument errors (UK-001): the only kind the operations raise
    // ─────────────────────────────────────────────────────────────

    #[error("UK-001: expected {expected} for the {position}")]
    InvalidArgument {
        position: ArgPosition,
        expected: &'static str,
    },

    // ─────────────────────────────────────────────────────────────
    // Selector errors (UK-010)
    // ─────────────────────────────────────────────────────────────

    #[error("UK-010: Path '{path}' is not supported (use $.a.b or $.a[0].b)")]
    PathSyntax { path: String },

    // ─────────────────────────────────────────────────────────────
    // Document errors (UK-020 to UK-023)
    // ─────────────────────────────────────────────────────────────

    #[error("UK-020: IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("UK-021: JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("UK-022: YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("UK-023: Invalid order spec '{spec}' (use PATH, PATH:asc or PATH:desc)")]
    OrderSpec { spec: String },
}

impl UtilError {
    pub(crate) fn invalid(position: ArgPosition, expected: &'static str) -> Self {
        UtilError::InvalidArgument { position, expected }
    }

    /// Position of the failing argument, for `InvalidArgument` errors
    pub fn position(&self) -> Option<ArgPosition> {
        match self {
            UtilError::InvalidArgument { position, .. } => Some(*position),
            _ => None,
        }
    }
}

impl FixSuggestion for UtilError {
    fn fix_suggestion(&self) -> Option<&str> {
        match self {
            UtilError::InvalidArgument { .. } => {
                Some("Check the input document shape: records must be objects, sequences must be arrays")
            }
            UtilError::PathSyntax { .. } => {
                Some("Use simple paths like $.field.subfield or $.array[0].field")
            }
            UtilError::Io(_) => Some("Check file path and permissions"),
            UtilError::Json(_) => Some("Ensure the document is valid JSON (try parsing with jq)"),
            UtilError::Yaml(_) => Some("Check YAML syntax: indentation and quoting"),
            UtilError::OrderSpec { .. } => Some("Write each --by as $.field or $.field:desc"),
        }
    }
}

pub type Result<T> = std::result::Result<T, UtilError>;
