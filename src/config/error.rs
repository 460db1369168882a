use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Coarse classification of loader failures.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The input file could not be opened or read.
    FileAccess,
    /// The content is not a JSON object.
    MalformedDocument,
    /// A required field is absent, not a string, or empty.
    MissingField,
}

/// What exactly is wrong with a required field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldProblem {
    #[error("field is absent")]
    Absent,
    #[error("expected a string, found {found}")]
    WrongType { found: &'static str },
    #[error("value is empty")]
    Empty,
}

/// Errors returned by the configuration loader.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot open input file '{}': {source}", .path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse JSON from {origin}: {source}")]
    MalformedDocument {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Input document must be a JSON object, found {found}")]
    NotAnObject { found: &'static str },

    #[error("Missing or invalid '{field}' field: {problem}")]
    MissingField {
        field: &'static str,
        problem: FieldProblem,
    },
}

impl ConfigError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ConfigError::FileAccess { .. } => ErrorKind::FileAccess,
            ConfigError::MalformedDocument { .. } | ConfigError::NotAnObject { .. } => {
                ErrorKind::MalformedDocument
            }
            ConfigError::MissingField { .. } => ErrorKind::MissingField,
        }
    }

    /// Name of the offending field, for `MissingField` errors.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            ConfigError::MissingField { field, .. } => Some(*field),
            _ => None,
        }
    }
}

/// JSON type name used in error messages.
pub(crate) fn json_type_name(value: &serde_json::Value) -> &'static str {
    use serde_json::Value;
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
