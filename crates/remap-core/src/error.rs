//! Error types for the Remap core library
//!
//! This module defines the error handling system for Remap, using thiserror
//! for ergonomic error definitions and anyhow for flexible error contexts.
//!
//! Failures fall into two classes: fatal errors surfaced through [`Error`],
//! which abort a mapping call, and recoverable per-entry failures, which are
//! collected as [`crate::Diagnostic`] values and never abort the call.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for Remap operations
#[derive(Error, Debug)]
pub enum Error {
    /// Validation errors for inputs
    #[error("Validation error: {field} - {message}")]
    Validation {
        field: String,
        message: String,
        expected: Option<String>,
    },

    /// Reverse execution requested against a specification not marked reversible
    #[error("Reversal not permitted: {message}")]
    NotReversible { message: String },

    /// A reversible specification's read path carries more than one wildcard
    #[error("Ambiguous wildcard path '{path}': {count} wildcard segments on a reversible read")]
    AmbiguousWildcard { path: String, count: usize },

    /// JSON parsing and serialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// Generic internal error with context
    #[error("Internal error: {message}")]
    Internal {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Severity levels for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    /// Informational, no action required
    Info,
    /// Warning, should be reviewed
    Warning,
    /// Error, operation may fail
    Error,
    /// Critical, operation will fail
    Critical,
}

/// Diagnostic codes for recoverable mapping deviations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagnosticCode {
    /// Value could not be coerced to the declared target type
    CoercionFailed,
    /// Value could not be reformatted as a date-time
    FormatFailed,
    /// Multi-wildcard write collapsed all elements onto index 0
    IndexCollapse,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
            Severity::Critical => write!(f, "critical"),
        }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticCode::CoercionFailed => write!(f, "CoercionFailed"),
            DiagnosticCode::FormatFailed => write!(f, "FormatFailed"),
            DiagnosticCode::IndexCollapse => write!(f, "IndexCollapse"),
        }
    }
}

// Conversion implementations
impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::Internal {
            message: err.to_string(),
            source: err,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Validation {
            field: "source".to_string(),
            message: "expected a structured value".to_string(),
            expected: Some("object or array".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "Validation error: source - expected a structured value"
        );
    }

    #[test]
    fn test_not_reversible_display() {
        let err = Error::NotReversible {
            message: "attempting to reverse a non-reversible map".to_string(),
        };
        assert!(err.to_string().contains("Reversal not permitted"));
    }

    #[test]
    fn test_ambiguous_wildcard_display() {
        let err = Error::AmbiguousWildcard {
            path: "a[].b[].c".to_string(),
            count: 2,
        };
        assert!(err.to_string().contains("a[].b[].c"));
        assert!(err.to_string().contains('2'));
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Info < Severity::Warning);
        assert!(Severity::Warning < Severity::Error);
        assert!(Severity::Error < Severity::Critical);
    }

    #[test]
    fn test_diagnostic_code_display() {
        assert_eq!(DiagnosticCode::CoercionFailed.to_string(), "CoercionFailed");
        assert_eq!(DiagnosticCode::FormatFailed.to_string(), "FormatFailed");
        assert_eq!(DiagnosticCode::IndexCollapse.to_string(), "IndexCollapse");
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Json { .. }));
    }
}
