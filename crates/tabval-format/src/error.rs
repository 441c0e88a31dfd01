//! Error types for tabval-format

use tabval_core::ValueKind;
use thiserror::Error;

/// Result type alias using [`FormatError`]
pub type FormatResult<T> = std::result::Result<T, FormatError>;

/// Errors that can occur while building or using a formatter
///
/// Parsing text never fails: text that does not match a formatter's pattern
/// parses to the kind's null value instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// Pattern that cannot be compiled for the requested kind
    #[error("Invalid {kind} pattern '{pattern}': {reason}")]
    InvalidPattern {
        kind: ValueKind,
        pattern: String,
        reason: String,
    },

    /// Unrecognized locale tag
    #[error("Invalid locale: {0}")]
    InvalidLocale(String),

    /// Value handed to a formatter bound to another kind
    #[error("Formatter for {expected} values cannot format a {actual} value")]
    KindMismatch {
        expected: ValueKind,
        actual: ValueKind,
    },
}
