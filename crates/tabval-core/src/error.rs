//! Error types for tabval-core

use thiserror::Error;

use crate::kind::ValueKind;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in tabval-core
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Calendar components that do not name a real proleptic-Gregorian date
    #[error("Invalid date (yyyy-MM-dd): {year}-{month}-{day}")]
    InvalidDate { year: i32, month: i32, day: i32 },

    /// Time-of-day components outside their legal ranges
    #[error("Invalid time of day (HH:mm:ss.SSS): {hour}:{minute}:{second}.{millisecond}")]
    InvalidTime {
        hour: i32,
        minute: i32,
        second: i32,
        millisecond: i32,
    },

    /// Native input or comparison operand of the wrong kind
    #[error("Type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        expected: ValueKind,
        actual: &'static str,
    },

    /// Comparison against an absent operand
    #[error("Cannot compare a {0} value against a missing value")]
    MissingComparand(ValueKind),

    /// Structured field read on a null value
    #[error("Cannot access fields of a null {0} value")]
    NullAccess(ValueKind),

    /// Text containing both `"` and `'` has no query literal form
    #[error("Text cannot be quoted as a query literal: {0}")]
    UnquotableText(String),

    /// `NaN` and infinities have no query literal form
    #[error("Number cannot be written as a query literal: {0}")]
    NonFiniteNumber(String),

    /// Unrecognized kind code
    #[error("Unknown value kind: {0}")]
    UnknownKind(String),
}

impl Error {
    pub(crate) fn type_mismatch(expected: ValueKind, actual: &'static str) -> Self {
        Error::TypeMismatch { expected, actual }
    }
}
