//! Prelude module - common imports for tabval users
//!
//! ```rust
//! use tabval::prelude::*;
//! ```

pub use crate::{
    // Value types
    BooleanValue,
    DateTimeValue,
    DateValue,
    // Error types
    Error,
    FormatError,
    // Formatting
    FormatSettings,
    Formattable,
    Locale,
    NativeValue,
    NumberValue,
    Result,
    TextValue,
    TimeOfDayValue,
    Value,
    ValueFormatter,
    ValueKind,
};
