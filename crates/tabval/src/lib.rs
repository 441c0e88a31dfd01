//! # tabval
//!
//! Typed, locale-aware values for tabular data.
//!
//! Tabval models the cell values of a data table as one of six kinds
//! (boolean, number, text, date, time of day, date-time), each with its own
//! logical null, a total order, a stable hash and a query-literal form. A
//! [`ValueFormatter`] renders values for display and parses user input back,
//! driven by a pattern and a locale.
//!
//! ## Example
//!
//! ```rust
//! use tabval::prelude::*;
//!
//! let settings = FormatSettings::new(Locale::en_us());
//! let formatter = settings
//!     .create_from_pattern(ValueKind::DateTime, Some("dd_MM_yy HH:mm"), None)
//!     .unwrap();
//!
//! let value: Value = DateTimeValue::new(1597, 10, 29, 1, 2, 33, 142).unwrap().into();
//! assert_eq!(formatter.format(&value).unwrap(), "29_10_97 01:02");
//! assert_eq!(value.to_query_literal().unwrap(), "DATETIME '1597-10-29 1:2:33.142'");
//!
//! // Unparseable input is the kind's null, not an error
//! assert!(formatter.parse("yesterday").is_null());
//! ```

pub mod prelude;

// Re-export core types
pub use tabval_core::{
    BooleanValue, DateTimeValue, DateValue, Error, Formattable, NativeValue, NumberValue,
    Result, TextValue, TimeOfDayValue, Value, ValueKind,
};

// Re-export formatting types
pub use tabval_format::{
    FormatError, FormatResult, FormatSettings, Locale, NumberSymbols, ResolvedFormat,
    ValueFormatter, LOCALE_ENV_VARS,
};
