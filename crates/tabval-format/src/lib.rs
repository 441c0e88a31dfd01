//! # tabval-format
//!
//! Locale-aware formatting and parsing of tabval values.
//!
//! A [`ValueFormatter`] binds a value kind to an effective pattern and locale.
//! It renders values with [`ValueFormatter::format`] and reads them back with
//! [`ValueFormatter::parse`], which yields the kind's null value instead of an
//! error when the text does not match.
//!
//! Default patterns per kind:
//!
//! | Kind      | Pattern                     |
//! |-----------|-----------------------------|
//! | boolean   | `true:false`                |
//! | number    | `General`                   |
//! | text      | (none)                      |
//! | date      | `yyyy-MM-dd`                |
//! | timeofday | `HH:mm:ss[.SSS]`            |
//! | datetime  | `yyyy-MM-dd HH:mm:ss[.SSS]` |
//!
//! Text produced by a default formatter always parses back to an equal value.
//!
//! ## Example
//!
//! ```rust
//! use tabval_core::{NumberValue, Value, ValueKind};
//! use tabval_format::{FormatSettings, Locale};
//!
//! let settings = FormatSettings::new(Locale::en_us());
//! let formatters = settings.create_default_formatters(None);
//! let number = &formatters[&ValueKind::Number];
//!
//! let value: Value = NumberValue::new(1234.5).into();
//! assert_eq!(number.format(&value).unwrap(), "1,234.5");
//! assert_eq!(number.parse("1,234.5"), value);
//! assert!(number.parse("twelve").is_null());
//! ```

pub mod error;
pub mod formatter;
pub mod locale;
mod pattern;
pub mod settings;

pub use error::{FormatError, FormatResult};
pub use formatter::ValueFormatter;
pub use locale::{Locale, NumberSymbols};
pub use settings::{FormatSettings, ResolvedFormat, LOCALE_ENV_VARS};
