//! # tabval-core
//!
//! Typed value model for the tabval data engine.
//!
//! This crate provides the fundamental types used throughout tabval:
//! - [`ValueKind`] - The closed set of value kinds and the construction gate
//!   for loosely-typed input ([`NativeValue`])
//! - [`Value`] - One variant per kind, each with a distinguished logical null
//! - [`BooleanValue`], [`NumberValue`], [`TextValue`], [`DateValue`],
//!   [`TimeOfDayValue`], [`DateTimeValue`] - The per-kind value types
//!
//! ## Example
//!
//! ```rust
//! use std::cmp::Ordering;
//! use tabval_core::{DateValue, NativeValue, Value, ValueKind};
//!
//! let date = DateValue::new(2007, 7, 20).unwrap();
//! assert_eq!(date.to_string(), "2007-07-20");
//! assert_eq!(date.to_query_literal().unwrap(), "DATE '2007-7-20'");
//!
//! // Null sorts before every non-null value of the same kind
//! let null = ValueKind::Date.null_value();
//! assert_eq!(null.compare_to(&Value::from(date)).unwrap(), Ordering::Less);
//!
//! // Loosely-typed input goes through the kind's construction gate
//! assert!(ValueKind::Number.create_value(NativeValue::from("abc")).is_err());
//! ```

pub mod error;
pub mod kind;
pub mod value;

pub use error::{Error, Result};
pub use kind::{NativeValue, ValueKind};
pub use value::{
    BooleanValue, DateTimeValue, DateValue, Formattable, NumberValue, TextValue, TimeOfDayValue,
    Value,
};
