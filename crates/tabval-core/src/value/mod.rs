//! Value types
//!
//! This module contains:
//! - [`Value`] - A value of any kind
//! - One type per kind, each with a single logical null
//!   ([`DateValue::null`] and friends)
//! - [`Formattable`] - The native payload handed to formatters

mod boolean;
mod date;
mod date_time;
mod number;
mod text;
mod time_of_day;

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::{Error, Result};
use crate::kind::ValueKind;

pub use boolean::BooleanValue;
pub use date::DateValue;
pub use date_time::DateTimeValue;
pub use number::NumberValue;
pub use text::TextValue;
pub use time_of_day::TimeOfDayValue;

/// A typed value
///
/// Values are immutable. Equality and ordering are only defined between
/// values of the same kind; [`Value::compare_to`] reports a
/// [`Error::TypeMismatch`] otherwise, and the [`PartialOrd`] impl returns
/// `None`.
#[derive(Debug, Clone)]
pub enum Value {
    Boolean(BooleanValue),
    Number(NumberValue),
    Text(TextValue),
    Date(DateValue),
    TimeOfDay(TimeOfDayValue),
    DateTime(DateTimeValue),
}

/// Native payload of a non-null value, as consumed by formatters
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Formattable<'a> {
    Boolean(bool),
    Number(f64),
    Text(&'a str),
    Date(NaiveDate),
    TimeOfDay(NaiveTime),
    DateTime(NaiveDateTime),
}

impl Value {
    /// The kind of this value
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Boolean(_) => ValueKind::Boolean,
            Value::Number(_) => ValueKind::Number,
            Value::Text(_) => ValueKind::Text,
            Value::Date(_) => ValueKind::Date,
            Value::TimeOfDay(_) => ValueKind::TimeOfDay,
            Value::DateTime(_) => ValueKind::DateTime,
        }
    }

    /// Check if this is the logical null of its kind
    pub fn is_null(&self) -> bool {
        match self {
            Value::Boolean(v) => v.is_null(),
            Value::Number(v) => v.is_null(),
            Value::Text(v) => v.is_null(),
            Value::Date(v) => v.is_null(),
            Value::TimeOfDay(v) => v.is_null(),
            Value::DateTime(v) => v.is_null(),
        }
    }

    /// Compare with another value of the same kind
    ///
    /// Null sorts before every non-null value; two nulls are equal.
    pub fn compare_to(&self, other: &Value) -> Result<Ordering> {
        match (self, other) {
            (Value::Boolean(a), Value::Boolean(b)) => Ok(a.cmp(b)),
            (Value::Number(a), Value::Number(b)) => Ok(a.cmp(b)),
            (Value::Text(a), Value::Text(b)) => Ok(a.cmp(b)),
            (Value::Date(a), Value::Date(b)) => Ok(a.cmp(b)),
            (Value::TimeOfDay(a), Value::TimeOfDay(b)) => Ok(a.cmp(b)),
            (Value::DateTime(a), Value::DateTime(b)) => Ok(a.cmp(b)),
            _ => Err(Error::type_mismatch(self.kind(), other.kind().code())),
        }
    }

    /// Compare with a value that may be absent
    ///
    /// An absent operand is reported as [`Error::MissingComparand`], never
    /// as a kind mismatch.
    pub fn compare_to_optional(&self, other: Option<&Value>) -> Result<Ordering> {
        match other {
            Some(other) => self.compare_to(other),
            None => Err(Error::MissingComparand(self.kind())),
        }
    }

    /// Deterministic hash of the structured fields, `0` for null
    pub fn hash_code(&self) -> i32 {
        match self {
            Value::Boolean(v) => v.hash_code(),
            Value::Number(v) => v.hash_code(),
            Value::Text(v) => v.hash_code(),
            Value::Date(v) => v.hash_code(),
            Value::TimeOfDay(v) => v.hash_code(),
            Value::DateTime(v) => v.hash_code(),
        }
    }

    /// Canonical, non-localized form for logs and tests (`null` for nulls)
    pub fn to_debug_string(&self) -> String {
        self.to_string()
    }

    /// Literal form understood by the query-expression layer
    ///
    /// Fails with [`Error::NullAccess`] on a null value.
    pub fn to_query_literal(&self) -> Result<String> {
        match self {
            Value::Boolean(v) => v.to_query_literal(),
            Value::Number(v) => v.to_query_literal(),
            Value::Text(v) => v.to_query_literal(),
            Value::Date(v) => v.to_query_literal(),
            Value::TimeOfDay(v) => v.to_query_literal(),
            Value::DateTime(v) => v.to_query_literal(),
        }
    }

    /// The native payload formatters work with, `None` for null
    pub fn as_formattable(&self) -> Option<Formattable<'_>> {
        match self {
            Value::Boolean(v) => v.value().ok().map(Formattable::Boolean),
            Value::Number(v) => v.value().ok().map(Formattable::Number),
            Value::Text(v) if v.is_null() => None,
            Value::Text(v) => Some(Formattable::Text(v.as_str())),
            Value::Date(v) => v.to_naive_date().map(Formattable::Date),
            Value::TimeOfDay(v) => v.to_naive_time().map(Formattable::TimeOfDay),
            Value::DateTime(v) => v.to_naive_date_time().map(Formattable::DateTime),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Boolean(v) => fmt::Display::fmt(v, f),
            Value::Number(v) => fmt::Display::fmt(v, f),
            Value::Text(v) => fmt::Display::fmt(v, f),
            Value::Date(v) => fmt::Display::fmt(v, f),
            Value::TimeOfDay(v) => fmt::Display::fmt(v, f),
            Value::DateTime(v) => fmt::Display::fmt(v, f),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        matches!(self.compare_to(other), Ok(Ordering::Equal))
    }
}

impl Eq for Value {}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare_to(other).ok()
    }
}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind().hash(state);
        state.write_i32(self.hash_code());
    }
}

impl From<BooleanValue> for Value {
    fn from(v: BooleanValue) -> Self {
        Value::Boolean(v)
    }
}

impl From<NumberValue> for Value {
    fn from(v: NumberValue) -> Self {
        Value::Number(v)
    }
}

impl From<TextValue> for Value {
    fn from(v: TextValue) -> Self {
        Value::Text(v)
    }
}

impl From<DateValue> for Value {
    fn from(v: DateValue) -> Self {
        Value::Date(v)
    }
}

impl From<TimeOfDayValue> for Value {
    fn from(v: TimeOfDayValue) -> Self {
        Value::TimeOfDay(v)
    }
}

impl From<DateTimeValue> for Value {
    fn from(v: DateTimeValue) -> Self {
        Value::DateTime(v)
    }
}

/// Mix structured fields into a hash with a fixed prime seed and multiplier
pub(crate) fn mix_fields(seed: i32, multiplier: i32, fields: &[i32]) -> i32 {
    fields.iter().fold(seed, |hash, field| {
        hash.wrapping_mul(multiplier).wrapping_add(*field)
    })
}
