//! Value kinds and the construction gate for loosely-typed input

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::{Error, Result};
use crate::value::{
    BooleanValue, DateTimeValue, DateValue, NumberValue, TextValue, TimeOfDayValue, Value,
};

/// The closed set of value kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ValueKind {
    Boolean,
    Number,
    Text,
    Date,
    #[cfg_attr(feature = "serde", serde(rename = "timeofday"))]
    TimeOfDay,
    #[cfg_attr(feature = "serde", serde(rename = "datetime"))]
    DateTime,
}

impl ValueKind {
    /// Every kind, in declaration order
    pub const ALL: [ValueKind; 6] = [
        ValueKind::Boolean,
        ValueKind::Number,
        ValueKind::Text,
        ValueKind::Date,
        ValueKind::TimeOfDay,
        ValueKind::DateTime,
    ];

    /// Stable lowercase code used in configuration and on the command line
    pub fn code(&self) -> &'static str {
        match self {
            ValueKind::Boolean => "boolean",
            ValueKind::Number => "number",
            ValueKind::Text => "text",
            ValueKind::Date => "date",
            ValueKind::TimeOfDay => "timeofday",
            ValueKind::DateTime => "datetime",
        }
    }

    /// The pattern a formatter uses when none (or an empty one) is supplied
    ///
    /// Temporal patterns use the LDML letters (`yyyy-MM-dd`), numbers use
    /// `General` (locale grouping, shortest round-trip fraction), booleans use
    /// `<true-token>:<false-token>` and text has no pattern.
    pub fn default_pattern(&self) -> &'static str {
        match self {
            ValueKind::Boolean => "true:false",
            ValueKind::Number => "General",
            ValueKind::Text => "",
            ValueKind::Date => "yyyy-MM-dd",
            ValueKind::TimeOfDay => "HH:mm:ss[.SSS]",
            ValueKind::DateTime => "yyyy-MM-dd HH:mm:ss[.SSS]",
        }
    }

    /// The logical null of this kind
    pub fn null_value(&self) -> Value {
        match self {
            ValueKind::Boolean => Value::Boolean(BooleanValue::null().clone()),
            ValueKind::Number => Value::Number(NumberValue::null().clone()),
            ValueKind::Text => Value::Text(TextValue::null().clone()),
            ValueKind::Date => Value::Date(DateValue::null().clone()),
            ValueKind::TimeOfDay => Value::TimeOfDay(TimeOfDayValue::null().clone()),
            ValueKind::DateTime => Value::DateTime(DateTimeValue::null().clone()),
        }
    }

    /// Build a value of this kind from loosely-typed native input
    ///
    /// [`NativeValue::Null`] yields the kind's null. Any other input must carry
    /// the native type the kind expects, otherwise [`Error::TypeMismatch`] is
    /// returned.
    ///
    /// # Examples
    /// ```
    /// use tabval_core::{NativeValue, ValueKind};
    ///
    /// let v = ValueKind::Text.create_value(NativeValue::from("Text value")).unwrap();
    /// assert_eq!(v.to_string(), "Text value");
    ///
    /// assert!(ValueKind::Text.create_value(NativeValue::from(5)).is_err());
    /// assert!(ValueKind::Date.create_value(NativeValue::Null).unwrap().is_null());
    /// ```
    pub fn create_value(&self, native: NativeValue) -> Result<Value> {
        let value = match (self, native) {
            (kind, NativeValue::Null) => kind.null_value(),
            (ValueKind::Boolean, NativeValue::Boolean(b)) => BooleanValue::new(b).into(),
            (ValueKind::Number, NativeValue::Number(n)) => NumberValue::new(n).into(),
            (ValueKind::Text, NativeValue::Text(s)) => TextValue::new(s).into(),
            (ValueKind::Date, NativeValue::Date(d)) => DateValue::from(d).into(),
            (ValueKind::TimeOfDay, NativeValue::TimeOfDay(t)) => TimeOfDayValue::from(t).into(),
            (ValueKind::DateTime, NativeValue::DateTime(dt)) => DateTimeValue::from(dt).into(),
            (kind, other) => return Err(Error::type_mismatch(*kind, other.type_name())),
        };
        Ok(value)
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for ValueKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let code = s.trim().to_ascii_lowercase();
        ValueKind::ALL
            .into_iter()
            .find(|kind| kind.code() == code)
            .ok_or_else(|| Error::UnknownKind(s.to_string()))
    }
}

/// Loosely-typed native input, as produced by deserialization or other
/// dynamically typed boundaries
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(tag = "type", content = "value", rename_all = "lowercase")
)]
pub enum NativeValue {
    Null,
    Boolean(bool),
    Number(f64),
    Text(String),
    Date(NaiveDate),
    #[cfg_attr(feature = "serde", serde(rename = "timeofday"))]
    TimeOfDay(NaiveTime),
    #[cfg_attr(feature = "serde", serde(rename = "datetime"))]
    DateTime(NaiveDateTime),
}

impl NativeValue {
    /// Name of the native type, for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            NativeValue::Null => "null",
            NativeValue::Boolean(_) => "boolean",
            NativeValue::Number(_) => "number",
            NativeValue::Text(_) => "string",
            NativeValue::Date(_) => "date",
            NativeValue::TimeOfDay(_) => "time",
            NativeValue::DateTime(_) => "datetime",
        }
    }
}

impl From<bool> for NativeValue {
    fn from(b: bool) -> Self {
        NativeValue::Boolean(b)
    }
}

impl From<i32> for NativeValue {
    fn from(n: i32) -> Self {
        NativeValue::Number(n as f64)
    }
}

impl From<i64> for NativeValue {
    fn from(n: i64) -> Self {
        NativeValue::Number(n as f64)
    }
}

impl From<f64> for NativeValue {
    fn from(n: f64) -> Self {
        NativeValue::Number(n)
    }
}

impl From<&str> for NativeValue {
    fn from(s: &str) -> Self {
        NativeValue::Text(s.to_string())
    }
}

impl From<String> for NativeValue {
    fn from(s: String) -> Self {
        NativeValue::Text(s)
    }
}

impl From<NaiveDate> for NativeValue {
    fn from(d: NaiveDate) -> Self {
        NativeValue::Date(d)
    }
}

impl From<NaiveTime> for NativeValue {
    fn from(t: NaiveTime) -> Self {
        NativeValue::TimeOfDay(t)
    }
}

impl From<NaiveDateTime> for NativeValue {
    fn from(dt: NaiveDateTime) -> Self {
        NativeValue::DateTime(dt)
    }
}

impl<T: Into<NativeValue>> From<Option<T>> for NativeValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(NativeValue::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_create_text_value() {
        let v = ValueKind::Text.create_value("Text value".into()).unwrap();
        assert_eq!(v.kind(), ValueKind::Text);
        match &v {
            Value::Text(t) => assert_eq!(t.as_str(), "Text value"),
            other => panic!("expected text, got {other:?}"),
        }

        let err = ValueKind::Text.create_value(5.into()).unwrap_err();
        assert_eq!(
            err,
            Error::TypeMismatch {
                expected: ValueKind::Text,
                actual: "number"
            }
        );

        let null = ValueKind::Text.create_value(NativeValue::Null).unwrap();
        assert!(null.is_null());
        match &null {
            Value::Text(t) => assert_eq!(t.as_str(), ""),
            other => panic!("expected text, got {other:?}"),
        }
    }

    #[test]
    fn test_create_number_value() {
        let v = ValueKind::Number.create_value(5.3.into()).unwrap();
        assert_eq!(v, Value::from(NumberValue::new(5.3)));
        assert!(ValueKind::Number.create_value("abc".into()).is_err());
        assert_eq!(
            ValueKind::Number.create_value(NativeValue::Null).unwrap(),
            Value::Number(NumberValue::null().clone())
        );
    }

    #[test]
    fn test_create_boolean_value() {
        let v = ValueKind::Boolean.create_value(true.into()).unwrap();
        assert_eq!(v, Value::from(BooleanValue::TRUE));
        assert!(ValueKind::Boolean.create_value("abc".into()).is_err());
        assert!(ValueKind::Boolean
            .create_value(NativeValue::Null)
            .unwrap()
            .is_null());
    }

    #[test]
    fn test_create_temporal_values() {
        let date = NaiveDate::from_ymd_opt(2009, 2, 15).unwrap();
        let v = ValueKind::Date.create_value(date.into()).unwrap();
        assert_eq!(v, Value::from(DateValue::new(2009, 2, 15).unwrap()));
        assert!(ValueKind::Date.create_value("abc".into()).is_err());

        let dt = date.and_hms_opt(12, 30, 14).unwrap();
        let v = ValueKind::DateTime.create_value(dt.into()).unwrap();
        assert_eq!(
            v,
            Value::from(DateTimeValue::new(2009, 2, 15, 12, 30, 14, 0).unwrap())
        );
        assert!(ValueKind::DateTime.create_value("abc".into()).is_err());
        // A date is not a date-time
        assert!(ValueKind::DateTime.create_value(date.into()).is_err());

        let t = NaiveTime::from_hms_opt(12, 30, 14).unwrap();
        let v = ValueKind::TimeOfDay.create_value(t.into()).unwrap();
        assert_eq!(v, Value::from(TimeOfDayValue::new(12, 30, 14).unwrap()));
        assert!(ValueKind::TimeOfDay
            .create_value(NativeValue::Null)
            .unwrap()
            .is_null());
    }

    #[test]
    fn test_option_input() {
        let none: Option<f64> = None;
        assert_eq!(NativeValue::from(none), NativeValue::Null);
        assert_eq!(NativeValue::from(Some(2.5)), NativeValue::Number(2.5));
    }

    #[test]
    fn test_kind_codes() {
        for kind in ValueKind::ALL {
            assert_eq!(kind.code().parse::<ValueKind>().unwrap(), kind);
            assert!(kind.null_value().is_null());
            assert_eq!(kind.null_value().kind(), kind);
        }
        assert_eq!("TimeOfDay".parse::<ValueKind>().unwrap(), ValueKind::TimeOfDay);
        assert!("timestamp".parse::<ValueKind>().is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialized_input() {
        let native: NativeValue =
            serde_json::from_str(r#"{"type":"date","value":"2009-02-15"}"#).unwrap();
        let v = ValueKind::Date.create_value(native).unwrap();
        assert_eq!(v.to_string(), "2009-02-15");

        let native: NativeValue = serde_json::from_str(r#"{"type":"null"}"#).unwrap();
        assert!(ValueKind::Number.create_value(native).unwrap().is_null());

        let native: NativeValue =
            serde_json::from_str(r#"{"type":"text","value":"x"}"#).unwrap();
        assert!(ValueKind::Number.create_value(native).is_err());
    }
}
