//! Pattern-bound formatter for one value kind

use std::collections::BTreeMap;

use tabval_core::{Value, ValueKind};

use crate::error::{FormatError, FormatResult};
use crate::locale::{Locale, NumberSymbols};
use crate::pattern::Engine;
use crate::settings::{FormatSettings, ResolvedFormat};

/// Formats values of one kind to text and parses them back
///
/// The pattern is compiled once when the formatter is created. Formatters are
/// immutable and can be shared across threads.
///
/// # Example
///
/// ```
/// use tabval_core::{DateValue, Value, ValueKind};
/// use tabval_format::{FormatSettings, Locale};
///
/// let settings = FormatSettings::new(Locale::en_us());
/// let formatter = settings
///     .create_from_pattern(ValueKind::Date, Some("MM/dd/yyyy"), None)
///     .unwrap();
///
/// let date: Value = DateValue::new(2004, 1, 15).unwrap().into();
/// assert_eq!(formatter.format(&date).unwrap(), "01/15/2004");
/// assert_eq!(formatter.parse("01/15/2004"), date);
/// assert!(formatter.parse("01.15.2004").is_null());
/// ```
#[derive(Debug, Clone)]
pub struct ValueFormatter {
    kind: ValueKind,
    pattern: String,
    locale: Locale,
    symbols: NumberSymbols,
    engine: Engine,
}

impl ValueFormatter {
    fn new(resolved: ResolvedFormat, engine: Engine) -> Self {
        tracing::debug!(
            kind = %resolved.kind,
            pattern = %resolved.pattern,
            locale = %resolved.locale,
            "created value formatter"
        );
        Self {
            kind: resolved.kind,
            symbols: resolved.locale.number_symbols(),
            pattern: resolved.pattern,
            locale: resolved.locale,
            engine,
        }
    }

    pub(crate) fn with_default_pattern(resolved: ResolvedFormat) -> Self {
        let engine = Engine::default_for(resolved.kind);
        Self::new(resolved, engine)
    }

    pub(crate) fn compile(resolved: ResolvedFormat) -> FormatResult<Self> {
        let engine = if resolved.pattern == resolved.kind.default_pattern() {
            Engine::default_for(resolved.kind)
        } else {
            Engine::compile(resolved.kind, &resolved.pattern).map_err(|reason| {
                FormatError::InvalidPattern {
                    kind: resolved.kind,
                    pattern: resolved.pattern.clone(),
                    reason,
                }
            })?
        };
        Ok(Self::new(resolved, engine))
    }

    /// Default formatter for `kind` under the process-wide settings
    pub fn create_default(kind: ValueKind, locale: Option<&Locale>) -> Self {
        FormatSettings::global().create_default(kind, locale)
    }

    /// Formatter for `pattern` under the process-wide settings
    pub fn create_from_pattern(
        kind: ValueKind,
        pattern: Option<&str>,
        locale: Option<&Locale>,
    ) -> FormatResult<Self> {
        FormatSettings::global().create_from_pattern(kind, pattern, locale)
    }

    /// One default formatter per kind under the process-wide settings
    pub fn create_default_formatters(locale: Option<&Locale>) -> BTreeMap<ValueKind, Self> {
        FormatSettings::global().create_default_formatters(locale)
    }

    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    /// The effective pattern
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// The effective locale
    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    /// Render `value` as text
    ///
    /// Null values of the formatter's kind render as the empty string. A value
    /// of any other kind is rejected with [`FormatError::KindMismatch`].
    pub fn format(&self, value: &Value) -> FormatResult<String> {
        let mismatch = || FormatError::KindMismatch {
            expected: self.kind,
            actual: value.kind(),
        };
        if value.kind() != self.kind {
            return Err(mismatch());
        }
        match value.as_formattable() {
            None => Ok(String::new()),
            Some(payload) => self.engine.format(payload, &self.symbols).ok_or_else(mismatch),
        }
    }

    /// Read a value from text
    ///
    /// Text that does not match the pattern yields the kind's null value.
    /// Text values are returned verbatim, including the empty string.
    pub fn parse(&self, text: &str) -> Value {
        self.engine
            .parse(text, &self.symbols)
            .unwrap_or_else(|| self.kind.null_value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tabval_core::{
        BooleanValue, DateTimeValue, DateValue, NumberValue, TextValue, TimeOfDayValue,
    };

    fn settings() -> FormatSettings {
        FormatSettings::new(Locale::en_us())
    }

    fn from_pattern(kind: ValueKind, pattern: &str) -> ValueFormatter {
        settings()
            .create_from_pattern(kind, Some(pattern), None)
            .unwrap()
    }

    #[test]
    fn test_null_formats_empty() {
        for (kind, formatter) in settings().create_default_formatters(None) {
            assert_eq!(formatter.format(&kind.null_value()).unwrap(), "", "{kind}");
        }
    }

    #[test]
    fn test_kind_mismatch() {
        let formatter = settings().create_default(ValueKind::Date, None);
        let err = formatter
            .format(&NumberValue::new(1.0).into())
            .unwrap_err();
        assert_eq!(
            err,
            FormatError::KindMismatch {
                expected: ValueKind::Date,
                actual: ValueKind::Number,
            }
        );
        // Null of another kind is still a mismatch
        assert!(formatter.format(&ValueKind::Text.null_value()).is_err());
    }

    #[test]
    fn test_boolean() {
        let formatter = from_pattern(ValueKind::Boolean, "yep:na");
        assert_eq!(formatter.format(&BooleanValue::TRUE.into()).unwrap(), "yep");
        assert_eq!(formatter.format(&BooleanValue::FALSE.into()).unwrap(), "na");

        let formatter = from_pattern(ValueKind::Boolean, "1:0");
        assert_eq!(formatter.parse("1"), BooleanValue::TRUE.into());
        assert!(formatter.parse("false").is_null());
    }

    #[test]
    fn test_number() {
        let formatter = from_pattern(ValueKind::Number, "#,##0.000");
        assert_eq!(
            formatter.format(&NumberValue::new(-12000.23).into()).unwrap(),
            "-12,000.230"
        );

        let formatter = settings().create_default(ValueKind::Number, None);
        assert_eq!(formatter.parse("22"), NumberValue::new(22.0).into());
        assert_eq!(formatter.parse("22%"), NumberValue::new(22.0).into());
        assert!(formatter.parse("#0.0%").is_null());

        let german = Locale::parse("de-DE").unwrap();
        let formatter = settings().create_default(ValueKind::Number, Some(&german));
        assert_eq!(
            formatter.format(&NumberValue::new(1234.5).into()).unwrap(),
            "1.234,5"
        );
        assert_eq!(formatter.parse("1.234,5"), NumberValue::new(1234.5).into());
    }

    #[test]
    fn test_text() {
        let formatter = from_pattern(ValueKind::Text, "ignored");
        assert_eq!(formatter.format(&TextValue::new("abc").into()).unwrap(), "abc");
        let empty = formatter.parse("");
        assert!(!empty.is_null());
        assert_eq!(empty, TextValue::new("").into());
    }

    #[test]
    fn test_temporal() {
        let formatter = from_pattern(ValueKind::Date, "MM | dd | yy");
        let date = DateValue::new(1988, 12, 24).unwrap();
        assert_eq!(formatter.format(&date.into()).unwrap(), "12 | 24 | 88");

        let formatter = from_pattern(ValueKind::DateTime, "dd_MM_yy HH:mm");
        let moment = DateTimeValue::new(1597, 10, 29, 1, 2, 33, 142).unwrap();
        assert_eq!(formatter.format(&moment.into()).unwrap(), "29_10_97 01:02");

        let formatter = from_pattern(ValueKind::TimeOfDay, "HH-mm");
        let time = TimeOfDayValue::new(2, 24, 6).unwrap();
        assert_eq!(formatter.format(&time.into()).unwrap(), "02-24");

        let formatter = settings().create_default(ValueKind::TimeOfDay, None);
        assert_eq!(
            formatter.parse("7:22:44"),
            TimeOfDayValue::new(7, 22, 44).unwrap().into()
        );
        assert!(formatter.parse("7:22:44 pm").is_null());
    }

    #[test]
    fn test_invalid_pattern_error() {
        let err = settings()
            .create_from_pattern(ValueKind::Date, Some("yyyy-MM-dd HH"), None)
            .unwrap_err();
        assert!(matches!(
            err,
            FormatError::InvalidPattern {
                kind: ValueKind::Date,
                ..
            }
        ));
    }

    #[test]
    fn test_accessors() {
        let locale = Locale::parse("fr-CA").unwrap();
        let formatter = settings()
            .create_from_pattern(ValueKind::Number, Some(""), Some(&locale))
            .unwrap();
        assert_eq!(formatter.kind(), ValueKind::Number);
        assert_eq!(formatter.pattern(), "General");
        assert_eq!(formatter.locale(), &locale);
    }
}
