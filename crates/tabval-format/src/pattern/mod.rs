//! Compiled patterns, one engine per value kind

mod boolean;
mod number;
mod temporal;

use tabval_core::{BooleanValue, Formattable, NumberValue, TextValue, Value, ValueKind};

use crate::locale::NumberSymbols;

use self::boolean::BooleanPattern;
use self::number::NumberPattern;
use self::temporal::TemporalPattern;

/// A pattern compiled for a specific kind
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Engine {
    Boolean(BooleanPattern),
    Number(NumberPattern),
    /// Text passes through unchanged whatever the pattern
    Text,
    Temporal(TemporalPattern),
}

impl Engine {
    /// Compile `pattern` for `kind`, returning the reason on failure
    pub(crate) fn compile(kind: ValueKind, pattern: &str) -> Result<Self, String> {
        let engine = match kind {
            ValueKind::Boolean => Engine::Boolean(BooleanPattern::compile(pattern)?),
            ValueKind::Number => Engine::Number(NumberPattern::compile(pattern)?),
            ValueKind::Text => Engine::Text,
            ValueKind::Date | ValueKind::TimeOfDay | ValueKind::DateTime => {
                Engine::Temporal(TemporalPattern::compile(kind, pattern)?)
            }
        };
        Ok(engine)
    }

    /// Engine for the kind's default pattern
    pub(crate) fn default_for(kind: ValueKind) -> Self {
        match kind {
            ValueKind::Boolean => Engine::Boolean(BooleanPattern::new("true", "false")),
            ValueKind::Number => Engine::Number(NumberPattern::General),
            ValueKind::Text => Engine::Text,
            ValueKind::Date | ValueKind::TimeOfDay | ValueKind::DateTime => {
                Engine::Temporal(TemporalPattern::default_for(kind))
            }
        }
    }

    /// Render a payload; `None` when the payload belongs to another engine
    pub(crate) fn format(&self, payload: Formattable<'_>, symbols: &NumberSymbols) -> Option<String> {
        let text = match (self, payload) {
            (Engine::Boolean(p), Formattable::Boolean(b)) => p.format(b).to_string(),
            (Engine::Number(p), Formattable::Number(n)) => p.format(n, symbols),
            (Engine::Text, Formattable::Text(s)) => s.to_string(),
            (Engine::Temporal(p), Formattable::Date(d)) => p.format_date(d),
            (Engine::Temporal(p), Formattable::TimeOfDay(t)) => p.format_time(t),
            (Engine::Temporal(p), Formattable::DateTime(dt)) => p.format(&dt),
            _ => return None,
        };
        Some(text)
    }

    /// Read a value, `None` when the text does not match
    pub(crate) fn parse(&self, text: &str, symbols: &NumberSymbols) -> Option<Value> {
        match self {
            Engine::Boolean(p) => p.parse(text).map(|b| BooleanValue::new(b).into()),
            Engine::Number(p) => p.parse(text, symbols).map(|n| NumberValue::new(n).into()),
            Engine::Text => Some(TextValue::new(text).into()),
            Engine::Temporal(p) => p.parse(text),
        }
    }
}
