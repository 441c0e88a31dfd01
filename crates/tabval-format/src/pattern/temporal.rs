//! LDML-style date and time patterns
//!
//! | Letter    | Field                | Widths                         |
//! |-----------|----------------------|--------------------------------|
//! | `y` `u` `Y` | year               | `yy` two-digit, otherwise padded |
//! | `M` `L`   | month                | 1-2 numeric, 3 short, 4 full, 5 narrow |
//! | `d`       | day of month         | 1-2                            |
//! | `D`       | day of year          | 1-3                            |
//! | `E`       | weekday              | 1-3 short, 4 full, 5 narrow    |
//! | `a`       | AM/PM marker         | 1                              |
//! | `H` `k`   | hour 0-23 / 1-24     | 1-2                            |
//! | `K` `h`   | hour 0-11 / 1-12     | 1-2                            |
//! | `m` `s`   | minute / second      | 1-2                            |
//! | `S`       | fraction of a second | 1-9                            |
//!
//! Text in single quotes is literal and `''` is a quote. Sections in `[...]`
//! are optional: they are always written when formatting and may be absent
//! when parsing.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use once_cell::sync::Lazy;
use tabval_core::{DateTimeValue, DateValue, TimeOfDayValue, Value, ValueKind};

/// Parsing tries every combination of optional sections, so keep it bounded
const MAX_OPTIONAL_SECTIONS: usize = 6;

struct Names {
    full: String,
    short: String,
}

static MONTH_NAMES: Lazy<Vec<Names>> = Lazy::new(|| {
    (1..=12)
        .filter_map(|month| NaiveDate::from_ymd_opt(2000, month, 1))
        .map(|date| Names {
            full: date.format("%B").to_string(),
            short: date.format("%b").to_string(),
        })
        .collect()
});

/// Monday first, matching `Weekday::num_days_from_monday`
static WEEKDAY_NAMES: Lazy<Vec<Names>> = Lazy::new(|| {
    (1..=7)
        .filter_map(|day| NaiveDate::from_ymd_opt(2024, 1, day))
        .map(|date| Names {
            full: date.format("%A").to_string(),
            short: date.format("%a").to_string(),
        })
        .collect()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Year,
    Month,
    DayOfMonth,
    DayOfYear,
    Weekday,
    AmPm,
    /// `H`, 0-23
    HourOfDay,
    /// `k`, 1-24
    ClockHourOfDay,
    /// `K`, 0-11
    HourOfAmPm,
    /// `h`, 1-12
    ClockHourOfAmPm,
    Minute,
    Second,
    Fraction,
}

impl Field {
    /// Field for a pattern letter and the widest run it allows
    fn from_letter(letter: char) -> Option<(Field, usize)> {
        let field = match letter {
            'y' | 'u' | 'Y' => (Field::Year, 9),
            'M' | 'L' => (Field::Month, 5),
            'd' => (Field::DayOfMonth, 2),
            'D' => (Field::DayOfYear, 3),
            'E' => (Field::Weekday, 5),
            'a' => (Field::AmPm, 1),
            'H' => (Field::HourOfDay, 2),
            'k' => (Field::ClockHourOfDay, 2),
            'K' => (Field::HourOfAmPm, 2),
            'h' => (Field::ClockHourOfAmPm, 2),
            'm' => (Field::Minute, 2),
            's' => (Field::Second, 2),
            'S' => (Field::Fraction, 9),
            _ => return None,
        };
        Some(field)
    }

    fn is_date(self) -> bool {
        matches!(
            self,
            Field::Year | Field::Month | Field::DayOfMonth | Field::DayOfYear | Field::Weekday
        )
    }

    fn is_numeric(self, width: usize) -> bool {
        match self {
            Field::Month => width <= 2,
            Field::Weekday | Field::AmPm => false,
            _ => true,
        }
    }

    fn max_digits(self) -> usize {
        match self {
            Field::Year | Field::Fraction => 9,
            Field::DayOfYear => 3,
            _ => 2,
        }
    }
}

/// Pattern as written, optional sections still nested
#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Literal(String),
    Field(Field, usize),
    Optional(Vec<Token>),
}

/// One flattened alternative of a pattern
#[derive(Debug, Clone, PartialEq, Eq)]
enum Element {
    Literal(String),
    Field(Field, usize),
}

/// Compiled pattern for a date, time-of-day or date-time kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TemporalPattern {
    kind: ValueKind,
    /// Every combination of optional sections, the all-present one first
    variants: Vec<Vec<Element>>,
}

impl TemporalPattern {
    pub(crate) fn compile(kind: ValueKind, pattern: &str) -> Result<Self, String> {
        let tokens = tokenize(pattern)?;
        check_fields(kind, &tokens)?;
        if count_optional(&tokens) > MAX_OPTIONAL_SECTIONS {
            return Err(format!(
                "more than {MAX_OPTIONAL_SECTIONS} optional sections"
            ));
        }
        Ok(Self::from_tokens(kind, &tokens))
    }

    /// The canonical pattern of a temporal kind, built without compiling
    pub(crate) fn default_for(kind: ValueKind) -> Self {
        let date = [
            Token::Field(Field::Year, 4),
            Token::Literal("-".to_string()),
            Token::Field(Field::Month, 2),
            Token::Literal("-".to_string()),
            Token::Field(Field::DayOfMonth, 2),
        ];
        let time = [
            Token::Field(Field::HourOfDay, 2),
            Token::Literal(":".to_string()),
            Token::Field(Field::Minute, 2),
            Token::Literal(":".to_string()),
            Token::Field(Field::Second, 2),
            Token::Optional(vec![
                Token::Literal(".".to_string()),
                Token::Field(Field::Fraction, 3),
            ]),
        ];
        let tokens: Vec<Token> = match kind {
            ValueKind::Date => date.to_vec(),
            ValueKind::TimeOfDay => time.to_vec(),
            _ => {
                let mut tokens = date.to_vec();
                tokens.push(Token::Literal(" ".to_string()));
                tokens.extend(time);
                tokens
            }
        };
        Self::from_tokens(kind, &tokens)
    }

    fn from_tokens(kind: ValueKind, tokens: &[Token]) -> Self {
        Self {
            kind,
            variants: expand(tokens),
        }
    }

    pub(crate) fn format_date(&self, date: NaiveDate) -> String {
        self.format(&date.and_time(NaiveTime::MIN))
    }

    pub(crate) fn format_time(&self, time: NaiveTime) -> String {
        self.format(&NaiveDate::default().and_time(time))
    }

    pub(crate) fn format(&self, moment: &NaiveDateTime) -> String {
        let mut out = String::new();
        for element in self.variants.first().into_iter().flatten() {
            match element {
                Element::Literal(text) => out.push_str(text),
                Element::Field(field, width) => render(&mut out, *field, *width, moment),
            }
        }
        out
    }

    /// First alternative that reads the whole text and resolves to a valid value
    pub(crate) fn parse(&self, text: &str) -> Option<Value> {
        self.variants
            .iter()
            .filter_map(|elements| read_fields(elements, text))
            .find_map(|fields| self.resolve(&fields))
    }

    fn resolve(&self, fields: &ParsedFields) -> Option<Value> {
        let value = match self.kind {
            ValueKind::Date => DateValue::from(fields.date()?).into(),
            ValueKind::TimeOfDay => TimeOfDayValue::from(fields.time()?).into(),
            ValueKind::DateTime => {
                DateTimeValue::from(NaiveDateTime::new(fields.date()?, fields.time()?)).into()
            }
            _ => return None,
        };
        Some(value)
    }
}

fn push_literal(tokens: &mut Vec<Token>, text: &str) {
    if let Some(Token::Literal(last)) = tokens.last_mut() {
        last.push_str(text);
    } else {
        tokens.push(Token::Literal(text.to_string()));
    }
}

fn tokenize(pattern: &str) -> Result<Vec<Token>, String> {
    let chars: Vec<char> = pattern.chars().collect();
    let mut stack: Vec<Vec<Token>> = vec![Vec::new()];
    let mut i = 0;

    while i < chars.len() {
        let ch = chars[i];
        let top = stack.last_mut().ok_or("unbalanced optional section")?;
        match ch {
            '\'' if chars.get(i + 1) == Some(&'\'') => {
                push_literal(top, "'");
                i += 2;
            }
            '\'' => {
                let mut text = String::new();
                i += 1;
                loop {
                    match chars.get(i) {
                        None => return Err("unterminated quoted literal".to_string()),
                        Some('\'') if chars.get(i + 1) == Some(&'\'') => {
                            text.push('\'');
                            i += 2;
                        }
                        Some('\'') => {
                            i += 1;
                            break;
                        }
                        Some(c) => {
                            text.push(*c);
                            i += 1;
                        }
                    }
                }
                push_literal(top, &text);
            }
            '[' => {
                stack.push(Vec::new());
                i += 1;
            }
            ']' => {
                if stack.len() < 2 {
                    return Err("']' without a matching '['".to_string());
                }
                let inner = stack.pop().unwrap_or_default();
                if let Some(parent) = stack.last_mut() {
                    parent.push(Token::Optional(inner));
                }
                i += 1;
            }
            '#' | '{' | '}' => return Err(format!("reserved character '{ch}'")),
            c if c.is_ascii_alphabetic() => {
                let (field, max_width) =
                    Field::from_letter(c).ok_or_else(|| format!("unknown pattern letter '{c}'"))?;
                let width = chars[i..].iter().take_while(|x| **x == c).count();
                if width > max_width {
                    return Err(format!("too many pattern letters '{c}'"));
                }
                top.push(Token::Field(field, width));
                i += width;
            }
            c => {
                let mut buf = [0; 4];
                push_literal(top, c.encode_utf8(&mut buf));
                i += 1;
            }
        }
    }

    if stack.len() != 1 {
        return Err("unclosed optional section '['".to_string());
    }
    Ok(stack.pop().unwrap_or_default())
}

fn check_fields(kind: ValueKind, tokens: &[Token]) -> Result<(), String> {
    for token in tokens {
        match token {
            Token::Field(field, _) if field.is_date() && kind == ValueKind::TimeOfDay => {
                return Err("date fields are not allowed in a time-of-day pattern".to_string());
            }
            Token::Field(field, _) if !field.is_date() && kind == ValueKind::Date => {
                return Err("time fields are not allowed in a date pattern".to_string());
            }
            Token::Optional(inner) => check_fields(kind, inner)?,
            _ => {}
        }
    }
    Ok(())
}

fn count_optional(tokens: &[Token]) -> usize {
    tokens
        .iter()
        .map(|token| match token {
            Token::Optional(inner) => 1 + count_optional(inner),
            _ => 0,
        })
        .sum()
}

fn expand(tokens: &[Token]) -> Vec<Vec<Element>> {
    let mut variants: Vec<Vec<Element>> = vec![Vec::new()];
    for token in tokens {
        match token {
            Token::Literal(text) => {
                for variant in &mut variants {
                    variant.push(Element::Literal(text.clone()));
                }
            }
            Token::Field(field, width) => {
                for variant in &mut variants {
                    variant.push(Element::Field(*field, *width));
                }
            }
            Token::Optional(inner) => {
                let inner_variants = expand(inner);
                let mut next = Vec::with_capacity(variants.len() * (inner_variants.len() + 1));
                for variant in &variants {
                    for inner_variant in &inner_variants {
                        let mut with = variant.clone();
                        with.extend(inner_variant.iter().cloned());
                        next.push(with);
                    }
                    next.push(variant.clone());
                }
                variants = next;
            }
        }
    }
    variants
}

fn render(out: &mut String, field: Field, width: usize, moment: &NaiveDateTime) {
    let pad = |value: u32| format!("{:0width$}", value, width = width);
    let text = match field {
        Field::Year => {
            let year = moment.year();
            if width == 2 {
                format!("{:02}", year.rem_euclid(100))
            } else if year < 0 {
                format!("-{}", pad(year.unsigned_abs()))
            } else {
                pad(year.unsigned_abs())
            }
        }
        Field::Month => month_text(moment.month0(), width),
        Field::DayOfMonth => pad(moment.day()),
        Field::DayOfYear => pad(moment.ordinal()),
        Field::Weekday => {
            let names = WEEKDAY_NAMES.get(moment.weekday().num_days_from_monday() as usize);
            match (names, width) {
                (Some(n), 4) => n.full.clone(),
                (Some(n), 5) => n.full.chars().take(1).collect(),
                (Some(n), _) => n.short.clone(),
                (None, _) => String::new(),
            }
        }
        Field::AmPm => if moment.hour() < 12 { "AM" } else { "PM" }.to_string(),
        Field::HourOfDay => pad(moment.hour()),
        Field::ClockHourOfDay => pad(if moment.hour() == 0 { 24 } else { moment.hour() }),
        Field::HourOfAmPm => pad(moment.hour() % 12),
        Field::ClockHourOfAmPm => pad(match moment.hour() % 12 {
            0 => 12,
            h => h,
        }),
        Field::Minute => pad(moment.minute()),
        Field::Second => pad(moment.second()),
        Field::Fraction => {
            let millis = (moment.nanosecond() / 1_000_000).min(999);
            let mut digits = format!("{:03}", millis);
            digits.truncate(width.min(3));
            while digits.len() < width {
                digits.push('0');
            }
            digits
        }
    };
    out.push_str(&text);
}

fn month_text(month0: u32, width: usize) -> String {
    if width <= 2 {
        return format!("{:0width$}", month0 + 1, width = width);
    }
    match (MONTH_NAMES.get(month0 as usize), width) {
        (Some(names), 3) => names.short.clone(),
        (Some(names), 4) => names.full.clone(),
        (Some(names), _) => names.full.chars().take(1).collect(),
        (None, _) => String::new(),
    }
}

/// Raw field values read from text, before calendar validation
#[derive(Debug, Default)]
struct ParsedFields {
    year: Option<i32>,
    month: Option<u32>,
    day: Option<u32>,
    day_of_year: Option<u32>,
    /// Days from Monday
    weekday: Option<u32>,
    pm: Option<bool>,
    hour_of_day: Option<u32>,
    hour_of_am_pm: Option<u32>,
    minute: Option<u32>,
    second: Option<u32>,
    millisecond: Option<u32>,
}

impl ParsedFields {
    fn date(&self) -> Option<NaiveDate> {
        let year = self.year?;
        let date = match (self.month, self.day, self.day_of_year) {
            (Some(month), Some(day), day_of_year) => {
                let date = NaiveDate::from_ymd_opt(year, month, day)?;
                if day_of_year.is_some_and(|d| d != date.ordinal()) {
                    return None;
                }
                date
            }
            (None, None, Some(day_of_year)) => NaiveDate::from_yo_opt(year, day_of_year)?,
            _ => return None,
        };
        if self
            .weekday
            .is_some_and(|w| w != date.weekday().num_days_from_monday())
        {
            return None;
        }
        Some(date)
    }

    /// Without an AM/PM marker a 12-hour clock reads as AM
    fn time(&self) -> Option<NaiveTime> {
        let hour = match (self.hour_of_day, self.hour_of_am_pm) {
            (Some(hour), Some(hour12)) if hour % 12 != hour12 => return None,
            (Some(hour), _) => hour,
            (None, Some(hour12)) => hour12 + if self.pm == Some(true) { 12 } else { 0 },
            (None, None) => return None,
        };
        if self.pm.is_some_and(|pm| pm != (hour >= 12)) {
            return None;
        }
        NaiveTime::from_hms_milli_opt(
            hour,
            self.minute.unwrap_or(0),
            self.second.unwrap_or(0),
            self.millisecond.unwrap_or(0),
        )
    }
}

/// Store a field, failing if an earlier occurrence disagrees
fn assign<T: PartialEq>(slot: &mut Option<T>, value: T) -> Option<()> {
    match slot {
        Some(existing) if *existing != value => None,
        _ => {
            *slot = Some(value);
            Some(())
        }
    }
}

fn read_fields(elements: &[Element], text: &str) -> Option<ParsedFields> {
    let mut fields = ParsedFields::default();
    let mut rest = text;
    for (i, element) in elements.iter().enumerate() {
        rest = match element {
            Element::Literal(literal) => rest.strip_prefix(literal.as_str())?,
            Element::Field(field, width) => {
                // Abutting numeric fields have no delimiter, so take exact widths
                let numeric_at = |j: Option<usize>| {
                    matches!(
                        j.and_then(|j| elements.get(j)),
                        Some(Element::Field(other, other_width)) if other.is_numeric(*other_width)
                    )
                };
                let adjacent = field.is_numeric(*width)
                    && (numeric_at(i.checked_sub(1)) || numeric_at(Some(i + 1)));
                read_field(&mut fields, *field, *width, adjacent, rest)?
            }
        };
    }
    rest.is_empty().then_some(fields)
}

/// Take between `min` and `max` leading ASCII digits
fn take_digits(text: &str, min: usize, max: usize) -> Option<(&str, &str)> {
    let len = text
        .bytes()
        .take(max)
        .take_while(|b| b.is_ascii_digit())
        .count();
    (len >= min).then(|| text.split_at(len))
}

fn read_number(text: &str, field: Field, width: usize, adjacent: bool) -> Option<(u32, &str)> {
    let (min, max) = if adjacent && width > 1 {
        (width, width)
    } else {
        (1, field.max_digits())
    };
    let (digits, rest) = take_digits(text, min, max)?;
    Some((digits.parse().ok()?, rest))
}

fn read_name<'a>(text: &'a str, names: &[Names]) -> Option<(u32, &'a str)> {
    let matches_prefix = |name: &str| {
        text.get(..name.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(name))
    };
    names
        .iter()
        .position(|n| matches_prefix(&n.full))
        .map(|idx| (idx, names[idx].full.len()))
        .or_else(|| {
            names
                .iter()
                .position(|n| matches_prefix(&n.short))
                .map(|idx| (idx, names[idx].short.len()))
        })
        .map(|(idx, len)| (idx as u32, &text[len..]))
}

fn read_field<'a>(
    fields: &mut ParsedFields,
    field: Field,
    width: usize,
    adjacent: bool,
    text: &'a str,
) -> Option<&'a str> {
    match field {
        Field::Month if width >= 3 => {
            let (idx, rest) = read_name(text, &MONTH_NAMES)?;
            assign(&mut fields.month, idx + 1)?;
            Some(rest)
        }
        Field::Weekday => {
            let (idx, rest) = read_name(text, &WEEKDAY_NAMES)?;
            assign(&mut fields.weekday, idx)?;
            Some(rest)
        }
        Field::AmPm => {
            let head = text.get(..2)?;
            let pm = if head.eq_ignore_ascii_case("AM") {
                false
            } else if head.eq_ignore_ascii_case("PM") {
                true
            } else {
                return None;
            };
            assign(&mut fields.pm, pm)?;
            Some(&text[2..])
        }
        Field::Year => {
            if width == 2 {
                let (digits, rest) = take_digits(text, 2, 2)?;
                assign(&mut fields.year, 2000 + digits.parse::<i32>().ok()?)?;
                return Some(rest);
            }
            let (negative, unsigned) = match text.as_bytes().first() {
                Some(b'-') => (true, &text[1..]),
                Some(b'+') => (false, &text[1..]),
                _ => (false, text),
            };
            let (magnitude, rest) = read_number(unsigned, field, width, adjacent)?;
            let year = i32::try_from(magnitude).ok()?;
            assign(&mut fields.year, if negative { -year } else { year })?;
            Some(rest)
        }
        Field::Fraction => {
            let (min, max) = if adjacent { (width, width) } else { (1, 9) };
            let (digits, rest) = take_digits(text, min, max)?;
            let millis = format!("{digits:0<3}")[..3].parse().ok()?;
            assign(&mut fields.millisecond, millis)?;
            Some(rest)
        }
        _ => {
            let (value, rest) = read_number(text, field, width, adjacent)?;
            match field {
                Field::Month => assign(&mut fields.month, value)?,
                Field::DayOfMonth => assign(&mut fields.day, value)?,
                Field::DayOfYear => assign(&mut fields.day_of_year, value)?,
                Field::HourOfDay => assign(&mut fields.hour_of_day, value)?,
                Field::ClockHourOfDay => match value {
                    1..=24 => assign(&mut fields.hour_of_day, value % 24)?,
                    _ => return None,
                },
                Field::HourOfAmPm => match value {
                    0..=11 => assign(&mut fields.hour_of_am_pm, value)?,
                    _ => return None,
                },
                Field::ClockHourOfAmPm => match value {
                    1..=12 => assign(&mut fields.hour_of_am_pm, value % 12)?,
                    _ => return None,
                },
                Field::Minute => assign(&mut fields.minute, value)?,
                Field::Second => assign(&mut fields.second, value)?,
                _ => return None,
            }
            Some(rest)
        }
    }
}
