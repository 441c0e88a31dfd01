//! Decimal number patterns
//!
//! Supports the `DecimalFormat` subset used for display:
//! - `0` required digit, `#` optional digit, `,` grouping, `.` decimal point
//! - `E0` scientific notation (minimum exponent digits = number of `0`s)
//! - `%` multiplies by 100 and `‰` by 1000 when formatting
//! - literal prefix/suffix text, `'quoted'` literals and `''` for a quote
//! - an optional `;negative` subpattern supplying the negative affixes
//!
//! `General` renders with locale grouping and the shortest fraction that reads
//! back to the same `f64`.

use crate::locale::NumberSymbols;

const GENERAL_GROUPING: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum NumberPattern {
    General,
    Decimal(DecimalPattern),
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct DecimalPattern {
    positive: Affixes,
    negative: Option<Affixes>,
    multiplier: u32,
    digits: DigitSpec,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Affixes {
    prefix: String,
    suffix: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DigitSpec {
    min_int: usize,
    grouping: Option<usize>,
    min_frac: usize,
    max_frac: usize,
    /// Minimum exponent digits when scientific
    exponent: Option<usize>,
}

/// One `;`-separated half of a pattern, before digit analysis
struct Subpattern {
    affixes: Affixes,
    number: String,
    multiplier: u32,
}

#[derive(PartialEq, Eq)]
enum Phase {
    Prefix,
    Number,
    Suffix,
}

impl NumberPattern {
    pub(crate) fn compile(pattern: &str) -> Result<Self, String> {
        if pattern.trim().eq_ignore_ascii_case("general") {
            return Ok(NumberPattern::General);
        }

        let halves = split_unquoted(pattern, ';');
        if halves.len() > 2 {
            return Err("at most one ';' negative subpattern is allowed".to_string());
        }

        let positive = parse_subpattern(&halves[0])?;
        let digits = parse_digits(&positive.number)?;
        let negative = match halves.get(1) {
            Some(half) => Some(parse_subpattern(half)?.affixes),
            None => None,
        };

        Ok(NumberPattern::Decimal(DecimalPattern {
            positive: positive.affixes,
            negative,
            multiplier: positive.multiplier,
            digits,
        }))
    }

    pub(crate) fn format(&self, value: f64, symbols: &NumberSymbols) -> String {
        match self {
            NumberPattern::General => format_general(value, symbols),
            NumberPattern::Decimal(pattern) => pattern.format(value, symbols),
        }
    }

    /// Read a number, tolerating a trailing percent marker
    ///
    /// The marker is dropped without rescaling: `"22%"` reads as `22`.
    pub(crate) fn parse(&self, text: &str, symbols: &NumberSymbols) -> Option<f64> {
        let mut text = text.trim();
        let mut negative = false;
        let mut grouping = Some(GENERAL_GROUPING);

        if let NumberPattern::Decimal(pattern) = self {
            grouping = pattern.digits.grouping;
            if let Some(rest) = pattern.negative.as_ref().and_then(|n| n.strip(text)) {
                text = rest;
                negative = true;
            } else if let Some(rest) = pattern.strip_implicit_negative(text) {
                text = rest;
                negative = true;
            } else if let Some(rest) = pattern.positive.strip(text) {
                text = rest;
            }
        }

        let value = read_number(text, symbols, grouping)?;
        Some(if negative { -value } else { value })
    }
}

impl DecimalPattern {
    /// Without a `;negative` subpattern a negative number is written as `-`
    /// before the positive prefix
    fn strip_implicit_negative<'a>(&self, text: &'a str) -> Option<&'a str> {
        if self.negative.is_some() || self.positive.prefix.is_empty() {
            return None;
        }
        let rest = text
            .strip_prefix('-')
            .or_else(|| text.strip_prefix('\u{2212}'))?;
        self.positive
            .strip(rest)
            .filter(|body| !body.starts_with(['-', '+', '\u{2212}']))
    }

    fn format(&self, value: f64, symbols: &NumberSymbols) -> String {
        if value.is_nan() {
            return "NaN".to_string();
        }

        let abs = value.abs() * self.multiplier as f64;
        let body = if abs.is_infinite() {
            "\u{221e}".to_string()
        } else if let Some(exp_digits) = self.digits.exponent {
            format_scientific(abs, &self.digits, exp_digits, symbols)
        } else {
            format_fixed(abs, &self.digits, symbols)
        };

        match (value.is_sign_negative(), &self.negative) {
            (true, Some(negative)) => format!("{}{}{}", negative.prefix, body, negative.suffix),
            (true, None) => format!("-{}{}{}", self.positive.prefix, body, self.positive.suffix),
            (false, _) => format!("{}{}{}", self.positive.prefix, body, self.positive.suffix),
        }
    }
}

impl Affixes {
    /// Strip both affixes if the text carries them; `None` for empty affixes
    fn strip<'a>(&self, text: &'a str) -> Option<&'a str> {
        if self.prefix.is_empty() && self.suffix.is_empty() {
            return None;
        }
        let rest = text.strip_prefix(self.prefix.as_str())?;
        rest.strip_suffix(self.suffix.as_str()).map(str::trim)
    }
}

fn split_unquoted(pattern: &str, delimiter: char) -> Vec<String> {
    let mut parts = vec![String::new()];
    let mut in_quotes = false;
    for ch in pattern.chars() {
        if ch == '\'' {
            in_quotes = !in_quotes;
        }
        if ch == delimiter && !in_quotes {
            parts.push(String::new());
        } else if let Some(last) = parts.last_mut() {
            last.push(ch);
        }
    }
    parts
}

fn parse_subpattern(raw: &str) -> Result<Subpattern, String> {
    let mut affixes = Affixes::default();
    let mut number = String::new();
    let mut multiplier = 1;
    let mut phase = Phase::Prefix;

    let chars: Vec<char> = raw.chars().collect();
    let mut i = 0;
    while i < chars.len() {
        let ch = chars[i];
        if ch == '\'' {
            if phase == Phase::Number {
                phase = Phase::Suffix;
            }
            let affix = if phase == Phase::Prefix {
                &mut affixes.prefix
            } else {
                &mut affixes.suffix
            };
            if chars.get(i + 1) == Some(&'\'') {
                affix.push('\'');
                i += 2;
                continue;
            }
            i += 1;
            loop {
                match chars.get(i) {
                    None => return Err("unterminated quoted literal".to_string()),
                    Some('\'') if chars.get(i + 1) == Some(&'\'') => {
                        affix.push('\'');
                        i += 2;
                    }
                    Some('\'') => {
                        i += 1;
                        break;
                    }
                    Some(c) => {
                        affix.push(*c);
                        i += 1;
                    }
                }
            }
            continue;
        }

        let is_number_char =
            matches!(ch, '#' | '0' | ',' | '.') || (ch == 'E' && phase == Phase::Number);
        match phase {
            Phase::Prefix | Phase::Number if is_number_char => {
                phase = Phase::Number;
                number.push(ch);
            }
            Phase::Suffix if matches!(ch, '#' | '0') => {
                return Err(format!("digit placeholder '{ch}' after the suffix"));
            }
            _ => {
                if phase == Phase::Number {
                    phase = Phase::Suffix;
                }
                match ch {
                    '%' | '\u{2030}' => {
                        if multiplier != 1 {
                            return Err("more than one percent or per-mille sign".to_string());
                        }
                        multiplier = if ch == '%' { 100 } else { 1000 };
                    }
                    _ => {}
                }
                if phase == Phase::Prefix {
                    affixes.prefix.push(ch);
                } else {
                    affixes.suffix.push(ch);
                }
            }
        }
        i += 1;
    }

    Ok(Subpattern {
        affixes,
        number,
        multiplier,
    })
}

fn parse_digits(number: &str) -> Result<DigitSpec, String> {
    let (mantissa, exponent) = match number.split_once('E') {
        Some((mantissa, exp)) => {
            if exp.is_empty() || !exp.chars().all(|c| c == '0') {
                return Err("exponent must be one or more '0'".to_string());
            }
            (mantissa, Some(exp.len()))
        }
        None => (number, None),
    };

    let (int_pat, frac_pat) = match mantissa.split_once('.') {
        Some((int_pat, frac_pat)) => (int_pat, frac_pat),
        None => (mantissa, ""),
    };
    if frac_pat.contains('.') {
        return Err("more than one decimal point".to_string());
    }
    if frac_pat.contains(',') {
        return Err("grouping separator in the fraction".to_string());
    }

    let int_digits: String = int_pat.chars().filter(|c| *c != ',').collect();
    if int_digits.contains("0#") {
        return Err("'#' after '0' in the integer part".to_string());
    }
    if frac_pat.contains("#0") {
        return Err("'0' after '#' in the fraction".to_string());
    }
    if int_digits.is_empty() && frac_pat.is_empty() {
        return Err("missing digit placeholder".to_string());
    }

    let grouping = match int_pat.rfind(',') {
        Some(pos) => {
            let size = int_pat.len() - pos - 1;
            if size == 0 {
                return Err("grouping separator at the end of the integer part".to_string());
            }
            Some(size)
        }
        None => None,
    };

    Ok(DigitSpec {
        min_int: int_digits.chars().filter(|c| *c == '0').count(),
        grouping: if exponent.is_some() { None } else { grouping },
        min_frac: frac_pat.chars().filter(|c| *c == '0').count(),
        max_frac: frac_pat.len(),
        exponent,
    })
}

fn format_general(value: f64, symbols: &NumberSymbols) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    let mut out = String::new();
    if value.is_sign_negative() {
        out.push('-');
    }
    if value.is_infinite() {
        out.push('\u{221e}');
        return out;
    }

    // Display never uses exponent notation and is the shortest round-trip form
    let digits = value.abs().to_string();
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits.as_str(), ""));
    out.push_str(&group_digits(int_part, GENERAL_GROUPING, symbols.grouping_sep));
    if !frac_part.is_empty() {
        out.push(symbols.decimal_sep);
        out.push_str(frac_part);
    }
    out
}

fn format_fixed(value: f64, spec: &DigitSpec, symbols: &NumberSymbols) -> String {
    let rounded = format!("{:.*}", spec.max_frac, value);
    let (int_part, frac_part) = rounded.split_once('.').unwrap_or((rounded.as_str(), ""));

    let mut int_part = int_part.trim_start_matches('0').to_string();
    while int_part.len() < spec.min_int {
        int_part.insert(0, '0');
    }
    if let Some(size) = spec.grouping {
        int_part = group_digits(&int_part, size, symbols.grouping_sep);
    }

    let mut frac_part = frac_part.to_string();
    while frac_part.len() > spec.min_frac && frac_part.ends_with('0') {
        frac_part.pop();
    }

    let mut out = int_part;
    if !frac_part.is_empty() {
        out.push(symbols.decimal_sep);
        out.push_str(&frac_part);
    }
    if out.is_empty() {
        out.push('0');
    }
    out
}

fn format_scientific(value: f64, spec: &DigitSpec, exp_digits: usize, symbols: &NumberSymbols) -> String {
    let int_digits = spec.min_int.max(1) as i32;
    let mut exponent = if value == 0.0 {
        0
    } else {
        value.log10().floor() as i32 - (int_digits - 1)
    };
    let mut mantissa = value / 10f64.powi(exponent);

    // Rounding can carry into another integer digit
    let factor = 10f64.powi(spec.max_frac as i32);
    if (mantissa * factor).round() / factor >= 10f64.powi(int_digits) {
        mantissa /= 10.0;
        exponent += 1;
    }

    let mantissa = format_fixed(mantissa, spec, symbols);
    let sign = if exponent < 0 { "-" } else { "" };
    format!(
        "{mantissa}E{sign}{:0width$}",
        exponent.unsigned_abs(),
        width = exp_digits
    )
}

fn group_digits(int_part: &str, size: usize, sep: char) -> String {
    let len = int_part.chars().count();
    let mut out = String::with_capacity(int_part.len() + len / size.max(1));
    for (i, ch) in int_part.chars().enumerate() {
        out.push(ch);
        let remaining = len - i - 1;
        if remaining > 0 && remaining % size == 0 {
            out.push(sep);
        }
    }
    out
}

/// Read a plain localized number: sign, grouped integer digits, fraction
/// and exponent. The whole text must be consumed.
fn read_number(text: &str, symbols: &NumberSymbols, grouping: Option<usize>) -> Option<f64> {
    let text = text
        .strip_suffix(['%', '\u{2030}'])
        .map(str::trim_end)
        .unwrap_or(text);

    let (negative, text) = match text.chars().next()? {
        '-' | '\u{2212}' => (true, &text[text.chars().next()?.len_utf8()..]),
        '+' => (false, &text[1..]),
        _ => (false, text),
    };

    let magnitude = match text {
        "NaN" => Some(f64::NAN),
        "\u{221e}" => Some(f64::INFINITY),
        t if t.eq_ignore_ascii_case("infinity") || t.eq_ignore_ascii_case("inf") => {
            Some(f64::INFINITY)
        }
        t => read_digits(t, symbols, grouping),
    }?;
    Some(if negative { -magnitude } else { magnitude })
}

fn read_digits(text: &str, symbols: &NumberSymbols, grouping: Option<usize>) -> Option<f64> {
    let mut chars = text.chars().peekable();

    let mut groups: Vec<String> = vec![String::new()];
    while let Some(&c) = chars.peek() {
        if c.is_ascii_digit() {
            groups.last_mut()?.push(c);
        } else if grouping.is_some() && symbols.is_grouping(c) {
            if groups.last()?.is_empty() {
                return None;
            }
            groups.push(String::new());
        } else {
            break;
        }
        chars.next();
    }
    if let (Some(size), true) = (grouping, groups.len() > 1) {
        let first_ok = (1..=size).contains(&groups[0].len());
        let rest_ok = groups[1..].iter().all(|g| g.len() == size);
        if !first_ok || !rest_ok {
            return None;
        }
    }
    let int_part: String = groups.concat();

    let mut frac_part = String::new();
    if chars.peek() == Some(&symbols.decimal_sep) {
        chars.next();
        while let Some(c) = chars.next_if(char::is_ascii_digit) {
            frac_part.push(c);
        }
    }
    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }

    let mut normalized = if int_part.is_empty() { "0".to_string() } else { int_part };
    if !frac_part.is_empty() {
        normalized.push('.');
        normalized.push_str(&frac_part);
    }
    if matches!(chars.peek(), Some('E' | 'e')) {
        chars.next();
        normalized.push('e');
        if let Some(sign) = chars.next_if(|c| *c == '-' || *c == '+') {
            normalized.push(sign);
        }
        let mut exp_digits = 0;
        while let Some(c) = chars.next_if(char::is_ascii_digit) {
            normalized.push(c);
            exp_digits += 1;
        }
        if exp_digits == 0 {
            return None;
        }
    }

    if chars.next().is_some() {
        return None;
    }
    normalized.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::Locale;
    use pretty_assertions::assert_eq;

    fn us() -> NumberSymbols {
        Locale::en_us().number_symbols()
    }

    fn de() -> NumberSymbols {
        Locale::parse("de-DE").unwrap().number_symbols()
    }

    fn fmt(pattern: &str, value: f64) -> String {
        NumberPattern::compile(pattern).unwrap().format(value, &us())
    }

    #[test]
    fn test_fixed_patterns() {
        assert_eq!(fmt("#,##0.000", -12000.23), "-12,000.230");
        assert_eq!(fmt("#.##", -12.23), "-12.23");
        assert_eq!(fmt("#.##", 0.5), ".5");
        assert_eq!(fmt("#.##", 0.0), "0");
        assert_eq!(fmt("0.00", 3.14159), "3.14");
        assert_eq!(fmt("000", 7.0), "007");
        assert_eq!(fmt("#,##0", 1234567.4), "1,234,567");
        // Only the last grouping interval counts
        assert_eq!(fmt("#,##,##0", 1234567.0), "1,234,567");
    }

    #[test]
    fn test_affixes_and_percent() {
        assert_eq!(fmt("#0.0%", 0.256), "25.6%");
        assert_eq!(fmt("'$'#,##0.00", 1234.5), "$1,234.50");
        assert_eq!(fmt("#,##0 'units'", 3.0), "3 units");
        assert_eq!(fmt("#,##0;(#,##0)", -42.0), "(42)");
        assert_eq!(fmt("#,##0;(#,##0)", 42.0), "42");
        assert_eq!(fmt("0 o''clock", 5.0), "5 o'clock");
    }

    #[test]
    fn test_scientific() {
        assert_eq!(fmt("0.###E0", 1234.0), "1.234E3");
        assert_eq!(fmt("0.0E00", 0.00012), "1.2E-04");
        assert_eq!(fmt("0.#E0", 0.0), "0E0");
    }

    #[test]
    fn test_general() {
        let general = NumberPattern::General;
        assert_eq!(general.format(1234567.25, &us()), "1,234,567.25");
        assert_eq!(general.format(1234567.25, &de()), "1.234.567,25");
        assert_eq!(general.format(-0.0, &us()), "-0");
        assert_eq!(general.format(f64::NAN, &us()), "NaN");
        assert_eq!(general.format(f64::NEG_INFINITY, &us()), "-\u{221e}");
        assert_eq!(general.format(0.1 + 0.2, &us()), "0.30000000000000004");
    }

    #[test]
    fn test_invalid_patterns() {
        assert!(NumberPattern::compile("abc").is_err());
        assert!(NumberPattern::compile("#,##0.0#0").is_err());
        assert!(NumberPattern::compile("0#").is_err());
        assert!(NumberPattern::compile("#,").is_err());
        assert!(NumberPattern::compile("0.0.0").is_err());
        assert!(NumberPattern::compile("0%%").is_err());
        assert!(NumberPattern::compile("0;0;0").is_err());
        assert!(NumberPattern::compile("'unterminated 0").is_err());
    }

    #[test]
    fn test_parse_general() {
        let general = NumberPattern::General;
        assert_eq!(general.parse("22", &us()), Some(22.0));
        assert_eq!(general.parse("22%", &us()), Some(22.0));
        assert_eq!(general.parse("22.0", &us()), Some(22.0));
        assert_eq!(general.parse("-1,234.5", &us()), Some(-1234.5));
        assert_eq!(general.parse("1.234,5", &de()), Some(1234.5));
        assert_eq!(general.parse("1.5e3", &us()), Some(1500.0));
        assert_eq!(general.parse(".5", &us()), Some(0.5));
        assert_eq!(general.parse("#0.0%", &us()), None);
        assert_eq!(general.parse("12,34", &us()), None);
        assert_eq!(general.parse("12abc", &us()), None);
        assert_eq!(general.parse("", &us()), None);
        assert_eq!(general.parse("-", &us()), None);
        assert!(general.parse("NaN", &us()).unwrap().is_nan());
        assert_eq!(general.parse("-\u{221e}", &us()), Some(f64::NEG_INFINITY));
    }

    #[test]
    fn test_parse_with_affixes() {
        let pattern = NumberPattern::compile("'$'#,##0.00;('$'#,##0.00)").unwrap();
        assert_eq!(pattern.parse("$1,234.50", &us()), Some(1234.5));
        assert_eq!(pattern.parse("($1,234.50)", &us()), Some(-1234.5));
        assert_eq!(pattern.parse("1234.5", &us()), Some(1234.5));

        // Negatives of a prefixed pattern read back with their sign
        let dollars = NumberPattern::compile("'$'#,##0.00").unwrap();
        assert_eq!(dollars.parse("-$5.00", &us()), Some(-5.0));
        assert_eq!(dollars.parse("$5.00", &us()), Some(5.0));
        assert_eq!(dollars.parse("-$-5.00", &us()), None);
        for value in [-5.0, -1234.5, -0.25] {
            let text = dollars.format(value, &us());
            assert_eq!(dollars.parse(&text, &us()), Some(value), "{text}");
        }
        let bare = NumberPattern::compile("$0").unwrap();
        assert_eq!(bare.format(-5.0, &us()), "-$5");
        assert_eq!(bare.parse("-$5", &us()), Some(-5.0));

        // The percent sign is dropped without rescaling
        let percent = NumberPattern::compile("#0.0%").unwrap();
        assert_eq!(percent.parse("25.6%", &us()), Some(25.6));

        // No grouping in the pattern, so no grouping in the input
        let plain = NumberPattern::compile("0.00").unwrap();
        assert_eq!(plain.parse("1,234.00", &us()), None);
    }

    #[test]
    fn test_general_round_trips() {
        let general = NumberPattern::General;
        for symbols in [us(), de(), Locale::parse("fr").unwrap().number_symbols()] {
            for value in [0.0, -0.0, 1.0, -12000.23, 1e300, 1e-300, 123456789.125, f64::MAX] {
                let text = general.format(value, &symbols);
                let back = general.parse(&text, &symbols).unwrap();
                assert_eq!(back.to_bits(), value.to_bits(), "{text}");
            }
        }
    }
}
