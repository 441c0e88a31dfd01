//! Locales and their number symbols

use std::fmt;
use std::str::FromStr;

use crate::error::{FormatError, FormatResult};

/// A language with an optional region (`en`, `en-US`, `fr-CA`)
///
/// Tags are accepted in BCP-47 (`de-CH`) or POSIX (`de_CH.UTF-8`,
/// `fr_FR@euro`) spelling and displayed in canonical BCP-47 form.
///
/// ```
/// use tabval_format::Locale;
///
/// let locale: Locale = "de_CH.UTF-8".parse().unwrap();
/// assert_eq!(locale.to_string(), "de-CH");
/// assert_eq!(locale.number_symbols().grouping_sep, '\'');
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct Locale {
    language: String,
    region: Option<String>,
}

/// Separators used when rendering and reading numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberSymbols {
    pub decimal_sep: char,
    pub grouping_sep: char,
}

impl NumberSymbols {
    const POINT_COMMA: Self = Self {
        decimal_sep: '.',
        grouping_sep: ',',
    };
    const COMMA_POINT: Self = Self {
        decimal_sep: ',',
        grouping_sep: '.',
    };
    /// U+00A0 NO-BREAK SPACE grouping
    const COMMA_SPACE: Self = Self {
        decimal_sep: ',',
        grouping_sep: '\u{a0}',
    };
    const POINT_APOSTROPHE: Self = Self {
        decimal_sep: '.',
        grouping_sep: '\'',
    };

    /// Whether `c` is accepted as a grouping separator when reading numbers
    ///
    /// Locales that group with a no-break space also accept the plain and
    /// narrow variants, since typed input rarely carries the exact one.
    pub(crate) fn is_grouping(&self, c: char) -> bool {
        if self.grouping_sep.is_whitespace() {
            matches!(c, ' ' | '\u{a0}' | '\u{202f}')
        } else {
            c == self.grouping_sep
        }
    }
}

impl Locale {
    /// Create a locale from a language and optional region subtag
    pub fn new(language: &str, region: Option<&str>) -> FormatResult<Self> {
        let language_ok =
            (2..=3).contains(&language.len()) && language.chars().all(|c| c.is_ascii_alphabetic());
        let region_ok = region.map_or(true, |r| {
            (r.len() == 2 && r.chars().all(|c| c.is_ascii_alphabetic()))
                || (r.len() == 3 && r.chars().all(|c| c.is_ascii_digit()))
        });
        if !language_ok || !region_ok {
            let tag = match region {
                Some(r) => format!("{language}-{r}"),
                None => language.to_string(),
            };
            return Err(FormatError::InvalidLocale(tag));
        }
        Ok(Self {
            language: language.to_ascii_lowercase(),
            region: region.map(str::to_ascii_uppercase),
        })
    }

    /// English (United States)
    pub fn en_us() -> Self {
        Self {
            language: "en".to_string(),
            region: Some("US".to_string()),
        }
    }

    /// Parse a BCP-47 or POSIX locale tag
    ///
    /// Encodings (`.UTF-8`), modifiers (`@euro`), scripts (`zh-Hant-TW`) and
    /// extensions (`-u-nu-latn`) are dropped.
    pub fn parse(tag: &str) -> FormatResult<Self> {
        let invalid = || FormatError::InvalidLocale(tag.to_string());
        let mut key = tag.trim();
        if let Some(idx) = key.find(['.', '@']) {
            key = &key[..idx];
        }
        let mut subtags = key.split(['-', '_']).filter(|s| !s.is_empty());
        let language = subtags.next().ok_or_else(invalid)?;
        let mut region = None;
        for subtag in subtags {
            // Singletons start extensions and private use
            if subtag.len() == 1 {
                break;
            }
            if subtag.len() == 4 && subtag.chars().all(|c| c.is_ascii_alphabetic()) {
                continue;
            }
            region = Some(subtag);
            break;
        }
        Self::new(language, region).map_err(|_| invalid())
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    /// Canonical BCP-47 tag (`en-US`)
    pub fn tag(&self) -> String {
        match &self.region {
            Some(region) => format!("{}-{}", self.language, region),
            None => self.language.clone(),
        }
    }

    /// Decimal and grouping separators for this locale
    pub fn number_symbols(&self) -> NumberSymbols {
        match (self.language.as_str(), self.region.as_deref()) {
            ("de" | "fr" | "it" | "rm", Some("CH" | "LI")) => NumberSymbols::POINT_APOSTROPHE,
            ("es", Some("MX" | "US" | "PR")) => NumberSymbols::POINT_COMMA,
            ("pt", Some("PT")) => NumberSymbols::COMMA_SPACE,
            (
                "de" | "es" | "it" | "nl" | "pt" | "da" | "id" | "tr" | "el" | "ro" | "hr" | "sl"
                | "sr" | "vi",
                _,
            ) => NumberSymbols::COMMA_POINT,
            (
                "fr" | "ru" | "pl" | "cs" | "sk" | "sv" | "nb" | "no" | "nn" | "fi" | "uk" | "hu"
                | "bg" | "lt" | "lv" | "et",
                _,
            ) => NumberSymbols::COMMA_SPACE,
            _ => NumberSymbols::POINT_COMMA,
        }
    }
}

impl Default for Locale {
    fn default() -> Self {
        Locale::en_us()
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.language)?;
        if let Some(region) = &self.region {
            write!(f, "-{}", region)?;
        }
        Ok(())
    }
}

impl FromStr for Locale {
    type Err = FormatError;

    fn from_str(s: &str) -> FormatResult<Self> {
        Locale::parse(s)
    }
}

impl TryFrom<String> for Locale {
    type Error = FormatError;

    fn try_from(s: String) -> FormatResult<Self> {
        Locale::parse(&s)
    }
}

impl From<Locale> for String {
    fn from(locale: Locale) -> Self {
        locale.tag()
    }
}
