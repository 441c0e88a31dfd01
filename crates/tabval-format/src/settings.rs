//! Process-wide formatting configuration

use std::collections::BTreeMap;

use once_cell::sync::OnceCell;
use tabval_core::ValueKind;

use crate::error::FormatResult;
use crate::formatter::ValueFormatter;
use crate::locale::Locale;

/// Environment variables consulted for the default locale, in priority order
pub const LOCALE_ENV_VARS: [&str; 4] = ["TABVAL_LOCALE", "LC_ALL", "LC_MESSAGES", "LANG"];

static GLOBAL: OnceCell<FormatSettings> = OnceCell::new();

/// Settings applied when a formatter is requested without a locale
///
/// Construction calls take the settings explicitly; [`FormatSettings::global`]
/// is the single process-lifetime instance, fixed by [`FormatSettings::install`]
/// at startup or resolved from the environment on first use.
///
/// # Example
///
/// ```
/// use tabval_core::ValueKind;
/// use tabval_format::{FormatSettings, Locale};
///
/// let settings = FormatSettings::new(Locale::parse("de-DE").unwrap());
/// let formatter = settings.create_default(ValueKind::Number, None);
/// assert_eq!(formatter.locale().tag(), "de-DE");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FormatSettings {
    /// Locale used when a caller supplies none
    pub default_locale: Locale,
}

/// Outcome of pattern and locale resolution for one kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFormat {
    pub kind: ValueKind,
    pub pattern: String,
    pub locale: Locale,
}

impl Default for FormatSettings {
    fn default() -> Self {
        Self::new(Locale::en_us())
    }
}

impl FormatSettings {
    pub fn new(default_locale: Locale) -> Self {
        Self { default_locale }
    }

    /// Resolve the default locale from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolve the default locale through `lookup`, which stands in for the
    /// environment
    ///
    /// The first variable of [`LOCALE_ENV_VARS`] holding a recognizable tag
    /// wins. `C` and `POSIX` select `en-US`.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        for var in LOCALE_ENV_VARS {
            let Some(value) = lookup(var) else {
                continue;
            };
            let tag = value.trim();
            if tag.is_empty() {
                continue;
            }

            let base = tag.split(['.', '@']).next().unwrap_or(tag);
            if base == "C" || base == "POSIX" {
                tracing::debug!(var, tag, "POSIX locale selected, using en-US");
                return Self::default();
            }

            match Locale::parse(tag) {
                Ok(locale) => {
                    tracing::debug!(var, tag, locale = %locale, "resolved default locale");
                    return Self::new(locale);
                }
                Err(e) => {
                    tracing::warn!(var, tag, error = %e, "ignoring unrecognized locale");
                }
            }
        }

        tracing::debug!("no locale in the environment, using en-US");
        Self::default()
    }

    /// Fix the process-wide settings
    ///
    /// Succeeds once; later calls hand the rejected settings back.
    pub fn install(self) -> Result<(), FormatSettings> {
        GLOBAL.set(self)
    }

    /// The process-wide settings, resolved from the environment if none were
    /// installed
    pub fn global() -> &'static FormatSettings {
        GLOBAL.get_or_init(Self::from_env)
    }

    /// Effective pattern and locale for `kind`
    ///
    /// An absent or empty pattern selects the kind default; an absent locale
    /// selects [`FormatSettings::default_locale`].
    pub fn resolve(
        &self,
        kind: ValueKind,
        pattern: Option<&str>,
        locale: Option<&Locale>,
    ) -> ResolvedFormat {
        let pattern = match pattern {
            Some(p) if !p.is_empty() => p,
            _ => kind.default_pattern(),
        };
        ResolvedFormat {
            kind,
            pattern: pattern.to_string(),
            locale: locale.unwrap_or(&self.default_locale).clone(),
        }
    }

    /// Formatter using the kind's default pattern
    pub fn create_default(&self, kind: ValueKind, locale: Option<&Locale>) -> ValueFormatter {
        ValueFormatter::with_default_pattern(self.resolve(kind, None, locale))
    }

    /// Formatter for `pattern`, or the kind default when it is absent or empty
    pub fn create_from_pattern(
        &self,
        kind: ValueKind,
        pattern: Option<&str>,
        locale: Option<&Locale>,
    ) -> FormatResult<ValueFormatter> {
        ValueFormatter::compile(self.resolve(kind, pattern, locale))
    }

    /// One default formatter per kind
    pub fn create_default_formatters(
        &self,
        locale: Option<&Locale>,
    ) -> BTreeMap<ValueKind, ValueFormatter> {
        ValueKind::ALL
            .iter()
            .map(|&kind| (kind, self.create_default(kind, locale)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn settings_from(vars: &[(&str, &str)]) -> FormatSettings {
        let env: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        FormatSettings::from_lookup(|name| env.get(name).cloned())
    }

    #[test]
    fn test_env_priority() {
        let settings = settings_from(&[("LANG", "fr_FR.UTF-8"), ("LC_ALL", "de_DE")]);
        assert_eq!(settings.default_locale.tag(), "de-DE");

        let settings = settings_from(&[("LANG", "fr_FR.UTF-8"), ("TABVAL_LOCALE", "ja-JP")]);
        assert_eq!(settings.default_locale.tag(), "ja-JP");

        let settings = settings_from(&[("LANG", "pt_BR.UTF-8")]);
        assert_eq!(settings.default_locale.tag(), "pt-BR");
    }

    #[test]
    fn test_env_fallbacks() {
        assert_eq!(settings_from(&[]).default_locale, Locale::en_us());
        assert_eq!(
            settings_from(&[("LC_ALL", "C.UTF-8"), ("LANG", "de_DE")]).default_locale,
            Locale::en_us()
        );
        assert_eq!(
            settings_from(&[("LC_ALL", "POSIX")]).default_locale,
            Locale::en_us()
        );
        // Unrecognized and empty values are skipped
        assert_eq!(
            settings_from(&[("LC_ALL", "klingon"), ("LC_MESSAGES", ""), ("LANG", "it_IT")])
                .default_locale
                .tag(),
            "it-IT"
        );
    }

    #[test]
    fn test_resolve() {
        let settings = FormatSettings::new(Locale::parse("fr-FR").unwrap());

        let resolved = settings.resolve(ValueKind::Date, None, None);
        assert_eq!(resolved.pattern, "yyyy-MM-dd");
        assert_eq!(resolved.locale.tag(), "fr-FR");

        // An empty pattern means the default
        let resolved = settings.resolve(ValueKind::Boolean, Some(""), Some(&Locale::en_us()));
        assert_eq!(resolved.pattern, "true:false");
        assert_eq!(resolved.locale, Locale::en_us());

        let resolved = settings.resolve(ValueKind::Number, Some("#,##0.00"), None);
        assert_eq!(resolved.pattern, "#,##0.00");
    }

    #[test]
    fn test_default_formatters() {
        let settings = FormatSettings::default();
        let formatters = settings.create_default_formatters(None);
        assert_eq!(formatters.len(), 6);
        for (kind, formatter) in &formatters {
            let single = settings.create_default(*kind, None);
            assert_eq!(formatter.kind(), *kind);
            assert_eq!(formatter.pattern(), single.pattern());
            assert_eq!(formatter.locale(), single.locale());
        }
    }

    #[test]
    fn test_create_from_pattern_rejects_bad_patterns() {
        let settings = FormatSettings::default();
        assert!(settings
            .create_from_pattern(ValueKind::Boolean, Some("yes"), None)
            .is_err());
        assert!(settings
            .create_from_pattern(ValueKind::Date, Some("HH:mm"), None)
            .is_err());
        assert!(settings
            .create_from_pattern(ValueKind::Text, Some("anything"), None)
            .is_ok());
    }
}
