//! Process-wide settings, installed once per test binary

use pretty_assertions::assert_eq;
use tabval::prelude::*;

#[test]
fn test_installed_settings_drive_the_conveniences() {
    let german = Locale::parse("de-DE").unwrap();
    // Nothing else in this binary touches the global, so the install wins
    FormatSettings::new(german.clone()).install().unwrap();
    assert_eq!(FormatSettings::global().default_locale, german);

    let rejected = FormatSettings::new(Locale::en_us()).install().unwrap_err();
    assert_eq!(rejected.default_locale, Locale::en_us());
    assert_eq!(FormatSettings::global().default_locale, german);

    let formatter = ValueFormatter::create_default(ValueKind::Number, None);
    assert_eq!(formatter.locale(), &german);
    assert_eq!(
        formatter.format(&NumberValue::new(1234.5).into()).unwrap(),
        "1.234,5"
    );

    let formatter =
        ValueFormatter::create_from_pattern(ValueKind::Date, Some("dd.MM.yyyy"), None).unwrap();
    assert_eq!(
        formatter.parse("03.10.1990"),
        DateValue::new(1990, 10, 3).unwrap().into()
    );

    let formatters = ValueFormatter::create_default_formatters(Some(&Locale::en_us()));
    assert_eq!(formatters.len(), 6);
    assert!(formatters.values().all(|f| f.locale() == &Locale::en_us()));
}
