//! Default formatters read back exactly what they write

use proptest::prelude::*;
use std::cmp::Ordering;
use tabval::prelude::*;

const LOCALES: [&str; 6] = ["en-US", "de-DE", "de-CH", "fr-FR", "pt-PT", "ja-JP"];

fn formatter(kind: ValueKind, tag: &str) -> ValueFormatter {
    let locale = Locale::parse(tag).unwrap();
    FormatSettings::new(Locale::en_us()).create_default(kind, Some(&locale))
}

fn assert_round_trip(value: Value, tag: &str) -> std::result::Result<(), TestCaseError> {
    let formatter = formatter(value.kind(), tag);
    let text = formatter.format(&value).unwrap();
    let parsed = formatter.parse(&text);
    prop_assert_eq!(
        parsed.compare_to(&value).unwrap(),
        Ordering::Equal,
        "{} formatted as {:?} under {} read back as {}",
        value,
        text,
        tag,
        parsed
    );
    Ok(())
}

fn locale_tag() -> impl Strategy<Value = &'static str> {
    prop::sample::select(LOCALES.to_vec())
}

fn date_value() -> impl Strategy<Value = DateValue> {
    (-9999i32..=9999, 1i32..=12, 1i32..=31)
        .prop_filter_map("valid calendar date", |(y, m, d)| DateValue::new(y, m, d).ok())
}

fn time_value() -> impl Strategy<Value = TimeOfDayValue> {
    (0i32..24, 0i32..60, 0i32..60, prop_oneof![Just(0i32), 0i32..1000])
        .prop_map(|(h, m, s, ms)| TimeOfDayValue::with_millis(h, m, s, ms).unwrap())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn boolean_round_trips(value in any::<bool>(), tag in locale_tag()) {
        assert_round_trip(BooleanValue::new(value).into(), tag)?;
    }

    #[test]
    fn number_round_trips(
        value in any::<f64>().prop_filter("NaN has no single representation", |v| !v.is_nan()),
        tag in locale_tag(),
    ) {
        assert_round_trip(NumberValue::new(value).into(), tag)?;
    }

    #[test]
    fn integer_round_trips(value in any::<i64>(), tag in locale_tag()) {
        assert_round_trip(NumberValue::new(value as f64).into(), tag)?;
    }

    #[test]
    fn text_round_trips(value in ".*", tag in locale_tag()) {
        assert_round_trip(TextValue::new(value).into(), tag)?;
    }

    #[test]
    fn date_round_trips(value in date_value(), tag in locale_tag()) {
        assert_round_trip(value.into(), tag)?;
    }

    #[test]
    fn time_of_day_round_trips(value in time_value(), tag in locale_tag()) {
        assert_round_trip(value.into(), tag)?;
    }

    #[test]
    fn date_time_round_trips(date in date_value(), time in time_value(), tag in locale_tag()) {
        let value = DateTimeValue::from_parts(&date, &time).unwrap();
        assert_round_trip(value.into(), tag)?;
    }
}
