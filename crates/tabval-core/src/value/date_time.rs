//! Date-time values (no time zone)

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use chrono::NaiveDateTime;
use once_cell::sync::OnceCell;

use super::date::DateFields;
use super::time_of_day::TimeFields;
use super::{mix_fields, DateValue, TimeOfDayValue};
use crate::error::{Error, Result};
use crate::kind::ValueKind;

static NULL_DATE_TIME: DateTimeValue = DateTimeValue {
    fields: None,
    hash: OnceCell::new(),
};

/// A calendar date combined with a time of day, or the null date-time
///
/// ```
/// use tabval_core::DateTimeValue;
///
/// let dt = DateTimeValue::new(2010, 12, 11, 1, 2, 33, 142).unwrap();
/// assert_eq!(dt.to_string(), "2010-12-11 01:02:33.142");
/// assert_eq!(dt.to_query_literal().unwrap(), "DATETIME '2010-12-11 1:2:33.142'");
/// ```
#[derive(Debug, Clone)]
pub struct DateTimeValue {
    fields: Option<(DateFields, TimeFields)>,
    hash: OnceCell<i32>,
}

impl DateTimeValue {
    /// Create a date-time from a one-based calendar triple and clock fields
    pub fn new(
        year: i32,
        month: i32,
        day: i32,
        hour: i32,
        minute: i32,
        second: i32,
        millisecond: i32,
    ) -> Result<Self> {
        let date = DateFields::from_calendar(year, month, day)?;
        let time = TimeFields::from_clock(hour, minute, second, millisecond)?;
        Ok(Self::from_fields(date, time))
    }

    /// Combine a date and a time of day, keeping both exactly
    ///
    /// Fails with [`Error::NullAccess`] if either part is null.
    pub fn from_parts(date: &DateValue, time: &TimeOfDayValue) -> Result<Self> {
        let date = date.fields().ok_or(Error::NullAccess(ValueKind::Date))?;
        let time = time.fields().ok_or(Error::NullAccess(ValueKind::TimeOfDay))?;
        Ok(Self::from_fields(date, time))
    }

    /// The null date-time
    pub fn null() -> &'static DateTimeValue {
        &NULL_DATE_TIME
    }

    fn from_fields(date: DateFields, time: TimeFields) -> Self {
        Self {
            fields: Some((date, time)),
            hash: OnceCell::new(),
        }
    }

    pub fn is_null(&self) -> bool {
        self.fields.is_none()
    }

    fn require(&self) -> Result<(DateFields, TimeFields)> {
        self.fields.ok_or(Error::NullAccess(ValueKind::DateTime))
    }

    pub fn year(&self) -> Result<i32> {
        Ok(self.require()?.0.year)
    }

    /// Zero-based month (`0` = January)
    pub fn month(&self) -> Result<u32> {
        Ok(self.require()?.0.month)
    }

    pub fn day_of_month(&self) -> Result<u32> {
        Ok(self.require()?.0.day)
    }

    pub fn hour(&self) -> Result<u32> {
        Ok(self.require()?.1.hour)
    }

    pub fn minute(&self) -> Result<u32> {
        Ok(self.require()?.1.minute)
    }

    pub fn second(&self) -> Result<u32> {
        Ok(self.require()?.1.second)
    }

    pub fn millisecond(&self) -> Result<u32> {
        Ok(self.require()?.1.millisecond)
    }

    /// The date component
    pub fn date_part(&self) -> Result<DateValue> {
        Ok(DateValue::from_fields(self.require()?.0))
    }

    /// The time-of-day component
    pub fn time_part(&self) -> Result<TimeOfDayValue> {
        Ok(TimeOfDayValue::from_fields(self.require()?.1))
    }

    pub fn to_naive_date_time(&self) -> Option<NaiveDateTime> {
        self.fields
            .map(|(date, time)| date.to_naive_date().and_time(time.to_naive_time()))
    }

    pub fn hash_code(&self) -> i32 {
        *self.hash.get_or_init(|| match &self.fields {
            None => 0,
            Some((date, time)) => {
                let fields: Vec<i32> = date
                    .hash_fields()
                    .into_iter()
                    .chain(time.hash_fields())
                    .collect();
                mix_fields(1579, 11, &fields)
            }
        })
    }

    /// `DATETIME 'y-m-d h:m:s[.ms]'`
    pub fn to_query_literal(&self) -> Result<String> {
        let (date, time) = self.require()?;
        Ok(format!(
            "DATETIME '{}-{}-{} {}'",
            date.year,
            date.month + 1,
            date.day,
            time.query_body()
        ))
    }
}

impl From<NaiveDateTime> for DateTimeValue {
    fn from(dt: NaiveDateTime) -> Self {
        Self::from_fields(DateFields::from(dt.date()), TimeFields::from(dt.time()))
    }
}

impl PartialEq for DateTimeValue {
    fn eq(&self, other: &Self) -> bool {
        self.fields == other.fields
    }
}

impl Eq for DateTimeValue {}

impl PartialOrd for DateTimeValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DateTimeValue {
    fn cmp(&self, other: &Self) -> Ordering {
        self.fields.cmp(&other.fields)
    }
}

impl Hash for DateTimeValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_i32(self.hash_code());
    }
}

impl fmt::Display for DateTimeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.fields {
            None => f.write_str("null"),
            Some((d, t)) => {
                write!(f, "{}-{:02}-{:02} ", d.year, d.month + 1, d.day)?;
                t.write_debug(f)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_construction_validates_both_parts() {
        assert!(DateTimeValue::new(2007, 2, 29, 0, 0, 0, 0).is_err());
        assert!(matches!(
            DateTimeValue::new(2008, 2, 29, 24, 0, 0, 0),
            Err(Error::InvalidTime { .. })
        ));
        assert!(DateTimeValue::new(2008, 2, 29, 23, 59, 59, 999).is_ok());
    }

    #[test]
    fn test_accessors() {
        let dt = DateTimeValue::new(1597, 10, 29, 1, 2, 33, 142).unwrap();
        assert_eq!(dt.year().unwrap(), 1597);
        assert_eq!(dt.month().unwrap(), 9);
        assert_eq!(dt.day_of_month().unwrap(), 29);
        assert_eq!(dt.hour().unwrap(), 1);
        assert_eq!(dt.minute().unwrap(), 2);
        assert_eq!(dt.second().unwrap(), 33);
        assert_eq!(dt.millisecond().unwrap(), 142);

        let null = DateTimeValue::null();
        assert_eq!(null.year(), Err(Error::NullAccess(ValueKind::DateTime)));
        assert_eq!(null.millisecond(), Err(Error::NullAccess(ValueKind::DateTime)));
    }

    #[test]
    fn test_from_parts_preserves_components() {
        let date = DateValue::new(2009, 1, 1).unwrap();
        let time = TimeOfDayValue::with_millis(12, 13, 14, 15).unwrap();
        let dt = DateTimeValue::from_parts(&date, &time).unwrap();
        assert_eq!(dt, DateTimeValue::new(2009, 1, 1, 12, 13, 14, 15).unwrap());
        assert_eq!(dt.date_part().unwrap(), date);
        assert_eq!(dt.time_part().unwrap(), time);

        assert_eq!(
            DateTimeValue::from_parts(DateValue::null(), &time).unwrap_err(),
            Error::NullAccess(ValueKind::Date)
        );
    }

    #[test]
    fn test_from_naive() {
        let naive = NaiveDate::from_ymd_opt(2009, 2, 15)
            .unwrap()
            .and_hms_milli_opt(12, 30, 14, 500)
            .unwrap();
        let dt = DateTimeValue::from(naive);
        assert_eq!(dt.to_naive_date_time(), Some(naive));
        assert_eq!(dt.to_string(), "2009-02-15 12:30:14.500");
    }

    #[test]
    fn test_order_is_lexicographic() {
        let a = DateTimeValue::new(2009, 1, 1, 23, 59, 59, 999).unwrap();
        let b = DateTimeValue::new(2009, 1, 2, 0, 0, 0, 0).unwrap();
        assert!(a < b);
        assert!(DateTimeValue::null() < &a);
        assert_ne!(a.hash_code(), b.hash_code());
    }

    #[test]
    fn test_query_literal() {
        let dt = DateTimeValue::new(2010, 12, 11, 1, 2, 33, 0).unwrap();
        assert_eq!(dt.to_query_literal().unwrap(), "DATETIME '2010-12-11 1:2:33'");
        assert_eq!(dt.to_string(), "2010-12-11 01:02:33");
    }
}
