//! Time-of-day values

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use chrono::{NaiveTime, Timelike};
use once_cell::sync::OnceCell;

use super::mix_fields;
use crate::error::{Error, Result};
use crate::kind::ValueKind;

static NULL_TIME: TimeOfDayValue = TimeOfDayValue {
    fields: None,
    hash: OnceCell::new(),
};

/// Hour, minute, second and millisecond of a wall-clock time
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct TimeFields {
    pub(crate) hour: u32,
    pub(crate) minute: u32,
    pub(crate) second: u32,
    pub(crate) millisecond: u32,
}

impl TimeFields {
    pub(crate) fn from_clock(hour: i32, minute: i32, second: i32, millisecond: i32) -> Result<Self> {
        let in_range = (0..24).contains(&hour)
            && (0..60).contains(&minute)
            && (0..60).contains(&second)
            && (0..1000).contains(&millisecond);
        if !in_range {
            return Err(Error::InvalidTime {
                hour,
                minute,
                second,
                millisecond,
            });
        }
        Ok(Self {
            hour: hour as u32,
            minute: minute as u32,
            second: second as u32,
            millisecond: millisecond as u32,
        })
    }

    pub(crate) fn to_naive_time(self) -> NaiveTime {
        NaiveTime::from_hms_milli_opt(self.hour, self.minute, self.second, self.millisecond)
            .unwrap_or(NaiveTime::MIN)
    }

    pub(crate) fn hash_fields(&self) -> [i32; 4] {
        [
            self.hour as i32,
            self.minute as i32,
            self.second as i32,
            self.millisecond as i32,
        ]
    }

    /// `h:m:s[.ms]`, unpadded, milliseconds only when non-zero
    pub(crate) fn query_body(&self) -> String {
        let mut body = format!("{}:{}:{}", self.hour, self.minute, self.second);
        if self.millisecond != 0 {
            body.push_str(&format!(".{}", self.millisecond));
        }
        body
    }

    pub(crate) fn write_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hour, self.minute, self.second)?;
        if self.millisecond > 0 {
            write!(f, ".{:03}", self.millisecond)?;
        }
        Ok(())
    }
}

impl From<NaiveTime> for TimeFields {
    /// Sub-millisecond precision is truncated; a leap second folds into
    /// the last millisecond of its minute.
    fn from(time: NaiveTime) -> Self {
        Self {
            hour: time.hour(),
            minute: time.minute(),
            second: time.second(),
            millisecond: (time.nanosecond() / 1_000_000).min(999),
        }
    }
}

/// A time of day with millisecond precision, or the null time
#[derive(Debug, Clone)]
pub struct TimeOfDayValue {
    fields: Option<TimeFields>,
    hash: OnceCell<i32>,
}

impl TimeOfDayValue {
    /// Create a time with zero milliseconds
    pub fn new(hour: i32, minute: i32, second: i32) -> Result<Self> {
        Self::with_millis(hour, minute, second, 0)
    }

    /// Create a time; fails with [`Error::InvalidTime`] on any out-of-range
    /// component
    pub fn with_millis(hour: i32, minute: i32, second: i32, millisecond: i32) -> Result<Self> {
        TimeFields::from_clock(hour, minute, second, millisecond).map(Self::from_fields)
    }

    /// The null time of day
    pub fn null() -> &'static TimeOfDayValue {
        &NULL_TIME
    }

    pub(crate) fn from_fields(fields: TimeFields) -> Self {
        Self {
            fields: Some(fields),
            hash: OnceCell::new(),
        }
    }

    pub(crate) fn fields(&self) -> Option<TimeFields> {
        self.fields
    }

    pub fn is_null(&self) -> bool {
        self.fields.is_none()
    }

    fn require(&self) -> Result<TimeFields> {
        self.fields.ok_or(Error::NullAccess(ValueKind::TimeOfDay))
    }

    pub fn hour(&self) -> Result<u32> {
        Ok(self.require()?.hour)
    }

    pub fn minute(&self) -> Result<u32> {
        Ok(self.require()?.minute)
    }

    pub fn second(&self) -> Result<u32> {
        Ok(self.require()?.second)
    }

    pub fn millisecond(&self) -> Result<u32> {
        Ok(self.require()?.millisecond)
    }

    pub fn to_naive_time(&self) -> Option<NaiveTime> {
        self.fields.map(TimeFields::to_naive_time)
    }

    pub fn hash_code(&self) -> i32 {
        *self.hash.get_or_init(|| match &self.fields {
            None => 0,
            Some(fields) => mix_fields(1193, 23, &fields.hash_fields()),
        })
    }

    /// `TIMEOFDAY 'h:m:s[.ms]'`
    pub fn to_query_literal(&self) -> Result<String> {
        Ok(format!("TIMEOFDAY '{}'", self.require()?.query_body()))
    }
}

impl From<NaiveTime> for TimeOfDayValue {
    fn from(time: NaiveTime) -> Self {
        Self::from_fields(TimeFields::from(time))
    }
}

impl PartialEq for TimeOfDayValue {
    fn eq(&self, other: &Self) -> bool {
        self.fields == other.fields
    }
}

impl Eq for TimeOfDayValue {}

impl PartialOrd for TimeOfDayValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TimeOfDayValue {
    fn cmp(&self, other: &Self) -> Ordering {
        self.fields.cmp(&other.fields)
    }
}

impl Hash for TimeOfDayValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_i32(self.hash_code());
    }
}

impl fmt::Display for TimeOfDayValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.fields {
            None => f.write_str("null"),
            Some(t) => t.write_debug(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_range_validation() {
        assert!(TimeOfDayValue::new(23, 59, 59).is_ok());
        assert!(TimeOfDayValue::with_millis(0, 0, 0, 999).is_ok());
        assert!(TimeOfDayValue::new(24, 0, 0).is_err());
        assert!(TimeOfDayValue::new(-1, 0, 0).is_err());
        assert!(TimeOfDayValue::new(12, 60, 0).is_err());
        assert!(TimeOfDayValue::new(12, 0, 60).is_err());
        assert_eq!(
            TimeOfDayValue::with_millis(1, 2, 3, 1000).unwrap_err(),
            Error::InvalidTime {
                hour: 1,
                minute: 2,
                second: 3,
                millisecond: 1000
            }
        );
    }

    #[test]
    fn test_display_and_literal() {
        let t = TimeOfDayValue::new(7, 2, 4).unwrap();
        assert_eq!(t.to_string(), "07:02:04");
        assert_eq!(t.to_query_literal().unwrap(), "TIMEOFDAY '7:2:4'");

        let t = TimeOfDayValue::with_millis(1, 2, 33, 42).unwrap();
        assert_eq!(t.to_string(), "01:02:33.042");
        assert_eq!(t.to_query_literal().unwrap(), "TIMEOFDAY '1:2:33.42'");

        assert_eq!(TimeOfDayValue::null().to_string(), "null");
    }

    #[test]
    fn test_from_naive_time_truncates() {
        let t = NaiveTime::from_hms_nano_opt(12, 30, 14, 123_999_999).unwrap();
        let v = TimeOfDayValue::from(t);
        assert_eq!(v.millisecond().unwrap(), 123);
        assert_eq!(
            v.to_naive_time(),
            NaiveTime::from_hms_milli_opt(12, 30, 14, 123)
        );
    }

    #[test]
    fn test_order() {
        let early = TimeOfDayValue::with_millis(7, 22, 44, 1).unwrap();
        let late = TimeOfDayValue::new(7, 22, 45).unwrap();
        assert!(early < late);
        assert!(TimeOfDayValue::null() < &early);
        assert_eq!(TimeOfDayValue::null().hour(), Err(Error::NullAccess(ValueKind::TimeOfDay)));
    }
}
