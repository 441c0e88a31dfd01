//! Calendar date values

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use chrono::{Datelike, NaiveDate};
use once_cell::sync::OnceCell;

use super::mix_fields;
use crate::error::{Error, Result};
use crate::kind::ValueKind;

static NULL_DATE: DateValue = DateValue {
    fields: None,
    hash: OnceCell::new(),
};

/// Year, zero-based month and day of a real proleptic-Gregorian date
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct DateFields {
    pub(crate) year: i32,
    /// 0 = January
    pub(crate) month: u32,
    pub(crate) day: u32,
}

impl DateFields {
    /// Validate a one-based (year, month, day) triple
    pub(crate) fn from_calendar(year: i32, month: i32, day: i32) -> Result<Self> {
        let invalid = || Error::InvalidDate { year, month, day };
        if !(1..=12).contains(&month) || day < 1 {
            return Err(invalid());
        }
        let date = NaiveDate::from_ymd_opt(year, month as u32, day as u32).ok_or_else(invalid)?;
        Ok(Self::from(date))
    }

    pub(crate) fn to_naive_date(self) -> NaiveDate {
        // Fields are only ever built from a valid NaiveDate
        NaiveDate::from_ymd_opt(self.year, self.month + 1, self.day).unwrap_or_default()
    }

    pub(crate) fn hash_fields(&self) -> [i32; 3] {
        [self.year, self.month as i32, self.day as i32]
    }
}

impl From<NaiveDate> for DateFields {
    fn from(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month0(),
            day: date.day(),
        }
    }
}

/// A calendar date, or the null date
///
/// Months are stored zero-based (`0` = January) but the calendar constructor
/// takes them one-based:
///
/// ```
/// use tabval_core::DateValue;
///
/// let date = DateValue::new(2006, 1, 3).unwrap();
/// assert_eq!(date.month().unwrap(), 0);
/// assert!(DateValue::new(2007, 2, 29).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct DateValue {
    fields: Option<DateFields>,
    hash: OnceCell<i32>,
}

impl DateValue {
    /// Create a date from a one-based calendar triple
    ///
    /// Fails with [`Error::InvalidDate`] unless the triple names a real date;
    /// out-of-range components are never clamped.
    pub fn new(year: i32, month: i32, day: i32) -> Result<Self> {
        DateFields::from_calendar(year, month, day).map(Self::from_fields)
    }

    /// The null date
    pub fn null() -> &'static DateValue {
        &NULL_DATE
    }

    pub(crate) fn from_fields(fields: DateFields) -> Self {
        Self {
            fields: Some(fields),
            hash: OnceCell::new(),
        }
    }

    pub(crate) fn fields(&self) -> Option<DateFields> {
        self.fields
    }

    pub fn is_null(&self) -> bool {
        self.fields.is_none()
    }

    fn require(&self) -> Result<DateFields> {
        self.fields.ok_or(Error::NullAccess(ValueKind::Date))
    }

    pub fn year(&self) -> Result<i32> {
        Ok(self.require()?.year)
    }

    /// Zero-based month (`0` = January)
    pub fn month(&self) -> Result<u32> {
        Ok(self.require()?.month)
    }

    pub fn day_of_month(&self) -> Result<u32> {
        Ok(self.require()?.day)
    }

    /// The chrono date, `None` for null
    pub fn to_naive_date(&self) -> Option<NaiveDate> {
        self.fields.map(DateFields::to_naive_date)
    }

    /// Memoized hash of (year, month, day); `0` for null
    pub fn hash_code(&self) -> i32 {
        *self.hash.get_or_init(|| match &self.fields {
            None => 0,
            Some(fields) => mix_fields(1279, 17, &fields.hash_fields()),
        })
    }

    /// `DATE 'y-m-d'` with a one-based, unpadded month and day
    pub fn to_query_literal(&self) -> Result<String> {
        let f = self.require()?;
        Ok(format!("DATE '{}-{}-{}'", f.year, f.month + 1, f.day))
    }
}

impl From<NaiveDate> for DateValue {
    fn from(date: NaiveDate) -> Self {
        Self::from_fields(DateFields::from(date))
    }
}

impl PartialEq for DateValue {
    fn eq(&self, other: &Self) -> bool {
        self.fields == other.fields
    }
}

impl Eq for DateValue {}

impl PartialOrd for DateValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DateValue {
    fn cmp(&self, other: &Self) -> Ordering {
        // None < Some: null sorts first
        self.fields.cmp(&other.fields)
    }
}

impl Hash for DateValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_i32(self.hash_code());
    }
}

impl fmt::Display for DateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.fields {
            None => f.write_str("null"),
            Some(d) => write!(f, "{}-{:02}-{:02}", d.year, d.month + 1, d.day),
        }
    }
}
