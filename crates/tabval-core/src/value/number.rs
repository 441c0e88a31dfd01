//! Numeric values

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use once_cell::sync::OnceCell;

use crate::error::{Error, Result};
use crate::kind::ValueKind;

static NULL_NUMBER: NumberValue = NumberValue {
    value: None,
    hash: OnceCell::new(),
};

/// A double-precision number, or the null number
///
/// Ordering is total (`f64::total_cmp`), so `NaN` and signed zeros have a
/// fixed place and equality agrees with the ordering.
#[derive(Debug, Clone)]
pub struct NumberValue {
    value: Option<f64>,
    hash: OnceCell<i32>,
}

impl NumberValue {
    pub fn new(value: f64) -> Self {
        Self {
            value: Some(value),
            hash: OnceCell::new(),
        }
    }

    /// The null number
    pub fn null() -> &'static NumberValue {
        &NULL_NUMBER
    }

    pub fn is_null(&self) -> bool {
        self.value.is_none()
    }

    pub fn value(&self) -> Result<f64> {
        self.value.ok_or(Error::NullAccess(ValueKind::Number))
    }

    pub fn hash_code(&self) -> i32 {
        *self.hash.get_or_init(|| match self.value {
            None => 0,
            Some(n) => {
                let bits = n.to_bits();
                (bits ^ (bits >> 32)) as i32
            }
        })
    }

    /// The canonical debug form; numbers need no quoting in queries
    ///
    /// Very large and very small magnitudes use exponent notation (`1e300`,
    /// `1e-7`). `NaN` and infinities are rejected.
    pub fn to_query_literal(&self) -> Result<String> {
        let n = self.value()?;
        if !n.is_finite() {
            return Err(Error::NonFiniteNumber(self.to_string()));
        }
        Ok(self.to_string())
    }
}

impl From<f64> for NumberValue {
    fn from(n: f64) -> Self {
        NumberValue::new(n)
    }
}

impl From<i32> for NumberValue {
    fn from(n: i32) -> Self {
        NumberValue::new(n as f64)
    }
}

impl PartialEq for NumberValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for NumberValue {}

impl PartialOrd for NumberValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for NumberValue {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.value, other.value) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (Some(a), Some(b)) => a.total_cmp(&b),
        }
    }
}

impl Hash for NumberValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_i32(self.hash_code());
    }
}

impl fmt::Display for NumberValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            None => f.write_str("null"),
            // Debug keeps a trailing `.0` on integral values
            Some(n) => write!(f, "{:?}", n),
        }
    }
}
