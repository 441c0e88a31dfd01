//! Boolean values

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::{Error, Result};
use crate::kind::ValueKind;

static NULL_BOOLEAN: BooleanValue = BooleanValue { value: None };

/// A boolean, or the null boolean
///
/// Ordering is `null < false < true`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct BooleanValue {
    value: Option<bool>,
}

impl BooleanValue {
    pub const TRUE: BooleanValue = BooleanValue { value: Some(true) };
    pub const FALSE: BooleanValue = BooleanValue { value: Some(false) };

    pub fn new(value: bool) -> Self {
        if value {
            Self::TRUE
        } else {
            Self::FALSE
        }
    }

    /// The null boolean
    pub fn null() -> &'static BooleanValue {
        &NULL_BOOLEAN
    }

    pub fn is_null(&self) -> bool {
        self.value.is_none()
    }

    pub fn value(&self) -> Result<bool> {
        self.value.ok_or(Error::NullAccess(ValueKind::Boolean))
    }

    pub fn hash_code(&self) -> i32 {
        match self.value {
            None => 0,
            Some(true) => 1231,
            Some(false) => 1237,
        }
    }

    pub fn to_query_literal(&self) -> Result<String> {
        Ok(self.value()?.to_string())
    }
}

impl From<bool> for BooleanValue {
    fn from(b: bool) -> Self {
        BooleanValue::new(b)
    }
}

impl Hash for BooleanValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_i32(self.hash_code());
    }
}

impl fmt::Display for BooleanValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            None => f.write_str("null"),
            Some(b) => write!(f, "{}", b),
        }
    }
}
