//! Text values

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::error::{Error, Result};

static NULL_TEXT: TextValue = TextValue {
    text: None,
    hash: OnceCell::new(),
};

/// A string, or the null text
///
/// The null text reads as `""` but is distinct from a non-null empty
/// string. Contents are shared (`Arc<str>`), so clones are cheap.
#[derive(Debug, Clone)]
pub struct TextValue {
    text: Option<Arc<str>>,
    hash: OnceCell<i32>,
}

impl TextValue {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self {
            text: Some(Arc::from(s.as_ref())),
            hash: OnceCell::new(),
        }
    }

    /// The null text
    pub fn null() -> &'static TextValue {
        &NULL_TEXT
    }

    pub fn is_null(&self) -> bool {
        self.text.is_none()
    }

    /// The string, `""` for null
    pub fn as_str(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.as_str().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_str().is_empty()
    }

    /// Polynomial hash over UTF-16 code units (multiplier 31)
    pub fn hash_code(&self) -> i32 {
        *self.hash.get_or_init(|| {
            self.as_str()
                .encode_utf16()
                .fold(0i32, |h, unit| h.wrapping_mul(31).wrapping_add(unit as i32))
        })
    }

    /// Quoted with `"`, or with `'` when the text itself contains `"`
    pub fn to_query_literal(&self) -> Result<String> {
        let text = match &self.text {
            None => return Err(Error::NullAccess(crate::ValueKind::Text)),
            Some(text) => text,
        };
        if !text.contains('"') {
            Ok(format!("\"{}\"", text))
        } else if !text.contains('\'') {
            Ok(format!("'{}'", text))
        } else {
            Err(Error::UnquotableText(text.to_string()))
        }
    }
}

impl From<&str> for TextValue {
    fn from(s: &str) -> Self {
        TextValue::new(s)
    }
}

impl From<String> for TextValue {
    fn from(s: String) -> Self {
        TextValue::new(s)
    }
}

impl AsRef<str> for TextValue {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl PartialEq for TextValue {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for TextValue {}

impl PartialOrd for TextValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TextValue {
    fn cmp(&self, other: &Self) -> Ordering {
        self.text.cmp(&other.text)
    }
}

impl Hash for TextValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_i32(self.hash_code());
    }
}

impl fmt::Display for TextValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.text {
            None => f.write_str("null"),
            Some(text) => f.write_str(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_null_is_not_empty_text() {
        let null = TextValue::null();
        let empty = TextValue::new("");
        assert!(null.is_null());
        assert!(!empty.is_null());
        assert_eq!(null.as_str(), "");
        assert_ne!(null, &empty);
        assert!(null < &empty);
        assert_eq!(null.hash_code(), 0);
    }

    #[test]
    fn test_order() {
        assert!(TextValue::new("abc") < TextValue::new("abd"));
        assert!(TextValue::new("ab") < TextValue::new("abc"));
        assert_eq!(TextValue::new("x"), TextValue::from(String::from("x")));
    }

    #[test]
    fn test_hash_is_deterministic() {
        // Same function as the polynomial string hash of the JVM
        assert_eq!(TextValue::new("a").hash_code(), 97);
        assert_eq!(TextValue::new("ab").hash_code(), 97 * 31 + 98);
    }

    #[test]
    fn test_query_literal() {
        assert_eq!(TextValue::new("it's").to_query_literal().unwrap(), "\"it's\"");
        assert_eq!(
            TextValue::new("say \"hi\"").to_query_literal().unwrap(),
            "'say \"hi\"'"
        );
        assert!(matches!(
            TextValue::new("both ' and \"").to_query_literal(),
            Err(Error::UnquotableText(_))
        ));
    }
}
