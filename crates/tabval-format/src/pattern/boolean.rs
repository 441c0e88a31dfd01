//! `<true-token>:<false-token>` boolean patterns

/// The two display tokens of a boolean pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct BooleanPattern {
    true_token: String,
    false_token: String,
}

impl BooleanPattern {
    pub(crate) fn new(true_token: &str, false_token: &str) -> Self {
        Self {
            true_token: true_token.to_string(),
            false_token: false_token.to_string(),
        }
    }

    /// Split `pattern` at its single `:` delimiter
    pub(crate) fn compile(pattern: &str) -> Result<Self, String> {
        let mut parts = pattern.split(':');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(t), Some(f), None) => Ok(Self::new(t, f)),
            _ => Err("expected exactly one ':' between the true and false tokens".to_string()),
        }
    }

    pub(crate) fn format(&self, value: bool) -> &str {
        if value {
            &self.true_token
        } else {
            &self.false_token
        }
    }

    /// Case-insensitive match against either token; `None` when neither fits
    pub(crate) fn parse(&self, text: &str) -> Option<bool> {
        let text = text.to_lowercase();
        if text == self.true_token.to_lowercase() {
            Some(true)
        } else if text == self.false_token.to_lowercase() {
            Some(false)
        } else {
            None
        }
    }
}
