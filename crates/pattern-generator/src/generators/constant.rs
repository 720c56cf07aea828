//! Literal text.

use super::Generate;
use std::fmt;

/// Appends the same text on every evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constant {
    text: String,
}

impl Constant {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Generate for Constant {
    fn evaluate(&self, output: &mut String) {
        output.push_str(&self.text);
    }

    fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.text)
    }
}
