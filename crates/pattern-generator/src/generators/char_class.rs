//! One character picked from a set.

use super::{Draws, Generate};
use crate::random::RandomSource;
use std::fmt;

/// Appends one character chosen by `draw % len`.
///
/// The set keeps duplicates, so `[aab]` yields `a` twice as often as `b`.
/// An empty set appends nothing and does not draw.
#[derive(Debug)]
pub struct CharClass {
    chars: Vec<char>,
    draws: Draws,
}

impl CharClass {
    pub fn new(chars: Vec<char>, source: Box<dyn RandomSource>) -> Self {
        Self {
            chars,
            draws: Draws::new(source),
        }
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }
}

impl Generate for CharClass {
    fn evaluate(&self, output: &mut String) {
        if self.chars.is_empty() {
            return;
        }
        output.push(self.chars[self.draws.pick(self.chars.len())]);
    }

    fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }
}

impl fmt::Display for CharClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for ch in &self.chars {
            if matches!(ch, '\\' | ']' | '-') {
                f.write_str("\\")?;
            }
            write!(f, "{ch}")?;
        }
        f.write_str("]")
    }
}
