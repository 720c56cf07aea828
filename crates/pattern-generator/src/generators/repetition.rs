//! Bounded repetition of a child node.

use super::{Draws, Generate, Generator};
use crate::random::RandomSource;
use std::fmt;

/// Evaluates its child `min + draw % (max - min + 1)` times.
#[derive(Debug)]
pub struct Repetition {
    min: u32,
    max: u32,
    child: Box<Generator>,
    draws: Draws,
}

impl Repetition {
    /// Callers keep `min <= max`; the compiler rejects inverted bounds.
    pub fn new(min: u32, max: u32, child: Generator, source: Box<dyn RandomSource>) -> Self {
        debug_assert!(min <= max, "inverted repetition bounds {min}..{max}");
        Self {
            min,
            max,
            child: Box::new(child),
            draws: Draws::new(source),
        }
    }

    pub fn min(&self) -> u32 {
        self.min
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn child(&self) -> &Generator {
        &self.child
    }

    fn count(&self) -> u64 {
        let span = u64::from(self.max.saturating_sub(self.min)) + 1;
        u64::from(self.min) + u64::from(self.draws.next()) % span
    }
}

impl Generate for Repetition {
    fn evaluate(&self, output: &mut String) {
        for _ in 0..self.count() {
            self.child.evaluate(output);
        }
    }

    fn is_empty(&self) -> bool {
        self.min == 0 && self.max == 0
    }

    fn optimize(&mut self) {
        self.child.optimize();
    }
}

impl fmt::Display for Repetition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.min == self.max {
            write!(f, "{}{{{}}}", self.child, self.min)
        } else {
            write!(f, "{}{{{},{}}}", self.child, self.min, self.max)
        }
    }
}
