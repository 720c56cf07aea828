//! Choice between branches.

use super::{write_joined, Draws, Generate, Generator};
use crate::random::RandomSource;
use std::fmt;

/// Evaluates one branch chosen by `draw % len`.
#[derive(Debug)]
pub struct Alternation {
    branches: Vec<Generator>,
    draws: Draws,
}

impl Alternation {
    pub fn new(branches: Vec<Generator>, source: Box<dyn RandomSource>) -> Self {
        Self {
            branches,
            draws: Draws::new(source),
        }
    }

    pub fn branches(&self) -> &[Generator] {
        &self.branches
    }
}

impl Generate for Alternation {
    fn evaluate(&self, output: &mut String) {
        if self.branches.is_empty() {
            return;
        }
        self.branches[self.draws.pick(self.branches.len())].evaluate(output);
    }

    /// Alternation emptiness is not computed; always `false`, even when
    /// every branch is empty.
    fn is_empty(&self) -> bool {
        false
    }

    fn optimize(&mut self) {
        for branch in &mut self.branches {
            branch.optimize();
        }
    }
}

impl fmt::Display for Alternation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("alt(")?;
        write_joined(f, &self.branches, " | ")?;
        f.write_str(")")
    }
}
