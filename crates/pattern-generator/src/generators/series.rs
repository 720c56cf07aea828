//! Concatenation.

use super::{write_joined, Generate, Generator};
use std::fmt;

/// Evaluates its children in order.
#[derive(Debug, Default)]
pub struct Series {
    children: Vec<Generator>,
}

impl Series {
    pub fn new(children: Vec<Generator>) -> Self {
        Self { children }
    }

    pub fn children(&self) -> &[Generator] {
        &self.children
    }
}

impl Generate for Series {
    fn evaluate(&self, output: &mut String) {
        for child in &self.children {
            child.evaluate(output);
        }
    }

    fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Optimizes every child, then drops the ones that can only produce
    /// the empty string. Survivors keep their relative order.
    fn optimize(&mut self) {
        for child in &mut self.children {
            child.optimize();
        }
        self.children.retain(|child| !child.is_empty());
    }
}

impl fmt::Display for Series {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("seq(")?;
        write_joined(f, &self.children, ", ")?;
        f.write_str(")")
    }
}
