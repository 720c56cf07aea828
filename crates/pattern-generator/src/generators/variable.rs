//! Reference to another named generator.

use super::Generate;
use crate::environment::WeakEnvironment;
use std::fmt;
use tracing::warn;

/// Evaluates whatever is bound to `name` at evaluation time.
///
/// The reference is resolved lazily, so a pattern may name a variable that
/// is defined later in the same template. Unknown names produce no text.
/// Cycles between variables are not detected and recurse without bound.
#[derive(Debug)]
pub struct Variable {
    name: String,
    environment: WeakEnvironment,
}

impl Variable {
    pub fn new(name: impl Into<String>, environment: WeakEnvironment) -> Self {
        Self {
            name: name.into(),
            environment,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Generate for Variable {
    fn evaluate(&self, output: &mut String) {
        let Some(environment) = self.environment.upgrade() else {
            warn!(variable = %self.name, "environment dropped, variable produces no text");
            return;
        };
        if environment.evaluate(&self.name, output).is_none() {
            warn!(variable = %self.name, "undefined variable produces no text");
        }
    }

    /// Not resolved; always `false`.
    fn is_empty(&self) -> bool {
        false
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.name)
    }
}
