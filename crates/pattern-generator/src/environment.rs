//! Named generators shared between compiled patterns.

use crate::generators::{Generate, Generator, Variable};
use indexmap::IndexMap;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

type Bindings = IndexMap<String, Generator>;

/// Insertion-ordered map from variable name to its compiled generator.
///
/// Cloning yields another handle to the same bindings. Variable references
/// inside trees hold a [`WeakEnvironment`] instead, so the bindings never
/// keep themselves alive and references resolve by name on every
/// evaluation.
///
/// Bindings must not change while a generator is being evaluated; a
/// [`define`](Self::define) from inside an evaluation panics on the
/// borrow check.
#[derive(Clone, Default)]
pub struct Environment {
    bindings: Rc<RefCell<Bindings>>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name`, returning the previous generator if there was one.
    ///
    /// A redefined name keeps its original position.
    pub fn define(&self, name: impl Into<String>, generator: Generator) -> Option<Generator> {
        self.bindings.borrow_mut().insert(name.into(), generator)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bindings.borrow().contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.bindings.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.borrow().is_empty()
    }

    /// Names in definition order.
    pub fn names(&self) -> Vec<String> {
        self.bindings.borrow().keys().cloned().collect()
    }

    /// Run `f` against the generator bound to `name`.
    pub fn with<T>(&self, name: &str, f: impl FnOnce(&Generator) -> T) -> Option<T> {
        self.bindings.borrow().get(name).map(f)
    }

    /// Evaluate the generator bound to `name` into `output`.
    ///
    /// Returns `None`, leaving `output` untouched, if the name is unbound.
    pub fn evaluate(&self, name: &str, output: &mut String) -> Option<()> {
        self.with(name, |generator| generator.evaluate(output))
    }

    /// Evaluate the generator bound to `name` into a fresh string.
    pub fn generate(&self, name: &str) -> Option<String> {
        self.with(name, Generator::generate)
    }

    /// A reference node resolving `name` against these bindings.
    pub fn reference(&self, name: impl Into<String>) -> Generator {
        Variable::new(name, self.downgrade()).into()
    }

    pub fn downgrade(&self) -> WeakEnvironment {
        WeakEnvironment {
            bindings: Rc::downgrade(&self.bindings),
        }
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.bindings.try_borrow() {
            Ok(bindings) => f.debug_list().entries(bindings.keys()).finish(),
            Err(_) => f.write_str("Environment(<borrowed>)"),
        }
    }
}

/// Non-owning handle held by variable references.
#[derive(Clone, Default)]
pub struct WeakEnvironment {
    bindings: Weak<RefCell<Bindings>>,
}

impl WeakEnvironment {
    /// The environment, if any strong handle is still alive.
    pub fn upgrade(&self) -> Option<Environment> {
        self.bindings
            .upgrade()
            .map(|bindings| Environment { bindings })
    }
}

impl fmt::Debug for WeakEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("WeakEnvironment")
    }
}
