//! Generator nodes produced by the pattern compiler.
//!
//! A compiled pattern is a tree of [`Generator`] values. Evaluating the root
//! asks every node, depth first, to append its text to one output buffer.
//! Nodes with a choice point own a [`RandomSource`] and reduce each draw with
//! modulo arithmetic:
//!
//! - character class: `chars[draw % len]`
//! - alternation: `branches[draw % len]`
//! - repetition: `min + draw % (max - min + 1)` copies of the child

pub mod alternation;
pub mod char_class;
pub mod constant;
pub mod repetition;
pub mod series;
pub mod variable;

pub use alternation::Alternation;
pub use char_class::CharClass;
pub use constant::Constant;
pub use repetition::Repetition;
pub use series::Series;
pub use variable::Variable;

use crate::random::RandomSource;
use std::cell::RefCell;
use std::fmt;

/// Behaviour shared by every node kind.
pub trait Generate {
    /// Append produced text to `output`.
    fn evaluate(&self, output: &mut String);

    /// True iff the node can only ever produce the empty string.
    ///
    /// Only consulted by the optimizer, so a conservative `false` is
    /// always allowed.
    fn is_empty(&self) -> bool;

    /// Simplify the subtree in place without changing what it can produce.
    fn optimize(&mut self) {}
}

/// One node of a compiled pattern.
#[derive(Debug)]
pub enum Generator {
    Constant(Constant),
    CharClass(CharClass),
    Repetition(Repetition),
    Series(Series),
    Alternation(Alternation),
    Variable(Variable),
}

impl Generator {
    fn node(&self) -> &dyn Generate {
        match self {
            Generator::Constant(node) => node,
            Generator::CharClass(node) => node,
            Generator::Repetition(node) => node,
            Generator::Series(node) => node,
            Generator::Alternation(node) => node,
            Generator::Variable(node) => node,
        }
    }

    fn node_mut(&mut self) -> &mut dyn Generate {
        match self {
            Generator::Constant(node) => node,
            Generator::CharClass(node) => node,
            Generator::Repetition(node) => node,
            Generator::Series(node) => node,
            Generator::Alternation(node) => node,
            Generator::Variable(node) => node,
        }
    }

    /// Evaluate into a fresh string.
    pub fn generate(&self) -> String {
        let mut output = String::new();
        self.evaluate(&mut output);
        output
    }

    /// Number of nodes in this subtree, variable references counting as one.
    pub fn node_count(&self) -> usize {
        1 + match self {
            Generator::Repetition(node) => node.child().node_count(),
            Generator::Series(node) => node.children().iter().map(Generator::node_count).sum(),
            Generator::Alternation(node) => {
                node.branches().iter().map(Generator::node_count).sum()
            }
            Generator::Constant(_) | Generator::CharClass(_) | Generator::Variable(_) => 0,
        }
    }
}

impl Generate for Generator {
    fn evaluate(&self, output: &mut String) {
        self.node().evaluate(output)
    }

    fn is_empty(&self) -> bool {
        self.node().is_empty()
    }

    fn optimize(&mut self) {
        self.node_mut().optimize()
    }
}

impl fmt::Display for Generator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Generator::Constant(node) => fmt::Display::fmt(node, f),
            Generator::CharClass(node) => fmt::Display::fmt(node, f),
            Generator::Repetition(node) => fmt::Display::fmt(node, f),
            Generator::Series(node) => fmt::Display::fmt(node, f),
            Generator::Alternation(node) => fmt::Display::fmt(node, f),
            Generator::Variable(node) => fmt::Display::fmt(node, f),
        }
    }
}

macro_rules! impl_from_node {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for Generator {
                fn from(node: $variant) -> Self {
                    Generator::$variant(node)
                }
            }
        )*
    };
}

impl_from_node!(Constant, CharClass, Repetition, Series, Alternation, Variable);

/// The random source owned by a choice node.
///
/// Evaluation takes `&self` so trees can be walked through the shared
/// environment; the source is the only state that changes.
pub(crate) struct Draws {
    source: RefCell<Box<dyn RandomSource>>,
}

impl Draws {
    pub(crate) fn new(source: Box<dyn RandomSource>) -> Self {
        Self {
            source: RefCell::new(source),
        }
    }

    /// Next raw draw.
    pub(crate) fn next(&self) -> u32 {
        self.source.borrow_mut().next_draw()
    }

    /// Index in `0..len`; `len` must be non-zero.
    pub(crate) fn pick(&self, len: usize) -> usize {
        self.next() as usize % len
    }
}

impl fmt::Debug for Draws {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.source.try_borrow() {
            Ok(source) => fmt::Debug::fmt(&**source, f),
            Err(_) => f.write_str("<drawing>"),
        }
    }
}

/// Write `items` separated by `sep`.
fn write_joined(f: &mut fmt::Formatter<'_>, items: &[Generator], sep: &str) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i != 0 {
            f.write_str(sep)?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}
