//! Dead-branch elimination for freshly compiled trees.

use crate::generators::{Generate, Generator};
use tracing::debug;

/// Optimize `tree` in place.
///
/// Depth first, every series drops the children that can only produce the
/// empty string (`{0}` repetitions, empty classes and literals, series left
/// empty by their own pass). The set of strings the tree can produce is
/// unchanged, and a second pass is a no-op.
pub fn optimize(tree: &mut Generator) {
    let before = tree.node_count();
    tree.optimize();
    let after = tree.node_count();
    debug!(before, after, "optimized generator tree");
}
