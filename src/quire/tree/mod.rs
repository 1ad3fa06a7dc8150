//! The tree model shared by the grammar and every mangling pass.

pub mod kind;
pub mod location;
pub mod syntactic_tree;

pub use kind::{NodeKind, TagBehavior};
pub use location::Location;
pub use syntactic_tree::SyntacticTree;

/// Predicate over nodes, used by traversals and robust paths.
///
/// A plain function pointer, so robust paths can store the filter they were built with.
pub type TreeFilter = fn(&SyntacticTree) -> bool;

/// Accepts every node.
pub fn any_node(_: &SyntacticTree) -> bool {
    true
}

/// Accepts nodes worth entering when looking for tags or identifiers.
pub fn is_traversable(tree: &SyntacticTree) -> bool {
    tree.kind().tag_behavior() != TagBehavior::NonTraversable
}
