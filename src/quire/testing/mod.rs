//! Testing utilities
//!
//!     Mangling passes are tree-to-tree functions, so nearly every test has the same shape:
//!     build an input tree, run one pass, compare with an expected tree. Two rules keep
//!     those tests readable when node kinds evolve:
//!
//!         1. Build trees with [fixtures], never with raw `SyntacticTree::build` calls.
//!         2. When a whole expected tree is overkill, check shape with
//!            [assert_tree](fn@assert_tree) instead of walking children by hand.
//!
//!     Example:
//!
//!     ```rust,ignore
//!     use crate::quire::testing::{assert_tree, fixtures::*};
//!
//!     let mangled = LevelMangler::new().mangle(&flat)?;
//!     assert_tree(&mangled)
//!         .kind(NodeKind::Novella)
//!         .child_count(2)
//!         .child(1, |level| {
//!             level.kind(NodeKind::Level).child(0, |title| title.kind(NodeKind::LevelTitle))
//!         });
//!     ```
//!
//!     Failures report the index path of the offending node, e.g. `root/1/0: expected kind
//!     level-title, found word`.

pub mod fixtures;
mod tree_assertions;

pub use tree_assertions::{assert_tree, TreeAssertion};
