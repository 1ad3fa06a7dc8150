//! Drop whitespace and line breaks
//!
//! Once lists are nested the separators carry no more structure. Removing them leaves a tree
//! that compares equal to hand-written expectations and prints compactly.

use super::{find_kinds, rewrite_postorder};
use crate::quire::error::ManglingError;
use crate::quire::tree::{is_traversable, NodeKind, SyntacticTree};
use crate::quire::treepath::Treepath;
use tracing::debug;

#[derive(Debug, Default, Clone, Copy)]
pub struct SeparatorsMangler;

impl SeparatorsMangler {
    pub fn new() -> Self {
        SeparatorsMangler
    }

    /// Remove every whitespace and line break child of a reachable node. Opaque nodes keep
    /// theirs.
    pub fn mangle(&self, root: &Treepath) -> Result<SyntacticTree, ManglingError> {
        debug!("removing separators");
        rewrite_postorder(root, |path| {
            let tree = path.end();
            if !is_traversable(tree)
                || !tree.children().iter().any(|child| child.kind().is_separator())
            {
                return Ok(None);
            }
            let children = tree
                .children()
                .iter()
                .filter(|child| !child.kind().is_separator())
                .cloned()
                .collect();
            Ok(Some(tree.with_children(children)))
        })
    }

    pub fn is_settled(tree: &SyntacticTree) -> bool {
        find_kinds(tree, &[NodeKind::Whitespace, NodeKind::LineBreak]).is_empty()
    }
}
