//! Triple-hyphen paragraph lists
//!
//! Consecutive `--- ` paragraphs become the items of one list. Any other sibling between two
//! of them ends the run, so two runs give two lists.

use super::{find_kinds, rewrite_postorder};
use crate::quire::error::ManglingError;
use crate::quire::tree::{NodeKind, SyntacticTree};
use crate::quire::treepath::Treepath;
use tracing::debug;

#[derive(Debug, Default, Clone, Copy)]
pub struct ListMangler;

impl ListMangler {
    pub fn new() -> Self {
        ListMangler
    }

    pub fn mangle(&self, root: &Treepath) -> Result<SyntacticTree, ManglingError> {
        debug!("grouping triple-hyphen paragraphs");
        rewrite_postorder(root, |path| {
            let tree = path.end();
            if tree.is(NodeKind::ListWithTripleHyphen)
                || !tree
                    .children()
                    .iter()
                    .any(|child| child.is(NodeKind::ParagraphAsListItemWithTripleHyphen))
            {
                return Ok(None);
            }
            Ok(Some(tree.with_children(group_runs(tree.children()))))
        })
    }

    /// True when every triple-hyphen paragraph sits in a list.
    pub fn is_settled(tree: &SyntacticTree) -> bool {
        find_kinds(tree, &[NodeKind::ParagraphAsListItemWithTripleHyphen])
            .iter()
            .all(|path| {
                path.tree_at_distance(1)
                    .is_some_and(|parent| parent.is(NodeKind::ListWithTripleHyphen))
            })
    }
}

fn group_runs(children: &[SyntacticTree]) -> Vec<SyntacticTree> {
    let mut grouped = Vec::new();
    let mut run: Vec<SyntacticTree> = Vec::new();
    for child in children {
        if child.is(NodeKind::ParagraphAsListItemWithTripleHyphen) {
            run.push(child.clone());
        } else {
            flush(&mut run, &mut grouped);
            grouped.push(child.clone());
        }
    }
    flush(&mut run, &mut grouped);
    grouped
}

fn flush(run: &mut Vec<SyntacticTree>, grouped: &mut Vec<SyntacticTree>) {
    if run.is_empty() {
        return;
    }
    let location = run[0].location().cloned();
    let items = std::mem::take(run);
    grouped.push(SyntacticTree::build(
        NodeKind::ListWithTripleHyphen,
        None,
        location,
        items,
    ));
}
