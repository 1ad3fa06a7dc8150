//! Paths that survive edits between passes
//!
//!     A plain [Treepath] is a list of child indices, so inserting or removing a sibling
//!     anywhere above the target silently redirects it. A [RobustPath] only records the
//!     ancestors accepted by a stability filter (levels, documents) and, for each of them, its
//!     rank among the stable nodes reachable from the previous one:
//!
//!     ```text
//!     novella                          stable frontier of novella: [level A, level B]
//!       ├── paragraph                  level B is recorded as rank 1
//!       ├── level A
//!       └── level B   <── target
//!     ```
//!
//!     Adding or removing unstable nodes (paragraphs, identifiers, tags) leaves every rank
//!     unchanged, so the path resolves to the same node in the edited tree. When the target
//!     itself is unstable, the raw indices from the last stable ancestor down to it are kept
//!     as a tail; that tail is as fragile as a plain path and only meant for local
//!     disambiguation.

use crate::quire::error::ManglingError;
use crate::quire::tree::{SyntacticTree, TreeFilter};
use crate::quire::treepath::Treepath;
use std::fmt;

#[derive(Clone)]
pub struct RobustPath {
    stable_ranks: Vec<usize>,
    tail: Vec<usize>,
    filter: TreeFilter,
}

impl RobustPath {
    /// Record the stable chain leading to the end of `path`.
    pub fn create(path: &Treepath, filter: TreeFilter) -> RobustPath {
        let indices = path.indices();
        let mut anchor = path.start().clone();
        let mut anchor_depth = 0;
        let mut stable_ranks = Vec::new();
        let mut current = path.start().clone();

        for (depth, &index) in indices.iter().enumerate() {
            let Some(child) = current.child(index).cloned() else {
                break;
            };
            current = child;
            if filter(&current) {
                let relative = &indices[anchor_depth..=depth];
                // the frontier is in pre-order, which is lexicographic order of index paths
                let frontier = stable_frontier(&anchor, filter);
                let rank = frontier.partition_point(|candidate| candidate.as_slice() < relative);
                debug_assert_eq!(
                    frontier.get(rank).map(Vec::as_slice),
                    Some(relative),
                    "stable node missing from its anchor's frontier"
                );
                stable_ranks.push(rank);
                anchor = current.clone();
                anchor_depth = depth + 1;
            }
        }

        RobustPath {
            stable_ranks,
            tail: indices[anchor_depth..].to_vec(),
            filter,
        }
    }

    /// Find the node this path designates in `root`, which may have been edited since.
    pub fn resolve(&self, root: &SyntacticTree) -> Result<Treepath, ManglingError> {
        let mut path = Treepath::root(root.clone());
        for (step, &rank) in self.stable_ranks.iter().enumerate() {
            let frontier = stable_frontier(path.end(), self.filter);
            let relative = frontier.get(rank).ok_or_else(|| {
                ManglingError::not_resolvable(format!(
                    "step {} wants stable node #{} but only {} are reachable under {}",
                    step,
                    rank,
                    frontier.len(),
                    path.end().kind()
                ))
            })?;
            path = path
                .descend(relative)
                .map_err(|error| ManglingError::not_resolvable(error.to_string()))?;
        }
        path.descend(&self.tail).map_err(|error| {
            ManglingError::not_resolvable(format!("unstable tail {:?}: {}", self.tail, error))
        })
    }

    /// Number of stable nodes recorded, the root excluded.
    pub fn stable_length(&self) -> usize {
        self.stable_ranks.len()
    }
}

/// Index paths, relative to `anchor`, of the stable descendants reachable through unstable
/// nodes only, in pre-order.
fn stable_frontier(anchor: &SyntacticTree, filter: TreeFilter) -> Vec<Vec<usize>> {
    let mut frontier = Vec::new();
    let mut prefix = Vec::new();
    collect_frontier(anchor, filter, &mut prefix, &mut frontier);
    frontier
}

fn collect_frontier(
    tree: &SyntacticTree,
    filter: TreeFilter,
    prefix: &mut Vec<usize>,
    frontier: &mut Vec<Vec<usize>>,
) {
    for (index, child) in tree.children().iter().enumerate() {
        prefix.push(index);
        if filter(child) {
            frontier.push(prefix.clone());
        } else {
            collect_frontier(child, filter, prefix, frontier);
        }
        prefix.pop();
    }
}

impl PartialEq for RobustPath {
    fn eq(&self, other: &Self) -> bool {
        self.stable_ranks == other.stable_ranks && self.tail == other.tail
    }
}

impl Eq for RobustPath {}

impl fmt::Debug for RobustPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RobustPath{:?}", self.stable_ranks)?;
        if !self.tail.is_empty() {
            write!(f, "+{:?}", self.tail)?;
        }
        Ok(())
    }
}
