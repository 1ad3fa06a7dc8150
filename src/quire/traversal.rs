//! Filtered stepping over a tree
//!
//!     Every mangling pass walks the tree through one of these instead of recursing by hand.
//!     A traversal is stateless: it turns one [Treepath] into the next one, so a pass can edit
//!     the tree at the current path and keep walking from the path the edit returned.
//!
//!     The filter decides where the walk may descend: a node whose filter answer is `false`
//!     is still visited, but its children are not. Literal blocks and other opaque nodes are
//!     kept out of reach this way.
//!
//!     Both `first` and `next` return `None` once the walk is exhausted.

use crate::quire::tree::{any_node, SyntacticTree, TreeFilter};
use crate::quire::treepath::Treepath;

/// Parent first, then children left to right.
///
/// ```text
///  *t0           t0            t0            t0
///   |    next    |     next    |     next    |     next
///   t1   -->    *t1    -->     t1    -->     t1    -->   None
///  /  \         /  \          /  \          /  \
/// t2   t3      t2   t3      *t2   t3       t2  *t3
/// ```
#[derive(Clone, Copy)]
pub struct Preorder {
    filter: TreeFilter,
}

impl Preorder {
    pub fn new(filter: TreeFilter) -> Self {
        Preorder { filter }
    }

    /// The root of the snapshot `path` points into.
    pub fn first(&self, path: &Treepath) -> Option<Treepath> {
        Some(Treepath::root(path.start().clone()))
    }

    pub fn next(&self, path: &Treepath) -> Option<Treepath> {
        let tree = path.end();
        if tree.child_count() > 0 && (self.filter)(tree) {
            return path.child(0).ok();
        }
        self.next_up(path)
    }

    /// Skip the children of the current node: next sibling, or the next sibling of the
    /// nearest ancestor that has one.
    pub fn next_up(&self, path: &Treepath) -> Option<Treepath> {
        let mut current = path;
        loop {
            if let Some(sibling) = current.next_sibling() {
                return Some(sibling);
            }
            current = current.previous()?;
        }
    }
}

impl Default for Preorder {
    fn default() -> Self {
        Preorder::new(any_node)
    }
}

/// Post-order walked right to left: children are settled before their parent, and the
/// indices of every node not yet visited stay valid when the current node is edited.
///
/// ```text
///  t0            t0            t0           *t0
///   |    next    |     next    |    next     |     next
///   t1   -->     t1    -->    *t1   -->      t1    -->   None
///  /  \         /  \          /  \          /  \
/// t2  *t3     *t2   t3       t2   t3       t2   t3
/// ```
#[derive(Clone, Copy)]
pub struct MirroredPostorder {
    filter: TreeFilter,
}

impl MirroredPostorder {
    pub fn new(filter: TreeFilter) -> Self {
        MirroredPostorder { filter }
    }

    /// Deepest last descendant of the end of `path`, descending while the filter allows.
    pub fn first(&self, path: &Treepath) -> Option<Treepath> {
        let mut result = path.clone();
        loop {
            let count = result.end().child_count();
            if count == 0 || !(self.filter)(result.end()) {
                return Some(result);
            }
            result = result.child(count - 1).ok()?;
        }
    }

    pub fn next(&self, path: &Treepath) -> Option<Treepath> {
        match path.previous_sibling() {
            Some(sibling) => self.first(&sibling),
            None => path.previous().cloned(),
        }
    }
}

impl Default for MirroredPostorder {
    fn default() -> Self {
        MirroredPostorder::new(any_node)
    }
}

/// Collect the end nodes of a whole pre-order walk. Mostly useful to tests and diagnostics.
pub fn preorder_nodes(root: &SyntacticTree, filter: TreeFilter) -> Vec<SyntacticTree> {
    let traversal = Preorder::new(filter);
    let start = Treepath::root(root.clone());
    let mut nodes = Vec::new();
    let mut current = traversal.first(&start);
    while let Some(path) = current {
        nodes.push(path.end().clone());
        current = traversal.next(&path);
    }
    nodes
}
