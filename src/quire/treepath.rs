//! Paths into one tree snapshot
//!
//!     A [Treepath] is the chain of (parent, child index) steps from a root down to one node,
//!     with that node attached at the end. It is only meaningful for the exact snapshot it was
//!     built from: any edit goes through the path and hands back a new path into a new
//!     snapshot, every ancestor rebuilt and every untouched sibling shared.
//!
//!     Paths are cheap and transient. Passes create them per navigation step and never keep
//!     one across a tree replacement; [RobustPath](crate::quire::robust_path::RobustPath) is
//!     the type that survives edits.
//!
//!     ```text
//!     root ─── 1 ──▶ level ─── 0 ──▶ paragraph      indices() == [1, 0]
//!     ```

use crate::quire::error::ManglingError;
use crate::quire::tree::SyntacticTree;
use std::fmt;
use std::sync::Arc;

#[derive(Clone)]
pub struct Treepath {
    previous: Option<Arc<Treepath>>,
    index_in_previous: usize,
    end: SyntacticTree,
}

impl Treepath {
    /// Path containing only the root.
    pub fn root(tree: SyntacticTree) -> Self {
        Treepath {
            previous: None,
            index_in_previous: 0,
            end: tree,
        }
    }

    /// Path from the root of `tree` following `indices`.
    pub fn from_indices(tree: SyntacticTree, indices: &[usize]) -> Result<Self, ManglingError> {
        Treepath::root(tree).descend(indices)
    }

    /// Path to the child at `index` of the node at the end of this path.
    pub fn child(&self, index: usize) -> Result<Treepath, ManglingError> {
        let child = self
            .end
            .child(index)
            .ok_or(ManglingError::IndexOutOfRange {
                index,
                child_count: self.end.child_count(),
            })?
            .clone();
        Ok(Treepath {
            previous: Some(Arc::new(self.clone())),
            index_in_previous: index,
            end: child,
        })
    }

    pub fn descend(&self, indices: &[usize]) -> Result<Treepath, ManglingError> {
        indices
            .iter()
            .try_fold(self.clone(), |path, &index| path.child(index))
    }

    pub fn end(&self) -> &SyntacticTree {
        &self.end
    }

    /// The root tree of the snapshot this path points into.
    pub fn start(&self) -> &SyntacticTree {
        match &self.previous {
            Some(previous) => previous.start(),
            None => &self.end,
        }
    }

    pub fn previous(&self) -> Option<&Treepath> {
        self.previous.as_deref()
    }

    pub fn index_in_previous(&self) -> Option<usize> {
        self.previous.as_ref().map(|_| self.index_in_previous)
    }

    /// Number of trees on the path, the root included.
    pub fn length(&self) -> usize {
        1 + self.previous.as_ref().map_or(0, |previous| previous.length())
    }

    /// The path `distance` steps up; `ancestor(0)` is this path.
    pub fn ancestor(&self, distance: usize) -> Option<&Treepath> {
        let mut path = self;
        for _ in 0..distance {
            path = path.previous()?;
        }
        Some(path)
    }

    pub fn tree_at_distance(&self, distance: usize) -> Option<&SyntacticTree> {
        self.ancestor(distance).map(Treepath::end)
    }

    /// Child indices taken from the root down to the end.
    pub fn indices(&self) -> Vec<usize> {
        let mut indices = Vec::with_capacity(self.length() - 1);
        let mut path = self;
        while let Some(previous) = path.previous() {
            indices.push(path.index_in_previous);
            path = previous;
        }
        indices.reverse();
        indices
    }

    pub fn has_previous_sibling(&self) -> bool {
        self.previous.is_some() && self.index_in_previous > 0
    }

    pub fn has_next_sibling(&self) -> bool {
        self.previous
            .as_ref()
            .is_some_and(|previous| self.index_in_previous + 1 < previous.end.child_count())
    }

    pub fn previous_sibling(&self) -> Option<Treepath> {
        if !self.has_previous_sibling() {
            return None;
        }
        self.previous()?.child(self.index_in_previous - 1).ok()
    }

    pub fn next_sibling(&self) -> Option<Treepath> {
        if !self.has_next_sibling() {
            return None;
        }
        self.previous()?.child(self.index_in_previous + 1).ok()
    }

    /// Replace the node at the end, rebuilding every ancestor up to a new root.
    ///
    /// The returned path has the same indices as this one and points into the new snapshot.
    pub fn replace_end(&self, tree: SyntacticTree) -> Treepath {
        match &self.previous {
            None => Treepath::root(tree),
            Some(previous) => {
                let parent = previous
                    .end
                    .replacing_child(self.index_in_previous, tree.clone());
                Treepath {
                    previous: Some(Arc::new(previous.replace_end(parent))),
                    index_in_previous: self.index_in_previous,
                    end: tree,
                }
            }
        }
    }

    /// Remove the node at the end. Returns the path to its former parent, or `None` for a
    /// root-only path.
    pub fn remove_end(&self) -> Option<Treepath> {
        let previous = self.previous()?;
        let parent = previous.end.removing_child(self.index_in_previous);
        Some(previous.replace_end(parent))
    }

    /// Insert `tree` as child `index` of the end node; returns the path to the inserted child.
    pub fn insert_child(&self, index: usize, tree: SyntacticTree) -> Result<Treepath, ManglingError> {
        if index > self.end.child_count() {
            return Err(ManglingError::IndexOutOfRange {
                index,
                child_count: self.end.child_count(),
            });
        }
        let parent = self.replace_end(self.end.inserting_child(index, tree.clone()));
        Ok(Treepath {
            previous: Some(Arc::new(parent)),
            index_in_previous: index,
            end: tree,
        })
    }

    pub fn add_first_child(&self, tree: SyntacticTree) -> Treepath {
        let parent = self.replace_end(self.end.inserting_child(0, tree.clone()));
        Treepath {
            previous: Some(Arc::new(parent)),
            index_in_previous: 0,
            end: tree,
        }
    }

    pub fn add_last_child(&self, tree: SyntacticTree) -> Treepath {
        let index = self.end.child_count();
        let parent = self.replace_end(self.end.inserting_child(index, tree.clone()));
        Treepath {
            previous: Some(Arc::new(parent)),
            index_in_previous: index,
            end: tree,
        }
    }

    /// Remove child `index` of the end node; returns the path to the (new) end node.
    pub fn remove_child(&self, index: usize) -> Result<Treepath, ManglingError> {
        if index >= self.end.child_count() {
            return Err(ManglingError::IndexOutOfRange {
                index,
                child_count: self.end.child_count(),
            });
        }
        Ok(self.replace_end(self.end.removing_child(index)))
    }
}

impl fmt::Debug for Treepath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Treepath{:?} -> {}", self.indices(), self.end.kind())
    }
}
