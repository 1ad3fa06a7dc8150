//! Level nesting by marker depth
//!
//!     Level introducers arrive as flat siblings of the content they head. An introducer
//!     marked `==` has depth 1, `===` depth 2, and so on. Each introducer becomes a `level`
//!     node holding its title, tags and identifiers, then every following sibling up to the
//!     next introducer of the same or lower depth:
//!
//!     ```text
//!     (introducer "==" A) (p 1) (introducer "===" B) (p 2) (introducer "==" C)
//!
//!     (level A (p 1) (level B (p 2))) (level C)
//!     ```
//!
//!     Depth may only grow one step at a time: `==` followed by `====` fails with
//!     [ManglingError::BadDepthOrder]. The first introducer of a run may have any depth.
//!     Content before the first introducer stays where it is.

use super::{find_kinds, rewrite_postorder};
use crate::quire::error::ManglingError;
use crate::quire::tree::{Location, NodeKind, SyntacticTree};
use crate::quire::treepath::Treepath;
use tracing::{debug, trace};

#[derive(Debug, Default, Clone, Copy)]
pub struct LevelMangler;

impl LevelMangler {
    pub fn new() -> Self {
        LevelMangler
    }

    pub fn mangle(&self, root: &Treepath) -> Result<SyntacticTree, ManglingError> {
        debug!("rehierarchizing levels");
        rewrite_postorder(root, |path| {
            let tree = path.end();
            if !tree
                .children()
                .iter()
                .any(|child| child.is(NodeKind::LevelIntroducer))
            {
                return Ok(None);
            }
            let children = tree
                .children()
                .iter()
                .try_fold(LevelStack::default(), |stack, child| stack.accept(child))?
                .finish();
            Ok(Some(tree.with_children(children)))
        })
    }

    /// True when no level introducer is left anywhere reachable.
    pub fn is_settled(tree: &SyntacticTree) -> bool {
        find_kinds(tree, &[NodeKind::LevelIntroducer]).is_empty()
    }
}

/// Depth encoded by an introducer's marker, `==` being depth 1.
pub fn introducer_depth(introducer: &SyntacticTree) -> usize {
    introducer
        .children()
        .iter()
        .find(|child| child.is(NodeKind::LevelIntroducerIndent))
        .and_then(SyntacticTree::text)
        .map_or(1, |marker| marker.chars().count().saturating_sub(1).max(1))
}

struct OpenLevel {
    depth: usize,
    location: Option<Location>,
    children: Vec<SyntacticTree>,
}

impl OpenLevel {
    fn from_introducer(introducer: &SyntacticTree) -> Self {
        OpenLevel {
            depth: introducer_depth(introducer),
            location: introducer.location().cloned(),
            children: introducer
                .children()
                .iter()
                .filter(|child| !child.is(NodeKind::LevelIntroducerIndent))
                .cloned()
                .collect(),
        }
    }

    fn into_tree(self) -> SyntacticTree {
        SyntacticTree::build(NodeKind::Level, None, self.location, self.children)
    }
}

/// Rebuilt siblings so far plus the open levels, outermost first. Threaded by value.
#[derive(Default)]
struct LevelStack {
    done: Vec<SyntacticTree>,
    open: Vec<OpenLevel>,
}

impl LevelStack {
    fn accept(mut self, child: &SyntacticTree) -> Result<Self, ManglingError> {
        if !child.is(NodeKind::LevelIntroducer) {
            match self.open.last_mut() {
                Some(top) => top.children.push(child.clone()),
                None => self.done.push(child.clone()),
            }
            return Ok(self);
        }

        let level = OpenLevel::from_introducer(child);
        if let Some(top) = self.open.last() {
            if level.depth > top.depth + 1 {
                return Err(ManglingError::BadDepthOrder {
                    depth: level.depth,
                    previous: top.depth,
                    location: level.location,
                });
            }
        }
        while self.open.last().is_some_and(|top| top.depth >= level.depth) {
            self = self.close_top();
        }
        trace!(depth = level.depth, "open level");
        self.open.push(level);
        Ok(self)
    }

    fn close_top(mut self) -> Self {
        if let Some(top) = self.open.pop() {
            let tree = top.into_tree();
            match self.open.last_mut() {
                Some(parent) => parent.children.push(tree),
                None => self.done.push(tree),
            }
        }
        self
    }

    fn finish(mut self) -> Vec<SyntacticTree> {
        while !self.open.is_empty() {
            self = self.close_top();
        }
        self.done
    }
}
