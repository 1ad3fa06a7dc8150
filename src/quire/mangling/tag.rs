//! Canonical tags
//!
//!     Three passes, in this order:
//!
//!         1. Explicit: each `+name` written in a level or paragraph becomes an
//!            `explicit-tag`, moved in front of its owner's other children.
//!         2. Implicit: a level with a title and no explicit tag gets one `implicit-tag` per
//!            part of its implicit identifier (`Intro_partOne` gives `Intro` and `partOne`).
//!         3. Promotion: an implicit tag whose name is also used as an explicit tag somewhere
//!            in the document becomes explicit.
//!
//!     Opaque nodes are never entered, so tags inside literal blocks or list items stay raw.

use super::{find_kinds, rewrite_postorder};
use crate::quire::designator::implicit::implicit_tags;
use crate::quire::error::ManglingError;
use crate::quire::tree::{NodeKind, SyntacticTree, TagBehavior};
use crate::quire::treepath::Treepath;
use std::collections::BTreeSet;
use tracing::{debug, trace};

const CANONICAL_TAGS: [NodeKind; 2] = [NodeKind::ExplicitTag, NodeKind::ImplicitTag];

#[derive(Debug, Default, Clone, Copy)]
pub struct TagMangler;

impl TagMangler {
    pub fn new() -> Self {
        TagMangler
    }

    pub fn mangle(&self, root: &Treepath) -> Result<SyntacticTree, ManglingError> {
        let explicit = self.explicit(root)?;
        let implicit = self.implicit(&Treepath::root(explicit))?;
        let tags = explicit_tags(&implicit);
        self.promote(&Treepath::root(implicit), &tags)
    }

    pub fn explicit(&self, root: &Treepath) -> Result<SyntacticTree, ManglingError> {
        debug!("canonicalizing explicit tags");
        rewrite_postorder(root, |path| {
            let owner = path.end();
            let owns_tags = matches!(
                owner.kind().tag_behavior(),
                TagBehavior::Scope | TagBehavior::Terminal
            );
            if !owns_tags || !owner.children().iter().any(|child| child.is(NodeKind::Tag)) {
                return Ok(None);
            }
            let (tags, rest): (Vec<_>, Vec<_>) = owner
                .children()
                .iter()
                .partition(|child| child.is_one_of(&[NodeKind::Tag, NodeKind::ExplicitTag]));
            let children = tags
                .into_iter()
                .map(|tag| tag.with_kind(NodeKind::ExplicitTag))
                .chain(rest.into_iter().cloned())
                .collect();
            Ok(Some(owner.with_children(children)))
        })
    }

    pub fn implicit(&self, root: &Treepath) -> Result<SyntacticTree, ManglingError> {
        debug!("adding implicit tags");
        rewrite_postorder(root, |path| {
            let owner = path.end();
            if !owner.is(NodeKind::Level)
                || owner
                    .children()
                    .iter()
                    .any(|child| child.is_one_of(&CANONICAL_TAGS) || child.is(NodeKind::Tag))
            {
                return Ok(None);
            }
            let names = implicit_tags(owner);
            if names.is_empty() {
                return Ok(None);
            }
            trace!(?names, "implicit tags");
            let children = names
                .iter()
                .map(|name| SyntacticTree::leaf(NodeKind::ImplicitTag, name.as_str()))
                .chain(owner.children().iter().cloned())
                .collect();
            Ok(Some(owner.with_children(children)))
        })
    }

    pub fn promote(
        &self,
        root: &Treepath,
        explicit: &BTreeSet<String>,
    ) -> Result<SyntacticTree, ManglingError> {
        debug!(count = explicit.len(), "promoting implicit tags");
        rewrite_postorder(root, |path| {
            let node = path.end();
            let promotable = node.is(NodeKind::ImplicitTag)
                && node.text().is_some_and(|name| explicit.contains(name));
            Ok(promotable.then(|| node.with_kind(NodeKind::ExplicitTag)))
        })
    }

    /// True when no raw tag is left in a level or paragraph.
    pub fn is_settled(tree: &SyntacticTree) -> bool {
        find_kinds(tree, &[NodeKind::Tag]).is_empty()
    }
}

/// Names of every reachable explicit tag.
pub fn explicit_tags(tree: &SyntacticTree) -> BTreeSet<String> {
    find_kinds(tree, &[NodeKind::ExplicitTag])
        .iter()
        .filter_map(|path| path.end().text().map(str::to_string))
        .collect()
}
