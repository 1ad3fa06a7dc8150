//! Keep only what carries the requested tags
//!
//!     Decisions follow each node's [TagBehavior]:
//!
//!         - terminal (paragraph): kept when tagged, dropped otherwise;
//!         - scope (level): kept whole when tagged, otherwise kept only if some descendant
//!           was, holding nothing but its opaque children and the descendants kept;
//!         - traversable (document, list): same as an untagged scope;
//!         - opaque: kept verbatim whenever its parent is, dropped with it otherwise.
//!
//!     The node the filter starts from is always kept, whatever its behavior, with its opaque
//!     children and the descendants kept. Below it, a container with nothing tagged inside
//!     goes away whole: a novella of an opus holding only opaque content is dropped.
//!
//!     Siblings are decided independently: an untagged paragraph before a tagged one is
//!     dropped even though they share a level.

use crate::quire::tree::{NodeKind, SyntacticTree, TagBehavior};
use crate::quire::treepath::Treepath;
use std::collections::BTreeSet;
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct TagFilter {
    tags: BTreeSet<String>,
}

struct Kept {
    tagged: bool,
    tree: SyntacticTree,
}

impl TagFilter {
    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        TagFilter {
            tags: tags.into_iter().map(Into::into).collect(),
        }
    }

    pub fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }

    /// Filter the tree at the end of `path`, returning the new root of the snapshot. An
    /// empty tag set changes nothing.
    pub fn filter(&self, path: &Treepath) -> SyntacticTree {
        if self.tags.is_empty() {
            return path.start().clone();
        }
        debug!(tags = ?self.tags, "filtering on tags");
        let tree = path.end();
        let filtered = self
            .filter_node(tree)
            .map_or_else(|| tree.with_children(Vec::new()), |kept| kept.tree);
        if filtered.ptr_eq(tree) {
            return path.start().clone();
        }
        path.replace_end(filtered).start().clone()
    }

    /// True when one of `tree`'s canonical tags is requested.
    pub fn has_tag(&self, tree: &SyntacticTree) -> bool {
        tree.children().iter().any(|child| {
            child.is_one_of(&[NodeKind::ExplicitTag, NodeKind::ImplicitTag])
                && child.text().is_some_and(|name| self.tags.contains(name))
        })
    }

    fn filter_node(&self, tree: &SyntacticTree) -> Option<Kept> {
        match tree.kind().tag_behavior() {
            TagBehavior::NonTraversable => Some(Kept {
                tagged: false,
                tree: tree.clone(),
            }),
            TagBehavior::Terminal => self.has_tag(tree).then(|| Kept {
                tagged: true,
                tree: tree.clone(),
            }),
            TagBehavior::Scope if self.has_tag(tree) => Some(Kept {
                tagged: true,
                tree: tree.clone(),
            }),
            TagBehavior::Scope | TagBehavior::Traversable => {
                let mut tagged = false;
                let mut children = Vec::with_capacity(tree.child_count());
                for child in tree.children() {
                    if child.kind().tag_behavior() == TagBehavior::NonTraversable {
                        children.push(child.clone());
                        continue;
                    }
                    if let Some(kept) = self.filter_node(child) {
                        if kept.tagged {
                            tagged = true;
                            children.push(kept.tree);
                        }
                    }
                }
                Some(Kept {
                    tagged,
                    tree: tree.with_children(children),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quire::testing::fixtures::*;

    fn filter(tree: SyntacticTree, tags: &[&str]) -> SyntacticTree {
        TagFilter::new(tags.iter().copied()).filter(&Treepath::root(tree))
    }

    fn tagged(tag: &str, name: &str) -> SyntacticTree {
        paragraph(vec![explicit_tag(tag), word(name)])
    }

    fn untagged(name: &str) -> SyntacticTree {
        paragraph(vec![word(name)])
    }

    #[test]
    fn test_nothing_to_do_without_tags() {
        let tree = novella(vec![untagged("a"), untagged("b")]);
        assert_eq!(filter(tree.clone(), &[]), tree);
    }

    #[test]
    fn test_keep_one_paragraph_of_two() {
        let tree = novella(vec![tagged("tag-1", "w"), untagged("x")]);
        assert_eq!(
            filter(tree, &["tag-1"]),
            novella(vec![tagged("tag-1", "w")])
        );
    }

    #[test]
    fn test_opaque_content_kept_when_nothing_matches() {
        let tree = novella(vec![url_literal("http://x"), tagged("tag-1", "w")]);
        assert_eq!(filter(tree, &["tag-2"]), novella(vec![url_literal("http://x")]));
    }

    #[test]
    fn test_starting_scope_keeps_its_opaque_children() {
        let tree = level(vec![titled("x"), untagged("a")]);
        assert_eq!(filter(tree, &["none"]), level(vec![titled("x")]));
    }

    #[test]
    fn test_nested_novella_without_tags_dropped_with_its_opaque_content() {
        let tree = opus(vec![
            novella(vec![url_literal("http://x"), untagged("a")]),
            novella(vec![url_literal("http://y"), tagged("t", "b")]),
        ]);
        assert_eq!(
            filter(tree, &["t"]),
            opus(vec![novella(vec![url_literal("http://y"), tagged("t", "b")])])
        );
    }

    #[test]
    fn test_untagged_preceding_sibling_dropped_inside_scope() {
        let tree = novella(vec![level(vec![
            titled("level"),
            untagged("0"),
            tagged("tag-1", "1"),
        ])]);
        assert_eq!(
            filter(tree, &["tag-1"]),
            novella(vec![level(vec![titled("level"), tagged("tag-1", "1")])])
        );
    }

    #[test]
    fn test_parent_level_retained() {
        let tree = novella(vec![
            level(vec![untagged("x")]),
            level(vec![tagged("tag-1", "w")]),
        ]);
        assert_eq!(
            filter(tree, &["tag-1"]),
            novella(vec![level(vec![tagged("tag-1", "w")])])
        );
    }

    #[test]
    fn test_level_with_implicit_tag_kept_whole() {
        let matching = level(vec![implicit_tag("tag-1"), untagged("w")]);
        let tree = novella(vec![level(vec![untagged("x")]), matching.clone()]);
        assert_eq!(filter(tree, &["tag-1"]), novella(vec![matching]));
    }

    #[test]
    fn test_paragraphs_inside_triple_hyphen_list() {
        let item = triple_hyphen_paragraph(vec![explicit_tag("tag-2"), word("z")]);
        let tree = novella(vec![level(vec![
            titled("x"),
            tagged("tag-1", "y"),
            triple_hyphen_list(vec![item.clone()]),
        ])]);
        assert_eq!(
            filter(tree, &["tag-2"]),
            novella(vec![level(vec![
                titled("x"),
                triple_hyphen_list(vec![item])
            ])])
        );
    }

    #[test]
    fn test_deeply_nested_tag_keeps_every_enclosing_level() {
        let tree = novella(vec![
            untagged("top"),
            level(vec![
                titled("one"),
                untagged("a"),
                level(vec![titled("two"), untagged("b"), tagged("T1", "deep")]),
            ]),
            level(vec![titled("other"), untagged("c")]),
        ]);
        assert_eq!(
            filter(tree, &["T1"]),
            novella(vec![level(vec![
                titled("one"),
                level(vec![titled("two"), tagged("T1", "deep")]),
            ])])
        );
    }

    #[test]
    fn test_root_kept_empty_when_nothing_matches() {
        let tree = novella(vec![untagged("a"), level(vec![untagged("b")])]);
        assert_eq!(filter(tree, &["none"]), novella(vec![]));
    }

    #[test]
    fn test_filter_below_root_rebuilds_ancestors() {
        let tree = opus(vec![
            novella(vec![untagged("a")]),
            novella(vec![tagged("t", "b"), untagged("c")]),
        ]);
        let path = Treepath::from_indices(tree, &[1]).unwrap();
        let filtered = TagFilter::new(["t"]).filter(&path);
        assert_eq!(
            filtered,
            opus(vec![
                novella(vec![untagged("a")]),
                novella(vec![tagged("t", "b")]),
            ])
        );
    }
}
