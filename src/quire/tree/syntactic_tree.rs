//! The immutable syntax tree
//!
//!     A [SyntacticTree] is a cheap handle over a reference-counted node. Nothing ever mutates
//!     a node once built: every "edit" builds a new node that shares the untouched children of
//!     the old one. Passes hand whole trees to each other by value, so cloning a tree only bumps
//!     a counter.
//!
//!     Equality is structural over kind, text and children. Locations are carried along for
//!     diagnostics but do not take part in comparisons, which lets tests describe expected
//!     trees without positions.

use super::kind::NodeKind;
use super::location::Location;
use std::fmt;
use std::sync::Arc;

#[derive(Clone)]
pub struct SyntacticTree(Arc<Node>);

struct Node {
    kind: NodeKind,
    text: Option<String>,
    location: Option<Location>,
    children: Vec<SyntacticTree>,
}

impl SyntacticTree {
    pub fn new(kind: NodeKind, children: Vec<SyntacticTree>) -> Self {
        Self::build(kind, None, None, children)
    }

    /// A childless node with no payload (line breaks, empty titles).
    pub fn empty(kind: NodeKind) -> Self {
        Self::build(kind, None, None, Vec::new())
    }

    /// A childless node carrying literal text.
    pub fn leaf(kind: NodeKind, text: impl Into<String>) -> Self {
        Self::build(kind, Some(text.into()), None, Vec::new())
    }

    pub fn build(
        kind: NodeKind,
        text: Option<String>,
        location: Option<Location>,
        children: Vec<SyntacticTree>,
    ) -> Self {
        SyntacticTree(Arc::new(Node {
            kind,
            text,
            location,
            children,
        }))
    }

    pub fn kind(&self) -> NodeKind {
        self.0.kind
    }

    pub fn text(&self) -> Option<&str> {
        self.0.text.as_deref()
    }

    pub fn location(&self) -> Option<&Location> {
        self.0.location.as_ref()
    }

    pub fn children(&self) -> &[SyntacticTree] {
        &self.0.children
    }

    pub fn child_count(&self) -> usize {
        self.0.children.len()
    }

    pub fn child(&self, index: usize) -> Option<&SyntacticTree> {
        self.0.children.get(index)
    }

    pub fn is(&self, kind: NodeKind) -> bool {
        self.0.kind == kind
    }

    pub fn is_one_of(&self, kinds: &[NodeKind]) -> bool {
        kinds.contains(&self.0.kind)
    }

    /// True when both handles point at the very same node.
    pub fn ptr_eq(&self, other: &SyntacticTree) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Same kind, text and location, different children.
    pub fn with_children(&self, children: Vec<SyntacticTree>) -> Self {
        Self::build(
            self.0.kind,
            self.0.text.clone(),
            self.0.location.clone(),
            children,
        )
    }

    /// Same text, location and children under another kind.
    pub fn with_kind(&self, kind: NodeKind) -> Self {
        Self::build(
            kind,
            self.0.text.clone(),
            self.0.location.clone(),
            self.0.children.clone(),
        )
    }

    pub fn with_location(&self, location: Option<Location>) -> Self {
        Self::build(
            self.0.kind,
            self.0.text.clone(),
            location,
            self.0.children.clone(),
        )
    }

    /// Callers guarantee `index < child_count()`.
    pub(crate) fn replacing_child(&self, index: usize, child: SyntacticTree) -> Self {
        let mut children = self.0.children.clone();
        children[index] = child;
        self.with_children(children)
    }

    /// Callers guarantee `index <= child_count()`.
    pub(crate) fn inserting_child(&self, index: usize, child: SyntacticTree) -> Self {
        let mut children = self.0.children.clone();
        children.insert(index, child);
        self.with_children(children)
    }

    /// Callers guarantee `index < child_count()`.
    pub(crate) fn removing_child(&self, index: usize) -> Self {
        let mut children = self.0.children.clone();
        children.remove(index);
        self.with_children(children)
    }

    /// Number of nodes in this tree, itself included.
    pub fn size(&self) -> usize {
        1 + self.0.children.iter().map(SyntacticTree::size).sum::<usize>()
    }
}

impl PartialEq for SyntacticTree {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
            || (self.0.kind == other.0.kind
                && self.0.text == other.0.text
                && self.0.children == other.0.children)
    }
}

impl Eq for SyntacticTree {}

/// Compact s-expression: `(paragraph-regular (word "hello") (line-break))`.
impl fmt::Display for SyntacticTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}", self.0.kind)?;
        if let Some(text) = &self.0.text {
            write!(f, " {:?}", text)?;
        }
        for child in &self.0.children {
            write!(f, " {}", child)?;
        }
        write!(f, ")")
    }
}

impl fmt::Debug for SyntacticTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(text: &str) -> SyntacticTree {
        SyntacticTree::leaf(NodeKind::Word, text)
    }

    #[test]
    fn test_structural_equality_ignores_location() {
        let located = word("w").with_location(Some(Location::new(1, 1)));
        assert_eq!(located, word("w"));
        assert_ne!(word("w"), word("x"));
        assert_ne!(
            word("w"),
            SyntacticTree::leaf(NodeKind::PunctuationSign, "w")
        );
    }

    #[test]
    fn test_edits_share_untouched_children() {
        let first = word("a");
        let second = word("b");
        let parent = SyntacticTree::new(
            NodeKind::ParagraphRegular,
            vec![first.clone(), second.clone()],
        );
        let edited = parent.replacing_child(1, word("c"));

        assert!(edited.child(0).unwrap().ptr_eq(&first));
        assert_eq!(edited.child(1).unwrap(), &word("c"));
        // the original is untouched
        assert!(parent.child(1).unwrap().ptr_eq(&second));
    }

    #[test]
    fn test_insert_and_remove_child() {
        let parent = SyntacticTree::new(NodeKind::ParagraphRegular, vec![word("a")]);
        let inserted = parent.inserting_child(0, word("z"));
        assert_eq!(inserted.children(), &[word("z"), word("a")]);
        let removed = inserted.removing_child(1);
        assert_eq!(removed.children(), &[word("z")]);
    }

    #[test]
    fn test_display_as_s_expression() {
        let tree = SyntacticTree::new(
            NodeKind::ParagraphRegular,
            vec![word("hi"), SyntacticTree::empty(NodeKind::LineBreak)],
        );
        assert_eq!(
            tree.to_string(),
            "(paragraph-regular (word \"hi\") (line-break))"
        );
        assert_eq!(tree.size(), 3);
    }

    #[test]
    fn test_with_kind_keeps_location_and_children() {
        let item = SyntacticTree::build(
            NodeKind::EmbeddedListItemWithHyphen,
            None,
            Some(Location::new(2, 3)),
            vec![word("x")],
        );
        let retagged = item.with_kind(NodeKind::EmbeddedListItem);
        assert_eq!(retagged.kind(), NodeKind::EmbeddedListItem);
        assert_eq!(retagged.location(), Some(&Location::new(2, 3)));
        assert_eq!(retagged.children(), &[word("x")]);
    }
}
