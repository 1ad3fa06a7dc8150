//! Fluent assertions over syntactic trees

use crate::quire::tree::{Location, NodeKind, SyntacticTree};

/// Start an assertion chain on `tree`.
pub fn assert_tree(tree: &SyntacticTree) -> TreeAssertion<'_> {
    TreeAssertion {
        tree,
        context: "root".to_string(),
    }
}

pub struct TreeAssertion<'a> {
    tree: &'a SyntacticTree,
    context: String,
}

impl<'a> TreeAssertion<'a> {
    pub fn kind(self, expected: NodeKind) -> Self {
        assert_eq!(
            self.tree.kind(),
            expected,
            "{}: expected kind {}, found {}",
            self.context,
            expected,
            self.tree.kind()
        );
        self
    }

    pub fn text(self, expected: &str) -> Self {
        assert_eq!(
            self.tree.text(),
            Some(expected),
            "{}: unexpected text in {}",
            self.context,
            self.tree
        );
        self
    }

    pub fn child_count(self, expected: usize) -> Self {
        assert_eq!(
            self.tree.child_count(),
            expected,
            "{}: expected {} children in {}",
            self.context,
            expected,
            self.tree
        );
        self
    }

    pub fn child_kinds(self, expected: &[NodeKind]) -> Self {
        let actual: Vec<_> = self.tree.children().iter().map(|c| c.kind()).collect();
        assert_eq!(
            actual, expected,
            "{}: unexpected children kinds",
            self.context
        );
        self
    }

    pub fn location(self, line: usize, column: usize) -> Self {
        let location = self.tree.location();
        assert_eq!(
            location.map(|l: &Location| (l.line, l.column)),
            Some((line, column)),
            "{}: unexpected location",
            self.context
        );
        self
    }

    pub fn equals(self, expected: &SyntacticTree) -> Self {
        assert_eq!(self.tree, expected, "{}: trees differ", self.context);
        self
    }

    /// Run assertions on child `index`.
    pub fn child<F>(self, index: usize, check: F) -> Self
    where
        F: FnOnce(TreeAssertion<'_>) -> TreeAssertion<'_>,
    {
        let child = self.tree.child(index).unwrap_or_else(|| {
            panic!(
                "{}: no child {} in {}",
                self.context, index, self.tree
            )
        });
        check(TreeAssertion {
            tree: child,
            context: format!("{}/{}", self.context, index),
        });
        self
    }

    /// Count nodes of `kind` anywhere below (and including) this node.
    pub fn contains_count(self, kind: NodeKind, expected: usize) -> Self {
        fn count(tree: &SyntacticTree, kind: NodeKind) -> usize {
            usize::from(tree.is(kind)) + tree.children().iter().map(|c| count(c, kind)).sum::<usize>()
        }
        assert_eq!(
            count(self.tree, kind),
            expected,
            "{}: unexpected number of {} nodes in {}",
            self.context,
            kind,
            self.tree
        );
        self
    }
}
