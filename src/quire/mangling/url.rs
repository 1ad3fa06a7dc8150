//! Named URLs
//!
//!     The producer leaves URLs as bare literals. Inside a paragraph, a quoted or bracketed
//!     block followed by a URL, with nothing but separators between them, names that URL:
//!
//!     ```text
//!     see "the docs"  https://example.org
//!     (word see) (whitespace) (url (block-inside-double-quotes ...) (url-literal ...))
//!     ```
//!
//!     The name moves into the `url` node and the separators between the two go away. A URL
//!     with no name still gets its own `url` node. URLs in level titles stay bare.

use super::rewrite_postorder;
use crate::quire::error::ManglingError;
use crate::quire::tree::{NodeKind, SyntacticTree};
use crate::quire::treepath::Treepath;
use tracing::{debug, trace};

const PARAGRAPHS: [NodeKind; 2] = [
    NodeKind::ParagraphRegular,
    NodeKind::ParagraphAsListItemWithTripleHyphen,
];

const NAMES: [NodeKind; 2] = [
    NodeKind::BlockInsideDoubleQuotes,
    NodeKind::BlockInsideSquareBrackets,
];

#[derive(Debug, Default, Clone, Copy)]
pub struct UrlMangler;

impl UrlMangler {
    pub fn new() -> Self {
        UrlMangler
    }

    pub fn mangle(&self, root: &Treepath) -> Result<SyntacticTree, ManglingError> {
        debug!("naming urls");
        rewrite_postorder(root, |path| {
            let tree = path.end();
            if !tree.is_one_of(&PARAGRAPHS) || !has_bare_literal(tree) {
                return Ok(None);
            }
            Ok(Some(name_urls(tree)))
        })
    }

    /// True when every URL inside a paragraph sits in a `url` node.
    pub fn is_settled(tree: &SyntacticTree) -> bool {
        if tree.is_one_of(&PARAGRAPHS) {
            return !has_bare_literal(tree);
        }
        tree.children().iter().all(Self::is_settled)
    }
}

fn has_bare_literal(tree: &SyntacticTree) -> bool {
    tree.children().iter().any(|child| {
        child.is(NodeKind::UrlLiteral) || (!child.is(NodeKind::Url) && has_bare_literal(child))
    })
}

fn name_urls(tree: &SyntacticTree) -> SyntacticTree {
    if tree.is(NodeKind::Url) || !has_bare_literal(tree) {
        return tree.clone();
    }
    let mut named: Vec<SyntacticTree> = Vec::with_capacity(tree.child_count());
    // index in `named` of a block that may still name the next URL
    let mut name_at: Option<usize> = None;

    for child in tree.children() {
        let child = name_urls(child);
        match child.kind() {
            NodeKind::UrlLiteral => {
                let name = name_at.take().and_then(|index| named.drain(index..).next());
                trace!(named = name.is_some(), url = child.text(), "url");
                let location = name.as_ref().unwrap_or(&child).location().cloned();
                let parts = name.into_iter().chain(std::iter::once(child)).collect();
                named.push(SyntacticTree::build(NodeKind::Url, None, location, parts));
            }
            kind if NAMES.contains(&kind) => {
                named.push(child);
                name_at = Some(named.len() - 1);
            }
            kind if kind.is_separator() => named.push(child),
            _ => {
                name_at = None;
                named.push(child);
            }
        }
    }
    tree.with_children(named)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quire::testing::fixtures::*;

    fn mangle(tree: SyntacticTree) -> SyntacticTree {
        UrlMangler::new().mangle(&Treepath::root(tree)).unwrap()
    }

    fn name() -> SyntacticTree {
        double_quoted(vec![word("name")])
    }

    fn foo() -> SyntacticTree {
        url_literal("http://foo.com")
    }

    #[test]
    fn test_nothing_to_do() {
        let tree = novella(vec![paragraph(vec![]), paragraph(vec![word("w")])]);
        assert_eq!(mangle(tree.clone()), tree);
    }

    #[test]
    fn test_named_url_at_start_of_paragraph() {
        let tree = novella(vec![
            whitespace("  "),
            paragraph(vec![name(), line_break(), foo()]),
        ]);
        assert_eq!(
            mangle(tree),
            novella(vec![
                whitespace("  "),
                paragraph(vec![url(vec![name(), foo()])]),
            ])
        );
    }

    #[test]
    fn test_square_brackets_name_too() {
        let bracketed = square_bracketed(vec![word("name")]);
        let tree = novella(vec![paragraph(vec![bracketed.clone(), line_break(), foo()])]);
        assert_eq!(
            mangle(tree),
            novella(vec![paragraph(vec![url(vec![bracketed, foo()])])])
        );
    }

    #[test]
    fn test_other_content_between_name_and_url() {
        let literal = text(NodeKind::InlineLiteral, " ");
        let tree = paragraph(vec![name(), literal.clone(), line_break(), foo()]);
        assert_eq!(
            mangle(tree),
            paragraph(vec![name(), literal, line_break(), url(vec![foo()])])
        );
    }

    #[test]
    fn test_named_url_after_words_and_line_break() {
        let tree = paragraph(vec![
            word("w"),
            line_break(),
            whitespace("  "),
            name(),
            line_break(),
            foo(),
        ]);
        assert_eq!(
            mangle(tree),
            paragraph(vec![
                word("w"),
                line_break(),
                whitespace("  "),
                url(vec![name(), foo()]),
            ])
        );
    }

    #[test]
    fn test_unnamed_url() {
        let tree = paragraph(vec![word("w"), line_break(), foo()]);
        assert_eq!(
            mangle(tree),
            paragraph(vec![word("w"), line_break(), url(vec![foo()])])
        );
    }

    #[test]
    fn test_named_url_after_level_introducer() {
        let introducer = introducer("==", vec![titled("t")]);
        let tree = novella(vec![
            paragraph(vec![word("p")]),
            introducer.clone(),
            paragraph(vec![name(), whitespace("  "), line_break(), foo()]),
        ]);
        assert_eq!(
            mangle(tree),
            novella(vec![
                paragraph(vec![word("p")]),
                introducer,
                paragraph(vec![url(vec![name(), foo()])]),
            ])
        );
    }

    #[test]
    fn test_name_in_previous_paragraph_is_not_used() {
        let quoted = paragraph(vec![double_quoted(vec![word("q")])]);
        let tree = novella(vec![
            quoted.clone(),
            paragraph(vec![line_break(), line_break(), url_literal("http://foo.net")]),
        ]);
        assert_eq!(
            mangle(tree),
            novella(vec![
                quoted,
                paragraph(vec![
                    line_break(),
                    line_break(),
                    url(vec![url_literal("http://foo.net")]),
                ]),
            ])
        );
    }

    #[test]
    fn test_triple_hyphen_paragraph() {
        let tree = triple_hyphen_paragraph(vec![name(), line_break(), foo()]);
        assert_eq!(
            mangle(tree),
            triple_hyphen_paragraph(vec![url(vec![name(), foo()])])
        );
    }

    #[test]
    fn test_url_inside_embedded_list_item() {
        let tree = paragraph(vec![hyphen_list(vec![list_item(vec![
            word("see"),
            whitespace(" "),
            name(),
            whitespace(" "),
            foo(),
        ])])]);
        assert_eq!(
            mangle(tree),
            paragraph(vec![hyphen_list(vec![list_item(vec![
                word("see"),
                whitespace(" "),
                url(vec![name(), foo()]),
            ])])])
        );
    }

    #[test]
    fn test_url_in_level_title_stays_bare() {
        let tree = novella(vec![introducer("==", vec![title(vec![foo()])])]);
        assert_eq!(mangle(tree.clone()), tree);
        assert!(UrlMangler::is_settled(&tree));
    }

    #[test]
    fn test_is_settled() {
        let tree = novella(vec![paragraph(vec![name(), foo()])]);
        assert!(!UrlMangler::is_settled(&tree));
        let mangled = mangle(tree);
        assert!(UrlMangler::is_settled(&mangled));
        assert_eq!(mangle(mangled.clone()), mangled);
    }
}
