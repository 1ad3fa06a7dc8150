//! Tree builders for tests
//!
//! One function per node kind, named after what the grammar would have produced. Expected
//! trees read close to the markup they stand for:
//!
//! ```rust,ignore
//! novella(vec![paragraph(vec![word("Hello"), tag("draft")])])
//! ```

use crate::quire::tree::{NodeKind, SyntacticTree};

pub fn node(kind: NodeKind, children: Vec<SyntacticTree>) -> SyntacticTree {
    SyntacticTree::new(kind, children)
}

pub fn text(kind: NodeKind, text: &str) -> SyntacticTree {
    SyntacticTree::leaf(kind, text)
}

pub fn opus(children: Vec<SyntacticTree>) -> SyntacticTree {
    node(NodeKind::Opus, children)
}

pub fn novella(children: Vec<SyntacticTree>) -> SyntacticTree {
    node(NodeKind::Novella, children)
}

pub fn paragraph(children: Vec<SyntacticTree>) -> SyntacticTree {
    node(NodeKind::ParagraphRegular, children)
}

pub fn triple_hyphen_paragraph(children: Vec<SyntacticTree>) -> SyntacticTree {
    node(NodeKind::ParagraphAsListItemWithTripleHyphen, children)
}

pub fn triple_hyphen_list(children: Vec<SyntacticTree>) -> SyntacticTree {
    node(NodeKind::ListWithTripleHyphen, children)
}

pub fn word(value: &str) -> SyntacticTree {
    text(NodeKind::Word, value)
}

pub fn punctuation(value: &str) -> SyntacticTree {
    text(NodeKind::PunctuationSign, value)
}

pub fn whitespace(value: &str) -> SyntacticTree {
    text(NodeKind::Whitespace, value)
}

pub fn line_break() -> SyntacticTree {
    SyntacticTree::empty(NodeKind::LineBreak)
}

pub fn url_literal(value: &str) -> SyntacticTree {
    text(NodeKind::UrlLiteral, value)
}

/// A URL, optionally preceded by its name.
pub fn url(children: Vec<SyntacticTree>) -> SyntacticTree {
    node(NodeKind::Url, children)
}

pub fn double_quoted(children: Vec<SyntacticTree>) -> SyntacticTree {
    node(NodeKind::BlockInsideDoubleQuotes, children)
}

pub fn square_bracketed(children: Vec<SyntacticTree>) -> SyntacticTree {
    node(NodeKind::BlockInsideSquareBrackets, children)
}

pub fn literal_block(value: &str) -> SyntacticTree {
    text(NodeKind::LiteralBlock, value)
}

/// A level introducer: the marker first, then title, tags and identifiers.
pub fn introducer(marker: &str, children: Vec<SyntacticTree>) -> SyntacticTree {
    let mut all = vec![text(NodeKind::LevelIntroducerIndent, marker)];
    all.extend(children);
    node(NodeKind::LevelIntroducer, all)
}

pub fn title(children: Vec<SyntacticTree>) -> SyntacticTree {
    node(NodeKind::LevelTitle, children)
}

/// A one-word title, the usual case in tests.
pub fn titled(value: &str) -> SyntacticTree {
    title(vec![word(value)])
}

pub fn level(children: Vec<SyntacticTree>) -> SyntacticTree {
    node(NodeKind::Level, children)
}

pub fn hyphen_item(children: Vec<SyntacticTree>) -> SyntacticTree {
    node(NodeKind::EmbeddedListItemWithHyphen, children)
}

pub fn numbered_item(children: Vec<SyntacticTree>) -> SyntacticTree {
    node(NodeKind::EmbeddedListItemNumbered, children)
}

pub fn hyphen_list(children: Vec<SyntacticTree>) -> SyntacticTree {
    node(NodeKind::EmbeddedListWithHyphen, children)
}

pub fn number_sign_list(children: Vec<SyntacticTree>) -> SyntacticTree {
    node(NodeKind::EmbeddedListWithNumberSign, children)
}

pub fn list_item(children: Vec<SyntacticTree>) -> SyntacticTree {
    node(NodeKind::EmbeddedListItem, children)
}

pub fn tag(name: &str) -> SyntacticTree {
    text(NodeKind::Tag, name)
}

pub fn explicit_tag(name: &str) -> SyntacticTree {
    text(NodeKind::ExplicitTag, name)
}

pub fn implicit_tag(name: &str) -> SyntacticTree {
    text(NodeKind::ImplicitTag, name)
}

pub fn absolute_identifier(value: &str) -> SyntacticTree {
    text(NodeKind::AbsoluteIdentifier, value)
}

pub fn relative_identifier(value: &str) -> SyntacticTree {
    text(NodeKind::RelativeIdentifier, value)
}

pub fn explicit_identifier(value: &str) -> SyntacticTree {
    text(NodeKind::ExplicitIdentifier, value)
}

pub fn implicit_identifier(value: &str) -> SyntacticTree {
    text(NodeKind::ImplicitIdentifier, value)
}
