//! Implicit identifiers derived from level titles
//!
//!     A title is flattened to plain text, then squeezed into something usable as an
//!     identifier segment or a tag: punctuation becomes `_`, words after the first are
//!     camel-cased, and anything outside `[0-9A-Za-z_-]` is dropped.
//!
//!     ```text
//!     "Introduction, part one"   ->  Introduction_partOne
//!     "Using `v0.1.2` (beta)"    ->  UsingV0-1-2_beta
//!     ```

use super::FragmentIdentifier;
use crate::quire::tree::{NodeKind, SyntacticTree};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::collections::BTreeSet;

static PUNCTUATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"[,.;?!:]+").unwrap());
static DELIMITERS: Lazy<Regex> = Lazy::new(|| Regex::new(r#"[()"]"#).unwrap());
static SPACES: Lazy<Regex> = Lazy::new(|| Regex::new(r" +").unwrap());
static HYPHENS: Lazy<Regex> = Lazy::new(|| Regex::new(r"-+").unwrap());
static UNDERSCORES: Lazy<Regex> = Lazy::new(|| Regex::new(r"_+").unwrap());
static WORD_BUT_FIRST: Lazy<Regex> =
    Lazy::new(|| Regex::new(r" ([0-9a-zA-Z]+(?:-[0-9a-zA-Z]+)*)").unwrap());
static LEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[-_]+").unwrap());
static TRAILING: Lazy<Regex> = Lazy::new(|| Regex::new(r"[-_]+$").unwrap());
static MIXED: Lazy<Regex> = Lazy::new(|| Regex::new(r"-_|_-").unwrap());
static FORBIDDEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^0-9a-zA-Z_-]+").unwrap());
static NOT_ALPHANUMERIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^0-9a-zA-Z]+").unwrap());

/// Plain text of a title: one space per separator, literals with their non-alphanumerics
/// replaced by `-`. Tags and identifiers are not part of the text.
pub fn title_text(title: &SyntacticTree) -> String {
    let mut text = String::new();
    append_text(title, &mut text);
    text
}

fn append_text(tree: &SyntacticTree, text: &mut String) {
    match tree.kind() {
        NodeKind::Word | NodeKind::PunctuationSign | NodeKind::UrlLiteral => {
            text.push_str(tree.text().unwrap_or_default());
        }
        NodeKind::Whitespace | NodeKind::LineBreak => text.push(' '),
        NodeKind::InlineLiteral | NodeKind::LiteralBlock => {
            let literal = tree.text().unwrap_or_default();
            text.push_str(&NOT_ALPHANUMERIC.replace_all(literal, "-"));
        }
        NodeKind::Tag
        | NodeKind::ExplicitTag
        | NodeKind::ImplicitTag
        | NodeKind::AbsoluteIdentifier
        | NodeKind::RelativeIdentifier
        | NodeKind::ExplicitIdentifier
        | NodeKind::ImplicitIdentifier
        | NodeKind::LevelIntroducerIndent => {}
        _ => tree
            .children()
            .iter()
            .for_each(|child| append_text(child, text)),
    }
}

fn collapse(text: &str) -> String {
    let text = SPACES.replace_all(text, " ");
    let text = HYPHENS.replace_all(&text, "-");
    UNDERSCORES.replace_all(&text, "_").into_owned()
}

/// Squeeze free text into an identifier segment. May return an empty string.
pub fn clean_for_identifier(text: &str) -> String {
    let text = PUNCTUATION.replace_all(text, "_");
    let text = DELIMITERS.replace_all(&text, "_");
    let text = collapse(&text).replace(" _", "_").replace("_ ", "_");

    let text = WORD_BUT_FIRST.replace_all(&text, |captures: &Captures| {
        let word = &captures[1];
        let mut chars = word.chars();
        match chars.next() {
            Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
            None => String::new(),
        }
    });

    let text = LEADING.replace(&text, "");
    let text = TRAILING.replace(&text, "");
    let text = collapse(&text);
    let text = MIXED.replace_all(&text, "_");
    FORBIDDEN.replace_all(&text, "").into_owned()
}

/// First `LevelTitle` child of `owner`.
pub fn title_of(owner: &SyntacticTree) -> Option<&SyntacticTree> {
    owner
        .children()
        .iter()
        .find(|child| child.is(NodeKind::LevelTitle))
}

/// Identifier derived from the title of `owner`, if it has a title that yields one.
pub fn implicit_identifier(owner: &SyntacticTree) -> Option<FragmentIdentifier> {
    let segment = clean_for_identifier(&title_text(title_of(owner)?));
    FragmentIdentifier::new([segment]).ok()
}

/// Tags derived from the title of `owner`: the implicit identifier split on `_`, in title
/// order, without duplicates.
pub fn implicit_tags(owner: &SyntacticTree) -> Vec<String> {
    let Some(title) = title_of(owner) else {
        return Vec::new();
    };
    let cleaned = clean_for_identifier(&title_text(title));
    let mut seen = BTreeSet::new();
    cleaned
        .split('_')
        .filter(|tag| !tag.is_empty())
        .filter(|tag| seen.insert(tag.to_string()))
        .map(str::to_string)
        .collect()
}
