//! Treeviz formatter for syntactic trees
//!
//! One line per node, nesting drawn with box connectors:
//!
//! ```text
//! ▤ novella
//! ├─ § level
//! │ ├─ + explicit-tag "draft"
//! │ ├─ ⊤ level-title
//! │ │ └─ ◦ word "Intro"
//! │ └─ ¶ paragraph-regular
//! │   └─ ◦ word "Hello"
//! └─ 𝒱 literal-block "raw text"
//! ```
//!
//! Texts are truncated to 30 characters, newlines shown as `\n`. With locations on, each
//! line starts with `line:column` of its node, or `-:-` when the node has none.

use crate::quire::tree::{NodeKind, SyntacticTree};

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let mut truncated = s.chars().take(max_chars).collect::<String>();
        truncated.push_str("...");
        truncated
    } else {
        s.to_string()
    }
}

fn icon(kind: NodeKind) -> &'static str {
    match kind {
        NodeKind::Opus => "⧉",
        NodeKind::Novella => "▤",
        NodeKind::Level => "§",
        NodeKind::LevelIntroducer | NodeKind::LevelIntroducerIndent => "≡",
        NodeKind::LevelTitle => "⊤",
        NodeKind::ParagraphRegular => "¶",
        NodeKind::ParagraphAsListItemWithTripleHyphen | NodeKind::EmbeddedListItem => "•",
        NodeKind::EmbeddedListItemWithHyphen | NodeKind::EmbeddedListItemNumbered => "-",
        NodeKind::ListWithTripleHyphen
        | NodeKind::EmbeddedListWithHyphen
        | NodeKind::EmbeddedListWithNumberSign => "☰",
        NodeKind::Word => "◦",
        NodeKind::PunctuationSign => "·",
        NodeKind::Whitespace => "␣",
        NodeKind::LineBreak => "↵",
        NodeKind::UrlLiteral | NodeKind::Url => "⊕",
        NodeKind::BlockInsideDoubleQuotes => "“",
        NodeKind::BlockInsideSquareBrackets => "⟦",
        NodeKind::InlineLiteral => "ƒ",
        NodeKind::LiteralBlock => "𝒱",
        NodeKind::Tag | NodeKind::ExplicitTag | NodeKind::ImplicitTag => "+",
        NodeKind::AbsoluteIdentifier
        | NodeKind::RelativeIdentifier
        | NodeKind::ExplicitIdentifier
        | NodeKind::ImplicitIdentifier => "\\",
    }
}

fn label(tree: &SyntacticTree) -> String {
    match tree.text() {
        Some(text) => format!(
            "{} \"{}\"",
            tree.kind(),
            truncate(&text.replace('\n', "\\n"), 30)
        ),
        None => tree.kind().to_string(),
    }
}

fn location_prefix(tree: &SyntacticTree, show_locations: bool) -> String {
    if !show_locations {
        return String::new();
    }
    match tree.location() {
        Some(location) => format!("{:>3}:{:<3} ", location.line, location.column),
        None => format!("{:>3}:{:<3} ", "-", "-"),
    }
}

fn format_node(
    tree: &SyntacticTree,
    prefix: &str,
    is_last: bool,
    show_locations: bool,
    output: &mut String,
) {
    let connector = if is_last { "└─" } else { "├─" };
    output.push_str(&format!(
        "{}{}{} {} {}\n",
        location_prefix(tree, show_locations),
        prefix,
        connector,
        icon(tree.kind()),
        label(tree)
    ));

    let child_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });
    let child_count = tree.child_count();
    for (i, child) in tree.children().iter().enumerate() {
        format_node(child, &child_prefix, i == child_count - 1, show_locations, output);
    }
}

pub fn to_treeviz_str(tree: &SyntacticTree, show_locations: bool) -> String {
    let mut output = format!(
        "{}{} {}\n",
        location_prefix(tree, show_locations),
        icon(tree.kind()),
        label(tree)
    );
    let child_count = tree.child_count();
    for (i, child) in tree.children().iter().enumerate() {
        format_node(child, "", i == child_count - 1, show_locations, &mut output);
    }
    output
}
