//! Node kinds and their tag behaviors
//!
//!     The grammar and every mangling pass agree on one closed set of node kinds. Kinds
//!     produced by the grammar describe what was written; kinds synthesized by a pass
//!     (levels, list wrappers, canonical tags, enriched identifiers) describe the structure
//!     imposed on top of it.
//!
//!     Each kind has a fixed [TagBehavior]. Tag filtering and identifier collection look at
//!     nothing else to decide whether a node is worth entering.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How tag filtering and identifier collection treat a node kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TagBehavior {
    /// Tag-bearing container: keeping it keeps everything inside.
    Scope,
    /// Structural container, always kept and always searched.
    Traversable,
    /// Tag-bearing block with no nested scopes.
    Terminal,
    /// Opaque content, never searched.
    NonTraversable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeKind {
    // Roots
    Opus,
    Novella,

    // Levels
    LevelIntroducer,
    LevelIntroducerIndent,
    LevelTitle,
    Level,

    // Paragraphs
    ParagraphRegular,
    ParagraphAsListItemWithTripleHyphen,
    ListWithTripleHyphen,

    // Inline content
    Word,
    PunctuationSign,
    Whitespace,
    LineBreak,
    UrlLiteral,
    Url,
    BlockInsideDoubleQuotes,
    BlockInsideSquareBrackets,
    InlineLiteral,
    LiteralBlock,

    // Embedded lists
    EmbeddedListItemWithHyphen,
    EmbeddedListItemNumbered,
    EmbeddedListWithHyphen,
    EmbeddedListWithNumberSign,
    EmbeddedListItem,

    // Tags
    Tag,
    ExplicitTag,
    ImplicitTag,

    // Identifiers
    AbsoluteIdentifier,
    RelativeIdentifier,
    ExplicitIdentifier,
    ImplicitIdentifier,
}

impl NodeKind {
    pub const ALL: [NodeKind; 31] = [
        NodeKind::Opus,
        NodeKind::Novella,
        NodeKind::LevelIntroducer,
        NodeKind::LevelIntroducerIndent,
        NodeKind::LevelTitle,
        NodeKind::Level,
        NodeKind::ParagraphRegular,
        NodeKind::ParagraphAsListItemWithTripleHyphen,
        NodeKind::ListWithTripleHyphen,
        NodeKind::Word,
        NodeKind::PunctuationSign,
        NodeKind::Whitespace,
        NodeKind::LineBreak,
        NodeKind::UrlLiteral,
        NodeKind::Url,
        NodeKind::BlockInsideDoubleQuotes,
        NodeKind::BlockInsideSquareBrackets,
        NodeKind::InlineLiteral,
        NodeKind::LiteralBlock,
        NodeKind::EmbeddedListItemWithHyphen,
        NodeKind::EmbeddedListItemNumbered,
        NodeKind::EmbeddedListWithHyphen,
        NodeKind::EmbeddedListWithNumberSign,
        NodeKind::EmbeddedListItem,
        NodeKind::Tag,
        NodeKind::ExplicitTag,
        NodeKind::ImplicitTag,
        NodeKind::AbsoluteIdentifier,
        NodeKind::RelativeIdentifier,
        NodeKind::ExplicitIdentifier,
        NodeKind::ImplicitIdentifier,
    ];

    pub fn tag_behavior(self) -> TagBehavior {
        match self {
            NodeKind::Opus | NodeKind::Novella | NodeKind::ListWithTripleHyphen => {
                TagBehavior::Traversable
            }
            NodeKind::Level => TagBehavior::Scope,
            NodeKind::ParagraphRegular | NodeKind::ParagraphAsListItemWithTripleHyphen => {
                TagBehavior::Terminal
            }
            NodeKind::LevelIntroducer
            | NodeKind::LevelIntroducerIndent
            | NodeKind::LevelTitle
            | NodeKind::Word
            | NodeKind::PunctuationSign
            | NodeKind::Whitespace
            | NodeKind::LineBreak
            | NodeKind::UrlLiteral
            | NodeKind::Url
            | NodeKind::BlockInsideDoubleQuotes
            | NodeKind::BlockInsideSquareBrackets
            | NodeKind::InlineLiteral
            | NodeKind::LiteralBlock
            | NodeKind::EmbeddedListItemWithHyphen
            | NodeKind::EmbeddedListItemNumbered
            | NodeKind::EmbeddedListWithHyphen
            | NodeKind::EmbeddedListWithNumberSign
            | NodeKind::EmbeddedListItem
            | NodeKind::Tag
            | NodeKind::ExplicitTag
            | NodeKind::ImplicitTag
            | NodeKind::AbsoluteIdentifier
            | NodeKind::RelativeIdentifier
            | NodeKind::ExplicitIdentifier
            | NodeKind::ImplicitIdentifier => TagBehavior::NonTraversable,
        }
    }

    /// Kinds that may carry a fragment identifier or a tag.
    pub fn is_identifier_bearing(self) -> bool {
        self.tag_behavior() != TagBehavior::NonTraversable
    }

    pub fn is_separator(self) -> bool {
        matches!(self, NodeKind::Whitespace | NodeKind::LineBreak)
    }

    pub fn name(self) -> &'static str {
        match self {
            NodeKind::Opus => "opus",
            NodeKind::Novella => "novella",
            NodeKind::LevelIntroducer => "level-introducer",
            NodeKind::LevelIntroducerIndent => "level-introducer-indent",
            NodeKind::LevelTitle => "level-title",
            NodeKind::Level => "level",
            NodeKind::ParagraphRegular => "paragraph-regular",
            NodeKind::ParagraphAsListItemWithTripleHyphen => {
                "paragraph-as-list-item-with-triple-hyphen"
            }
            NodeKind::ListWithTripleHyphen => "list-with-triple-hyphen",
            NodeKind::Word => "word",
            NodeKind::PunctuationSign => "punctuation-sign",
            NodeKind::Whitespace => "whitespace",
            NodeKind::LineBreak => "line-break",
            NodeKind::UrlLiteral => "url-literal",
            NodeKind::Url => "url",
            NodeKind::BlockInsideDoubleQuotes => "block-inside-double-quotes",
            NodeKind::BlockInsideSquareBrackets => "block-inside-square-brackets",
            NodeKind::InlineLiteral => "inline-literal",
            NodeKind::LiteralBlock => "literal-block",
            NodeKind::EmbeddedListItemWithHyphen => "embedded-list-item-with-hyphen",
            NodeKind::EmbeddedListItemNumbered => "embedded-list-item-numbered",
            NodeKind::EmbeddedListWithHyphen => "embedded-list-with-hyphen",
            NodeKind::EmbeddedListWithNumberSign => "embedded-list-with-number-sign",
            NodeKind::EmbeddedListItem => "embedded-list-item",
            NodeKind::Tag => "tag",
            NodeKind::ExplicitTag => "explicit-tag",
            NodeKind::ImplicitTag => "implicit-tag",
            NodeKind::AbsoluteIdentifier => "absolute-identifier",
            NodeKind::RelativeIdentifier => "relative-identifier",
            NodeKind::ExplicitIdentifier => "explicit-identifier",
            NodeKind::ImplicitIdentifier => "implicit-identifier",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_behavior_table() {
        assert_eq!(NodeKind::Level.tag_behavior(), TagBehavior::Scope);
        assert_eq!(NodeKind::Novella.tag_behavior(), TagBehavior::Traversable);
        assert_eq!(
            NodeKind::ListWithTripleHyphen.tag_behavior(),
            TagBehavior::Traversable
        );
        assert_eq!(
            NodeKind::ParagraphRegular.tag_behavior(),
            TagBehavior::Terminal
        );
        assert_eq!(
            NodeKind::LiteralBlock.tag_behavior(),
            TagBehavior::NonTraversable
        );
        assert_eq!(
            NodeKind::EmbeddedListWithHyphen.tag_behavior(),
            TagBehavior::NonTraversable
        );
    }

    #[test]
    fn test_identifier_bearing_kinds() {
        let bearing: Vec<_> = NodeKind::ALL
            .iter()
            .copied()
            .filter(|kind| kind.is_identifier_bearing())
            .collect();
        assert!(bearing.contains(&NodeKind::Level));
        assert!(bearing.contains(&NodeKind::ParagraphRegular));
        assert!(!bearing.contains(&NodeKind::LevelTitle));
    }

    #[test]
    fn test_names_are_unique_and_match_serde() {
        let names: HashSet<_> = NodeKind::ALL.iter().map(|kind| kind.name()).collect();
        assert_eq!(names.len(), NodeKind::ALL.len());
        for kind in NodeKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.name()));
        }
    }
}
