//! Flat tree producer
//!
//!     Turns source text into the flat tree the mangling passes expect. The producer knows
//!     about blocks and lines, nothing more: levels are still a run of sibling introducers,
//!     embedded lists are still flat items separated by whitespace and line breaks, tags and
//!     identifiers sit wherever they were written. Inside paragraphs, text between double
//!     quotes or square brackets on one line becomes a block, so that a later pass can use it
//!     to name a URL.
//!
//!     Blocks are separated by blank lines:
//!
//!     ```text
//!     == Title +tag \\identifier          level introducer
//!
//!     Some text, with a list:             paragraph
//!      - first item
//!        - nested item
//!
//!     --- a paragraph in a list           paragraph as list item
//!
//!     <<<                                 literal block
//!     raw text
//!     >>>
//!     ```

use super::tokens::Token;
use super::tokenize;
use crate::quire::tree::{Location, NodeKind, SyntacticTree};
use std::ops::Range;
use tracing::{debug, trace};

/// Parse one document into a flat `Novella` tree.
pub fn parse_document(source: &str, file: Option<&str>) -> SyntacticTree {
    let producer = Producer::new(source, file);
    let tree = producer.novella();
    debug!(
        file = file.unwrap_or("<string>"),
        nodes = tree.size(),
        "produced flat tree"
    );
    tree
}

/// Parse several documents into an `Opus` holding one `Novella` per source.
pub fn parse_opus<'a, I>(sources: I) -> SyntacticTree
where
    I: IntoIterator<Item = (&'a str, Option<&'a str>)>,
{
    let novellas: Vec<_> = sources
        .into_iter()
        .map(|(source, file)| parse_document(source, file))
        .collect();
    SyntacticTree::new(NodeKind::Opus, novellas)
}

type Spanned = (Token, Range<usize>);

struct Line {
    tokens: Vec<Spanned>,
    /// Byte offset of the first character of the line.
    start: usize,
    /// Byte offset just past the last character, newline excluded.
    end: usize,
}

impl Line {
    fn is_blank(&self) -> bool {
        self.tokens.iter().all(|(token, _)| token.is_whitespace())
    }

    /// Tokens after any leading whitespace.
    fn content(&self) -> &[Spanned] {
        let skip = self
            .tokens
            .iter()
            .take_while(|(token, _)| token.is_whitespace())
            .count();
        &self.tokens[skip..]
    }

    fn leading_whitespace(&self) -> Option<&Spanned> {
        self.tokens.first().filter(|(token, _)| token.is_whitespace())
    }
}

struct Producer<'a> {
    source: &'a str,
    file: Option<&'a str>,
    line_starts: Vec<usize>,
    lines: Vec<Line>,
}

impl<'a> Producer<'a> {
    fn new(source: &'a str, file: Option<&'a str>) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(source.match_indices('\n').map(|(offset, _)| offset + 1));

        let mut lines = Vec::new();
        let mut current = Line {
            tokens: Vec::new(),
            start: 0,
            end: 0,
        };
        for (token, span) in tokenize(source) {
            if token == Token::Newline {
                current.end = span.start;
                let next_start = span.end;
                lines.push(std::mem::replace(
                    &mut current,
                    Line {
                        tokens: Vec::new(),
                        start: next_start,
                        end: next_start,
                    },
                ));
            } else {
                current.end = span.end;
                current.tokens.push((token, span));
            }
        }
        if !current.tokens.is_empty() {
            lines.push(current);
        }

        Producer {
            source,
            file,
            line_starts,
            lines,
        }
    }

    fn location(&self, offset: usize) -> Location {
        let line_index = match self.line_starts.binary_search(&offset) {
            Ok(index) => index,
            Err(index) => index - 1,
        };
        let line_start = self.line_starts[line_index];
        let column = self.source[line_start..offset].chars().count() + 1;
        Location {
            file: self.file.map(str::to_string),
            line: line_index + 1,
            column,
        }
    }

    fn text(&self, span: &Range<usize>) -> &'a str {
        &self.source[span.clone()]
    }

    fn novella(&self) -> SyntacticTree {
        let mut blocks = Vec::new();
        let mut index = 0;
        while index < self.lines.len() {
            let line = &self.lines[index];
            if line.is_blank() {
                index += 1;
                continue;
            }
            if self.is_delimiter(line, Token::LeftAngles) {
                let (block, next) = self.literal_block(index);
                blocks.push(block);
                index = next;
                continue;
            }
            let mut end = index;
            while end < self.lines.len()
                && !self.lines[end].is_blank()
                && (end == index || !self.is_delimiter(&self.lines[end], Token::LeftAngles))
            {
                end += 1;
            }
            blocks.push(self.block(&self.lines[index..end]));
            index = end;
        }
        SyntacticTree::build(
            NodeKind::Novella,
            None,
            Some(self.location(0)),
            blocks,
        )
    }

    /// A line holding nothing but `<<<` or `>>>`.
    fn is_delimiter(&self, line: &Line, kind: Token) -> bool {
        matches!(line.content(), [(token, span)] if *token == kind && span.len() == 3)
    }

    fn literal_block(&self, opening: usize) -> (SyntacticTree, usize) {
        let location = self.location(self.lines[opening].start);
        let mut closing = opening + 1;
        while closing < self.lines.len() && !self.is_delimiter(&self.lines[closing], Token::RightAngles)
        {
            closing += 1;
        }
        let raw = self.lines[opening + 1..closing]
            .iter()
            .map(|line| &self.source[line.start..line.end])
            .collect::<Vec<_>>()
            .join("\n");
        trace!(lines = closing - opening - 1, "literal block");
        let block = SyntacticTree::build(NodeKind::LiteralBlock, Some(raw), Some(location), vec![]);
        (block, closing + 1)
    }

    fn block(&self, lines: &[Line]) -> SyntacticTree {
        let first = &lines[0];
        match first.content() {
            [(Token::Equals, span), ..] if span.len() >= 2 => self.level_introducer(lines),
            [(Token::Hyphens, span), (Token::Whitespace, _), ..] if span.len() == 3 => {
                self.paragraph(NodeKind::ParagraphAsListItemWithTripleHyphen, lines, 2)
            }
            _ => self.paragraph(NodeKind::ParagraphRegular, lines, 0),
        }
    }

    fn level_introducer(&self, lines: &[Line]) -> SyntacticTree {
        let content = lines[0].content();
        let (_, marker_span) = &content[0];
        let location = self.location(marker_span.start);
        let mut children = vec![SyntacticTree::build(
            NodeKind::LevelIntroducerIndent,
            Some(self.text(marker_span).to_string()),
            Some(location.clone()),
            vec![],
        )];

        let mut title = Vec::new();
        let mut annotations = Vec::new();
        for (line_index, line) in lines.iter().enumerate() {
            let tokens = if line_index == 0 {
                &content[1..]
            } else {
                title.push(SyntacticTree::leaf(NodeKind::Whitespace, " "));
                line.tokens.as_slice()
            };
            for spanned in tokens {
                let node = self.inline(spanned);
                match node.kind() {
                    NodeKind::Tag | NodeKind::AbsoluteIdentifier | NodeKind::RelativeIdentifier => {
                        annotations.push(node)
                    }
                    _ => title.push(node),
                }
            }
        }

        let title = trim_whitespace(title);
        if !title.is_empty() {
            let title_location = title[0].location().cloned();
            children.push(SyntacticTree::build(
                NodeKind::LevelTitle,
                None,
                title_location,
                title,
            ));
        }
        children.extend(annotations);
        SyntacticTree::build(NodeKind::LevelIntroducer, None, Some(location), children)
    }

    /// `skip` tokens of the first line's content are markers, not text.
    fn paragraph(&self, kind: NodeKind, lines: &[Line], skip: usize) -> SyntacticTree {
        let location = self.location(lines[0].content()[0].1.start);
        let mut children = Vec::new();
        for (line_index, line) in lines.iter().enumerate() {
            if line_index > 0 {
                let previous = &lines[line_index - 1];
                children.push(SyntacticTree::build(
                    NodeKind::LineBreak,
                    None,
                    Some(self.location(previous.end)),
                    vec![],
                ));
            }
            let content = if line_index == 0 {
                &line.content()[skip..]
            } else {
                line.content()
            };
            if let Some((_, span)) = line.leading_whitespace() {
                if line_index > 0 || skip == 0 {
                    children.push(self.node(NodeKind::Whitespace, span, self.text(span)));
                }
            }
            match content {
                [(marker, span), (Token::Whitespace, _), rest @ ..]
                    if (*marker == Token::Hyphens && span.len() == 1) || *marker == Token::Hash =>
                {
                    let kind = if *marker == Token::Hash {
                        NodeKind::EmbeddedListItemNumbered
                    } else {
                        NodeKind::EmbeddedListItemWithHyphen
                    };
                    let items = group_blocks(&trim_whitespace(
                        rest.iter().map(|s| self.inline(s)).collect(),
                    ));
                    children.push(SyntacticTree::build(
                        kind,
                        None,
                        Some(self.location(span.start)),
                        items,
                    ));
                }
                _ => children.extend(group_blocks(&trim_whitespace(
                    content.iter().map(|s| self.inline(s)).collect(),
                ))),
            }
        }
        SyntacticTree::build(kind, None, Some(location), children)
    }

    fn node(&self, kind: NodeKind, span: &Range<usize>, text: &str) -> SyntacticTree {
        SyntacticTree::build(
            kind,
            Some(text.to_string()),
            Some(self.location(span.start)),
            vec![],
        )
    }

    fn inline(&self, (token, span): &Spanned) -> SyntacticTree {
        let text = self.text(span);
        match token {
            Token::Word => self.node(NodeKind::Word, span, text),
            Token::Whitespace => self.node(NodeKind::Whitespace, span, text),
            Token::Url => self.node(NodeKind::UrlLiteral, span, text),
            Token::Tag => self.node(NodeKind::Tag, span, &text[1..]),
            Token::AbsoluteIdentifier => self.node(NodeKind::AbsoluteIdentifier, span, &text[2..]),
            Token::RelativeIdentifier => self.node(NodeKind::RelativeIdentifier, span, &text[1..]),
            Token::InlineLiteral => {
                self.node(NodeKind::InlineLiteral, span, &text[1..text.len() - 1])
            }
            Token::Punctuation
            | Token::Equals
            | Token::Hyphens
            | Token::Hash
            | Token::LeftAngles
            | Token::RightAngles
            | Token::Newline => self.node(NodeKind::PunctuationSign, span, text),
        }
    }
}

/// Block kind and closing delimiter opened by `node`, if it is an opening delimiter.
fn block_opened_by(node: &SyntacticTree) -> Option<(NodeKind, &'static str)> {
    if !node.is(NodeKind::PunctuationSign) {
        return None;
    }
    match node.text() {
        Some("\"") => Some((NodeKind::BlockInsideDoubleQuotes, "\"")),
        Some("[") => Some((NodeKind::BlockInsideSquareBrackets, "]")),
        _ => None,
    }
}

/// Wrap delimited runs of inline nodes into blocks. An opening delimiter with no closing one
/// after it stays punctuation.
fn group_blocks(nodes: &[SyntacticTree]) -> Vec<SyntacticTree> {
    let mut grouped = Vec::with_capacity(nodes.len());
    let mut index = 0;
    while index < nodes.len() {
        let node = &nodes[index];
        let block = block_opened_by(node).and_then(|(kind, closing)| {
            nodes[index + 1..]
                .iter()
                .position(|candidate| {
                    candidate.is(NodeKind::PunctuationSign) && candidate.text() == Some(closing)
                })
                .map(|offset| (kind, index + 1 + offset))
        });
        match block {
            Some((kind, end)) => {
                grouped.push(SyntacticTree::build(
                    kind,
                    None,
                    node.location().cloned(),
                    group_blocks(&nodes[index + 1..end]),
                ));
                index = end + 1;
            }
            None => {
                grouped.push(node.clone());
                index += 1;
            }
        }
    }
    grouped
}

/// Drop whitespace at both ends of a run of inline nodes.
fn trim_whitespace(mut nodes: Vec<SyntacticTree>) -> Vec<SyntacticTree> {
    while nodes.last().is_some_and(|node| node.is(NodeKind::Whitespace)) {
        nodes.pop();
    }
    let leading = nodes
        .iter()
        .take_while(|node| node.is(NodeKind::Whitespace))
        .count();
    nodes.split_off(leading)
}
