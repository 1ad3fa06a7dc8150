//! Lexing and flat tree production
//!
//! The grammar is deliberately shallow: [tokens] holds the logos lexer, [producer] groups the
//! token stream into lines and blocks and emits the flat tree every mangling pass starts from.

pub mod producer;
pub mod tokens;

pub use producer::{parse_document, parse_opus};
pub use tokens::Token;

use logos::Logos;
use std::ops::Range;

/// Tokenize source text, pairing each token with its byte range.
///
/// Characters no token accepts (a lone `+` or backslash) come back as [Token::Word], so
/// every byte of the source belongs to exactly one token.
pub fn tokenize(source: &str) -> Vec<(Token, Range<usize>)> {
    let mut lexer = Token::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        tokens.push((result.unwrap_or(Token::Word), lexer.span()));
    }

    tokens
}
