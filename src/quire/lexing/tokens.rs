//! Token definitions for quire markup
//!
//! Tokens carry no payload: the producer reads their text back from the source through the
//! byte range the lexer reports. Markers that only mean something at the start of a line
//! (`==`, `-`, `---`, `#`, `<<<`) are lexed the same everywhere; the producer decides
//! what they are from their position.
use logos::Logos;

#[derive(Logos, Debug, PartialEq, Eq, Clone, Copy)]
pub enum Token {
    #[regex(r"\r?\n")]
    Newline,

    #[regex(r"[ \t]+")]
    Whitespace,

    // Line-start markers
    #[regex(r"=+")]
    Equals,
    #[regex(r"-+")]
    Hyphens,
    #[token("#")]
    Hash,
    #[regex(r"<+")]
    LeftAngles,
    #[regex(r">+")]
    RightAngles,

    // Annotations
    #[regex(r"\+[A-Za-z0-9_-]+")]
    Tag,
    #[regex(r"\\\\[A-Za-z0-9_-]+(\\[A-Za-z0-9_-]+)*")]
    AbsoluteIdentifier,
    #[regex(r"\\[A-Za-z0-9_-]+")]
    RelativeIdentifier,

    // Inline content
    #[regex(r#"https?://[^\s"\]]+"#)]
    Url,
    #[regex(r"`[^`\r\n]*`")]
    InlineLiteral,
    #[regex(r#"[.,;:?!()\[\]"']"#)]
    Punctuation,
    #[regex(r#"[^\s.,;:?!()\[\]"'`\\+#=<>-]+"#)]
    Word,
}

impl Token {
    pub fn is_whitespace(&self) -> bool {
        matches!(self, Token::Whitespace)
    }

    /// Tokens that become punctuation when they do not open a construct.
    pub fn is_marker(&self) -> bool {
        matches!(
            self,
            Token::Equals | Token::Hyphens | Token::Hash | Token::LeftAngles | Token::RightAngles
        )
    }
}
