//! Token classification for syntax highlighting.

use crate::lexer::{lex, TokenKind};
use chumsky::span::SimpleSpan;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HighlightClass {
    Keyword,
    Type,
    Number,
    String,
    Comment,
    Identifier,
    Operator,
    BadCharacter,
}

impl HighlightClass {
    /// Class of a token kind; `None` for whitespace
    pub const fn of(kind: TokenKind) -> Option<Self> {
        let class = match kind {
            TokenKind::Whitespace => return None,
            TokenKind::LineComment | TokenKind::BlockComment => Self::Comment,
            TokenKind::IntegerLiteral | TokenKind::HexLiteral | TokenKind::AddressLiteral => {
                Self::Number
            }
            TokenKind::ByteStringLiteral | TokenKind::HexStringLiteral => Self::String,
            TokenKind::Identifier => Self::Identifier,
            TokenKind::BadCharacter => Self::BadCharacter,
            kind if kind.is_primitive_type() => Self::Type,
            kind if kind.is_keyword() => Self::Keyword,
            _ => Self::Operator,
        };
        Some(class)
    }
}

/// Highlight classes for every non-whitespace token of `source`
pub fn highlight(source: &str) -> Vec<(SimpleSpan<usize>, HighlightClass)> {
    lex(source)
        .filter_map(|token| HighlightClass::of(token.kind).map(|class| (token.span, class)))
        .collect()
}
