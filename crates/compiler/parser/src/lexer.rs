//! # Move Lexer
//!
//! Converts source text into a lazy stream of classified tokens. Unlike a
//! compiler lexer, whitespace and comments are kept as tokens so that the
//! token spans tile the input exactly; formatting-aware editor features and
//! the concrete syntax tree depend on that.
//!
//! Anything the token table does not recognize becomes a
//! [`TokenKind::BadCharacter`] token. Lexing never fails.

use chumsky::span::SimpleSpan;
use logos::Logos;
use std::fmt;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TokenKind {
    // Trivia
    #[regex(r"[ \t\r\n\f]+")]
    Whitespace,
    #[regex(r"//[^\n]*")]
    LineComment,
    #[token("/*", lex_block_comment)]
    BlockComment,

    // Literals
    #[regex(r"[0-9][0-9_]*(u8|u16|u32|u64|u128|u256)?")]
    IntegerLiteral,
    #[regex(r"0x[0-9a-fA-F][0-9a-fA-F_]*(u8|u16|u32|u64|u128|u256)?")]
    HexLiteral,
    #[regex(r"@0x[0-9a-fA-F][0-9a-fA-F_]*|@[0-9][0-9_]*|@[a-zA-Z_][a-zA-Z0-9_]*")]
    AddressLiteral,
    #[regex(r#"b"([^"\\]|\\.)*""#)]
    ByteStringLiteral,
    #[regex(r#"x"[0-9a-fA-F]*""#)]
    HexStringLiteral,

    // Keywords
    #[token("abort")]
    Abort,
    #[token("acquires")]
    Acquires,
    #[token("as")]
    As,
    #[token("break")]
    Break,
    #[token("const")]
    Const,
    #[token("continue")]
    Continue,
    #[token("copy")]
    Copy,
    #[token("else")]
    Else,
    #[token("entry")]
    Entry,
    #[token("false")]
    False,
    #[token("friend")]
    Friend,
    #[token("fun")]
    Fun,
    #[token("has")]
    Has,
    #[token("if")]
    If,
    #[token("inline")]
    Inline,
    #[token("let")]
    Let,
    #[token("loop")]
    Loop,
    #[token("module")]
    Module,
    #[token("move")]
    Move,
    #[token("mut")]
    Mut,
    #[token("native")]
    Native,
    #[token("phantom")]
    Phantom,
    #[token("public")]
    Public,
    #[token("return")]
    Return,
    #[token("script")]
    Script,
    #[token("spec")]
    Spec,
    #[token("struct")]
    Struct,
    #[token("true")]
    True,
    #[token("use")]
    Use,
    #[token("while")]
    While,

    // Primitive type names
    #[token("u8")]
    U8,
    #[token("u16")]
    U16,
    #[token("u32")]
    U32,
    #[token("u64")]
    U64,
    #[token("u128")]
    U128,
    #[token("u256")]
    U256,
    #[token("bool")]
    Bool,
    #[token("address")]
    Address,
    #[token("signer")]
    Signer,
    #[token("vector")]
    Vector,

    // Identifiers (keywords above win on exact matches)
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Identifier,

    // Operators
    #[token("==>")]
    EqEqGreater,
    #[token("==")]
    EqEq,
    #[token("!=")]
    Neq,
    #[token("<=")]
    LessEq,
    #[token(">=")]
    GreaterEq,
    #[token("<<")]
    Shl,
    #[token(">>")]
    Shr,
    #[token("&&")]
    AmpAmp,
    #[token("||")]
    PipePipe,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("<")]
    Less,
    #[token(">")]
    Greater,
    #[token("&")]
    Amp,
    #[token("|")]
    Pipe,
    #[token("^")]
    Caret,
    #[token("!")]
    Bang,
    #[token("=")]
    Eq,

    // Punctuation
    #[token("::")]
    ColonColon,
    #[token(":")]
    Colon,
    #[token(";")]
    Semicolon,
    #[token(",")]
    Comma,
    #[token("..")]
    DotDot,
    #[token(".")]
    Dot,
    #[token("->")]
    Arrow,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBrack,
    #[token("]")]
    RBrack,
    #[token("#")]
    Hash,
    #[token("@")]
    At,

    /// Input the token table does not recognize
    BadCharacter,
}

/// Consume the body of a block comment up to and including `*/`.
///
/// An unterminated comment runs to the end of the input.
fn lex_block_comment(lex: &mut logos::Lexer<'_, TokenKind>) {
    let remainder = lex.remainder();
    match remainder.find("*/") {
        Some(end) => lex.bump(end + 2),
        None => lex.bump(remainder.len()),
    }
}

impl TokenKind {
    /// Whitespace and comments
    pub const fn is_trivia(self) -> bool {
        matches!(
            self,
            Self::Whitespace | Self::LineComment | Self::BlockComment
        )
    }

    pub const fn is_comment(self) -> bool {
        matches!(self, Self::LineComment | Self::BlockComment)
    }

    pub const fn is_literal(self) -> bool {
        matches!(
            self,
            Self::IntegerLiteral
                | Self::HexLiteral
                | Self::AddressLiteral
                | Self::ByteStringLiteral
                | Self::HexStringLiteral
                | Self::True
                | Self::False
        )
    }

    pub const fn is_primitive_type(self) -> bool {
        matches!(
            self,
            Self::U8
                | Self::U16
                | Self::U32
                | Self::U64
                | Self::U128
                | Self::U256
                | Self::Bool
                | Self::Address
                | Self::Signer
                | Self::Vector
        )
    }

    pub const fn is_keyword(self) -> bool {
        matches!(
            self,
            Self::Abort
                | Self::Acquires
                | Self::As
                | Self::Break
                | Self::Const
                | Self::Continue
                | Self::Copy
                | Self::Else
                | Self::Entry
                | Self::False
                | Self::Friend
                | Self::Fun
                | Self::Has
                | Self::If
                | Self::Inline
                | Self::Let
                | Self::Loop
                | Self::Module
                | Self::Move
                | Self::Mut
                | Self::Native
                | Self::Phantom
                | Self::Public
                | Self::Return
                | Self::Script
                | Self::Spec
                | Self::Struct
                | Self::True
                | Self::Use
                | Self::While
        )
    }

    /// Tokens that may stand where a name is expected.
    ///
    /// Several Move keywords are contextual (`entry`, `has`, `friend`, ...)
    /// and primitive type names are ordinary identifiers in module paths
    /// (`std::vector`), so name positions accept them.
    pub const fn is_name_like(self) -> bool {
        matches!(
            self,
            Self::Identifier
                | Self::Entry
                | Self::Has
                | Self::Friend
                | Self::Inline
                | Self::Phantom
                | Self::Script
                | Self::Spec
        ) || self.is_primitive_type()
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use TokenKind::*;
        let s = match self {
            Whitespace => "<whitespace>",
            LineComment | BlockComment => "<comment>",
            IntegerLiteral => "<integer>",
            HexLiteral => "<hex integer>",
            AddressLiteral => "<address>",
            ByteStringLiteral => "<byte string>",
            HexStringLiteral => "<hex string>",
            Abort => "abort",
            Acquires => "acquires",
            As => "as",
            Break => "break",
            Const => "const",
            Continue => "continue",
            Copy => "copy",
            Else => "else",
            Entry => "entry",
            False => "false",
            Friend => "friend",
            Fun => "fun",
            Has => "has",
            If => "if",
            Inline => "inline",
            Let => "let",
            Loop => "loop",
            Module => "module",
            Move => "move",
            Mut => "mut",
            Native => "native",
            Phantom => "phantom",
            Public => "public",
            Return => "return",
            Script => "script",
            Spec => "spec",
            Struct => "struct",
            True => "true",
            Use => "use",
            While => "while",
            U8 => "u8",
            U16 => "u16",
            U32 => "u32",
            U64 => "u64",
            U128 => "u128",
            U256 => "u256",
            Bool => "bool",
            Address => "address",
            Signer => "signer",
            Vector => "vector",
            Identifier => "<identifier>",
            EqEqGreater => "==>",
            EqEq => "==",
            Neq => "!=",
            LessEq => "<=",
            GreaterEq => ">=",
            Shl => "<<",
            Shr => ">>",
            AmpAmp => "&&",
            PipePipe => "||",
            Plus => "+",
            Minus => "-",
            Star => "*",
            Slash => "/",
            Percent => "%",
            Less => "<",
            Greater => ">",
            Amp => "&",
            Pipe => "|",
            Caret => "^",
            Bang => "!",
            Eq => "=",
            ColonColon => "::",
            Colon => ":",
            Semicolon => ";",
            Comma => ",",
            DotDot => "..",
            Dot => ".",
            Arrow => "->",
            LParen => "(",
            RParen => ")",
            LBrace => "{",
            RBrace => "}",
            LBrack => "[",
            RBrack => "]",
            Hash => "#",
            At => "@",
            BadCharacter => "<bad character>",
        };
        f.write_str(s)
    }
}

/// A classified slice of the source text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'src> {
    pub kind: TokenKind,
    pub span: SimpleSpan<usize>,
    pub text: &'src str,
}

/// Lazy token stream over a source text.
///
/// Created by [`lex`]; lexing again from offset 0 is just another call to
/// [`lex`].
pub struct Lexer<'src> {
    source: &'src str,
    inner: logos::Lexer<'src, TokenKind>,
}

/// Lex `source` into a lazy sequence of tokens whose spans tile the input
pub fn lex(source: &str) -> Lexer<'_> {
    Lexer {
        source,
        inner: TokenKind::lexer(source),
    }
}

impl<'src> Iterator for Lexer<'src> {
    type Item = Token<'src>;

    fn next(&mut self) -> Option<Self::Item> {
        let result = self.inner.next()?;
        let range = self.inner.span();
        let kind = result.unwrap_or(TokenKind::BadCharacter);
        let text = self.source.get(range.clone()).unwrap_or_default();
        Some(Token {
            kind,
            span: SimpleSpan::from(range),
            text,
        })
    }
}

/// Collect every token of `source` as `(kind, span)` pairs
pub fn tokenize(source: &str) -> Vec<(TokenKind, SimpleSpan<usize>)> {
    lex(source).map(|token| (token.kind, token.span)).collect()
}
