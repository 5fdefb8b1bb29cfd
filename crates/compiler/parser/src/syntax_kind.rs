//! Node kinds of the Move concrete syntax tree.

use crate::lexer::TokenKind;
use std::fmt;

/// Kind tag of a syntax tree node.
///
/// Interior nodes use the named variants; leaves wrap the kind of the token
/// they hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyntaxKind {
    /// Root of every tree
    File,
    Module,
    Script,
    /// `address 0x1 { module ... }`
    AddressBlock,
    Use,
    /// `{A, B as C}` inside a `use`
    UseGroup,
    UseMember,
    Friend,
    /// `#[test]`, `#[test_only]`, ...
    Attribute,
    Function,
    TypeParams,
    TypeParam,
    ParamList,
    Param,
    RetType,
    Acquires,
    Struct,
    Abilities,
    FieldList,
    Field,
    Const,
    /// `spec ... { ... }`, kept as an opaque token group
    SpecBlock,
    Block,

    // Types
    PathType,
    RefType,
    TupleType,
    TypeArgs,

    // Statements
    LetStmt,
    ExprStmt,

    // Expressions
    Literal,
    PathExpr,
    CallExpr,
    ArgList,
    BinaryExpr,
    UnaryExpr,
    AssignExpr,
    ParenExpr,
    TupleExpr,
    IfExpr,
    WhileExpr,
    LoopExpr,
    ReturnExpr,
    AbortExpr,
    BreakExpr,
    ContinueExpr,
    FieldExpr,
    IndexExpr,
    CastExpr,
    StructLit,
    StructLitField,
    VectorLit,

    Pattern,
    /// `0x1::coin::Coin`, `Self`, `std::vector`
    Path,
    /// Tokens the parser could not place
    Error,

    Token(TokenKind),
}

impl SyntaxKind {
    pub const fn is_token(self) -> bool {
        matches!(self, Self::Token(_))
    }

    pub const fn token_kind(self) -> Option<TokenKind> {
        match self {
            Self::Token(kind) => Some(kind),
            _ => None,
        }
    }

    pub const fn is_trivia(self) -> bool {
        match self {
            Self::Token(kind) => kind.is_trivia(),
            _ => false,
        }
    }

    /// Expression node kinds
    pub const fn is_expr(self) -> bool {
        matches!(
            self,
            Self::Literal
                | Self::PathExpr
                | Self::CallExpr
                | Self::BinaryExpr
                | Self::UnaryExpr
                | Self::AssignExpr
                | Self::ParenExpr
                | Self::TupleExpr
                | Self::IfExpr
                | Self::WhileExpr
                | Self::LoopExpr
                | Self::ReturnExpr
                | Self::AbortExpr
                | Self::BreakExpr
                | Self::ContinueExpr
                | Self::FieldExpr
                | Self::IndexExpr
                | Self::CastExpr
                | Self::StructLit
                | Self::VectorLit
                | Self::Block
        )
    }

    /// Type node kinds
    pub const fn is_type(self) -> bool {
        matches!(
            self,
            Self::PathType | Self::RefType | Self::TupleType
        )
    }
}

impl fmt::Display for SyntaxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Token(kind) => write!(f, "{kind:?}"),
            other => write!(f, "{other:?}"),
        }
    }
}
