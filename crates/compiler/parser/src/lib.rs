//! # Move IDE Parser
//!
//! Lexing, error-recovering parsing and typed navigation of Move source
//! files.
//!
//! - [`lexer`] turns text into a lossless token stream
//! - [`parser`] builds a [`SyntaxTree`] whose leaves tile the input
//! - [`ast`] offers typed, copyable views over tree nodes
//! - [`db`] exposes parsing as an incremental salsa query

pub mod ast;
mod db;
pub mod highlight;
pub mod lexer;
pub mod parser;
pub mod syntax_kind;
pub mod tree;

pub use db::{parse_file, Db, ParsedFile, ParserDatabaseImpl, SourceFile, Upcast};
pub use highlight::{highlight, HighlightClass};
pub use lexer::{lex, tokenize, Token, TokenKind};
pub use parser::{parse, Parse, MAX_DEPTH};
pub use syntax_kind::SyntaxKind;
pub use tree::{NodeData, NodeId, SyntaxTree, TreeBuilder};
