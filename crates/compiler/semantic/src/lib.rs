//! # Move Semantic Analysis
//!
//! Type inference, semantic validation and name resolution over the syntax
//! trees produced by `move-ide-parser`.
//!
//! ## Architecture
//!
//! Everything here is a pure function of one [`SyntaxTree`](move_ide_parser::SyntaxTree):
//! 1. **Types**: [`MoveType`], [`parse_type`] for annotations and
//!    [`infer_type`] for expressions, with an optional [`TypeCache`]
//! 2. **Validation**: the [`Analyzer`] dispatches every node to the
//!    validators registered for its kind and collects their diagnostics
//! 3. **Resolution**: [`resolve`] maps identifiers to declarations and
//!    [`find_usages`] maps declarations back to identifiers
//!
//! ## Main Query
//!
//! [`validate_file`] combines the syntax and semantic diagnostics of a
//! source file, cached by Salsa until the file text changes.

pub mod analyzer;
pub mod builtins;
pub mod cache;
pub mod db;
pub mod infer;
pub mod resolve;
pub mod type_parser;
pub mod types;
pub mod validation;

pub use analyzer::{analyze, check_node, AnalysisContext, Analyzer, AnalyzerConfig};
pub use builtins::{is_builtin_function_name, BuiltinFn};
pub use cache::TypeCache;
pub use db::{validate_file, SemanticDatabaseImpl, SemanticDb};
pub use infer::{infer_type, infer_type_with, InferenceContext};
pub use resolve::{declaration_at, find_usages, resolve, Declaration, DeclarationKind};
pub use type_parser::parse_type;
pub use types::{is_assignable, MoveType};
