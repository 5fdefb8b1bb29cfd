use crate::parser::parse;
use crate::tree::SyntaxTree;
use move_ide_diagnostics::Diagnostic;

#[salsa::db]
#[derive(Clone, Default)]
pub struct ParserDatabaseImpl {
    storage: salsa::Storage<Self>,
}

#[salsa::db]
impl salsa::Database for ParserDatabaseImpl {}

// Most basic database that gives access to the syntax tree.
#[salsa::db]
pub trait Db: salsa::Database {}

/// Trait for upcasting a reference to a base trait object.
pub trait Upcast<T: ?Sized> {
    fn upcast(&self) -> &T;
    fn upcast_mut(&mut self) -> &mut T;
}

#[salsa::db]
impl Db for ParserDatabaseImpl {}

#[salsa::input(debug)]
pub struct SourceFile {
    #[returns(ref)]
    pub text: String,
    #[returns(ref)]
    pub file_path: String,
}

/// Syntax tree and syntax diagnostics of one source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedFile {
    pub tree: SyntaxTree,
    pub diagnostics: Vec<Diagnostic>,
}

/// Parse a source file. Re-runs only when the file text changes.
#[salsa::tracked(returns(ref), no_eq)]
pub fn parse_file(db: &dyn Db, file: SourceFile) -> ParsedFile {
    let _span = tracing::trace_span!("parse_file", path = %file.file_path(db)).entered();
    let parse = parse(file.text(db));
    ParsedFile {
        tree: parse.tree,
        diagnostics: parse.diagnostics,
    }
}
