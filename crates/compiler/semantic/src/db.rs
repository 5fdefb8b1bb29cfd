use move_ide_diagnostics::DiagnosticCollection;
use move_ide_parser::{parse_file, Db as ParserDb, SourceFile, Upcast};

use crate::analyzer::{analyze, AnalyzerConfig};

/// Database trait for semantic analysis, extending the parser database
#[salsa::db]
pub trait SemanticDb: ParserDb + Upcast<dyn ParserDb> {}

/// Concrete database implementation for semantic analysis
#[salsa::db]
#[derive(Clone, Default)]
pub struct SemanticDatabaseImpl {
    storage: salsa::Storage<Self>,
}

#[salsa::db]
impl salsa::Database for SemanticDatabaseImpl {}

#[salsa::db]
impl ParserDb for SemanticDatabaseImpl {}

#[salsa::db]
impl SemanticDb for SemanticDatabaseImpl {}

impl Upcast<dyn ParserDb> for SemanticDatabaseImpl {
    fn upcast(&self) -> &(dyn ParserDb + 'static) {
        self
    }
    fn upcast_mut(&mut self) -> &mut (dyn ParserDb + 'static) {
        self
    }
}

/// Syntax diagnostics followed by the semantic diagnostics of the default
/// analyzer configuration
#[salsa::tracked(returns(ref), no_eq)]
pub fn validate_file(db: &dyn SemanticDb, file: SourceFile) -> DiagnosticCollection {
    let _span = tracing::trace_span!("validate_file", path = %file.file_path(db)).entered();
    let parsed = parse_file(db.upcast(), file);
    let mut diagnostics = DiagnosticCollection::from(parsed.diagnostics.clone());
    diagnostics.extend(analyze(&parsed.tree, &AnalyzerConfig::default()));
    diagnostics
}
