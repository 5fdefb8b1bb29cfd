//! Common test utilities for semantic analysis tests

use move_ide_diagnostics::{build_diagnostic_message, DiagnosticCollection};
use move_ide_parser::{parse, Db as ParserDb, NodeId, SyntaxKind, SyntaxTree, Upcast};
use move_ide_semantic::{analyze, AnalyzerConfig, SemanticDb};

// ===== Test Database Setup =====

#[salsa::db]
#[derive(Clone, Default)]
pub struct TestDb {
    storage: salsa::Storage<Self>,
}

#[salsa::db]
impl salsa::Database for TestDb {}
#[salsa::db]
impl ParserDb for TestDb {}
#[salsa::db]
impl SemanticDb for TestDb {}

impl Upcast<dyn ParserDb> for TestDb {
    fn upcast(&self) -> &(dyn ParserDb + 'static) {
        self
    }
    fn upcast_mut(&mut self) -> &mut (dyn ParserDb + 'static) {
        self
    }
}

pub fn test_db() -> TestDb {
    TestDb::default()
}

// ===== Code Generation Helpers =====

/// Wraps statements in a function of a module
pub fn in_function(code: &str) -> String {
    format!("module 0x1::test {{ fun test() {{ {code} }} }}")
}

/// Wraps items in a module
pub fn in_module(code: &str) -> String {
    format!("module 0x1::test {{ {code} }}")
}

// ===== Tree Helpers =====

/// Parses `code`, which must be free of syntax errors
#[track_caller]
pub fn parse_ok(code: &str) -> SyntaxTree {
    let parsed = parse(code);
    if !parsed.diagnostics.is_empty() {
        let messages: Vec<_> = parsed
            .diagnostics
            .iter()
            .map(|d| build_diagnostic_message(code, d, false))
            .collect();
        panic!("Test code has syntax errors:\n{}", messages.join("\n"));
    }
    parsed.tree
}

pub fn nodes_of_kind(tree: &SyntaxTree, kind: SyntaxKind) -> Vec<NodeId> {
    tree.descendants(tree.root())
        .filter(|&node| tree.kind(node) == kind)
        .collect()
}

/// The `n`th leaf whose text is `text`
#[track_caller]
pub fn nth_token(tree: &SyntaxTree, text: &str, n: usize) -> NodeId {
    tree.tokens()
        .filter(|&token| tree.text(token) == text)
        .nth(n)
        .unwrap_or_else(|| panic!("no occurrence #{n} of '{text}'"))
}

/// The last expression node whose source text is exactly `text`
#[track_caller]
pub fn expr_with_text(tree: &SyntaxTree, text: &str) -> NodeId {
    tree.descendants(tree.root())
        .filter(|&node| tree.kind(node).is_expr() && tree.text(node) == text)
        .last()
        .unwrap_or_else(|| panic!("no expression '{text}'"))
}

// ===== Diagnostic Helpers =====

pub fn analyze_code(code: &str) -> DiagnosticCollection {
    analyze(&parse_ok(code), &AnalyzerConfig::default())
}

fn render(code: &str, diagnostics: &DiagnosticCollection) -> String {
    diagnostics
        .iter()
        .map(|d| build_diagnostic_message(code, d, false))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Asserts that `code` analyzes without errors or warnings. Use the
/// `assert_semantic_ok!` macro instead.
#[track_caller]
pub fn assert_semantic_ok_impl(code: &str, test_name: &str) {
    let diagnostics = analyze_code(code);
    if !diagnostics.is_empty() {
        panic!(
            "{test_name}: expected no diagnostics, got:\n{}",
            render(code, &diagnostics)
        );
    }
}

/// Asserts that `code` produces at least one diagnostic and returns them
/// all. Use the `assert_semantic_err!` macro instead.
#[track_caller]
pub fn assert_semantic_err_impl(code: &str, test_name: &str) -> DiagnosticCollection {
    let diagnostics = analyze_code(code);
    if diagnostics.is_empty() {
        panic!("{test_name}: expected diagnostics, but the code analyzed cleanly:\n{code}");
    }
    diagnostics
}
