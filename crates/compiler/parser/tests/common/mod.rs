use move_ide_diagnostics::build_diagnostic_message;
use move_ide_parser::{
    parse_file, Db as ParserDb, ParsedFile, SourceFile, SyntaxKind, SyntaxTree, Upcast,
};

#[salsa::db]
#[derive(Clone, Default)]
pub struct TestDb {
    storage: salsa::Storage<Self>,
}

#[salsa::db]
impl salsa::Database for TestDb {}
#[salsa::db]
impl ParserDb for TestDb {}

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

/// Parse `code` through the database, as the editor does
pub fn parse_via_db(code: &str) -> ParsedFile {
    let db = test_db();
    let source = SourceFile::new(&db, code.to_string(), "test.move".to_string());
    parse_file(&db, source).clone()
}

/// Asserts that the given code parses without any diagnostics and returns the
/// tree. Use the `assert_parses_ok!` macro instead.
#[track_caller]
pub fn assert_parses_ok_impl(code: &str) -> SyntaxTree {
    let parsed = parse_via_db(code);
    if !parsed.diagnostics.is_empty() {
        let diagnostics = parsed
            .diagnostics
            .iter()
            .map(|d| build_diagnostic_message(code, d, false))
            .collect::<Vec<_>>()
            .join("\n");
        panic!("Expected successful parse, but got diagnostics:\n{diagnostics}");
    }
    assert_tiles(code, &parsed.tree);
    parsed.tree
}

/// Asserts that the given code produces diagnostics and returns their
/// messages together with the tree. Use the `assert_parses_err!` macro
/// instead.
#[track_caller]
pub fn assert_parses_err_impl(code: &str) -> (SyntaxTree, Vec<String>) {
    let parsed = parse_via_db(code);
    if parsed.diagnostics.is_empty() {
        panic!("Expected parsing to fail, but it succeeded without diagnostics.");
    }
    assert_tiles(code, &parsed.tree);
    let messages = parsed
        .diagnostics
        .iter()
        .map(|d| d.message.clone())
        .collect();
    (parsed.tree, messages)
}

/// The diagnostics followed by the tree dump, for snapshots of failed parses
pub fn error_snapshot(tree: &SyntaxTree, messages: &[String]) -> String {
    format!(
        "--- Diagnostics ---\n{}\n--- Tree ---\n{}",
        messages.join("\n"),
        tree.debug_dump()
    )
}

/// `assert_parses_ok!(code)` returns the tree; `assert_parses_ok!(code, @"...")`
/// also snapshots its dump.
#[macro_export]
macro_rules! assert_parses_ok {
    ($code:expr) => {{
        $crate::common::assert_parses_ok_impl($code)
    }};
    ($code:expr, @$snapshot:tt) => {{
        let tree = $crate::common::assert_parses_ok_impl($code);
        insta::assert_snapshot!(tree.debug_dump(), @$snapshot);
        tree
    }};
}

/// Like [`assert_parses_ok!`], snapshotting the diagnostics with the tree
#[macro_export]
macro_rules! assert_parses_err {
    ($code:expr) => {{
        $crate::common::assert_parses_err_impl($code)
    }};
    ($code:expr, @$snapshot:tt) => {{
        let (tree, messages) = $crate::common::assert_parses_err_impl($code);
        insta::assert_snapshot!($crate::common::error_snapshot(&tree, &messages), @$snapshot);
        (tree, messages)
    }};
}

/// The leaves of `tree`, in order, spell out `code`
#[track_caller]
pub fn assert_tiles(code: &str, tree: &SyntaxTree) {
    let rebuilt: String = tree.tokens().map(|t| tree.text(t)).collect();
    assert_eq!(rebuilt, code, "tree leaves do not tile the input");
    let root = tree.span(tree.root());
    assert_eq!((root.start, root.end), (0, code.len()), "root must cover the input");
}

/// Every node of the given kind, in pre-order
pub fn nodes_of_kind(tree: &SyntaxTree, kind: SyntaxKind) -> Vec<move_ide_parser::NodeId> {
    tree.descendants(tree.root())
        .filter(|&node| tree.kind(node) == kind)
        .collect()
}

/// Texts of every node of the given kind, in pre-order
pub fn texts_of_kind(tree: &SyntaxTree, kind: SyntaxKind) -> Vec<String> {
    nodes_of_kind(tree, kind)
        .into_iter()
        .map(|node| tree.text(node).to_string())
        .collect()
}

/// Helper to wrap statement code inside a function, since statements are not
/// top-level.
pub fn in_function(code: &str) -> String {
    format!("module 0x1::test {{ fun test() {{ {code} }} }}")
}

/// Helper to wrap items inside a module.
pub fn in_module(code: &str) -> String {
    format!("module 0x1::test {{ {code} }}")
}
