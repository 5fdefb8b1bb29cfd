use crate::common::test_db;
use move_ide_diagnostics::DiagnosticCode;
use move_ide_parser::SourceFile;
use move_ide_semantic::validate_file;
use salsa::Setter;

#[test]
fn test_validate_file_reports_both_layers() {
    let db = test_db();
    let file = SourceFile::new(
        &db,
        "module 0x1::m { fun f() { 1 + true; $ } }".to_string(),
        "m.move".to_string(),
    );
    let diagnostics = validate_file(&db, file);
    let codes: Vec<_> = diagnostics.iter().map(|d| d.code).collect();
    assert_eq!(
        codes,
        [DiagnosticCode::LexicalError, DiagnosticCode::NonNumericOperand]
    );
}

#[test]
fn test_validate_file_follows_edits() {
    let mut db = test_db();
    let file = SourceFile::new(
        &db,
        "module 0x1::m { fun f() { g(); } }".to_string(),
        "m.move".to_string(),
    );
    assert_eq!(validate_file(&db, file).len(), 1);

    file.set_text(&mut db)
        .to("module 0x1::m { fun f() { g(); } fun g() {} }".to_string());
    assert!(validate_file(&db, file).is_empty());
}
