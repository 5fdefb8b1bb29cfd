use crate::common::in_module;
use move_ide_diagnostics::DiagnosticCode;

#[test]
fn test_assignment_type_mismatch() {
    let code = in_module("fun test() { let x: u64 = 0; x = true; }");
    let diagnostics = assert_semantic_err!(&code);
    assert_eq!(diagnostics.len(), 1);
    let diagnostic = &diagnostics.all()[0];
    assert_eq!(diagnostic.code, DiagnosticCode::InvalidAssignment);
    assert_eq!(&code[diagnostic.span.into_range()], "x = true");
}

#[test]
fn test_compatible_assignments() {
    assert_semantic_ok!(&in_module(
        "fun test(r: &mut u64, out: &mut vector<u8>) {
             let x: u64 = 0;
             x = 10;
             x = x + 1;
             *r = x;
             *out = b\"bytes\";
             x = *r;
         }"
    ));
}

#[test]
fn test_reference_mutability() {
    let code = in_module(
        "fun test(m: &mut u64, i: &u64) {
             let target: &u64 = i;
             target = m;
             let strict: &mut u64 = m;
             strict = i;
         }",
    );
    let diagnostics = assert_semantic_err!(&code);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(
        &code[diagnostics.all()[0].span.into_range()],
        "strict = i"
    );
}

#[test]
fn test_let_initializers_are_not_checked() {
    assert_semantic_ok!(&in_module("fun test() { let x: u64 = true; }"));
}

#[test]
fn test_unannotated_integer_binding_is_u64() {
    let code = in_module("fun test() { let y = 1; y = 2u8; }");
    let diagnostics = assert_semantic_err!(&code);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(
        diagnostics.all()[0].message,
        "Cannot assign value of type 'u8' to 'u64'"
    );
    assert_semantic_ok!(&in_module("fun test() { let y = 1; y = 2u64; y = 3; }"));
}
