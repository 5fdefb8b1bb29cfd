use crate::common::{in_function, in_module};
use move_ide_diagnostics::{DiagnosticCode, DiagnosticSeverity};

#[test]
fn test_unresolved_function() {
    let code = in_function("foo();");
    let diagnostics = assert_semantic_err!(&code);
    assert_eq!(diagnostics.len(), 1);
    let diagnostic = &diagnostics.all()[0];
    assert_eq!(diagnostic.code, DiagnosticCode::UnresolvedFunction);
    assert_eq!(diagnostic.severity, DiagnosticSeverity::Error);
    assert_eq!(diagnostic.message, "Unresolved function 'foo'");
    assert_eq!(&code[diagnostic.span.into_range()], "foo");
}

#[test]
fn test_builtin_arity_mismatch() {
    let code = in_function("move_to(x);");
    let diagnostics = assert_semantic_err!(&code);
    assert_eq!(diagnostics.len(), 1);
    let diagnostic = &diagnostics.all()[0];
    assert_eq!(diagnostic.code, DiagnosticCode::ArityMismatch);
    assert_eq!(&code[diagnostic.span.into_range()], "move_to(x)");
}

#[test]
fn test_builtins_with_correct_arity() {
    assert_semantic_ok!(&in_function(
        "move_to(account, res);
         move_from<T>(addr);
         borrow_global<T>(addr);
         borrow_global_mut<T>(addr);
         exists<T>(addr);
         freeze(r);
         assert!(ok, 7);
         abort(1);"
    ));
}

#[test]
fn test_calls_to_functions_in_the_file() {
    assert_semantic_ok!(&in_module(
        "fun helper(): u64 { 1 }
         fun test() { helper(); later(); }
         fun later() {}"
    ));
    // Functions in other modules of the same file are found too
    assert_semantic_ok!(
        "module 0x1::a { public fun shared() {} }
         module 0x1::b { fun f() { shared(); } }"
    );
}

#[test]
fn test_imported_and_qualified_calls() {
    assert_semantic_ok!(&in_module(
        "use std::vector;
         use 0x1::coin::{Self, mint as make};
         use 0x1::event::emit;
         fun test() { vector::empty<u8>(); coin::burn(); make(); emit(1); }"
    ));
}

#[test]
fn test_user_functions_are_not_arity_checked() {
    assert_semantic_ok!(&in_module("fun one(a: u64) {} fun test() { one(1, 2, 3); }"));
}

#[test]
fn test_each_unresolved_call_is_reported() {
    let diagnostics = assert_semantic_err!(&in_function("a(); b(); a();"));
    let messages: Vec<_> = diagnostics.iter().map(|d| d.message.as_str()).collect();
    assert_eq!(
        messages,
        [
            "Unresolved function 'a'",
            "Unresolved function 'b'",
            "Unresolved function 'a'",
        ]
    );
}

#[test]
fn test_module_imports_are_not_callable() {
    let code = in_module(
        "use 0x1::coin;
         use 0x1::event::{Self, emit as publish};
         fun test() { coin(); event(); publish(); }",
    );
    let diagnostics = assert_semantic_err!(&code);
    let messages: Vec<_> = diagnostics.iter().map(|d| d.message.as_str()).collect();
    assert_eq!(
        messages,
        ["Unresolved function 'coin'", "Unresolved function 'event'"]
    );
}
