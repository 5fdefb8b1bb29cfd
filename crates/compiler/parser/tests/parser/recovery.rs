use crate::{assert_parses_err, assert_parses_ok};
use crate::common::nodes_of_kind;
use move_ide_diagnostics::DiagnosticCode;
use move_ide_parser::ast::SourceFileView;
use move_ide_parser::{parse, SyntaxKind, MAX_DEPTH};

#[test]
fn test_later_functions_survive_a_broken_one() {
    let code = "module 0x1::m {
        fun broken( { let x = ; }
        fun ok() { 1 + 2; }
    }";
    let (tree, _) = assert_parses_err!(code);
    let functions = SourceFileView::new(&tree).modules()[0].functions();
    let names: Vec<_> = functions.iter().filter_map(|f| f.name()).collect();
    assert_eq!(names, vec!["broken", "ok"]);
}

#[test]
fn test_missing_closing_brace_of_function() {
    let code = "module 0x1::m {
        fun a() { let x = 1;
        fun b() {}
    }";
    let (tree, messages) = assert_parses_err!(code);
    assert_eq!(messages, vec!["Expected '}', found 'fun'".to_string()]);
    let functions = SourceFileView::new(&tree).modules()[0].functions();
    assert_eq!(functions.len(), 2);
    assert_eq!(functions[1].name(), Some("b"));
}

#[test]
fn test_unexpected_module_item() {
    let code = "module 0x1::m { 42 + x; fun f() {} }";
    let (tree, messages) = assert_parses_err!(code);
    assert_eq!(messages.len(), 1);
    assert_eq!(nodes_of_kind(&tree, SyntaxKind::Error).len(), 1);
    assert_eq!(SourceFileView::new(&tree).modules()[0].functions().len(), 1);
}

#[test]
fn test_garbage_statement_is_skipped() {
    let code = "module 0x1::m { fun f() { ) ] = ; let y = 2; } }";
    let (tree, messages) = assert_parses_err!(code);
    assert!(!messages.is_empty());
    assert_eq!(nodes_of_kind(&tree, SyntaxKind::LetStmt).len(), 1);
}

#[test]
fn test_unterminated_input() {
    let (tree, messages) = assert_parses_err!("module 0x1::m { fun f(x: u64");
    assert!(messages.iter().all(|m| m.ends_with("found end of file")));
    assert_eq!(SourceFileView::new(&tree).modules()[0].functions().len(), 1);
}

#[test]
fn test_bad_characters_are_lexical_errors() {
    let parse = parse("module 0x1::m { fun f() { let x = 1 € 2; } }");
    assert_eq!(parse.diagnostics[0].code, DiagnosticCode::LexicalError);
    assert!(parse.diagnostics[0].message.contains('€'));
}

#[test]
fn test_excessive_nesting_is_reported_once() {
    let depth = MAX_DEPTH * 2;
    let code = format!(
        "module 0x1::m {{ fun f() {{ {}x{} }} }}",
        "{ ".repeat(depth),
        " }".repeat(depth)
    );
    let (_, messages) = assert_parses_err!(&code);
    assert_eq!(messages.len(), 1);
    assert!(messages[0].contains("maximum depth"));
}

#[test]
fn test_missing_module_name() {
    let (_, messages) = assert_parses_err!("module {}");
    assert_eq!(messages, vec!["Expected module name, found '{'".to_string()]);
}

#[test]
fn test_unclosed_attribute_keeps_following_items() {
    let (tree, _) = assert_parses_err!("module 0x1::m { #[test fun bad() {} fun good() {} }", @r##"
    --- Diagnostics ---
    Expected ']', found 'fun'
    --- Tree ---
    File@0..51
      Module@0..51
        Module@0..6 "module"
        Whitespace@6..7 " "
        HexLiteral@7..10 "0x1"
        ColonColon@10..12 "::"
        Identifier@12..13 "m"
        Whitespace@13..14 " "
        LBrace@14..15 "{"
        Whitespace@15..16 " "
        Function@16..35
          Attribute@16..22
            Hash@16..17 "#"
            LBrack@17..18 "["
            Identifier@18..22 "test"
          Whitespace@22..23 " "
          Fun@23..26 "fun"
          Whitespace@26..27 " "
          Identifier@27..30 "bad"
          ParamList@30..32
            LParen@30..31 "("
            RParen@31..32 ")"
          Whitespace@32..33 " "
          Block@33..35
            LBrace@33..34 "{"
            RBrace@34..35 "}"
        Whitespace@35..36 " "
        Function@36..49
          Fun@36..39 "fun"
          Whitespace@39..40 " "
          Identifier@40..44 "good"
          ParamList@44..46
            LParen@44..45 "("
            RParen@45..46 ")"
          Whitespace@46..47 " "
          Block@47..49
            LBrace@47..48 "{"
            RBrace@48..49 "}"
        Whitespace@49..50 " "
        RBrace@50..51 "}"
    "##);
    let functions = SourceFileView::new(&tree).modules()[0].functions();
    let names: Vec<_> = functions.iter().filter_map(|f| f.name()).collect();
    assert_eq!(names, vec!["bad", "good"]);
}

#[test]
fn test_unclosed_attribute_before_module() {
    let (tree, messages) = assert_parses_err!("#[test_only module 0x1::m { fun f() {} }");
    assert_eq!(messages, vec!["Expected ']', found 'module'".to_string()]);
    let modules = SourceFileView::new(&tree).modules();
    assert_eq!(modules.len(), 1);
    assert_eq!(modules[0].functions().len(), 1);
}

#[test]
fn test_unclosed_spec_block_keeps_following_items() {
    let (tree, _) = assert_parses_err!("module 0x1::m { spec bad { fun good() {} }", @r#"
    --- Diagnostics ---
    Expected '}', found 'fun'
    --- Tree ---
    File@0..42
      Module@0..42
        Module@0..6 "module"
        Whitespace@6..7 " "
        HexLiteral@7..10 "0x1"
        ColonColon@10..12 "::"
        Identifier@12..13 "m"
        Whitespace@13..14 " "
        LBrace@14..15 "{"
        Whitespace@15..16 " "
        SpecBlock@16..26
          Spec@16..20 "spec"
          Whitespace@20..21 " "
          Identifier@21..24 "bad"
          Whitespace@24..25 " "
          LBrace@25..26 "{"
        Whitespace@26..27 " "
        Function@27..40
          Fun@27..30 "fun"
          Whitespace@30..31 " "
          Identifier@31..35 "good"
          ParamList@35..37
            LParen@35..36 "("
            RParen@36..37 ")"
          Whitespace@37..38 " "
          Block@38..40
            LBrace@38..39 "{"
            RBrace@39..40 "}"
        Whitespace@40..41 " "
        RBrace@41..42 "}"
    "#);
    let functions = SourceFileView::new(&tree).modules()[0].functions();
    assert_eq!(functions.len(), 1);
    assert_eq!(functions[0].name(), Some("good"));
}

#[test]
fn test_module_spec_may_declare_functions() {
    let tree = assert_parses_ok!(
        "module 0x1::m { spec module { fun total(): u64 { 1 } } fun f() {} }"
    );
    assert_eq!(nodes_of_kind(&tree, SyntaxKind::SpecBlock).len(), 1);
    assert_eq!(SourceFileView::new(&tree).modules()[0].functions().len(), 1);
}
