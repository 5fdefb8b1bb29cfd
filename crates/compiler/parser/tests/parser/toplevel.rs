use crate::common::{in_module, nodes_of_kind, texts_of_kind};
use crate::{assert_parses_err, assert_parses_ok};
use move_ide_parser::ast::{SourceFileView, Visibility};
use move_ide_parser::SyntaxKind;

#[test]
fn test_empty_module() {
    let tree = assert_parses_ok!("module 0x1::empty {}", @r#"
    File@0..20
      Module@0..20
        Module@0..6 "module"
        Whitespace@6..7 " "
        HexLiteral@7..10 "0x1"
        ColonColon@10..12 "::"
        Identifier@12..17 "empty"
        Whitespace@17..18 " "
        LBrace@18..19 "{"
        RBrace@19..20 "}"
    "#);
    let file = SourceFileView::new(&tree);
    assert_eq!(file.modules().len(), 1);
    assert_eq!(file.modules()[0].name(), Some("empty"));
}

#[test]
fn test_module_with_named_address() {
    let tree = assert_parses_ok!("module std::vector {}");
    let module = SourceFileView::new(&tree).modules()[0];
    assert_eq!(module.address(), Some("std"));
    assert_eq!(module.name(), Some("vector"));
}

#[test]
fn test_single_module_file_form() {
    let tree = assert_parses_ok!("module 0x1::m;\n\nfun f() {}\nfun g() {}\n");
    let module = SourceFileView::new(&tree).modules()[0];
    assert_eq!(module.functions().len(), 2);
}

#[test]
fn test_script() {
    let tree = assert_parses_ok!("script { use std::debug; fun main() { debug::print(&1); } }");
    let file = SourceFileView::new(&tree);
    let scripts = file.scripts();
    assert_eq!(scripts.len(), 1);
    assert_eq!(scripts[0].functions()[0].name(), Some("main"));
    assert_eq!(scripts[0].uses()[0].module_path(), "std::debug");
}

#[test]
fn test_top_level_use() {
    let tree = assert_parses_ok!("use 0x1::coin;\nmodule 0x2::m {}");
    let file = SourceFileView::new(&tree);
    assert_eq!(file.uses().len(), 1);
    assert_eq!(file.modules().len(), 1);
}

#[test]
fn test_address_block() {
    let tree = assert_parses_ok!("address 0x1 {\n module a {}\n #[test_only]\n module b {}\n}");
    let file = SourceFileView::new(&tree);
    let modules = file.modules();
    assert_eq!(modules.len(), 2);
    assert_eq!(modules[1].qualified_name().as_deref(), Some("0x1::b"));
    assert_eq!(modules[1].attributes()[0].names(), vec!["test_only"]);
}

#[test]
fn test_function_modifiers_in_any_order() {
    let code = in_module(
        "public entry fun a() {}
         entry public fun b() {}
         public(package) fun c() {}
         public(script) fun d() {}
         native public fun e();
         inline fun f() {}",
    );
    let tree = assert_parses_ok!(&code);
    let functions = SourceFileView::new(&tree).modules()[0].functions();
    assert_eq!(functions.len(), 6);
    assert!(functions[0].is_entry() && functions[0].is_public());
    assert!(functions[1].is_entry() && functions[1].is_public());
    assert_eq!(functions[2].visibility(), Visibility::Package);
    assert_eq!(functions[3].visibility(), Visibility::Script);
    assert!(functions[4].is_native() && functions[4].body().is_none());
    assert!(functions[5].is_inline());
}

#[test]
fn test_generic_function_with_constraints() {
    let code = in_module("fun f<T: copy + drop, U>(x: T, y: U): (T, U) { (x, y) }");
    let tree = assert_parses_ok!(&code);
    let function = SourceFileView::new(&tree).modules()[0].functions()[0];
    assert_eq!(function.type_params(), vec!["T", "U"]);
    assert_eq!(function.return_type_text(), Some("(T, U)"));
}

#[test]
fn test_struct_forms() {
    let code = in_module(
        "struct A has copy, drop { x: u64 }
         struct B<phantom T: store> { v: vector<T> }
         native struct C has key;
         struct D {} has store;",
    );
    let tree = assert_parses_ok!(&code);
    let structs = SourceFileView::new(&tree).modules()[0].structs();
    assert_eq!(structs.len(), 4);
    assert_eq!(structs[0].abilities(), vec!["copy", "drop"]);
    assert_eq!(structs[1].fields()[0].type_text(), Some("vector<T>"));
    assert!(structs[2].is_native());
    assert!(structs[3].has_ability("store"));
}

#[test]
fn test_constants() {
    let code = in_module(
        "const E_NOT_OWNER: u64 = 1;
         const NAME: vector<u8> = b\"coin\";
         const ADMIN: address = @0xA;",
    );
    let tree = assert_parses_ok!(&code);
    let constants = SourceFileView::new(&tree).modules()[0].constants();
    let names: Vec<_> = constants.iter().filter_map(|c| c.name()).collect();
    assert_eq!(names, vec!["E_NOT_OWNER", "NAME", "ADMIN"]);
}

#[test]
fn test_friend_and_use_forms() {
    let code = in_module(
        "use std::vector as vec;
         use 0x1::coin::{Self, Coin};
         friend 0x1::manager;",
    );
    let tree = assert_parses_ok!(&code);
    let module = SourceFileView::new(&tree).modules()[0];
    let uses = module.uses();
    assert_eq!(uses[0].module_alias(), Some("vec"));
    assert_eq!(uses[0].imported_names(), vec!["vec".to_string()]);
    assert_eq!(
        uses[1].imported_names(),
        vec!["coin".to_string(), "Coin".to_string()]
    );
    assert_eq!(module.friends().len(), 1);
}

#[test]
fn test_spec_blocks_are_skipped() {
    let code = in_module(
        "fun f(): u64 { 1 }
         spec f { ensures result == 1; aborts_if false; }
         spec module { pragma verify = false; }
         fun g() {}",
    );
    let tree = assert_parses_ok!(&code);
    assert_eq!(nodes_of_kind(&tree, SyntaxKind::SpecBlock).len(), 2);
    assert_eq!(SourceFileView::new(&tree).modules()[0].functions().len(), 2);
}

#[test]
fn test_test_attributes() {
    let code = in_module(
        "#[test(admin = @0x1)]
         #[expected_failure(abort_code = 2)]
         fun t(admin: signer) {}
         #[test_only]
         fun helper() {}",
    );
    let tree = assert_parses_ok!(&code);
    let functions = SourceFileView::new(&tree).modules()[0].functions();
    assert!(functions[0].is_test());
    assert_eq!(functions[0].attributes().len(), 2);
    assert!(!functions[1].is_test());
}

#[test]
fn test_leading_comments_stay_in_file() {
    let code = "// header\n/* doc */\nmodule 0x1::m {}\n// trailing\n";
    let tree = assert_parses_ok!(code);
    let root_children = tree.children(tree.root());
    assert_eq!(tree.text(root_children[0]), "// header");
    assert_eq!(texts_of_kind(&tree, SyntaxKind::Module), vec!["module 0x1::m {}"]);
}

#[test]
fn test_junk_at_top_level() {
    let (tree, messages) = assert_parses_err!("let x = 1;\nmodule 0x1::m {}");
    assert_eq!(messages.len(), 1);
    assert!(messages[0].starts_with("Expected 'module', 'script', 'use' or 'address'"));
    assert_eq!(nodes_of_kind(&tree, SyntaxKind::Error).len(), 1);
    assert_eq!(SourceFileView::new(&tree).modules().len(), 1);
}
