use crate::assert_parses_ok;
use crate::common::{in_module, texts_of_kind};
use move_ide_parser::ast::SourceFileView;
use move_ide_parser::SyntaxKind;

fn param_types(signature: &str) -> Vec<String> {
    let tree = assert_parses_ok!(&in_module(&format!("fun f({signature}) {{}}")));
    let function = SourceFileView::new(&tree).modules()[0].functions()[0];
    function
        .parameters()
        .iter()
        .filter_map(|p| p.type_text().map(str::to_string))
        .collect()
}

#[test]
fn test_primitive_types() {
    assert_eq!(
        param_types("a: u8, b: u16, c: u32, d: u64, e: u128, f: u256, g: bool, h: address, i: signer"),
        vec!["u8", "u16", "u32", "u64", "u128", "u256", "bool", "address", "signer"]
    );
}

#[test]
fn test_reference_types() {
    assert_eq!(param_types("a: &u64, b: &mut Coin"), vec!["&u64", "&mut Coin"]);
}

#[test]
fn test_qualified_and_generic_types() {
    assert_eq!(
        param_types("a: 0x1::coin::Coin<SUI>, b: vector<vector<u8>>, c: Table<address, u64>"),
        vec!["0x1::coin::Coin<SUI>", "vector<vector<u8>>", "Table<address, u64>"]
    );
}

#[test]
fn test_tuple_and_unit_return_types() {
    let tree = assert_parses_ok!(&in_module("fun f(): () {} fun g(): (u64, bool) { (1, true) }"));
    assert_eq!(
        texts_of_kind(&tree, SyntaxKind::TupleType),
        vec!["()", "(u64, bool)"]
    );
}

#[test]
fn test_type_node_kinds() {
    let tree = assert_parses_ok!(&in_module("fun f(a: &vector<u8>) {}"));
    assert_eq!(texts_of_kind(&tree, SyntaxKind::RefType), vec!["&vector<u8>"]);
    assert_eq!(
        texts_of_kind(&tree, SyntaxKind::PathType),
        vec!["vector<u8>", "u8"]
    );
    assert_eq!(texts_of_kind(&tree, SyntaxKind::TypeArgs), vec!["<u8>"]);
}
