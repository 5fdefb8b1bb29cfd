use crate::common::{expr_with_text, in_function, in_module, nth_token, parse_ok};
use move_ide_semantic::{infer_type, infer_type_with, InferenceContext, MoveType, TypeCache};

fn type_of(code: &str, expr: &str) -> MoveType {
    let tree = parse_ok(code);
    let node = expr_with_text(&tree, expr);
    infer_type(&tree, node)
}

#[test]
fn test_literal_examples() {
    let code = in_function("255u8; 42; true; @0x1; b\"hi\"; 0x10u32;");
    assert_eq!(type_of(&code, "255u8"), MoveType::U8);
    assert_eq!(type_of(&code, "42"), MoveType::U64);
    assert_eq!(type_of(&code, "true"), MoveType::Bool);
    assert_eq!(type_of(&code, "@0x1"), MoveType::Address);
    assert_eq!(type_of(&code, "b\"hi\""), MoveType::vector(MoveType::U8));
    assert_eq!(type_of(&code, "0x10u32"), MoveType::U32);
}

#[test]
fn test_declaration_contexts() {
    let code = in_module(
        "const LIMIT: u128 = 10;
         struct Pool has key { reserve: vector<u64> }
         fun f(owner: &signer) { let count: u16 = 0; }",
    );
    let tree = parse_ok(&code);
    assert_eq!(infer_type(&tree, nth_token(&tree, "LIMIT", 0)), MoveType::U128);
    assert_eq!(
        infer_type(&tree, nth_token(&tree, "reserve", 0)),
        MoveType::vector(MoveType::U64)
    );
    assert_eq!(
        infer_type(&tree, nth_token(&tree, "owner", 0)),
        MoveType::reference(false, MoveType::Signer)
    );
    assert_eq!(infer_type(&tree, nth_token(&tree, "count", 0)), MoveType::U16);
}

#[test]
fn test_primitive_keywords_name_their_type() {
    let tree = parse_ok(&in_module("fun f(v: vector<address>) {}"));
    assert_eq!(
        infer_type(&tree, nth_token(&tree, "vector", 0)),
        MoveType::vector(MoveType::Unknown)
    );
    assert_eq!(
        infer_type(&tree, nth_token(&tree, "address", 0)),
        MoveType::Address
    );
}

#[test]
fn test_struct_names_inside_annotations() {
    let tree = parse_ok(&in_module(
        "fun f(c: Coin, r: &mut Coin, v: vector<0x2::coin::Coin>) {}",
    ));
    let coin = MoveType::Struct {
        name: "Coin".to_string(),
        module: None,
    };
    assert_eq!(infer_type(&tree, nth_token(&tree, "Coin", 0)), coin);
    assert_eq!(infer_type(&tree, nth_token(&tree, "Coin", 1)), coin);
    assert_eq!(
        infer_type(&tree, nth_token(&tree, "Coin", 2)),
        MoveType::Struct {
            name: "Coin".to_string(),
            module: Some("0x2::coin".to_string()),
        }
    );
    assert_eq!(
        infer_type(&tree, nth_token(&tree, "r", 0)),
        MoveType::reference(true, coin)
    );
}

#[test]
fn test_expression_rules() {
    let code = in_module(
        "const SCALE: u32 = 100;
         fun amount(): u128 { 0 }
         fun f(x: u8, r: &mut u64) {
             let total = x + 1;
             let flag = total > 3 && !false;
             let scaled = SCALE * 2;
             let read = *r;
             let big = amount();
             let narrowed = (big as u16);
             let items = vector[x, x];
         }",
    );
    let tree = parse_ok(&code);
    let binding = |name: &str| infer_type(&tree, nth_token(&tree, name, 0));
    assert_eq!(binding("total"), MoveType::U8);
    assert_eq!(binding("flag"), MoveType::Bool);
    assert_eq!(binding("scaled"), MoveType::U32);
    assert_eq!(binding("read"), MoveType::U64);
    assert_eq!(binding("big"), MoveType::U128);
    assert_eq!(binding("narrowed"), MoveType::U16);
    assert_eq!(binding("items"), MoveType::vector(MoveType::U8));
}

#[test]
fn test_unknown_is_the_fallback() {
    let code = in_function("let a = mystery(); a.field; other::call();");
    let tree = parse_ok(&code);
    assert_eq!(infer_type(&tree, nth_token(&tree, "a", 0)), MoveType::Unknown);
    assert_eq!(
        infer_type(&tree, expr_with_text(&tree, "a.field")),
        MoveType::Unknown
    );
    assert_eq!(
        infer_type(&tree, expr_with_text(&tree, "other::call()")),
        MoveType::Unknown
    );
}

#[test]
fn test_shared_cache_is_transparent() {
    let code = in_module("fun f(a: u8, b: &mut vector<u8>) { let c = a; *b; c }");
    let tree = parse_ok(&code);
    let cache = TypeCache::new();
    let ctx = InferenceContext::with_cache(&tree, &cache);
    for node in tree.descendants(tree.root()) {
        assert_eq!(infer_type_with(&ctx, node), infer_type(&tree, node));
    }

    // A cache filled by another tree gives the same answers
    let other = parse_ok(&in_module("fun g(a: u16) { a }"));
    let ctx = InferenceContext::with_cache(&other, &cache);
    for node in other.descendants(other.root()) {
        assert_eq!(infer_type_with(&ctx, node), infer_type(&other, node));
    }
}
