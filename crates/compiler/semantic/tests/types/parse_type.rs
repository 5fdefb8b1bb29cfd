use move_ide_semantic::{parse_type, MoveType};
use proptest::prelude::*;

fn strukt(name: &str, module: Option<&str>) -> MoveType {
    MoveType::Struct {
        name: name.to_string(),
        module: module.map(str::to_string),
    }
}

#[test]
fn test_annotation_examples() {
    assert_eq!(parse_type("u64"), MoveType::U64);
    assert_eq!(parse_type("vector<u8>"), MoveType::vector(MoveType::U8));
    assert_eq!(
        parse_type("&mut u64"),
        MoveType::reference(true, MoveType::U64)
    );
    assert_eq!(
        parse_type("0x1::coin::Coin"),
        strukt("Coin", Some("0x1::coin"))
    );
    assert_eq!(parse_type(""), MoveType::Unknown);
}

#[test]
fn test_parsed_types_display() {
    let rendered = [
        "u8",
        "vector<vector<u8>>",
        "&mut signer",
        "&0x1::string::String",
        "()",
        "(u64)",
        "(u64, bool)",
        "std::option::Option<u64>",
    ]
    .iter()
    .map(|text| format!("{text} => {}", parse_type(text)))
    .collect::<Vec<_>>()
    .join("\n");

    insta::assert_snapshot!(rendered, @r"
    u8 => u8
    vector<vector<u8>> => vector<vector<u8>>
    &mut signer => &mut signer
    &0x1::string::String => &0x1::string::String
    () => ()
    (u64) => u64
    (u64, bool) => <unknown>
    std::option::Option<u64> => std::option::Option
    ");
}

#[test]
fn test_generic_struct_arguments_are_dropped() {
    assert_eq!(
        parse_type("0x2::balance::Balance<0x2::sui::SUI>"),
        strukt("Balance", Some("0x2::balance"))
    );
    assert_eq!(
        parse_type("&Table<address, vector<u64>>"),
        MoveType::reference(false, strukt("Table", None))
    );
}

#[test]
fn test_nested_vector_of_references() {
    assert_eq!(
        parse_type("vector<&mut vector<bool>>"),
        MoveType::vector(MoveType::reference(
            true,
            MoveType::vector(MoveType::Bool)
        ))
    );
}

#[test]
fn test_display_round_trips_for_common_types() {
    for text in ["u8", "vector<u256>", "&mut address", "0x1::coin::Coin", "()"] {
        assert_eq!(parse_type(text).to_string(), text);
    }
}

proptest! {
    #[test]
    fn parse_type_is_total(text in "\\PC{0,40}") {
        // Never panics; whatever it returns is some type
        let _ = parse_type(&text);
    }

    #[test]
    fn unparseable_text_keeps_trimmed_text(text in "[a-z]{1,8} [a-z]{1,8}") {
        prop_assert_eq!(
            parse_type(&format!("  {text} ")),
            MoveType::Struct { name: text.clone(), module: None }
        );
    }
}
