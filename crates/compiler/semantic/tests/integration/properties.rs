use move_ide_parser::parse;
use move_ide_semantic::{analyze, declaration_at, find_usages, AnalyzerConfig};
use proptest::prelude::*;

const FRAGMENTS: &[&str] = &[
    "module 0x1::m {", "}", "fun f(", ")", "{", "let x", " = ", "x", "+", "true", "1u8",
    "foo(", "move_to(", ",", ";", "&mut ", "*", "as u64", "use 0x1::c::{Self, d};", "(",
    "vector[", "]", "&&", "<", ">", "::", "struct S { a: u8 }", "x = ", "@0x1", "!",
];

fn fragment_soup() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(FRAGMENTS), 0..40)
        .prop_map(|parts| parts.join(" "))
}

proptest! {
    #[test]
    fn analysis_never_panics_and_is_deterministic(source in fragment_soup()) {
        let tree = parse(&source).tree;
        let config = AnalyzerConfig::default();
        let first = analyze(&tree, &config);
        let second = analyze(&tree, &config);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn usages_never_include_the_declaration(source in fragment_soup(), offset in 0usize..200) {
        let tree = parse(&source).tree;
        if let Some(declaration) = declaration_at(&tree, offset.min(source.len())) {
            let usages = find_usages(&tree, &declaration);
            prop_assert!(!usages.contains(&declaration.name_node));
            for usage in usages {
                prop_assert_eq!(tree.text(usage), declaration.name.as_str());
            }
        }
    }

    #[test]
    fn arbitrary_text_is_analyzed(source in "\\PC{0,120}") {
        let tree = parse(&source).tree;
        let _ = analyze(&tree, &AnalyzerConfig::default());
    }
}
