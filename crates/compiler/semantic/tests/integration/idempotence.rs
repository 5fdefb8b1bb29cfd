use crate::common::parse_ok;
use move_ide_parser::parse;
use move_ide_semantic::{analyze, Analyzer, AnalyzerConfig, TypeCache};

const MIXED: &str = "module 0x1::market {
    use 0x1::coin;
    const FEE: u64 = 3;
    struct Order has key { price: u64, qty: u8 }
    public fun place(price: u64, qty: u8): Order {
        assert!(price > 0, 1);
        let total = price * qty;
        let ok = total + true;
        unknown_helper(total);
        move_to(order);
        total = false;
        Order { price, qty }
    }
}";

#[test]
fn test_analysis_is_idempotent() {
    let tree = parse_ok(MIXED);
    let config = AnalyzerConfig::default();
    let first = analyze(&tree, &config);
    let second = analyze(&tree, &config);
    assert_eq!(first, second);
    assert_eq!(first.len(), 5);
}

#[test]
fn test_reparsing_gives_the_same_diagnostics() {
    let config = AnalyzerConfig::default();
    let first = analyze(&parse(MIXED).tree, &config);
    let second = analyze(&parse(MIXED).tree, &config);
    assert_eq!(first, second);
}

#[test]
fn test_warm_cache_changes_nothing() {
    let tree = parse_ok(MIXED);
    let config = AnalyzerConfig::default();
    let cache = TypeCache::new();
    let cold = Analyzer::with_cache(&tree, &config, &cache).analyze();
    let warm = Analyzer::with_cache(&tree, &config, &cache).analyze();
    assert_eq!(cold, warm);
    assert_eq!(cold, analyze(&tree, &config));
}

#[test]
fn test_diagnostics_follow_source_order() {
    let tree = parse_ok(MIXED);
    let diagnostics = analyze(&tree, &AnalyzerConfig::default());
    let starts: Vec<_> = diagnostics.iter().map(|d| d.span.start).collect();
    let mut sorted = starts.clone();
    sorted.sort_unstable();
    assert_eq!(starts, sorted);
}
