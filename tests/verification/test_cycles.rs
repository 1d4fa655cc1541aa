// Cycle detection across modules and roots.

use std::sync::Arc;

use strata_core::{Member, Symbol, SymbolUniverse};
use strata_enforce::cycles::{detect_cycles, detect_cycles_in_root};
use strata_model::{GraphOptions, ModulesGraph};

use super::common::shop_graph;

fn service(name: &str, injects: &[&str]) -> Symbol {
    Symbol::new(name)
        .tagged("service")
        .with_member(Member::constructor(injects.iter().copied()))
}

#[test]
fn test_three_module_cycle_reported_once() {
    let graph = shop_graph(
        SymbolUniverse::builder()
            .symbol(service("shop.c.C", &["shop.a.A"]))
            .symbol(service("shop.a.A", &["shop.b.B"]))
            .symbol(service("shop.b.B", &["shop.c.C"])),
    );
    let cycles = detect_cycles(&graph);
    assert_eq!(cycles.len(), 1);
    assert!(cycles.messages()[0].starts_with("Cycle detected: a -> b -> c -> a"));
}

#[test]
fn test_cycles_sharing_a_module_are_both_reported() {
    // a <-> b and b <-> c share module b.
    let graph = shop_graph(
        SymbolUniverse::builder()
            .symbol(service("shop.a.A", &["shop.b.B"]))
            .symbol(service("shop.b.B", &["shop.a.A", "shop.c.C"]))
            .symbol(service("shop.c.C", &["shop.b.B"])),
    );
    let messages: Vec<String> = detect_cycles(&graph)
        .messages()
        .iter()
        .map(|m| m.lines().next().unwrap_or_default().to_string())
        .collect();
    assert_eq!(
        messages,
        vec![
            "Cycle detected: a -> b -> a".to_string(),
            "Cycle detected: b -> c -> b".to_string(),
        ]
    );
}

#[test]
fn test_every_cycle_of_a_fully_connected_component_is_reported() {
    let graph = shop_graph(
        SymbolUniverse::builder()
            .symbol(service("shop.a.A", &["shop.b.B", "shop.c.C"]))
            .symbol(service("shop.b.B", &["shop.a.A", "shop.c.C"]))
            .symbol(service("shop.c.C", &["shop.a.A", "shop.b.B"])),
    );
    let messages: Vec<String> = detect_cycles(&graph)
        .messages()
        .iter()
        .map(|m| m.lines().next().unwrap_or_default().to_string())
        .collect();
    assert_eq!(
        messages,
        vec![
            "Cycle detected: a -> b -> a",
            "Cycle detected: a -> b -> c -> a",
            "Cycle detected: a -> c -> a",
            "Cycle detected: a -> c -> b -> a",
            "Cycle detected: b -> c -> b",
        ]
    );
}

#[test]
fn test_cycle_message_describes_every_hop() {
    let graph = shop_graph(
        SymbolUniverse::builder()
            .symbol(service("shop.a.A", &["shop.b.B"]))
            .symbol(service("shop.b.B", &["shop.c.C"]))
            .symbol(service("shop.c.C", &["shop.a.A"])),
    );
    let cycles = detect_cycles(&graph);
    let messages = cycles.messages();
    let hops: Vec<&str> = messages[0].lines().skip(1).collect();
    assert_eq!(hops.len(), 3);
    assert!(hops[0].starts_with("  a -> b: shop.a.A.<init>"));
    assert!(hops[2].starts_with("  c -> a: shop.c.C.<init>"));
}

#[test]
fn test_acyclic_graph_has_no_cycles() {
    let graph = shop_graph(
        SymbolUniverse::builder()
            .symbol(service("shop.a.A", &["shop.b.B"]))
            .symbol(service("shop.b.B", &["shop.c.C"]))
            .symbol(service("shop.c.C", &[])),
    );
    assert!(detect_cycles(&graph).is_empty());
}

#[test]
fn test_cycles_are_checked_per_root() {
    let universe = SymbolUniverse::builder()
        .symbol(service("left.a.A", &["left.b.B"]))
        .symbol(service("left.b.B", &["left.a.A"]))
        .symbol(service("right.x.X", &["left.a.A"]))
        .build()
        .unwrap();
    let graph = ModulesGraph::build(
        Arc::new(universe),
        GraphOptions::new(["right", "left"]),
    )
    .unwrap();
    assert_eq!(detect_cycles_in_root(&graph, "left").len(), 1);
    assert!(detect_cycles_in_root(&graph, "right").is_empty());
    assert_eq!(detect_cycles(&graph).len(), 1);
}
