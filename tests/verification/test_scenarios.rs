// End-to-end verification scenarios over small applications.

use strata_core::{Member, Symbol, SymbolUniverse};
use strata_enforce::{VerifyGraph, ViolationKind};
use strata_model::ModulesGraph;

use super::common::{module_allowing, shop_graph, shop_universe};

/// The reference application passes verification.
#[test]
fn test_shop_is_clean() {
    let graph = ModulesGraph::of(shop_universe(), "shop", Default::default()).unwrap();
    assert!(graph.detect_violations().is_empty());
    assert!(graph.verify().is_ok());
}

/// Allow-list excludes the injected module: verify names both modules.
#[test]
fn test_disallowed_dependency_fails_verify() {
    let graph = shop_graph(
        SymbolUniverse::builder()
            .symbol(
                Symbol::new("shop.orders.OrderService")
                    .tagged("service")
                    .with_member(Member::constructor(["shop.billing.BillingService"])),
            )
            .symbol(Symbol::new("shop.billing.BillingService").tagged("service"))
            .symbol(Symbol::new("shop.inventory.Inventory").tagged("service"))
            .namespace(module_allowing("shop.orders", &["inventory"])),
    );
    let err = graph.verify().unwrap_err();
    let message = err.to_string();
    assert!(message.contains("'orders'"), "{}", message);
    assert!(message.contains("'billing'"), "{}", message);
    assert_eq!(
        err.violations().of_kind(ViolationKind::DisallowedDependency).len(),
        1
    );
}

/// Only `inventory.api` is exposed; referencing internals is reported.
#[test]
fn test_non_exposed_internal_symbol() {
    let graph = shop_graph(
        SymbolUniverse::builder()
            .symbol(
                Symbol::new("shop.orders.OrderService")
                    .tagged("service")
                    .with_member(Member::method(
                        "reserve",
                        ["shop.inventory.internal.Repo"],
                        Some("void"),
                    )),
            )
            .symbol(Symbol::new("shop.inventory.api.StockApi"))
            .symbol(Symbol::new("shop.inventory.internal.Repo").tagged("repository"))
            .namespace(
                strata_core::types::NamespaceInfo::new("shop.inventory.api").named_interface("api"),
            ),
    );
    let violations = graph.detect_violations();
    assert_eq!(violations.len(), 1);
    assert!(violations.messages()[0].contains("shop.inventory.internal.Repo"));
}

/// Two modules injecting each other form a cycle.
#[test]
fn test_mutual_injection_is_a_cycle() {
    let graph = shop_graph(
        SymbolUniverse::builder()
            .symbol(
                Symbol::new("shop.a.AService")
                    .tagged("service")
                    .with_member(Member::constructor(["shop.b.BService"])),
            )
            .symbol(
                Symbol::new("shop.b.BService")
                    .tagged("service")
                    .with_member(Member::constructor(["shop.a.AService"])),
            ),
    );
    let cycles = graph.detect_violations().of_kind(ViolationKind::Cycle);
    assert_eq!(cycles.len(), 1);
    let messages = cycles.messages();
    let message = messages[0];
    assert!(message.starts_with("Cycle detected: a -> b -> a"));
    assert!(message.contains("shop.a.AService.<init> (injection constructor) -> shop.b.BService"));
}

/// A module without qualifying symbols has no dependencies and no violations.
#[test]
fn test_module_without_qualifying_symbols() {
    let graph = shop_graph(
        SymbolUniverse::builder()
            .symbol(
                Symbol::new("shop.util.Strings")
                    .with_member(Member::method("x", ["shop.core.internal.Hidden"], None)),
            )
            .symbol(Symbol::new("shop.core.Api"))
            .symbol(Symbol::new("shop.core.internal.Hidden"))
            .namespace(strata_core::types::NamespaceInfo::new("shop.core").named_interface("api")),
    );
    let util = graph.module_by_name("util").unwrap();
    assert!(util.qualifying_symbols().is_empty());
    assert!(util.dependencies(&graph, &[]).is_empty());
    assert!(graph.detect_violations().is_empty());
}

/// Field-injected, non-exposed dependency raises both the exposure and the style violation.
#[test]
fn test_field_injection_of_hidden_symbol() {
    let graph = shop_graph(
        SymbolUniverse::builder()
            .symbol(
                Symbol::new("shop.orders.OrderService")
                    .tagged("service")
                    .with_member(
                        Member::field("stock", "shop.inventory.internal.StockRepo")
                            .tagged("autowired")
                            .at_line(21),
                    ),
            )
            .symbol(Symbol::new("shop.inventory.api.StockApi"))
            .symbol(Symbol::new("shop.inventory.internal.StockRepo").tagged("repository"))
            .namespace(
                strata_core::types::NamespaceInfo::new("shop.inventory.api").named_interface("api"),
            ),
    );
    let violations = graph.detect_violations();
    let kinds: Vec<ViolationKind> = violations.iter().map(|v| v.kind).collect();
    assert_eq!(
        kinds,
        vec![ViolationKind::NonExposedSymbol, ViolationKind::FieldInjection]
    );
    assert!(violations.messages()[0].contains("(line 21)"));
    assert!(violations.messages()[1].contains("Prefer constructor injection"));
}
