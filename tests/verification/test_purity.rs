// detect_violations is pure and verify is idempotent.

use strata_core::{Member, Symbol, SymbolUniverse};
use strata_enforce::VerifyGraph;

use super::common::{module_allowing, shop_graph};

fn violating() -> strata_model::ModulesGraph {
    shop_graph(
        SymbolUniverse::builder()
            .symbol(
                Symbol::new("shop.orders.OrderService")
                    .tagged("service")
                    .with_member(Member::field("billing", "shop.billing.Billing").tagged("autowired"))
                    .with_member(Member::constructor(["shop.inventory.Stock"])),
            )
            .symbol(Symbol::new("shop.billing.Billing").tagged("service"))
            .symbol(Symbol::new("shop.inventory.Stock").tagged("entity"))
            .namespace(module_allowing("shop.orders", &["inventory"])),
    )
}

#[test]
fn test_detect_violations_is_repeatable() {
    let graph = violating();
    let first = graph.detect_violations();
    let second = graph.detect_violations();
    assert_eq!(first, second);
    assert_eq!(first.len(), 2);
    assert!(!graph.is_verified());
}

#[test]
fn test_verify_error_message_is_deterministic() {
    let graph = violating();
    let a = graph.verify().unwrap_err().to_string();
    let b = graph.verify().unwrap_err().to_string();
    assert_eq!(a, b);
    assert_eq!(a.lines().count(), 2);
}

#[test]
fn test_verify_is_idempotent_after_success() {
    let graph = shop_graph(
        SymbolUniverse::builder()
            .symbol(
                Symbol::new("shop.orders.OrderService")
                    .tagged("service")
                    .with_member(Member::constructor(["shop.inventory.Stock"])),
            )
            .symbol(Symbol::new("shop.inventory.Stock").tagged("entity")),
    );
    assert!(graph.verify().is_ok());
    assert!(graph.is_verified());
    assert!(graph.verify().is_ok());
}
