// Dependency discovery on the reference application.

use strata_model::{DependencyDepth, DependencyType, ModulesGraph};

use super::common::shop_universe;

fn graph() -> ModulesGraph {
    ModulesGraph::of(shop_universe(), "shop", Default::default()).unwrap()
}

#[test]
fn test_dependency_types_of_orders() {
    let graph = graph();
    let orders = graph.module_by_name("orders").unwrap();

    let components = orders.dependencies(&graph, &[DependencyType::UsesComponent]);
    assert_eq!(components.modules(), vec!["inventory", "billing"]);

    let events = orders.dependencies(&graph, &[DependencyType::EventListener]);
    assert_eq!(events.len(), 1);
    let edge = events.iter().next().unwrap();
    assert_eq!(
        graph.universe().symbol(edge.edge.target).name,
        "shop.inventory.api.StockChanged"
    );

    assert!(orders
        .dependencies(&graph, &[DependencyType::Entity])
        .is_empty());
}

#[test]
fn test_supertype_inside_module_is_not_a_dependency() {
    let graph = graph();
    let inventory = graph.module_by_name("inventory").unwrap();
    assert!(inventory.dependencies(&graph, &[]).is_empty());
}

#[test]
fn test_bootstrap_dependencies() {
    let graph = graph();
    let orders = graph.module_by_name("orders").unwrap();
    let names = |depth| -> Vec<String> {
        orders
            .bootstrap_dependencies(&graph, depth)
            .iter()
            .map(|m| m.name().to_string())
            .collect()
    };
    assert!(names(DependencyDepth::None).is_empty());
    assert_eq!(names(DependencyDepth::Immediate), vec!["inventory", "billing"]);
    assert_eq!(names(DependencyDepth::All), vec!["inventory", "billing"]);
}

#[test]
fn test_named_interfaces_of_inventory() {
    let graph = graph();
    let inventory = graph.module_by_name("inventory").unwrap();
    let api = inventory.named_interfaces().get("api").unwrap();
    assert_eq!(api.len(), 2);
    assert!(inventory.named_interfaces().has_explicit_interfaces());
    let stock_service = graph
        .universe()
        .lookup("shop.inventory.internal.StockService")
        .unwrap();
    assert!(!inventory.is_exposed(stock_service));
}

#[test]
fn test_describe_module() {
    let graph = graph();
    let text = graph.module_by_name("orders").unwrap().describe(Some(&graph));
    assert!(text.starts_with("# Order Management\n"));
    assert!(text.contains("> Logical name: orders"));
    assert!(text.contains("> Allowed dependencies: inventory, billing"));
    assert!(text.contains("> Direct module dependencies: inventory, billing"));
}

#[test]
fn test_caller_symbol_ids_survive_import() {
    use std::sync::Arc;
    use strata_core::ignore::IgnorePatterns;
    use strata_core::{Symbol, SymbolUniverse};

    let universe = Arc::new(
        SymbolUniverse::builder()
            .symbol(Symbol::new("aaa.Outside"))
            .symbol(Symbol::new("app.billing.Invoice").tagged("entity"))
            .symbol(Symbol::new("app.orders.Order").tagged("entity"))
            .build()
            .unwrap(),
    );
    let graph = ModulesGraph::of(Arc::clone(&universe), "app", IgnorePatterns::none()).unwrap();

    for (name, module) in [("app.billing.Invoice", "billing"), ("app.orders.Order", "orders")] {
        let id = universe.lookup(name).unwrap();
        assert_eq!(graph.module_owning(id).map(|m| m.name()), Some(module), "{}", name);
        assert!(graph.module_by_name(module).unwrap().is_exposed(id));
    }
    assert!(graph
        .module_owning(universe.lookup("aaa.Outside").unwrap())
        .is_none());
}
