/// Shared test helpers for all strata integration tests.
///
/// Import from any integration test file with:
///   `#[path = "common/mod.rs"] mod common;`
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use strata_core::ignore::IgnorePatterns;
use strata_core::types::{ModuleDeclaration, NamespaceInfo};
use strata_core::universe::SymbolUniverseBuilder;
use strata_core::SymbolUniverse;
use strata_model::ModulesGraph;
use tempfile::TempDir;

/// Namespace info declaring a module with an explicit allow-list.
#[allow(dead_code)]
pub fn module_allowing(namespace: &str, allowed: &[&str]) -> NamespaceInfo {
    NamespaceInfo::new(namespace).module(ModuleDeclaration {
        allowed_dependencies: allowed.iter().map(|s| s.to_string()).collect(),
        ..ModuleDeclaration::default()
    })
}

/// Build a universe and a graph over the `shop` root with default options.
#[allow(dead_code)]
pub fn shop_graph(builder: SymbolUniverseBuilder) -> ModulesGraph {
    let universe = Arc::new(builder.build().unwrap());
    ModulesGraph::of(universe, "shop", IgnorePatterns::none()).unwrap()
}

/// A small application used across test areas.
///
/// - `orders` injects `inventory` and `billing`, listens to an inventory event
/// - `inventory` exposes only its `api` namespace
/// - `billing` has no dependencies
#[allow(dead_code)]
pub const SHOP_SNAPSHOT: &str = r#"{
    "namespaces": [
        { "name": "shop.orders", "module": { "display_name": "Order Management", "allowed_dependencies": ["inventory", "billing"] } },
        { "name": "shop.inventory.api", "named_interfaces": ["api"] }
    ],
    "symbols": [
        { "name": "shop.orders.OrderService", "namespace": "shop.orders", "visibility": "public",
          "tags": ["service"],
          "members": [
            { "kind": "constructor", "name": "<init>",
              "parameter_types": ["shop.inventory.api.StockApi", "shop.billing.BillingService"] },
            { "kind": "method", "name": "on", "tags": ["event_listener"],
              "parameter_types": ["shop.inventory.api.StockChanged"], "value_type": "void" }
          ] },
        { "name": "shop.orders.Order", "namespace": "shop.orders", "visibility": "public", "tags": ["entity"] },
        { "name": "shop.inventory.api.StockApi", "namespace": "shop.inventory.api", "visibility": "public", "kind": "interface" },
        { "name": "shop.inventory.api.StockChanged", "namespace": "shop.inventory.api", "visibility": "public", "kind": "record" },
        { "name": "shop.inventory.internal.StockService", "namespace": "shop.inventory.internal", "visibility": "public",
          "tags": ["service"], "supertypes": ["shop.inventory.api.StockApi"] },
        { "name": "shop.billing.BillingService", "namespace": "shop.billing", "visibility": "public", "tags": ["service"] }
    ]
}"#;

#[allow(dead_code)]
pub fn shop_universe() -> Arc<SymbolUniverse> {
    Arc::new(SymbolUniverse::from_json(SHOP_SNAPSHOT).unwrap())
}

/// Set up a project directory with `.strata/strata.json` and a snapshot file.
///
/// Returns (TempDir, strata_dir). Hold the TempDir to keep the directory alive.
#[allow(dead_code)]
pub fn setup_strata_dir(config: &str, snapshot: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let strata_dir = dir.path().join(".strata");
    fs::create_dir_all(&strata_dir).unwrap();
    fs::write(strata_dir.join("strata.json"), config).unwrap();
    fs::write(strata_dir.join("symbols.json"), snapshot).unwrap();
    (dir, strata_dir)
}
