// Building graphs from `.strata/strata.json` and a snapshot on disk.

use std::sync::Arc;

use strata_core::config::{DetectionStrategy, NamingMode, StrataConfig};
use strata_core::snapshot::load_snapshot;
use strata_enforce::VerifyGraph;
use strata_model::{ConfigurationError, GraphOptions, ModulesGraph};

use super::common::{setup_strata_dir, SHOP_SNAPSHOT};

fn build(config: &str) -> Result<ModulesGraph, ConfigurationError> {
    let (_dir, strata_dir) = setup_strata_dir(config, SHOP_SNAPSHOT);
    let cfg = StrataConfig::load(&strata_dir);
    let universe = load_snapshot(&strata_dir.join("symbols.json"))?;
    ModulesGraph::build(Arc::new(universe), GraphOptions::from_config(&cfg)?)
}

#[test]
fn test_config_roots_and_naming() {
    let graph = build(r#"{ "roots": ["shop"], "naming": "fully_qualified" }"#).unwrap();
    let names: Vec<&str> = graph.modules().iter().map(|m| m.name()).collect();
    assert_eq!(
        names,
        vec!["shop.billing", "shop.inventory", "shop.orders"]
    );
    assert_eq!(
        graph.module_by_name("shop.orders").unwrap().display_name(),
        "Order Management"
    );
}

#[test]
fn test_config_explicit_detection() {
    let graph = build(r#"{ "roots": ["shop"], "detection": "explicitly_annotated" }"#).unwrap();
    assert_eq!(graph.len(), 1);
    assert_eq!(graph.options().detection, DetectionStrategy::ExplicitlyAnnotated);
    assert_eq!(graph.options().naming, NamingMode::Local);
    // Targets outside any module are skipped, so nothing is left to violate.
    assert!(graph.detect_violations().is_empty());
}

#[test]
fn test_config_ignore_patterns() {
    let graph = build(r#"{ "roots": ["shop"], "ignore_patterns": ["shop.billing.*"] }"#).unwrap();
    let billing = graph.module_by_name("billing");
    assert!(billing.is_none());
    let orders = graph.module_by_name("orders").unwrap();
    assert_eq!(orders.dependencies(&graph, &[]).modules(), vec!["inventory"]);
}

#[test]
fn test_config_vocabulary_and_supertypes() {
    let graph = build(
        r#"{
            "roots": ["shop"],
            "vocabulary": { "component": ["managed"] },
            "repository_supertypes": ["shop.inventory.api.StockApi"]
        }"#,
    )
    .unwrap();
    // "service" is no longer a component tag; the supertype rule still finds the repository.
    let orders = graph.module_by_name("orders").unwrap();
    let inventory = graph.module_by_name("inventory").unwrap();
    assert_eq!(orders.qualifying_symbols().len(), 1);
    assert_eq!(inventory.qualifying_symbols().len(), 1);
}

#[test]
fn test_config_errors_propagate() {
    let err = build(r#"{ "roots": ["shop"], "shared_modules": ["payments"] }"#).unwrap_err();
    assert!(matches!(err, ConfigurationError::UnknownSharedModule(_)));

    let err = build(r#"{ "roots": ["shop"], "ignore_patterns": ["shop.[x"] }"#).unwrap_err();
    assert!(matches!(err, ConfigurationError::Core(_)));

    let err = build(r#"{ "roots": [] }"#).unwrap_err();
    assert!(err.to_string().contains("No root namespace"));
}

#[test]
fn test_unparsable_config_falls_back_to_defaults() {
    let (_dir, strata_dir) = setup_strata_dir("{ not json", SHOP_SNAPSHOT);
    let cfg = StrataConfig::load(&strata_dir);
    assert!(cfg.roots.is_empty());
    assert_eq!(cfg.detection, DetectionStrategy::DirectSubNamespaces);
}
