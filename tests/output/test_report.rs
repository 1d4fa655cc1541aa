// Report building and formatting for a full verification run.

use strata_core::ignore::IgnorePatterns;
use strata_enforce::VerifyGraph;
use strata_model::ModulesGraph;
use strata_output::human::HumanFormatter;
use strata_output::json::JsonFormatter;
use strata_output::{OutputFormatter, VerificationReport};

use super::common::shop_universe;

fn clean_report() -> VerificationReport {
    let graph = ModulesGraph::of(shop_universe(), "shop", IgnorePatterns::none()).unwrap();
    VerificationReport::new(&graph, &graph.detect_violations())
}

#[test]
fn test_clean_report() {
    let report = clean_report();
    assert_eq!(report.status, "ok");
    assert_eq!(report.roots, vec!["shop"]);
    assert!(HumanFormatter.format_report(&report).is_empty());
}

#[test]
fn test_json_report_lists_modules() {
    let report = clean_report();
    let value: serde_json::Value =
        serde_json::from_str(&JsonFormatter.format_report(&report)).unwrap();
    let names: Vec<&str> = value["modules"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["billing", "inventory", "orders"]);
    assert_eq!(value["modules"][1]["named_interfaces"][0], "api");
    assert_eq!(value["modules"][0]["named_interfaces"][0], "<<UNNAMED>>");
}

#[test]
fn test_human_module_listing() {
    let report = clean_report();
    let out = HumanFormatter.format_modules(&report.modules);
    assert!(out.contains("Order Management (shop.orders) [2 qualifying symbol(s)]"));
    assert!(out.contains("  -> inventory USES_COMPONENT x1\n"));
    assert!(out.contains("  -> inventory EVENT_LISTENER x1\n"));
}
