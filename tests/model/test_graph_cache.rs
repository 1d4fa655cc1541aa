// Graph reuse through an explicit cache.

use std::sync::Arc;

use strata_core::ignore::IgnorePatterns;
use strata_core::SymbolUniverse;
use strata_enforce::VerifyGraph;
use strata_model::{GraphCache, GraphOptions};

use super::common::{shop_universe, SHOP_SNAPSHOT};

#[test]
fn test_cache_reuses_graph_for_equal_inputs() {
    let cache = GraphCache::new();
    let options = GraphOptions::new(["shop"]);
    let first = cache.get_or_build(&shop_universe(), options.clone()).unwrap();
    let reloaded = Arc::new(SymbolUniverse::from_json(SHOP_SNAPSHOT).unwrap());
    let second = cache.get_or_build(&reloaded, options).unwrap();
    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn test_cache_keys_on_ignore_patterns() {
    let cache = GraphCache::new();
    let universe = shop_universe();
    let options = GraphOptions::new(["shop"]);
    let all = cache.get_or_build(&universe, options.clone()).unwrap();
    let filtered = cache
        .get_or_build(
            &universe,
            options.ignoring(IgnorePatterns::new(["shop.billing.*"]).unwrap()),
        )
        .unwrap();
    assert_eq!(all.len(), 3);
    assert_eq!(filtered.len(), 2);
    assert_eq!(cache.len(), 2);
}

#[test]
fn test_verified_state_is_shared_through_cache() {
    let cache = GraphCache::new();
    let universe = shop_universe();
    let options = GraphOptions::new(["shop"]);
    cache
        .get_or_build(&universe, options.clone())
        .unwrap()
        .verify()
        .unwrap();
    assert!(cache.get_or_build(&universe, options).unwrap().is_verified());
}
