//! Reuse of built graphs across callers.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use strata_core::config::{DetectionStrategy, NamingMode};
use strata_core::ignore::IgnorePatterns;
use strata_core::SymbolUniverse;

use crate::error::ConfigurationError;
use crate::graph::{GraphOptions, ModulesGraph};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    fingerprint: String,
    roots: Vec<String>,
    ignore: IgnorePatterns,
    detection: DetectionStrategy,
    naming: NamingMode,
    shared_modules: Vec<String>,
    standard_prefixes: Vec<String>,
    /// Classifiers have no value identity; the shared instance stands in for one.
    classifier: usize,
}

impl CacheKey {
    fn new(universe: &SymbolUniverse, options: &GraphOptions) -> Self {
        let mut roots = options.roots.clone();
        roots.sort();
        roots.dedup();
        Self {
            fingerprint: universe.fingerprint().to_string(),
            roots,
            ignore: options.ignore.clone(),
            detection: options.detection,
            naming: options.naming,
            shared_modules: options.shared_modules.clone(),
            standard_prefixes: options.standard_library.prefixes().to_vec(),
            classifier: Arc::as_ptr(&options.classifier) as *const () as usize,
        }
    }
}

type Slot = Arc<Mutex<Option<Arc<ModulesGraph>>>>;

/// Built graphs keyed by universe fingerprint and build options.
///
/// Lookups for the same key build at most once: the map lock finds or
/// creates the key's slot, and the slot lock is held while the graph builds.
/// Failed builds are not cached.
#[derive(Default)]
pub struct GraphCache {
    slots: Mutex<HashMap<CacheKey, Slot>>,
}

impl GraphCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_build(
        &self,
        universe: &Arc<SymbolUniverse>,
        options: GraphOptions,
    ) -> Result<Arc<ModulesGraph>, ConfigurationError> {
        let key = CacheKey::new(universe, &options);
        let slot = {
            let mut slots = self.slots.lock().unwrap_or_else(|e| e.into_inner());
            Arc::clone(slots.entry(key).or_default())
        };

        let mut guard = slot.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(graph) = guard.as_ref() {
            tracing::debug!("graph cache hit for {}", options.roots.join(", "));
            return Ok(Arc::clone(graph));
        }
        let graph = Arc::new(ModulesGraph::build(Arc::clone(universe), options)?);
        *guard = Some(Arc::clone(&graph));
        Ok(graph)
    }

    /// Number of cached graphs.
    pub fn len(&self) -> usize {
        let slots = self.slots.lock().unwrap_or_else(|e| e.into_inner());
        slots
            .values()
            .filter(|slot| slot.lock().map(|g| g.is_some()).unwrap_or(false))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.slots
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
    }
}

impl std::fmt::Debug for GraphCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphCache").field("len", &self.len()).finish()
    }
}
