//! The modules graph: every module of an application, indexed by name and
//! by owned symbol.
//!
//! Construction runs in two phases. Phase 1 builds module shells in parallel
//! and forces their qualifying symbols. Phase 2 happens lazily: dependency
//! edges carry target [`SymbolId`]s and are resolved against the completed
//! owner index the first time a module's dependencies are requested.
//!
//! Symbol ids are those of the universe handed to [`ModulesGraph::build`];
//! roots and ignore patterns only restrict which symbols the graph sees.

use std::borrow::Cow;
use std::collections::{BTreeSet, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

use rayon::prelude::*;
use strata_core::classifier::{default_classifier, StereotypeClassifier};
use strata_core::config::{DetectionStrategy, NamingMode, StrataConfig};
use strata_core::ignore::IgnorePatterns;
use strata_core::namespace::is_within;
use strata_core::type_names::StandardLibrary;
use strata_core::{Namespace, SymbolId, SymbolUniverse};

use crate::error::ConfigurationError;
use crate::module::{Module, ModuleDependencies};

/// Inputs of a graph build.
#[derive(Clone)]
pub struct GraphOptions {
    pub roots: Vec<String>,
    pub ignore: IgnorePatterns,
    pub detection: DetectionStrategy,
    pub naming: NamingMode,
    pub shared_modules: Vec<String>,
    pub classifier: Arc<dyn StereotypeClassifier>,
    pub standard_library: Arc<StandardLibrary>,
}

impl Default for GraphOptions {
    fn default() -> Self {
        Self {
            roots: Vec::new(),
            ignore: IgnorePatterns::none(),
            detection: DetectionStrategy::default(),
            naming: NamingMode::default(),
            shared_modules: Vec::new(),
            classifier: default_classifier(),
            standard_library: Arc::new(StandardLibrary::default()),
        }
    }
}

impl GraphOptions {
    pub fn new<I, S>(roots: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            roots: roots.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn from_config(config: &StrataConfig) -> Result<Self, ConfigurationError> {
        Ok(Self {
            roots: config.roots.clone(),
            ignore: config.ignore()?,
            detection: config.detection,
            naming: config.naming,
            shared_modules: config.shared_modules.clone(),
            classifier: config.classifier(),
            standard_library: Arc::new(config.standard_library()),
        })
    }

    pub fn ignoring(mut self, ignore: IgnorePatterns) -> Self {
        self.ignore = ignore;
        self
    }

    pub fn detection(mut self, detection: DetectionStrategy) -> Self {
        self.detection = detection;
        self
    }

    pub fn naming(mut self, naming: NamingMode) -> Self {
        self.naming = naming;
        self
    }

    pub fn shared<I, S>(mut self, modules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.shared_modules = modules.into_iter().map(Into::into).collect();
        self
    }

    pub fn classifier(mut self, classifier: Arc<dyn StereotypeClassifier>) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn standard_library(mut self, standard_library: StandardLibrary) -> Self {
        self.standard_library = Arc::new(standard_library);
        self
    }
}

impl std::fmt::Debug for GraphOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphOptions")
            .field("roots", &self.roots)
            .field("ignore", &self.ignore.patterns())
            .field("detection", &self.detection)
            .field("naming", &self.naming)
            .field("shared_modules", &self.shared_modules)
            .field("classifier", &self.classifier.name())
            .finish()
    }
}

/// A namespace selected to become a module.
struct Candidate {
    root: String,
    namespace: String,
}

pub struct ModulesGraph {
    universe: Arc<SymbolUniverse>,
    options: GraphOptions,
    /// Sorted by module name.
    modules: Vec<Module>,
    by_name: HashMap<String, usize>,
    owners: HashMap<SymbolId, usize>,
    shared: Vec<usize>,
    /// Resolved dependencies per module, parallel to `modules`.
    resolved: Vec<OnceLock<ModuleDependencies>>,
    verified: AtomicBool,
}

impl ModulesGraph {
    /// Graph over a single root namespace with default options.
    pub fn of(
        universe: Arc<SymbolUniverse>,
        root: &str,
        ignore: IgnorePatterns,
    ) -> Result<Self, ConfigurationError> {
        Self::build(universe, GraphOptions::new([root]).ignoring(ignore))
    }

    pub fn build(
        universe: Arc<SymbolUniverse>,
        options: GraphOptions,
    ) -> Result<Self, ConfigurationError> {
        let roots = validate_roots(&universe, &options.roots)?;
        let imported = Arc::new(universe.import_symbols(&roots, &options.ignore));
        let candidates = match options.detection {
            DetectionStrategy::DirectSubNamespaces => direct_candidates(&imported, &roots)?,
            DetectionStrategy::ExplicitlyAnnotated => annotated_candidates(&imported, &roots)?,
        };

        // Phase 1: module shells, one task per candidate namespace.
        let mut modules = candidates
            .par_iter()
            .map(|candidate| {
                let namespace = Namespace::new(Arc::clone(&imported), candidate.namespace.clone());
                let name = match options.naming {
                    NamingMode::Local => namespace.relative_to(&candidate.root).to_string(),
                    NamingMode::FullyQualified => namespace.name().to_string(),
                };
                let module = Module::new(
                    name,
                    candidate.root.clone(),
                    namespace,
                    Arc::clone(&options.classifier),
                    Arc::clone(&options.standard_library),
                )?;
                module.qualifying_symbols();
                Ok(module)
            })
            .collect::<Result<Vec<Module>, ConfigurationError>>()?;

        modules.sort_by(|a, b| a.name().cmp(b.name()));
        for pair in modules.windows(2) {
            if pair[0].name() == pair[1].name() {
                return Err(ConfigurationError::DuplicateModule {
                    name: pair[0].name().to_string(),
                    first: pair[0].namespace().name().to_string(),
                    second: pair[1].namespace().name().to_string(),
                });
            }
        }

        let by_name: HashMap<String, usize> = modules
            .iter()
            .enumerate()
            .map(|(i, m)| (m.name().to_string(), i))
            .collect();

        let mut owners = HashMap::new();
        for (i, module) in modules.iter().enumerate() {
            for id in module.namespace().symbols() {
                owners.insert(id, i);
            }
        }

        let mut shared = Vec::new();
        for name in &options.shared_modules {
            match by_name.get(name) {
                Some(index) => shared.push(*index),
                None => return Err(ConfigurationError::UnknownSharedModule(name.clone())),
            }
        }

        tracing::info!(
            modules = modules.len(),
            symbols = imported.len(),
            owned = owners.len(),
            "built modules graph for {}",
            roots.join(", ")
        );

        let resolved = modules.iter().map(|_| OnceLock::new()).collect();

        Ok(Self {
            universe: imported,
            options,
            modules,
            by_name,
            owners,
            shared,
            resolved,
            verified: AtomicBool::new(false),
        })
    }

    /// The imported view modules were built from. It shares the arena of the
    /// universe passed to [`build`](Self::build), so ids from either resolve here.
    pub fn universe(&self) -> &Arc<SymbolUniverse> {
        &self.universe
    }

    pub fn options(&self) -> &GraphOptions {
        &self.options
    }

    pub fn classifier(&self) -> &dyn StereotypeClassifier {
        self.options.classifier.as_ref()
    }

    pub fn roots(&self) -> &[String] {
        &self.options.roots
    }

    /// All modules in name order.
    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    pub fn module_by_name(&self, name: &str) -> Option<&Module> {
        self.by_name.get(name).map(|i| &self.modules[*i])
    }

    pub fn module_owning(&self, symbol: SymbolId) -> Option<&Module> {
        self.owners.get(&symbol).map(|i| &self.modules[*i])
    }

    pub fn module_owning_name(&self, qualified_name: &str) -> Option<&Module> {
        self.universe
            .lookup(qualified_name)
            .and_then(|id| self.module_owning(id))
    }

    /// Every dependency of `module`, memoized when the module belongs to this graph.
    pub(crate) fn resolved_dependencies(&self, module: &Module) -> Cow<'_, ModuleDependencies> {
        match self.by_name.get(module.name()) {
            Some(&i) if std::ptr::eq(&self.modules[i], module) => {
                Cow::Borrowed(self.resolved[i].get_or_init(|| module.resolve_dependencies(self)))
            }
            _ => Cow::Owned(module.resolve_dependencies(self)),
        }
    }

    pub fn modules_of_root<'a>(&'a self, root: &'a str) -> impl Iterator<Item = &'a Module> {
        self.modules.iter().filter(move |m| m.root() == root)
    }

    pub fn shared_modules(&self) -> impl Iterator<Item = &Module> {
        self.shared.iter().map(|i| &self.modules[*i])
    }

    pub fn is_verified(&self) -> bool {
        self.verified.load(Ordering::Acquire)
    }

    /// Record a verification pass without violations.
    pub fn mark_verified(&self) {
        self.verified.store(true, Ordering::Release);
    }
}

impl std::fmt::Debug for ModulesGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModulesGraph")
            .field("roots", &self.options.roots)
            .field("modules", &self.modules)
            .finish()
    }
}

fn validate_roots(
    universe: &SymbolUniverse,
    roots: &[String],
) -> Result<Vec<String>, ConfigurationError> {
    let roots: Vec<String> = roots
        .iter()
        .map(|r| r.trim().to_string())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    if roots.is_empty() {
        return Err(ConfigurationError::NoRoots);
    }
    for root in &roots {
        if !root.is_empty() && !universe.has_namespace(root) {
            return Err(ConfigurationError::UnknownRoot(root.clone()));
        }
    }
    for (i, outer) in roots.iter().enumerate() {
        for inner in &roots[i + 1..] {
            if is_within(outer, inner) || is_within(inner, outer) {
                return Err(ConfigurationError::OverlappingRoots {
                    outer: outer.clone(),
                    inner: inner.clone(),
                });
            }
        }
    }
    Ok(roots)
}

fn root_of<'a>(roots: &'a [String], namespace: &str) -> Option<&'a String> {
    roots.iter().find(|root| is_within(root, namespace))
}

fn declared_modules(universe: &SymbolUniverse) -> impl Iterator<Item = &str> {
    universe
        .namespace_infos()
        .filter(|info| info.module.is_some())
        .map(|info| info.name.as_str())
}

fn direct_candidates(
    universe: &SymbolUniverse,
    roots: &[String],
) -> Result<Vec<Candidate>, ConfigurationError> {
    let mut candidates = Vec::new();
    for root in roots {
        for namespace in universe.direct_sub_namespaces(root) {
            candidates.push(Candidate {
                root: root.clone(),
                namespace,
            });
        }
    }
    for declared in declared_modules(universe) {
        if !candidates.iter().any(|c| c.namespace == declared) {
            return Err(ConfigurationError::ConflictingDetection {
                namespace: declared.to_string(),
            });
        }
    }
    Ok(candidates)
}

fn annotated_candidates(
    universe: &SymbolUniverse,
    roots: &[String],
) -> Result<Vec<Candidate>, ConfigurationError> {
    let declared: Vec<&str> = declared_modules(universe).collect();
    for outer in &declared {
        if let Some(inner) = declared
            .iter()
            .find(|inner| *inner != outer && is_within(outer, inner))
        {
            return Err(ConfigurationError::NestedModules {
                outer: outer.to_string(),
                inner: inner.to_string(),
            });
        }
    }
    Ok(declared
        .into_iter()
        .filter_map(|namespace| {
            root_of(roots, namespace).map(|root| Candidate {
                root: root.clone(),
                namespace: namespace.to_string(),
            })
        })
        .collect())
}
