//! Application modules: one namespace plus everything derived from it.

use std::collections::{BTreeSet, HashSet, VecDeque};
use std::fmt::Write as _;
use std::sync::{Arc, OnceLock};

use strata_core::classifier::StereotypeClassifier;
use strata_core::type_names::{type_names, StandardLibrary};
use strata_core::types::ModuleDeclaration;
use strata_core::{Namespace, SymbolId, SymbolUniverse};

use crate::dependency::{self, DependencyDepth, DependencyType, ModuleDependency};
use crate::error::ConfigurationError;
use crate::graph::ModulesGraph;
use crate::interfaces::{NamedInterface, NamedInterfaces};

/// One entry of a module's allow-list: `inventory`, `inventory::api`, or `inventory::*`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AllowedDependency {
    pub module: String,
    /// `None` admits the whole module, `Some("*")` any of its named interfaces.
    pub interface: Option<String>,
}

impl AllowedDependency {
    pub fn parse(entry: &str) -> Self {
        match entry.split_once("::") {
            Some((module, interface)) => Self {
                module: module.trim().to_string(),
                interface: Some(interface.trim().to_string()),
            },
            None => Self {
                module: entry.trim().to_string(),
                interface: None,
            },
        }
    }

    pub fn module(name: impl Into<String>) -> Self {
        Self {
            module: name.into(),
            interface: None,
        }
    }

    /// Whether a reference to `symbol` inside `target` is admitted by this entry.
    pub fn admits(&self, target: &Module, symbol: SymbolId) -> bool {
        if self.module != target.name() {
            return false;
        }
        match self.interface.as_deref() {
            None => true,
            Some("*") => target.named_interfaces().contains(symbol),
            Some(name) => target
                .named_interfaces()
                .get(name)
                .is_some_and(|i| i.contains(symbol)),
        }
    }
}

impl std::fmt::Display for AllowedDependency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.interface {
            Some(interface) => write!(f, "{}::{}", self.module, interface),
            None => f.write_str(&self.module),
        }
    }
}

/// A module's effective allow-list. Empty means unrestricted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowedDependencies {
    entries: Vec<AllowedDependency>,
}

impl AllowedDependencies {
    pub fn unrestricted() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AllowedDependency> {
        self.entries.iter()
    }

    /// Distinct module names mentioned by the allow-list.
    pub fn module_names(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.entries
            .iter()
            .map(|e| e.module.as_str())
            .filter(|m| seen.insert(*m))
            .collect()
    }

    pub fn admits(&self, target: &Module, symbol: SymbolId) -> bool {
        self.is_empty() || self.entries.iter().any(|e| e.admits(target, symbol))
    }
}

impl std::fmt::Display for AllowedDependencies {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rendered: Vec<String> = self.entries.iter().map(|e| e.to_string()).collect();
        f.write_str(&rendered.join(", "))
    }
}

/// A dependency edge resolved against a graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolvedDependency {
    pub edge: ModuleDependency,
    pub source_module: String,
    pub target_module: String,
}

impl ResolvedDependency {
    pub fn dependency_type(&self) -> DependencyType {
        self.edge.dependency_type
    }
}

/// Resolved, deduplicated dependencies of one module, in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleDependencies {
    items: Vec<ResolvedDependency>,
}

impl ModuleDependencies {
    pub fn iter(&self) -> impl Iterator<Item = &ResolvedDependency> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Distinct target module names, in first-seen order.
    pub fn modules(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.items
            .iter()
            .map(|d| d.target_module.as_str())
            .filter(|m| seen.insert(*m))
            .collect()
    }

    pub fn contains_module(&self, name: &str) -> bool {
        self.items.iter().any(|d| d.target_module == name)
    }

    pub fn contains_type(&self, dependency_type: DependencyType) -> bool {
        self.items.iter().any(|d| d.dependency_type() == dependency_type)
    }
}

impl<'a> IntoIterator for &'a ModuleDependencies {
    type Item = &'a ResolvedDependency;
    type IntoIter = std::slice::Iter<'a, ResolvedDependency>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// An application module.
///
/// Qualifying symbols, named interfaces, and raw dependency edges are
/// computed on first access and memoized for the life of the module.
pub struct Module {
    name: String,
    display_name: String,
    root: String,
    namespace: Namespace,
    declaration: ModuleDeclaration,
    classifier: Arc<dyn StereotypeClassifier>,
    standard_library: Arc<StandardLibrary>,
    qualifying: OnceLock<Vec<SymbolId>>,
    interfaces: OnceLock<NamedInterfaces>,
    edges: OnceLock<Vec<ModuleDependency>>,
}

impl Module {
    pub fn new(
        name: impl Into<String>,
        root: impl Into<String>,
        namespace: Namespace,
        classifier: Arc<dyn StereotypeClassifier>,
        standard_library: Arc<StandardLibrary>,
    ) -> Result<Self, ConfigurationError> {
        let declaration = namespace
            .info()
            .and_then(|info| info.module.clone())
            .unwrap_or_default();
        let display_name = match declaration.display_name.as_deref() {
            Some(explicit) => explicit.trim().to_string(),
            None => namespace.local_name().to_string(),
        };
        if display_name.is_empty() {
            return Err(ConfigurationError::BlankDisplayName(
                namespace.name().to_string(),
            ));
        }
        Ok(Self {
            name: name.into(),
            display_name,
            root: root.into(),
            namespace,
            declaration,
            classifier,
            standard_library,
            qualifying: OnceLock::new(),
            interfaces: OnceLock::new(),
            edges: OnceLock::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Root namespace this module was discovered under.
    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    pub fn universe(&self) -> &SymbolUniverse {
        self.namespace.universe()
    }

    pub fn declaration(&self) -> &ModuleDeclaration {
        &self.declaration
    }

    pub fn is_open(&self) -> bool {
        self.declaration.open
    }

    pub fn contains(&self, symbol: SymbolId) -> bool {
        self.universe()
            .get(symbol)
            .is_some_and(|s| self.namespace.contains(s))
    }

    pub fn contains_name(&self, qualified_name: &str) -> bool {
        self.universe()
            .lookup(qualified_name)
            .is_some_and(|id| self.contains(id))
    }

    /// Symbols the module owns and manages: components, entities,
    /// repositories, and products of factory methods declared in the module.
    pub fn qualifying_symbols(&self) -> &[SymbolId] {
        self.qualifying.get_or_init(|| self.compute_qualifying_symbols())
    }

    fn compute_qualifying_symbols(&self) -> Vec<SymbolId> {
        let universe = self.universe();
        let classifier = self.classifier.as_ref();
        let mut qualifying: BTreeSet<SymbolId> = self
            .namespace
            .filter(|s| {
                classifier.is_component(s) || classifier.is_entity(s) || classifier.is_repository(s)
            })
            .into_iter()
            .collect();

        for id in self.namespace.filter(|s| classifier.is_configuration_context(s)) {
            let factories = universe
                .symbol(id)
                .members
                .iter()
                .filter(|m| classifier.is_factory_method(m));
            for factory in factories {
                let Some(product) = &factory.value_type else { continue };
                for name in type_names(product) {
                    if let Some(product_id) = universe.lookup(name) {
                        if self.namespace.contains(universe.symbol(product_id)) {
                            qualifying.insert(product_id);
                        }
                    }
                }
            }
        }
        qualifying.into_iter().collect()
    }

    /// Declared named interfaces merged by name, or the default interface.
    pub fn named_interfaces(&self) -> &NamedInterfaces {
        self.interfaces.get_or_init(|| self.compute_named_interfaces())
    }

    fn compute_named_interfaces(&self) -> NamedInterfaces {
        let universe = self.universe();
        let namespaced = std::iter::once(self.namespace.clone())
            .chain(self.namespace.sub_namespaces())
            .flat_map(|ns| {
                let names = ns
                    .info()
                    .map(|info| info.named_interfaces.clone())
                    .unwrap_or_default();
                names
                    .into_iter()
                    .map(move |name| NamedInterface::namespaced(name, &ns))
                    .collect::<Vec<_>>()
            });
        let typed = self.namespace.symbols().into_iter().flat_map(|id| {
            universe
                .symbol(id)
                .named_interfaces
                .iter()
                .map(move |name| NamedInterface::typed(name.clone(), [id]))
                .collect::<Vec<_>>()
        });

        NamedInterfaces::of(namespaced)
            .and(NamedInterfaces::of(typed))
            .or_unnamed(&self.namespace)
    }

    /// Whether other modules may reference `symbol`.
    pub fn is_exposed(&self, symbol: SymbolId) -> bool {
        if self.is_open() {
            return self.contains(symbol);
        }
        self.named_interfaces().contains(symbol)
    }

    /// Explicit allow-list plus the graph's shared modules. Empty means unrestricted.
    pub fn allowed_dependencies(&self, graph: &ModulesGraph) -> AllowedDependencies {
        if self.declaration.allowed_dependencies.is_empty() {
            return AllowedDependencies::unrestricted();
        }
        let mut entries: Vec<AllowedDependency> = self
            .declaration
            .allowed_dependencies
            .iter()
            .map(|e| AllowedDependency::parse(e))
            .collect();
        for shared in graph.shared_modules() {
            if shared.name() == self.name {
                continue;
            }
            let entry = AllowedDependency::module(shared.name());
            if !entries.contains(&entry) {
                entries.push(entry);
            }
        }
        AllowedDependencies { entries }
    }

    /// Raw edges from every qualifying symbol to symbols outside this namespace.
    pub fn dependency_edges(&self) -> &[ModuleDependency] {
        self.edges.get_or_init(|| {
            let universe = self.universe();
            self.qualifying_symbols()
                .iter()
                .flat_map(|origin| {
                    dependency::discover(
                        universe,
                        self.classifier.as_ref(),
                        &self.standard_library,
                        &self.namespace,
                        *origin,
                    )
                })
                .collect()
        })
    }

    /// Edges of the given types resolved to their target modules.
    ///
    /// An empty `types` slice selects every type. Targets not owned by any
    /// module of `graph` are skipped.
    pub fn dependencies(&self, graph: &ModulesGraph, types: &[DependencyType]) -> ModuleDependencies {
        let all = graph.resolved_dependencies(self);
        if types.is_empty() {
            return all.into_owned();
        }
        ModuleDependencies {
            items: all
                .iter()
                .filter(|d| types.contains(&d.dependency_type()))
                .cloned()
                .collect(),
        }
    }

    pub(crate) fn resolve_dependencies(&self, graph: &ModulesGraph) -> ModuleDependencies {
        let mut seen = HashSet::new();
        let mut items = Vec::new();
        for edge in self.dependency_edges() {
            let Some(target) = graph.module_owning(edge.target) else {
                tracing::debug!(
                    module = %self.name,
                    "skipping edge without owning module: {}",
                    edge.describe(self.universe())
                );
                continue;
            };
            if target.name() == self.name {
                continue;
            }
            if seen.insert(edge.clone()) {
                items.push(ResolvedDependency {
                    edge: edge.clone(),
                    source_module: self.name.clone(),
                    target_module: target.name().to_string(),
                });
            }
        }
        ModuleDependencies { items }
    }

    pub fn depends_on(&self, graph: &ModulesGraph, other: &str) -> bool {
        self.dependencies(graph, &[]).contains_module(other)
    }

    /// Modules whose components this module needs to start, to the given depth.
    pub fn bootstrap_dependencies<'g>(
        &self,
        graph: &'g ModulesGraph,
        depth: DependencyDepth,
    ) -> Vec<&'g Module> {
        let direct = |module: &Module| -> Vec<&'g Module> {
            module
                .dependencies(graph, &[DependencyType::UsesComponent])
                .modules()
                .into_iter()
                .filter_map(|name| graph.module_by_name(name))
                .collect()
        };

        match depth {
            DependencyDepth::None => Vec::new(),
            DependencyDepth::Immediate => direct(self),
            DependencyDepth::All => {
                let mut visited: HashSet<&str> = HashSet::from([self.name.as_str()]);
                let mut result = Vec::new();
                let mut queue: VecDeque<&'g Module> = direct(self).into_iter().collect();
                while let Some(module) = queue.pop_front() {
                    if !visited.insert(module.name()) {
                        continue;
                    }
                    result.push(module);
                    queue.extend(direct(module));
                }
                result
            }
        }
    }

    /// Multi-line diagnostic rendering. Not a stable format.
    pub fn describe(&self, graph: Option<&ModulesGraph>) -> String {
        let universe = self.universe();
        let mut out = String::new();
        let _ = writeln!(out, "# {}", self.display_name);
        let _ = writeln!(out, "> Logical name: {}", self.name);
        let _ = writeln!(out, "> Namespace: {}", self.namespace.name());

        if let Some(graph) = graph {
            let allowed = self.allowed_dependencies(graph);
            if !allowed.is_empty() {
                let _ = writeln!(out, "> Allowed dependencies: {}", allowed);
            }
            let bootstrap = self.bootstrap_dependencies(graph, DependencyDepth::Immediate);
            if !bootstrap.is_empty() {
                let names: Vec<&str> = bootstrap.iter().map(|m| m.name()).collect();
                let _ = writeln!(out, "> Direct module dependencies: {}", names.join(", "));
            }
        }

        let _ = writeln!(out, "> Named interfaces:");
        for interface in self.named_interfaces().iter() {
            let _ = writeln!(out, ">   {} ({} symbols)", interface.name(), interface.len());
        }

        let _ = writeln!(out, "> Qualifying symbols:");
        if self.qualifying_symbols().is_empty() {
            let _ = writeln!(out, ">   none");
        }
        for id in self.qualifying_symbols() {
            let symbol = universe.symbol(*id);
            let marker = if self.is_exposed(*id) { "+" } else { "o" };
            let _ = writeln!(out, ">   {} {}", marker, symbol.name);
        }
        out
    }
}

impl std::fmt::Debug for Module {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Module")
            .field("name", &self.name)
            .field("display_name", &self.display_name)
            .field("namespace", &self.namespace.name())
            .finish()
    }
}

impl std::fmt::Display for Module {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.display_name, self.namespace.name())
    }
}

#[cfg(test)]
#[path = "module_tests.rs"]
mod tests;
