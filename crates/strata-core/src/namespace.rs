use std::sync::Arc;

use crate::types::{NamespaceInfo, Symbol, SymbolId};
use crate::universe::SymbolUniverse;

/// Parent of a dotted namespace name. The root namespace `""` has no parent.
pub fn parent_of(namespace: &str) -> Option<&str> {
    if namespace.is_empty() {
        return None;
    }
    match namespace.rfind('.') {
        Some(pos) => Some(&namespace[..pos]),
        None => Some(""),
    }
}

/// True if `candidate` is `namespace` itself or one of its sub-namespaces.
pub fn is_within(namespace: &str, candidate: &str) -> bool {
    if namespace.is_empty() {
        return true;
    }
    candidate == namespace
        || (candidate.len() > namespace.len()
            && candidate.starts_with(namespace)
            && candidate.as_bytes()[namespace.len()] == b'.')
}

/// Last segment of a namespace name (`orders` for `com.acme.orders`).
pub fn local_name_of(namespace: &str) -> &str {
    namespace.rsplit('.').next().unwrap_or(namespace)
}

/// A view of one namespace of a [`SymbolUniverse`].
#[derive(Clone)]
pub struct Namespace {
    universe: Arc<SymbolUniverse>,
    name: String,
}

impl Namespace {
    pub fn new(universe: Arc<SymbolUniverse>, name: impl Into<String>) -> Self {
        Self {
            universe,
            name: name.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn local_name(&self) -> &str {
        local_name_of(&self.name)
    }

    pub fn universe(&self) -> &Arc<SymbolUniverse> {
        &self.universe
    }

    pub fn info(&self) -> Option<&NamespaceInfo> {
        self.universe.namespace_info(&self.name)
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.universe.namespace_has_tag(&self.name, tag)
    }

    /// Symbols in this namespace and all of its sub-namespaces.
    pub fn symbols(&self) -> Vec<SymbolId> {
        self.universe.in_namespace(&self.name)
    }

    /// Symbols declared directly in this namespace.
    pub fn direct_symbols(&self) -> Vec<SymbolId> {
        self.universe.directly_in(&self.name).to_vec()
    }

    pub fn filter<P>(&self, predicate: P) -> Vec<SymbolId>
    where
        P: Fn(&Symbol) -> bool,
    {
        let mut ids = self.symbols();
        ids.retain(|id| predicate(self.universe.symbol(*id)));
        ids
    }

    /// Whether `symbol` lies in this namespace, by name only.
    pub fn contains(&self, symbol: &Symbol) -> bool {
        is_within(&self.name, &symbol.namespace)
    }

    pub fn contains_namespace(&self, namespace: &str) -> bool {
        is_within(&self.name, namespace)
    }

    pub fn direct_sub_namespaces(&self) -> Vec<Namespace> {
        self.universe
            .direct_sub_namespaces(&self.name)
            .into_iter()
            .map(|name| Namespace::new(Arc::clone(&self.universe), name))
            .collect()
    }

    pub fn sub_namespaces(&self) -> Vec<Namespace> {
        self.universe
            .sub_namespaces(&self.name)
            .into_iter()
            .map(|name| Namespace::new(Arc::clone(&self.universe), name))
            .collect()
    }

    pub fn sub_namespace(&self, local: &str) -> Namespace {
        let name = if self.name.is_empty() {
            local.to_string()
        } else {
            format!("{}.{}", self.name, local)
        };
        Namespace::new(Arc::clone(&self.universe), name)
    }

    pub fn parent(&self) -> Option<Namespace> {
        parent_of(&self.name).map(|p| Namespace::new(Arc::clone(&self.universe), p))
    }

    /// Name relative to `ancestor` (`orders.api` for `com.acme.orders.api` under `com.acme`).
    pub fn relative_to<'a>(&'a self, ancestor: &str) -> &'a str {
        if ancestor.is_empty() || !is_within(ancestor, &self.name) || self.name == ancestor {
            return &self.name;
        }
        &self.name[ancestor.len() + 1..]
    }
}

impl std::fmt::Debug for Namespace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Namespace").field("name", &self.name).finish()
    }
}

impl std::fmt::Display for Namespace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

impl PartialEq for Namespace {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.universe.fingerprint() == other.universe.fingerprint()
    }
}

impl Eq for Namespace {}
