//! The symbol universe: an immutable, indexed snapshot of the analyzed codebase.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::ops::Bound;
use std::sync::Arc;

use crate::error::CoreError;
use crate::hash;
use crate::ignore::IgnorePatterns;
use crate::namespace::{is_within, parent_of};
use crate::types::{NamespaceInfo, Symbol, SymbolId};

/// Flat set of symbols plus namespace metadata.
///
/// Symbols are stored sorted by qualified name, so [`SymbolId`]s and every
/// query result come out in a stable order. A universe produced by
/// [`import_symbols`](Self::import_symbols) shares the symbol arena of its
/// source: ids stay valid across both, only membership differs.
#[derive(Debug, Clone)]
pub struct SymbolUniverse {
    symbols: Arc<[Symbol]>,
    /// Membership per arena slot.
    visible: Vec<bool>,
    len: usize,
    index: HashMap<String, SymbolId>,
    by_namespace: BTreeMap<String, Vec<SymbolId>>,
    namespaces: BTreeMap<String, NamespaceInfo>,
    known_namespaces: BTreeSet<String>,
    fingerprint: String,
}

#[derive(Debug, Default)]
pub struct SymbolUniverseBuilder {
    symbols: Vec<Symbol>,
    namespaces: Vec<NamespaceInfo>,
}

impl SymbolUniverseBuilder {
    pub fn symbol(mut self, symbol: Symbol) -> Self {
        self.symbols.push(symbol);
        self
    }

    pub fn symbols<I: IntoIterator<Item = Symbol>>(mut self, symbols: I) -> Self {
        self.symbols.extend(symbols);
        self
    }

    pub fn namespace(mut self, info: NamespaceInfo) -> Self {
        self.namespaces.push(info);
        self
    }

    pub fn build(self) -> Result<SymbolUniverse, CoreError> {
        SymbolUniverse::assemble(self.symbols, self.namespaces)
    }
}

impl SymbolUniverse {
    pub fn builder() -> SymbolUniverseBuilder {
        SymbolUniverseBuilder::default()
    }

    pub fn empty() -> Self {
        Self::view(Arc::from(Vec::new()), Vec::new(), BTreeMap::new())
    }

    pub(crate) fn assemble(
        mut symbols: Vec<Symbol>,
        namespace_infos: Vec<NamespaceInfo>,
    ) -> Result<Self, CoreError> {
        symbols.sort_by(|a, b| a.name.cmp(&b.name));

        for pair in symbols.windows(2) {
            if pair[0].name == pair[1].name {
                return Err(CoreError::DuplicateSymbol(pair[0].name.clone()));
            }
        }
        for symbol in &symbols {
            if !symbol.namespace.is_empty()
                && !symbol.name.starts_with(&format!("{}.", symbol.namespace))
            {
                return Err(CoreError::NamespaceMismatch {
                    symbol: symbol.name.clone(),
                    namespace: symbol.namespace.clone(),
                });
            }
        }

        let mut namespaces: BTreeMap<String, NamespaceInfo> = BTreeMap::new();
        for info in namespace_infos {
            match namespaces.get_mut(&info.name) {
                Some(existing) => {
                    existing.tags.extend(info.tags);
                    existing.named_interfaces.extend(info.named_interfaces);
                    if info.module.is_some() {
                        existing.module = info.module;
                    }
                }
                None => {
                    namespaces.insert(info.name.clone(), info);
                }
            }
        }

        let visible = vec![true; symbols.len()];
        Ok(Self::view(Arc::from(symbols), visible, namespaces))
    }

    /// Index the visible part of a validated, sorted arena.
    fn view(
        symbols: Arc<[Symbol]>,
        visible: Vec<bool>,
        namespaces: BTreeMap<String, NamespaceInfo>,
    ) -> Self {
        let mut index = HashMap::new();
        let mut by_namespace: BTreeMap<String, Vec<SymbolId>> = BTreeMap::new();
        for (i, symbol) in symbols.iter().enumerate() {
            if !visible[i] {
                continue;
            }
            index.insert(symbol.name.clone(), SymbolId(i));
            by_namespace
                .entry(symbol.namespace.clone())
                .or_default()
                .push(SymbolId(i));
        }

        let mut known_namespaces = BTreeSet::new();
        let declared = namespaces.keys().map(String::as_str);
        for ns in by_namespace.keys().map(String::as_str).chain(declared) {
            let mut current = Some(ns);
            while let Some(name) = current {
                if !known_namespaces.insert(name.to_string()) {
                    break;
                }
                current = parent_of(name);
            }
        }

        let members = symbols
            .iter()
            .zip(&visible)
            .filter(|(_, v)| **v)
            .map(|(s, _)| s);
        let fingerprint = Self::compute_fingerprint(members, &namespaces);

        Self {
            len: index.len(),
            symbols,
            visible,
            index,
            by_namespace,
            namespaces,
            known_namespaces,
            fingerprint,
        }
    }

    fn compute_fingerprint<'a>(
        symbols: impl Iterator<Item = &'a Symbol>,
        namespaces: &BTreeMap<String, NamespaceInfo>,
    ) -> String {
        let serialized: Vec<String> = symbols
            .map(|s| serde_json::to_string(s).unwrap_or_else(|_| s.name.clone()))
            .chain(
                namespaces
                    .values()
                    .map(|n| serde_json::to_string(n).unwrap_or_else(|_| n.name.clone())),
            )
            .collect();
        hash::fingerprint(serialized.iter().map(String::as_str))
    }

    /// Content fingerprint identifying this snapshot.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    /// Number of member symbols.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The arena entry for `id`. Ids of a source universe resolve here too.
    pub fn symbol(&self, id: SymbolId) -> &Symbol {
        &self.symbols[id.index()]
    }

    /// The symbol for `id` if it is a member of this universe.
    pub fn get(&self, id: SymbolId) -> Option<&Symbol> {
        self.contains(id).then(|| self.symbol(id))
    }

    pub fn contains(&self, id: SymbolId) -> bool {
        self.visible.get(id.index()).copied().unwrap_or(false)
    }

    pub fn lookup(&self, qualified_name: &str) -> Option<SymbolId> {
        self.index.get(qualified_name).copied()
    }

    pub fn resolve(&self, qualified_name: &str) -> Option<&Symbol> {
        self.lookup(qualified_name).map(|id| self.symbol(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = (SymbolId, &Symbol)> {
        self.symbols
            .iter()
            .enumerate()
            .filter(|(i, _)| self.visible[*i])
            .map(|(i, s)| (SymbolId(i), s))
    }

    /// Symbols declared directly in `namespace`.
    pub fn directly_in(&self, namespace: &str) -> &[SymbolId] {
        self.by_namespace
            .get(namespace)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Symbols in `prefix` or any of its sub-namespaces.
    pub fn in_namespace(&self, prefix: &str) -> Vec<SymbolId> {
        let mut ids: Vec<SymbolId> = self
            .by_namespace
            .range::<str, _>((Bound::Included(prefix), Bound::Unbounded))
            .take_while(|(ns, _)| ns.starts_with(prefix))
            .filter(|(ns, _)| is_within(prefix, ns))
            .flat_map(|(_, ids)| ids.iter().copied())
            .collect();
        ids.sort_unstable();
        ids
    }

    pub fn filter<P>(&self, predicate: P) -> Vec<SymbolId>
    where
        P: Fn(&Symbol) -> bool,
    {
        self.iter()
            .filter(|(_, s)| predicate(s))
            .map(|(id, _)| id)
            .collect()
    }

    /// Namespaces whose immediate parent is `namespace`.
    pub fn direct_sub_namespaces(&self, namespace: &str) -> Vec<String> {
        self.known_namespaces
            .iter()
            .filter(|ns| ns.as_str() != namespace && parent_of(ns) == Some(namespace))
            .cloned()
            .collect()
    }

    /// All namespaces below `namespace` at any depth, in name order.
    pub fn sub_namespaces(&self, namespace: &str) -> Vec<String> {
        self.known_namespaces
            .iter()
            .filter(|ns| ns.as_str() != namespace && is_within(namespace, ns))
            .cloned()
            .collect()
    }

    pub fn has_namespace(&self, namespace: &str) -> bool {
        self.known_namespaces.contains(namespace)
    }

    pub fn namespace_info(&self, namespace: &str) -> Option<&NamespaceInfo> {
        self.namespaces.get(namespace)
    }

    pub fn namespace_infos(&self) -> impl Iterator<Item = &NamespaceInfo> {
        self.namespaces.values()
    }

    pub fn symbol_has_tag(&self, id: SymbolId, tag: &str) -> bool {
        self.get(id).is_some_and(|s| s.has_tag(tag))
    }

    pub fn namespace_has_tag(&self, namespace: &str, tag: &str) -> bool {
        self.namespaces
            .get(namespace)
            .is_some_and(|info| info.tags.contains(tag))
    }

    /// Restrict this universe to `roots`, dropping ignored symbols.
    ///
    /// The result shares this universe's arena, so every [`SymbolId`] keeps
    /// naming the same symbol. Namespace declarations outside the roots are
    /// dropped along with the symbols.
    pub fn import_symbols(&self, roots: &[String], ignore: &IgnorePatterns) -> Self {
        let in_roots = |ns: &str| roots.iter().any(|root| is_within(root, ns));
        let visible: Vec<bool> = self
            .symbols
            .iter()
            .zip(&self.visible)
            .map(|(s, member)| *member && in_roots(&s.namespace) && !ignore.is_ignored(s))
            .collect();
        let namespaces: BTreeMap<String, NamespaceInfo> = self
            .namespaces
            .iter()
            .filter(|(name, _)| in_roots(name))
            .map(|(name, info)| (name.clone(), info.clone()))
            .collect();
        let imported = Self::view(Arc::clone(&self.symbols), visible, namespaces);
        tracing::debug!(
            kept = imported.len(),
            dropped = self.len - imported.len(),
            "imported symbols for {} root(s)",
            roots.len()
        );
        imported
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ModuleDeclaration, SymbolKind};

    fn sample() -> SymbolUniverse {
        SymbolUniverse::builder()
            .symbol(Symbol::new("com.acme.orders.OrderService").tagged("component"))
            .symbol(Symbol::new("com.acme.orders.internal.OrderRepo"))
            .symbol(Symbol::new("com.acme.inventory.api.StockApi"))
            .symbol(Symbol::new("com.acme.Application"))
            .namespace(
                NamespaceInfo::new("com.acme.orders").module(ModuleDeclaration::default()),
            )
            .build()
            .unwrap()
    }

    #[test]
    fn test_lookup_and_resolve() {
        let u = sample();
        let id = u.lookup("com.acme.orders.OrderService").unwrap();
        assert_eq!(u.symbol(id).simple_name(), "OrderService");
        assert!(u.lookup("com.acme.Missing").is_none());
    }

    #[test]
    fn test_symbols_sorted_by_name() {
        let u = sample();
        let names: Vec<&str> = u.iter().map(|(_, s)| s.name.as_str()).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }

    #[test]
    fn test_in_namespace_is_recursive() {
        let u = sample();
        let ids = u.in_namespace("com.acme.orders");
        assert_eq!(ids.len(), 2);
        assert_eq!(u.in_namespace("").len(), 4);
    }

    #[test]
    fn test_in_namespace_respects_segment_boundaries() {
        let u = SymbolUniverse::builder()
            .symbol(Symbol::new("com.acme.orders.A"))
            .symbol(Symbol::new("com.acme.ordersx.B"))
            .build()
            .unwrap();
        assert_eq!(u.in_namespace("com.acme.orders").len(), 1);
    }

    #[test]
    fn test_direct_sub_namespaces_include_intermediate_packages() {
        let u = sample();
        assert_eq!(
            u.direct_sub_namespaces("com.acme"),
            vec!["com.acme.inventory".to_string(), "com.acme.orders".to_string()]
        );
        assert_eq!(
            u.direct_sub_namespaces("com.acme.inventory"),
            vec!["com.acme.inventory.api".to_string()]
        );
    }

    #[test]
    fn test_duplicate_symbol_rejected() {
        let err = SymbolUniverse::builder()
            .symbol(Symbol::new("a.B"))
            .symbol(Symbol::new("a.B"))
            .build()
            .unwrap_err();
        assert!(matches!(err, CoreError::DuplicateSymbol(name) if name == "a.B"));
    }

    #[test]
    fn test_namespace_mismatch_rejected() {
        let mut sym = Symbol::new("a.B");
        sym.namespace = "c".to_string();
        let err = SymbolUniverse::builder().symbol(sym).build().unwrap_err();
        assert!(matches!(err, CoreError::NamespaceMismatch { .. }));
    }

    #[test]
    fn test_tags() {
        let u = sample();
        let id = u.lookup("com.acme.orders.OrderService").unwrap();
        assert!(u.symbol_has_tag(id, "component"));
        assert!(!u.namespace_has_tag("com.acme.orders", "component"));
    }

    #[test]
    fn test_fingerprint_tracks_content() {
        let a = sample();
        let b = sample();
        assert_eq!(a.fingerprint(), b.fingerprint());

        let c = SymbolUniverse::builder()
            .symbol(Symbol::new("com.acme.orders.OrderService").with_kind(SymbolKind::Interface))
            .build()
            .unwrap();
        assert_ne!(a.fingerprint(), c.fingerprint());
    }

    #[test]
    fn test_import_symbols_restricts_roots_and_ignores() {
        let u = sample();
        let ignore = IgnorePatterns::new(["*.internal.*"]).unwrap();
        let imported = u.import_symbols(&["com.acme.orders".to_string()], &ignore);
        assert_eq!(imported.len(), 1);
        assert!(imported.lookup("com.acme.orders.OrderService").is_some());
        assert!(imported.namespace_info("com.acme.orders").is_some());
    }

    #[test]
    fn test_import_symbols_keeps_ids() {
        let u = sample();
        let ignore = IgnorePatterns::new(["*.internal.*"]).unwrap();
        let imported = u.import_symbols(&["com.acme.orders".to_string()], &ignore);

        let service = u.lookup("com.acme.orders.OrderService").unwrap();
        assert_eq!(imported.lookup("com.acme.orders.OrderService"), Some(service));
        assert_eq!(imported.symbol(service).name, "com.acme.orders.OrderService");

        let repo = u.lookup("com.acme.orders.internal.OrderRepo").unwrap();
        assert!(!imported.contains(repo));
        assert!(imported.get(repo).is_none());
        assert!(imported.lookup("com.acme.Application").is_none());
        assert_eq!(imported.iter().map(|(id, _)| id).collect::<Vec<_>>(), vec![service]);
    }

    #[test]
    fn test_namespace_index() {
        let u = sample();
        assert_eq!(u.directly_in("com.acme.orders").len(), 1);
        assert!(u.directly_in("com.acme.billing").is_empty());
        // `com.acme.orders` and `com.acme.orders.internal`, in name order.
        let ids = u.in_namespace("com.acme.orders");
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(u.in_namespace("com.acme").len(), 4);
    }
}
