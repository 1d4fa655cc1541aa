//! Named interfaces: the parts of a module other modules may reference.

use std::collections::{BTreeMap, BTreeSet};

use strata_core::{Namespace, Symbol, SymbolId};

/// Name of the default interface a module gets when it declares none.
pub const UNNAMED: &str = "<<UNNAMED>>";

/// Where an interface's symbols come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InterfaceKind {
    /// All public, non-marker symbols directly inside the listed namespaces.
    Namespaced(BTreeSet<String>),
    /// An explicit per-symbol list.
    Typed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedInterface {
    name: String,
    kind: InterfaceKind,
    symbols: BTreeSet<SymbolId>,
}

fn is_interface_candidate(symbol: &Symbol) -> bool {
    symbol.is_public() && !symbol.is_marker()
}

impl NamedInterface {
    /// Namespace-scoped interface over the symbols directly in `namespace`.
    pub fn namespaced(name: impl Into<String>, namespace: &Namespace) -> Self {
        let universe = namespace.universe();
        let symbols = namespace
            .direct_symbols()
            .into_iter()
            .filter(|id| is_interface_candidate(universe.symbol(*id)))
            .collect();
        Self {
            name: name.into(),
            kind: InterfaceKind::Namespaced(BTreeSet::from([namespace.name().to_string()])),
            symbols,
        }
    }

    pub fn typed<I>(name: impl Into<String>, symbols: I) -> Self
    where
        I: IntoIterator<Item = SymbolId>,
    {
        Self {
            name: name.into(),
            kind: InterfaceKind::Typed,
            symbols: symbols.into_iter().collect(),
        }
    }

    /// The default interface: every public, non-marker symbol of the base namespace.
    pub fn unnamed(namespace: &Namespace) -> Self {
        Self::namespaced(UNNAMED, namespace)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &InterfaceKind {
        &self.kind
    }

    pub fn is_unnamed(&self) -> bool {
        self.name == UNNAMED
    }

    pub fn is_namespaced(&self) -> bool {
        matches!(self.kind, InterfaceKind::Namespaced(_))
    }

    pub fn contains(&self, symbol: SymbolId) -> bool {
        self.symbols.contains(&symbol)
    }

    pub fn symbols(&self) -> impl Iterator<Item = SymbolId> + '_ {
        self.symbols.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Merge two interfaces of the same name. Returns `None` on a name mismatch.
    ///
    /// The result is namespace-scoped when either side is.
    pub fn merge(self, other: NamedInterface) -> Option<NamedInterface> {
        if self.name != other.name {
            return None;
        }
        let kind = match (self.kind, other.kind) {
            (InterfaceKind::Namespaced(mut a), InterfaceKind::Namespaced(b)) => {
                a.extend(b);
                InterfaceKind::Namespaced(a)
            }
            (InterfaceKind::Namespaced(a), InterfaceKind::Typed)
            | (InterfaceKind::Typed, InterfaceKind::Namespaced(a)) => InterfaceKind::Namespaced(a),
            (InterfaceKind::Typed, InterfaceKind::Typed) => InterfaceKind::Typed,
        };
        let mut symbols = self.symbols;
        symbols.extend(other.symbols);
        Some(NamedInterface {
            name: self.name,
            kind,
            symbols,
        })
    }
}

/// All named interfaces of a module, keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamedInterfaces {
    interfaces: BTreeMap<String, NamedInterface>,
}

impl NamedInterfaces {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn of<I>(interfaces: I) -> Self
    where
        I: IntoIterator<Item = NamedInterface>,
    {
        interfaces
            .into_iter()
            .fold(Self::empty(), |acc, interface| acc.with(interface))
    }

    /// Add one interface, merging it into a same-named one if present.
    pub fn with(mut self, interface: NamedInterface) -> Self {
        let merged = match self.interfaces.remove(interface.name()) {
            // Names are equal by construction of the map key.
            Some(existing) => existing.merge(interface.clone()).unwrap_or(interface),
            None => interface,
        };
        self.interfaces.insert(merged.name().to_string(), merged);
        self
    }

    /// Union with another set, merging same-named interfaces.
    pub fn and(self, other: NamedInterfaces) -> Self {
        other.interfaces.into_values().fold(self, Self::with)
    }

    /// Supply the default interface for `namespace` when nothing was declared.
    pub fn or_unnamed(self, namespace: &Namespace) -> Self {
        if self.interfaces.is_empty() {
            Self::empty().with(NamedInterface::unnamed(namespace))
        } else {
            self
        }
    }

    pub fn has_explicit_interfaces(&self) -> bool {
        self.interfaces.len() > 1 || self.interfaces.values().any(|i| !i.is_unnamed())
    }

    pub fn get(&self, name: &str) -> Option<&NamedInterface> {
        self.interfaces.get(name)
    }

    pub fn unnamed(&self) -> Option<&NamedInterface> {
        self.get(UNNAMED)
    }

    pub fn contains(&self, symbol: SymbolId) -> bool {
        self.interfaces.values().any(|i| i.contains(symbol))
    }

    /// Interfaces containing `symbol`, in name order.
    pub fn containing(&self, symbol: SymbolId) -> impl Iterator<Item = &NamedInterface> {
        self.interfaces.values().filter(move |i| i.contains(symbol))
    }

    pub fn iter(&self) -> impl Iterator<Item = &NamedInterface> {
        self.interfaces.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.interfaces.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.interfaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interfaces.is_empty()
    }
}

impl FromIterator<NamedInterface> for NamedInterfaces {
    fn from_iter<T: IntoIterator<Item = NamedInterface>>(iter: T) -> Self {
        Self::of(iter)
    }
}

#[cfg(test)]
#[path = "interfaces_tests.rs"]
mod tests;
