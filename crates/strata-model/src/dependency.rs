//! Dependency edges between modules and how they are discovered.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use strata_core::classifier::StereotypeClassifier;
use strata_core::type_names::{type_names, StandardLibrary};
use strata_core::{Member, MemberKind, Namespace, Symbol, SymbolId, SymbolUniverse};

/// How a cross-module reference arose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DependencyType {
    /// The origin has a component of the target module injected.
    UsesComponent,
    /// The origin references a persistent entity of the target module.
    Entity,
    /// An event handler of the origin consumes a type of the target module.
    EventListener,
    Default,
}

impl DependencyType {
    pub const ALL: [DependencyType; 4] = [
        DependencyType::UsesComponent,
        DependencyType::Entity,
        DependencyType::EventListener,
        DependencyType::Default,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DependencyType::UsesComponent => "USES_COMPONENT",
            DependencyType::Entity => "ENTITY",
            DependencyType::EventListener => "EVENT_LISTENER",
            DependencyType::Default => "DEFAULT",
        }
    }
}

impl std::fmt::Display for DependencyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where in the origin symbol a reference was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Discovery {
    /// Parameter of the designated (or sole) constructor.
    InjectionConstructor,
    /// Type of a field tagged for injection.
    InjectedField,
    /// Parameter of a method tagged for injection.
    InjectionMethod,
    /// Parameter or return type of any other member.
    MemberSignature,
    StaticReference,
    Supertype,
}

impl Discovery {
    pub fn as_str(&self) -> &'static str {
        match self {
            Discovery::InjectionConstructor => "injection constructor",
            Discovery::InjectedField => "injected field",
            Discovery::InjectionMethod => "injection method",
            Discovery::MemberSignature => "member signature",
            Discovery::StaticReference => "static reference",
            Discovery::Supertype => "supertype",
        }
    }

    pub fn is_injection(&self) -> bool {
        matches!(
            self,
            Discovery::InjectionConstructor | Discovery::InjectedField | Discovery::InjectionMethod
        )
    }
}

/// Depth of a bootstrap dependency traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DependencyDepth {
    None,
    #[default]
    Immediate,
    All,
}

/// A reference from a qualifying symbol to a symbol outside its own module.
///
/// Edges store the target symbol only. The owning module is looked up against
/// the completed graph when the edge is resolved.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModuleDependency {
    pub origin: SymbolId,
    pub target: SymbolId,
    pub dependency_type: DependencyType,
    pub discovery: Discovery,
    /// Member the reference was found in, if any.
    pub member: Option<String>,
    pub line: Option<u32>,
}

impl ModuleDependency {
    pub fn is_field_injection(&self) -> bool {
        self.discovery == Discovery::InjectedField
    }

    /// Diagnostic description: `a.Origin.member (injected field) -> b.Target (line 12)`.
    pub fn describe(&self, universe: &SymbolUniverse) -> String {
        let origin = &universe.symbol(self.origin).name;
        let target = &universe.symbol(self.target).name;
        let source = match &self.member {
            Some(member) => format!("{}.{}", origin, member),
            None => origin.clone(),
        };
        let location = match self.line {
            Some(line) => format!(" (line {})", line),
            None => String::new(),
        };
        format!(
            "{} ({}) -> {}{}",
            source,
            self.discovery.as_str(),
            target,
            location
        )
    }
}

/// Apply the classification precedence to one candidate edge.
///
/// Event handlers win over entities, entities over injection points.
pub fn classify(
    classifier: &dyn StereotypeClassifier,
    member: Option<&Member>,
    target: &Symbol,
    discovery: Discovery,
) -> DependencyType {
    if member.is_some_and(|m| classifier.is_event_handler(m)) {
        DependencyType::EventListener
    } else if classifier.is_entity(target) {
        DependencyType::Entity
    } else if discovery.is_injection() {
        DependencyType::UsesComponent
    } else {
        DependencyType::Default
    }
}

/// Collects candidate edges for one origin symbol.
struct Collector<'a> {
    universe: &'a SymbolUniverse,
    classifier: &'a dyn StereotypeClassifier,
    standard_library: &'a StandardLibrary,
    owner: &'a Namespace,
    origin: SymbolId,
    covered: HashSet<SymbolId>,
    edges: Vec<ModuleDependency>,
}

impl<'a> Collector<'a> {
    fn add(
        &mut self,
        member: Option<&Member>,
        type_expr: &str,
        discovery: Discovery,
        line: Option<u32>,
    ) {
        for name in type_names(type_expr) {
            if discovery == Discovery::MemberSignature && self.standard_library.is_excluded(name) {
                continue;
            }
            let Some(target) = self.universe.lookup(name) else {
                continue;
            };
            let target_symbol = self.universe.symbol(target);
            if target == self.origin || self.owner.contains(target_symbol) {
                continue;
            }
            if discovery == Discovery::StaticReference || discovery == Discovery::Supertype {
                if self.covered.contains(&target) {
                    continue;
                }
            } else {
                self.covered.insert(target);
            }
            self.edges.push(ModuleDependency {
                origin: self.origin,
                target,
                dependency_type: classify(self.classifier, member, target_symbol, discovery),
                discovery,
                member: member.map(|m| m.name.clone()),
                line: line.or_else(|| member.and_then(|m| m.line)),
            });
        }
    }

    fn add_signature(&mut self, member: &Member, discovery: Discovery) {
        for param in &member.parameter_types {
            self.add(Some(member), param, discovery, None);
        }
    }
}

/// Discover the cross-namespace references of `origin`, in discovery order.
///
/// `owner` is the namespace of the module the origin belongs to; targets
/// inside it are never edges. Targets that are not part of the universe are
/// dropped.
pub fn discover(
    universe: &SymbolUniverse,
    classifier: &dyn StereotypeClassifier,
    standard_library: &StandardLibrary,
    owner: &Namespace,
    origin: SymbolId,
) -> Vec<ModuleDependency> {
    let symbol = universe.symbol(origin);
    let mut collector = Collector {
        universe,
        classifier,
        standard_library,
        owner,
        origin,
        covered: HashSet::new(),
        edges: Vec::new(),
    };

    // a) designated injection constructor, else the sole constructor
    let constructors: Vec<&Member> = symbol.constructors().collect();
    let mut injection_constructors: Vec<&Member> = constructors
        .iter()
        .copied()
        .filter(|c| classifier.is_injection_point(c))
        .collect();
    if injection_constructors.is_empty() && constructors.len() == 1 {
        injection_constructors = constructors.clone();
    }
    for ctor in &injection_constructors {
        collector.add_signature(ctor, Discovery::InjectionConstructor);
    }

    // b) and c) injected fields and injection methods
    for member in &symbol.members {
        if !classifier.is_injection_point(member) {
            continue;
        }
        match member.kind {
            MemberKind::Field => {
                if let Some(ty) = &member.value_type {
                    collector.add(Some(member), ty, Discovery::InjectedField, None);
                }
            }
            MemberKind::Method => collector.add_signature(member, Discovery::InjectionMethod),
            MemberKind::Constructor => {}
        }
    }

    // d) every other member signature
    for member in &symbol.members {
        let is_injection_ctor = injection_constructors
            .iter()
            .any(|c| std::ptr::eq(*c, member));
        let injected = classifier.is_injection_point(member) && member.kind != MemberKind::Method;
        if is_injection_ctor || injected {
            continue;
        }
        if !classifier.is_injection_point(member) {
            collector.add_signature(member, Discovery::MemberSignature);
        }
        if let Some(ty) = &member.value_type {
            collector.add(Some(member), ty, Discovery::MemberSignature, None);
        }
    }

    // e) direct references not covered above
    for reference in &symbol.references {
        let member = reference.member.as_deref().and_then(|m| symbol.member(m));
        collector.add(member, &reference.target, Discovery::StaticReference, reference.line);
    }
    for supertype in &symbol.supertypes {
        collector.add(None, supertype, Discovery::Supertype, None);
    }

    collector.edges
}

#[cfg(test)]
#[path = "dependency_tests.rs"]
mod tests;
