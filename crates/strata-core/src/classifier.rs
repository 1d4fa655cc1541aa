//! Stereotype classification of symbols and members.
//!
//! The model never looks at raw tags itself. It asks a [`StereotypeClassifier`]
//! supplied at graph-construction time, which keeps the verification logic
//! independent of any particular annotation vocabulary.

use std::collections::BTreeSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::types::{Member, MemberKind, Symbol};

/// Answers stereotype questions about symbols and their members.
///
/// Implementors must be `Send + Sync` so a classifier can be shared by the
/// rayon tasks that build modules.
pub trait StereotypeClassifier: Send + Sync {
    /// Short identifier used in diagnostics.
    fn name(&self) -> &str;

    /// Injectable, container-managed component.
    fn is_component(&self, symbol: &Symbol) -> bool;

    /// Persistent entity.
    fn is_entity(&self, symbol: &Symbol) -> bool;

    /// Data-access abstraction.
    fn is_repository(&self, _symbol: &Symbol) -> bool {
        false
    }

    /// Symbol that declares factory methods (configuration context).
    fn is_configuration_context(&self, symbol: &Symbol) -> bool;

    /// Method whose return value is a managed component.
    fn is_factory_method(&self, _member: &Member) -> bool {
        false
    }

    /// Constructor, field, or method the container injects into.
    fn is_injection_point(&self, member: &Member) -> bool;

    fn is_event_handler(&self, member: &Member) -> bool;
}

/// Tag names a [`TagClassifier`] looks for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagVocabulary {
    #[serde(default = "default_component_tags")]
    pub component: BTreeSet<String>,
    #[serde(default = "default_entity_tags")]
    pub entity: BTreeSet<String>,
    #[serde(default = "default_repository_tags")]
    pub repository: BTreeSet<String>,
    #[serde(default = "default_configuration_tags")]
    pub configuration: BTreeSet<String>,
    #[serde(default = "default_factory_tags")]
    pub factory: BTreeSet<String>,
    #[serde(default = "default_injection_tags")]
    pub injection: BTreeSet<String>,
    #[serde(default = "default_event_handler_tags")]
    pub event_handler: BTreeSet<String>,
}

fn tags(names: &[&str]) -> BTreeSet<String> {
    names.iter().map(|s| s.to_string()).collect()
}

fn default_component_tags() -> BTreeSet<String> {
    tags(&["component", "service", "controller", "repository", "configuration"])
}
fn default_entity_tags() -> BTreeSet<String> {
    tags(&["entity"])
}
fn default_repository_tags() -> BTreeSet<String> {
    tags(&["repository"])
}
fn default_configuration_tags() -> BTreeSet<String> {
    tags(&["configuration"])
}
fn default_factory_tags() -> BTreeSet<String> {
    tags(&["bean"])
}
fn default_injection_tags() -> BTreeSet<String> {
    tags(&["autowired", "inject"])
}
fn default_event_handler_tags() -> BTreeSet<String> {
    tags(&["event_listener", "transactional_event_listener"])
}

impl Default for TagVocabulary {
    fn default() -> Self {
        Self {
            component: default_component_tags(),
            entity: default_entity_tags(),
            repository: default_repository_tags(),
            configuration: default_configuration_tags(),
            factory: default_factory_tags(),
            injection: default_injection_tags(),
            event_handler: default_event_handler_tags(),
        }
    }
}

fn any_tag(present: &BTreeSet<String>, wanted: &BTreeSet<String>) -> bool {
    present.iter().any(|t| wanted.contains(t))
}

/// Classifies by the stereotype tags carried on symbols and members.
#[derive(Debug, Clone, Default)]
pub struct TagClassifier {
    vocabulary: TagVocabulary,
}

impl TagClassifier {
    pub fn new(vocabulary: TagVocabulary) -> Self {
        Self { vocabulary }
    }

    pub fn vocabulary(&self) -> &TagVocabulary {
        &self.vocabulary
    }
}

impl StereotypeClassifier for TagClassifier {
    fn name(&self) -> &str {
        "tags"
    }

    fn is_component(&self, symbol: &Symbol) -> bool {
        any_tag(&symbol.tags, &self.vocabulary.component)
    }

    fn is_entity(&self, symbol: &Symbol) -> bool {
        any_tag(&symbol.tags, &self.vocabulary.entity)
    }

    fn is_repository(&self, symbol: &Symbol) -> bool {
        any_tag(&symbol.tags, &self.vocabulary.repository)
    }

    fn is_configuration_context(&self, symbol: &Symbol) -> bool {
        any_tag(&symbol.tags, &self.vocabulary.configuration)
    }

    fn is_factory_method(&self, member: &Member) -> bool {
        member.kind == MemberKind::Method && any_tag(&member.tags, &self.vocabulary.factory)
    }

    fn is_injection_point(&self, member: &Member) -> bool {
        any_tag(&member.tags, &self.vocabulary.injection)
    }

    fn is_event_handler(&self, member: &Member) -> bool {
        member.kind == MemberKind::Method && any_tag(&member.tags, &self.vocabulary.event_handler)
    }
}

/// Classifies repositories and entities by well-known supertypes,
/// e.g. everything extending a framework `Repository` interface.
#[derive(Debug, Clone, Default)]
pub struct SupertypeClassifier {
    repository_supertypes: BTreeSet<String>,
    entity_supertypes: BTreeSet<String>,
}

impl SupertypeClassifier {
    pub fn new<I, J, S, T>(repository_supertypes: I, entity_supertypes: J) -> Self
    where
        I: IntoIterator<Item = S>,
        J: IntoIterator<Item = T>,
        S: Into<String>,
        T: Into<String>,
    {
        Self {
            repository_supertypes: repository_supertypes.into_iter().map(Into::into).collect(),
            entity_supertypes: entity_supertypes.into_iter().map(Into::into).collect(),
        }
    }

    fn extends_any(symbol: &Symbol, wanted: &BTreeSet<String>) -> bool {
        symbol
            .supertypes
            .iter()
            .any(|s| wanted.contains(crate::type_names::type_names(s).first().copied().unwrap_or(s)))
    }
}

impl StereotypeClassifier for SupertypeClassifier {
    fn name(&self) -> &str {
        "supertypes"
    }

    fn is_component(&self, symbol: &Symbol) -> bool {
        self.is_repository(symbol)
    }

    fn is_entity(&self, symbol: &Symbol) -> bool {
        Self::extends_any(symbol, &self.entity_supertypes)
    }

    fn is_repository(&self, symbol: &Symbol) -> bool {
        Self::extends_any(symbol, &self.repository_supertypes)
    }

    fn is_configuration_context(&self, _symbol: &Symbol) -> bool {
        false
    }

    fn is_injection_point(&self, _member: &Member) -> bool {
        false
    }

    fn is_event_handler(&self, _member: &Member) -> bool {
        false
    }
}

/// Ordered list of classifier strategies combined by boolean OR.
#[derive(Clone, Default)]
pub struct ClassifierChain {
    classifiers: Vec<Arc<dyn StereotypeClassifier>>,
}

impl ClassifierChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, classifier: impl StereotypeClassifier + 'static) -> Self {
        self.classifiers.push(Arc::new(classifier));
        self
    }

    pub fn push(&mut self, classifier: Arc<dyn StereotypeClassifier>) {
        self.classifiers.push(classifier);
    }

    pub fn len(&self) -> usize {
        self.classifiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classifiers.is_empty()
    }

    fn any<F>(&self, f: F) -> bool
    where
        F: Fn(&dyn StereotypeClassifier) -> bool,
    {
        self.classifiers.iter().any(|c| f(c.as_ref()))
    }
}

impl std::fmt::Debug for ClassifierChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.classifiers.iter().map(|c| c.name()))
            .finish()
    }
}

impl StereotypeClassifier for ClassifierChain {
    fn name(&self) -> &str {
        "chain"
    }

    fn is_component(&self, symbol: &Symbol) -> bool {
        self.any(|c| c.is_component(symbol))
    }

    fn is_entity(&self, symbol: &Symbol) -> bool {
        self.any(|c| c.is_entity(symbol))
    }

    fn is_repository(&self, symbol: &Symbol) -> bool {
        self.any(|c| c.is_repository(symbol))
    }

    fn is_configuration_context(&self, symbol: &Symbol) -> bool {
        self.any(|c| c.is_configuration_context(symbol))
    }

    fn is_factory_method(&self, member: &Member) -> bool {
        self.any(|c| c.is_factory_method(member))
    }

    fn is_injection_point(&self, member: &Member) -> bool {
        self.any(|c| c.is_injection_point(member))
    }

    fn is_event_handler(&self, member: &Member) -> bool {
        self.any(|c| c.is_event_handler(member))
    }
}

/// The classifier used when none is configured: default tag vocabulary only.
pub fn default_classifier() -> Arc<dyn StereotypeClassifier> {
    Arc::new(ClassifierChain::new().with(TagClassifier::default()))
}
