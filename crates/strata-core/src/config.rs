//! Configuration file loading for strata.
//!
//! Reads `.strata/strata.json` and provides typed access to all settings.
//! Falls back to sensible defaults when the config file is missing or incomplete.

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::classifier::{
    ClassifierChain, StereotypeClassifier, SupertypeClassifier, TagClassifier, TagVocabulary,
};
use crate::error::CoreError;
use crate::ignore::IgnorePatterns;
use crate::type_names::{default_standard_prefixes, StandardLibrary};

/// How modules are discovered below a root namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionStrategy {
    /// Every direct sub-namespace of a root is a module.
    #[default]
    DirectSubNamespaces,
    /// Only namespaces carrying a module declaration are modules.
    ExplicitlyAnnotated,
}

/// How module names are derived from their namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamingMode {
    /// Name relative to the root namespace (`orders`).
    #[default]
    Local,
    /// Full namespace name (`com.acme.orders`).
    FullyQualified,
}

/// Top-level strata configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrataConfig {
    #[serde(default)]
    pub roots: Vec<String>,
    #[serde(default)]
    pub ignore_patterns: Vec<String>,
    #[serde(default)]
    pub detection: DetectionStrategy,
    #[serde(default)]
    pub naming: NamingMode,
    /// Modules every other module may depend on.
    #[serde(default)]
    pub shared_modules: Vec<String>,
    #[serde(default = "default_standard_prefixes")]
    pub standard_prefixes: Vec<String>,
    #[serde(default)]
    pub vocabulary: TagVocabulary,
    #[serde(default)]
    pub repository_supertypes: Vec<String>,
    #[serde(default)]
    pub entity_supertypes: Vec<String>,
}

impl Default for StrataConfig {
    fn default() -> Self {
        Self {
            roots: vec![],
            ignore_patterns: vec![],
            detection: DetectionStrategy::default(),
            naming: NamingMode::default(),
            shared_modules: vec![],
            standard_prefixes: default_standard_prefixes(),
            vocabulary: TagVocabulary::default(),
            repository_supertypes: vec![],
            entity_supertypes: vec![],
        }
    }
}

impl StrataConfig {
    /// Load configuration from `strata.json` inside the given strata directory.
    /// Returns defaults if the file doesn't exist or can't be parsed.
    pub fn load(strata_dir: &Path) -> Self {
        let config_path = strata_dir.join("strata.json");
        let content = match std::fs::read_to_string(&config_path) {
            Ok(c) => c,
            Err(_) => return Self::default(),
        };
        match serde_json::from_str(&content) {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::warn!(
                    "failed to parse {}: {}, using defaults",
                    config_path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    pub fn ignore(&self) -> Result<IgnorePatterns, CoreError> {
        IgnorePatterns::new(self.ignore_patterns.iter().cloned())
    }

    pub fn standard_library(&self) -> StandardLibrary {
        StandardLibrary::new(self.standard_prefixes.iter().cloned())
    }

    /// Classifier chain: tag vocabulary first, supertype rules when configured.
    pub fn classifier(&self) -> Arc<dyn StereotypeClassifier> {
        let mut chain = ClassifierChain::new().with(TagClassifier::new(self.vocabulary.clone()));
        if !self.repository_supertypes.is_empty() || !self.entity_supertypes.is_empty() {
            chain = chain.with(SupertypeClassifier::new(
                self.repository_supertypes.iter().cloned(),
                self.entity_supertypes.iter().cloned(),
            ));
        }
        Arc::new(chain)
    }
}
