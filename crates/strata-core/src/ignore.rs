use std::hash::{Hash, Hasher};

use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::error::CoreError;
use crate::types::Symbol;

/// Glob patterns over qualified symbol names that exclude symbols from analysis.
///
/// Equality and hashing use the pattern list, so two predicates built from
/// the same patterns are interchangeable cache keys.
#[derive(Debug, Clone)]
pub struct IgnorePatterns {
    patterns: Vec<String>,
    set: GlobSet,
}

impl IgnorePatterns {
    pub fn none() -> Self {
        Self {
            patterns: Vec::new(),
            set: GlobSet::empty(),
        }
    }

    pub fn new<I, S>(patterns: I) -> Result<Self, CoreError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut patterns: Vec<String> = patterns.into_iter().map(Into::into).collect();
        patterns.sort();
        patterns.dedup();

        let mut builder = GlobSetBuilder::new();
        for pattern in &patterns {
            let glob = Glob::new(pattern).map_err(|source| CoreError::InvalidPattern {
                pattern: pattern.clone(),
                source,
            })?;
            builder.add(glob);
        }
        let set = builder.build().map_err(|source| CoreError::InvalidPattern {
            pattern: patterns.join(", "),
            source,
        })?;
        Ok(Self { patterns, set })
    }

    pub fn is_ignored(&self, symbol: &Symbol) -> bool {
        self.matches(&symbol.name)
    }

    pub fn matches(&self, qualified_name: &str) -> bool {
        !self.patterns.is_empty() && self.set.is_match(qualified_name)
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

impl Default for IgnorePatterns {
    fn default() -> Self {
        Self::none()
    }
}

impl PartialEq for IgnorePatterns {
    fn eq(&self, other: &Self) -> bool {
        self.patterns == other.patterns
    }
}

impl Eq for IgnorePatterns {}

impl Hash for IgnorePatterns {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.patterns.hash(state);
    }
}
