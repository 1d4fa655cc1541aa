//! The violations accumulator.

use serde::{Deserialize, Serialize};

use crate::error::VerificationError;
use crate::types::{Violation, ViolationKind};

/// An ordered collection of violations.
///
/// `NONE` is the identity of [`and`](Violations::and), which concatenates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Violations {
    items: Vec<Violation>,
}

impl Violations {
    pub const NONE: Violations = Violations { items: Vec::new() };

    pub fn of(violation: Violation) -> Self {
        Self {
            items: vec![violation],
        }
    }

    pub fn and(mut self, other: Violations) -> Self {
        self.items.extend(other.items);
        self
    }

    pub fn and_violation(mut self, violation: Violation) -> Self {
        self.items.push(violation);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Violation> {
        self.items.iter()
    }

    pub fn filter<P>(&self, predicate: P) -> Violations
    where
        P: Fn(&Violation) -> bool,
    {
        self.items.iter().filter(|v| predicate(v)).cloned().collect()
    }

    pub fn of_kind(&self, kind: ViolationKind) -> Violations {
        self.filter(|v| v.kind == kind)
    }

    pub fn messages(&self) -> Vec<&str> {
        self.items.iter().map(|v| v.message.as_str()).collect()
    }

    /// `Ok` when empty, otherwise the violations as an error.
    pub fn into_result(self) -> Result<(), VerificationError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(VerificationError::Violations(self))
        }
    }
}

impl std::fmt::Display for Violations {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.messages().join("\n"))
    }
}

impl FromIterator<Violation> for Violations {
    fn from_iter<T: IntoIterator<Item = Violation>>(iter: T) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl FromIterator<Violations> for Violations {
    fn from_iter<T: IntoIterator<Item = Violations>>(iter: T) -> Self {
        iter.into_iter().fold(Violations::NONE, Violations::and)
    }
}

impl Extend<Violation> for Violations {
    fn extend<T: IntoIterator<Item = Violation>>(&mut self, iter: T) {
        self.items.extend(iter);
    }
}

impl IntoIterator for Violations {
    type Item = Violation;
    type IntoIter = std::vec::IntoIter<Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a Violations {
    type Item = &'a Violation;
    type IntoIter = std::slice::Iter<'a, Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
