use serde::{Deserialize, Serialize};

/// What rule a violation breaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    /// Modules of one root depend on each other in a cycle.
    Cycle,
    /// A module depends on a module its allow-list excludes.
    DisallowedDependency,
    /// A module references a symbol outside the target's named interfaces.
    NonExposedSymbol,
    /// A component is wired through field injection.
    FieldInjection,
}

impl ViolationKind {
    pub fn code(&self) -> &'static str {
        match self {
            ViolationKind::Cycle => "E101",
            ViolationKind::DisallowedDependency => "E102",
            ViolationKind::NonExposedSymbol => "E103",
            ViolationKind::FieldInjection => "W101",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            ViolationKind::FieldInjection => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Violation {
    pub kind: ViolationKind,
    /// Module the violation is reported against; `None` for cycles.
    pub module: Option<String>,
    pub message: String,
    pub fix_hint: Option<String>,
}

impl Violation {
    pub fn new(kind: ViolationKind, module: Option<&str>, message: impl Into<String>) -> Self {
        Self {
            kind,
            module: module.map(str::to_string),
            message: message.into(),
            fix_hint: None,
        }
    }

    pub fn with_fix_hint(mut self, hint: impl Into<String>) -> Self {
        self.fix_hint = Some(hint.into());
        self
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn severity(&self) -> Severity {
        self.kind.severity()
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}
