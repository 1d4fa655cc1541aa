use serde::{Deserialize, Serialize};
use strata_enforce::{Severity, Violation, Violations};
use strata_model::{DependencyType, ModulesGraph};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationReport {
    pub version: String,
    pub command: String,
    pub status: String, // "ok" | "error" | "warning"
    pub roots: Vec<String>,
    pub modules: Vec<ModuleSummary>,
    pub errors: Vec<Violation>,
    pub warnings: Vec<Violation>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleSummary {
    pub name: String,
    pub display_name: String,
    pub namespace: String,
    pub qualifying_symbols: usize,
    pub named_interfaces: Vec<String>,
    pub allowed_dependencies: Vec<String>,
    pub dependencies: Vec<DependencySummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencySummary {
    pub module: String,
    pub dependency_type: DependencyType,
    pub count: usize,
}

impl VerificationReport {
    pub fn new(graph: &ModulesGraph, violations: &Violations) -> Self {
        let (errors, warnings): (Vec<Violation>, Vec<Violation>) = violations
            .iter()
            .cloned()
            .partition(|v| v.severity() == Severity::Error);
        let status = if !errors.is_empty() {
            "error"
        } else if !warnings.is_empty() {
            "warning"
        } else {
            "ok"
        };

        Self {
            version: env!("CARGO_PKG_VERSION").into(),
            command: "verify".into(),
            status: status.into(),
            roots: graph.roots().to_vec(),
            modules: graph.modules().iter().map(|m| summarize(graph, m)).collect(),
            errors,
            warnings,
        }
    }

    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }
}

fn summarize(graph: &ModulesGraph, module: &strata_model::Module) -> ModuleSummary {
    let mut dependencies: Vec<DependencySummary> = Vec::new();
    for dependency in module.dependencies(graph, &[]).iter() {
        let kind = dependency.dependency_type();
        match dependencies
            .iter_mut()
            .find(|d| d.module == dependency.target_module && d.dependency_type == kind)
        {
            Some(existing) => existing.count += 1,
            None => dependencies.push(DependencySummary {
                module: dependency.target_module.clone(),
                dependency_type: kind,
                count: 1,
            }),
        }
    }
    dependencies.sort_by(|a, b| {
        a.module
            .cmp(&b.module)
            .then(a.dependency_type.cmp(&b.dependency_type))
    });

    ModuleSummary {
        name: module.name().to_string(),
        display_name: module.display_name().to_string(),
        namespace: module.namespace().name().to_string(),
        qualifying_symbols: module.qualifying_symbols().len(),
        named_interfaces: module
            .named_interfaces()
            .names()
            .map(str::to_string)
            .collect(),
        allowed_dependencies: module
            .allowed_dependencies(graph)
            .iter()
            .map(|a| a.to_string())
            .collect(),
        dependencies,
    }
}
