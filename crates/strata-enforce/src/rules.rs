//! Per-edge boundary rules.

use strata_model::module::AllowedDependencies;
use strata_model::{Module, ModulesGraph, ResolvedDependency};

use crate::types::{Violation, ViolationKind};
use crate::violations::Violations;

/// All rule violations of one module, in dependency discovery order.
pub fn check_module(graph: &ModulesGraph, module: &Module) -> Violations {
    let allowed = module.allowed_dependencies(graph);
    module
        .dependencies(graph, &[])
        .iter()
        .filter_map(|dependency| {
            let target = graph.module_by_name(&dependency.target_module)?;
            Some(check_dependency(graph, module, target, &allowed, dependency))
        })
        .collect()
}

/// The three independent checks for one edge. None short-circuits another.
pub fn check_dependency(
    graph: &ModulesGraph,
    origin: &Module,
    target: &Module,
    allowed: &AllowedDependencies,
    dependency: &ResolvedDependency,
) -> Violations {
    let universe = graph.universe();
    let edge = &dependency.edge;
    let description = edge.describe(universe);
    let mut violations = Violations::NONE;

    if !allowed.admits(target, edge.target) {
        violations = violations.and_violation(
            Violation::new(
                ViolationKind::DisallowedDependency,
                Some(origin.name()),
                format!(
                    "Module '{}' depends on disallowed module '{}' via {}. Allowed targets: {}.",
                    origin.name(),
                    target.name(),
                    description,
                    allowed
                ),
            )
            .with_fix_hint(format!(
                "Add '{}' to the allowed dependencies of '{}' or remove the reference",
                target.name(),
                origin.name()
            )),
        );
    }

    if !target.is_exposed(edge.target) {
        let symbol = &universe.symbol(edge.target).name;
        violations = violations.and_violation(
            Violation::new(
                ViolationKind::NonExposedSymbol,
                Some(origin.name()),
                format!(
                    "Module '{}' depends on non-exposed symbol {} in module '{}': {}",
                    origin.name(),
                    symbol,
                    target.name(),
                    description
                ),
            )
            .with_fix_hint(format!(
                "Expose {} through a named interface of '{}'",
                symbol,
                target.name()
            )),
        );
    }

    let declaring = universe.symbol(edge.origin);
    if edge.is_field_injection() && !graph.classifier().is_configuration_context(declaring) {
        violations = violations.and_violation(
            Violation::new(
                ViolationKind::FieldInjection,
                Some(origin.name()),
                format!(
                    "Module '{}' uses field injection in {}.{}. Prefer constructor injection instead!",
                    origin.name(),
                    declaring.name,
                    edge.member.as_deref().unwrap_or("?")
                ),
            )
            .with_fix_hint("Inject the dependency through the constructor"),
        );
    }

    violations
}

#[cfg(test)]
#[path = "rules_tests.rs"]
mod tests;
