//! Cycle detection between the modules of one root.
//!
//! Builds a petgraph `DiGraph` over a root's modules, finds strongly
//! connected components with Tarjan's algorithm, then lists the elementary
//! cycles of each non-trivial component. Every cycle is rooted at its
//! smallest module name, so each one is found exactly once.

use std::collections::{BTreeSet, HashMap, HashSet};

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use strata_model::{Module, ModulesGraph};

use crate::types::{Violation, ViolationKind};
use crate::violations::Violations;

/// Upper bound on cycles listed per strongly connected component.
pub const MAX_CYCLES_PER_COMPONENT: usize = 100;

/// Cycle violations for every configured root, roots in name order.
pub fn detect_cycles(graph: &ModulesGraph) -> Violations {
    let roots: BTreeSet<&str> = graph.roots().iter().map(|r| r.trim()).collect();
    roots
        .into_iter()
        .map(|root| detect_cycles_in_root(graph, root))
        .collect()
}

/// Cycle violations among the modules of a single root.
pub fn detect_cycles_in_root(graph: &ModulesGraph, root: &str) -> Violations {
    let modules: Vec<&Module> = graph.modules_of_root(root).collect();
    let mut dependencies: DiGraph<&str, ()> = DiGraph::new();
    let indices: HashMap<&str, NodeIndex> = modules
        .iter()
        .map(|m| (m.name(), dependencies.add_node(m.name())))
        .collect();

    for module in &modules {
        let source = indices[module.name()];
        for target in module.dependencies(graph, &[]).modules() {
            if let Some(target) = indices.get(target) {
                dependencies.update_edge(source, *target, ());
            }
        }
    }

    let mut cycles: BTreeSet<Vec<String>> = BTreeSet::new();
    for component in tarjan_scc(&dependencies) {
        if component.len() < 2 {
            continue;
        }
        let found = elementary_cycles(&dependencies, &component);
        if found.len() >= MAX_CYCLES_PER_COMPONENT {
            tracing::warn!(
                root,
                modules = component.len(),
                "cycle listing truncated at {} cycles",
                MAX_CYCLES_PER_COMPONENT
            );
        }
        for cycle in found {
            cycles.insert(cycle.iter().map(|i| dependencies[*i].to_string()).collect());
        }
    }

    if !cycles.is_empty() {
        tracing::debug!(root, count = cycles.len(), "module cycles found");
    }

    cycles
        .into_iter()
        .map(|cycle| cycle_violation(graph, &cycle))
        .collect()
}

/// Elementary cycles inside one strongly connected component.
///
/// Members are ranked by name. A cycle is reported from its lowest-ranked
/// member and only passes through higher-ranked ones.
fn elementary_cycles(graph: &DiGraph<&str, ()>, component: &[NodeIndex]) -> Vec<Vec<NodeIndex>> {
    let mut order = component.to_vec();
    order.sort_by_key(|n| graph[*n]);
    let rank: HashMap<NodeIndex, usize> = order.iter().enumerate().map(|(i, n)| (*n, i)).collect();

    let mut cycles = Vec::new();
    for (floor, start) in order.iter().enumerate() {
        if cycles.len() >= MAX_CYCLES_PER_COMPONENT {
            break;
        }
        let mut search = CycleSearch {
            graph,
            rank: &rank,
            floor,
            start: *start,
            path: vec![*start],
            on_path: HashSet::from([*start]),
        };
        search.extend(&mut cycles);
    }
    cycles
}

struct CycleSearch<'a> {
    graph: &'a DiGraph<&'a str, ()>,
    rank: &'a HashMap<NodeIndex, usize>,
    floor: usize,
    start: NodeIndex,
    path: Vec<NodeIndex>,
    on_path: HashSet<NodeIndex>,
}

impl CycleSearch<'_> {
    fn extend(&mut self, cycles: &mut Vec<Vec<NodeIndex>>) {
        let Some(&node) = self.path.last() else {
            return;
        };
        let mut successors: Vec<NodeIndex> = self
            .graph
            .neighbors(node)
            .filter(|n| self.rank.get(n).is_some_and(|r| *r >= self.floor))
            .collect();
        successors.sort_by_key(|n| self.rank[n]);

        for next in successors {
            if cycles.len() >= MAX_CYCLES_PER_COMPONENT {
                return;
            }
            if next == self.start {
                cycles.push(self.path.clone());
            } else if self.on_path.insert(next) {
                self.path.push(next);
                self.extend(cycles);
                self.path.pop();
                self.on_path.remove(&next);
            }
        }
    }
}

fn cycle_violation(graph: &ModulesGraph, cycle: &[String]) -> Violation {
    let mut path: Vec<&str> = cycle.iter().map(String::as_str).collect();
    if let Some(first) = cycle.first() {
        path.push(first);
    }
    let mut message = format!("Cycle detected: {}", path.join(" -> "));

    for hop in path.windows(2) {
        let Some(source) = graph.module_by_name(hop[0]) else {
            continue;
        };
        let dependencies = source.dependencies(graph, &[]);
        let edge = dependencies.iter().find(|d| d.target_module == hop[1]);
        if let Some(edge) = edge {
            message.push_str(&format!(
                "\n  {} -> {}: {}",
                hop[0],
                hop[1],
                edge.edge.describe(graph.universe())
            ));
        }
    }

    Violation::new(ViolationKind::Cycle, None, message)
        .with_fix_hint("Break the cycle by inverting one dependency, e.g. through an event")
}
