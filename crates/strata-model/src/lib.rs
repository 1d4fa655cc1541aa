//! Application module model for strata.
//!
//! Turns a symbol universe into a graph of modules:
//! - [`module`] — Modules, their qualifying symbols and allow-lists
//! - [`interfaces`] — Named interfaces and their merge rules
//! - [`dependency`] — Dependency discovery and classification
//! - [`graph`] — The [`ModulesGraph`](graph::ModulesGraph) and its build options
//! - [`cache`] — Get-or-build reuse of graphs

pub mod cache;
pub mod dependency;
pub mod error;
pub mod graph;
pub mod interfaces;
pub mod module;

pub use cache::GraphCache;
pub use dependency::{DependencyDepth, DependencyType, Discovery, ModuleDependency};
pub use error::ConfigurationError;
pub use graph::{GraphOptions, ModulesGraph};
pub use interfaces::{NamedInterface, NamedInterfaces};
pub use module::{AllowedDependencies, Module, ModuleDependencies, ResolvedDependency};
