//! Core types, symbol universe, and configuration for strata.
//!
//! This crate provides the foundational data structures used across all strata crates:
//! - [`types`] — Symbols, members, and namespace declarations
//! - [`universe`] — The immutable, indexed [`SymbolUniverse`](universe::SymbolUniverse)
//! - [`namespace`] — Hierarchical namespace views over a universe
//! - [`classifier`] — Stereotype classifiers and their composition
//! - [`ignore`] — Glob-based ignore predicate
//! - [`snapshot`] — JSON snapshot loading
//! - [`config`] — Configuration loading from `.strata/strata.json`
//! - [`hash`] — Deterministic fingerprints (base62 of xxhash64)

pub mod classifier;
pub mod config;
pub mod error;
pub mod hash;
pub mod ignore;
pub mod namespace;
pub mod snapshot;
pub mod type_names;
pub mod types;
pub mod universe;

pub use error::CoreError;
pub use namespace::Namespace;
pub use types::{Member, MemberKind, Symbol, SymbolId, SymbolKind, Visibility};
pub use universe::SymbolUniverse;
