//! JSON snapshots of a symbol universe.
//!
//! Symbol extraction happens outside strata; extractors hand over their
//! result as a snapshot file:
//!
//! ```json
//! {
//!   "namespaces": [{ "name": "com.acme.orders", "module": { "allowed_dependencies": ["inventory"] } }],
//!   "symbols": [{ "name": "com.acme.orders.OrderService", "namespace": "com.acme.orders",
//!                 "visibility": "public", "tags": ["service"] }]
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{NamespaceInfo, Symbol};
use crate::universe::SymbolUniverse;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub namespaces: Vec<NamespaceInfo>,
    #[serde(default)]
    pub symbols: Vec<Symbol>,
}

impl SymbolUniverse {
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let snapshot: Snapshot = serde_json::from_str(json)?;
        Self::from_snapshot(snapshot)
    }

    pub fn from_snapshot(snapshot: Snapshot) -> Result<Self, CoreError> {
        SymbolUniverse::assemble(snapshot.symbols, snapshot.namespaces)
    }
}

/// Read a snapshot file from disk.
pub fn load_snapshot(path: &Path) -> Result<SymbolUniverse, CoreError> {
    let content = std::fs::read_to_string(path).map_err(|source| CoreError::SnapshotIo {
        path: path.display().to_string(),
        source,
    })?;
    let universe = SymbolUniverse::from_json(&content)?;
    tracing::debug!(
        symbols = universe.len(),
        fingerprint = universe.fingerprint(),
        "loaded snapshot {}",
        path.display()
    );
    Ok(universe)
}
