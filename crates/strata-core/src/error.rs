/// Errors raised while assembling a symbol universe or its inputs.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Invalid ignore pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Duplicate symbol: {0}")]
    DuplicateSymbol(String),

    #[error("Symbol '{symbol}' declares namespace '{namespace}' but its name is not inside it")]
    NamespaceMismatch { symbol: String, namespace: String },

    #[error("Failed to read snapshot {path}: {source}")]
    SnapshotIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse snapshot: {0}")]
    SnapshotParse(#[from] serde_json::Error),
}
