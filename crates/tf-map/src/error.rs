//! Error types for alias table loading.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building a custom alias table.
#[derive(Debug, Error)]
pub enum MapError {
    /// Overlay names a field outside the canonical set.
    #[error("unknown canonical field '{field}' in alias table")]
    UnknownField { field: String },

    /// Alias file could not be read.
    #[error("failed to read alias file {path}: {source}")]
    AliasFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Alias overlay is not a JSON object of string lists.
    #[error("invalid alias table: {source}")]
    AliasParse {
        #[source]
        source: serde_json::Error,
    },
}

/// Result type for mapping operations.
pub type Result<T> = std::result::Result<T, MapError>;
