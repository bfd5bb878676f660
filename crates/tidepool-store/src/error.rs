//! Error types for the save layer.
//!
//! All errors are propagated via [`StoreError`] which wraps the underlying
//! [`fred`], I/O and JSON errors with additional context about which
//! operation failed.

use std::path::PathBuf;

/// Errors that can occur in the save layer.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A `Dragonfly`/Redis operation failed.
    #[error("Dragonfly error: {0}")]
    Dragonfly(#[from] fred::error::Error),

    /// A file operation failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// The file or directory involved.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A serialization or deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The stored save data could not be interpreted as a tank.
    #[error("Corrupted save data at {key}: {reason}")]
    CorruptedSaveData {
        /// The save slot key.
        key: String,
        /// What was wrong with it.
        reason: String,
    },

    /// A configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}
