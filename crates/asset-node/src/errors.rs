//! Node error types

use asset_core::StorageError;
use std::path::{Path, PathBuf};

/// Failures while bootstrapping the node or persisting its ledger
#[derive(Debug, thiserror::Error)]
pub enum NodeError {
    /// Configuration could not be parsed or failed validation
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// Filesystem access failed
    #[error("I/O error at {}: {message}", path.display())]
    Io {
        /// Path being accessed
        path: PathBuf,
        /// Error message
        message: String,
    },

    /// Snapshot file is not a valid ledger snapshot
    #[error("Snapshot error at {}: {message}", path.display())]
    Snapshot {
        /// Snapshot path
        path: PathBuf,
        /// Error message
        message: String,
    },

    /// Ledger substrate rejected the operation
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl NodeError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an I/O error for `path`
    pub fn io(path: &Path, err: impl std::fmt::Display) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            message: err.to_string(),
        }
    }

    /// Create a snapshot format error for `path`
    pub fn snapshot(path: &Path, err: impl std::fmt::Display) -> Self {
        Self::Snapshot {
            path: path.to_path_buf(),
            message: err.to_string(),
        }
    }
}

/// Node result alias
pub type Result<T> = std::result::Result<T, NodeError>;
