//! Error types for the asset contract
//!
//! Two layers of failure exist: [`StorageError`] describes what the partition
//! stores report, and [`AssetError`] is what an invocation returns to its
//! caller. Access denial on the confidential partition is a `StorageError`
//! but never becomes an `AssetError` on the read path; the contract degrades
//! it to the confidential sentinel instead.

use serde::{Deserialize, Serialize};

/// Failures reported by a partition store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum StorageError {
    /// Reading from the store failed
    #[error("Read failed: {0}")]
    ReadFailed(String),

    /// Writing to the store failed
    #[error("Write failed: {0}")]
    WriteFailed(String),

    /// The key cannot be stored
    #[error("Invalid key: {reason}")]
    InvalidKey {
        /// Why the key was rejected
        reason: String,
    },

    /// The caller's organization may not access the collection
    #[error("Access denied to collection {collection} for {org}")]
    AccessDenied {
        /// Collection that was accessed
        collection: String,
        /// Organization that attempted the access
        org: String,
    },

    /// No collection with this name is defined
    #[error("Unknown collection: {collection}")]
    UnknownCollection {
        /// Requested collection name
        collection: String,
    },

    /// A persisted record could not be interpreted
    #[error("Corrupted record at {key}: {message}")]
    Corrupted {
        /// Key of the unreadable record
        key: String,
        /// Parse failure details
        message: String,
    },
}

impl StorageError {
    /// Create an invalid key error
    pub fn invalid_key(reason: impl Into<String>) -> Self {
        Self::InvalidKey {
            reason: reason.into(),
        }
    }

    /// Create an access denied error
    pub fn access_denied(collection: impl Into<String>, org: impl Into<String>) -> Self {
        Self::AccessDenied {
            collection: collection.into(),
            org: org.into(),
        }
    }

    /// Create an unknown collection error
    pub fn unknown_collection(collection: impl Into<String>) -> Self {
        Self::UnknownCollection {
            collection: collection.into(),
        }
    }

    /// Create a corrupted record error
    pub fn corrupted(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Corrupted {
            key: key.into(),
            message: message.into(),
        }
    }
}

/// Errors returned by contract invocations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum AssetError {
    /// The transient input does not carry the expected key
    #[error("Missing transient input: {key}")]
    MissingInput {
        /// Transient key that was expected
        key: String,
    },

    /// The payload could not be decoded into the expected record
    #[error("Decode error: {message}")]
    Decode {
        /// Parser or validation message
        message: String,
    },

    /// No public record exists for the asset
    #[error("Asset {id} not found")]
    NotFound {
        /// Requested asset id
        id: String,
    },

    /// The invocation named an unknown function or passed the wrong arguments
    #[error("Invalid invocation: {message}")]
    InvalidInvocation {
        /// What was wrong with the invocation
        message: String,
    },

    /// A partition store failed
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl AssetError {
    /// Create a missing input error
    pub fn missing_input(key: impl Into<String>) -> Self {
        Self::MissingInput { key: key.into() }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Create a not found error
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    /// Create an invalid invocation error
    pub fn invalid_invocation(message: impl Into<String>) -> Self {
        Self::InvalidInvocation {
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for AssetError {
    fn from(err: serde_json::Error) -> Self {
        Self::decode(err.to_string())
    }
}

/// Standard Result type for contract operations
pub type Result<T> = std::result::Result<T, AssetError>;
