//! Partition store effect traits
//!
//! The contract never reaches for ambient ledger state. It is handed one
//! implementation of each trait and performs all reads and writes through
//! them. Handlers live in `asset-effects`.

use crate::errors::StorageError;
use crate::range::StateRange;
use async_trait::async_trait;

/// Replicated world state visible to every participant
#[async_trait]
pub trait WorldStateEffects: Send + Sync {
    /// Overwrite the value stored under `key`
    async fn put_state(&self, key: &str, value: Vec<u8>) -> Result<(), StorageError>;

    /// Read the value stored under `key`
    async fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// Scan `[start, end)` in key order; empty bounds are open
    async fn get_state_by_range(&self, start: &str, end: &str)
        -> Result<StateRange, StorageError>;
}

/// Named confidential collections replicated to member organizations only
#[async_trait]
pub trait PrivateDataEffects: Send + Sync {
    /// Overwrite the value stored under `key` in `collection`
    async fn put_private_data(
        &self,
        collection: &str,
        key: &str,
        value: Vec<u8>,
    ) -> Result<(), StorageError>;

    /// Read the value stored under `key` in `collection`
    ///
    /// Returns `Ok(None)` when nothing is stored. Handlers may also answer
    /// `Ok(None)` or an error for callers outside the collection.
    async fn get_private_data(
        &self,
        collection: &str,
        key: &str,
    ) -> Result<Option<Vec<u8>>, StorageError>;

    /// Check that a write to `collection` would be accepted
    async fn ensure_writable(&self, collection: &str) -> Result<(), StorageError>;
}
