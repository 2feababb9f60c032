//! Local ledger peer
//!
//! Owns one world state and one set of private collections and hands out a
//! [`TransactionContext`] per invocation. The peer can also be exported to
//! and restored from a [`LedgerSnapshot`] for persistence between runs.

use crate::private_data::MemoryPrivateData;
use crate::transaction::TransactionContext;
use crate::world_state::MemoryWorldState;
use asset_core::collection::CollectionConfig;
use asset_core::{OrgId, StorageError, TransientMap};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

/// Serializable copy of a peer's committed state, values hex encoded
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    /// World state entries
    #[serde(default)]
    pub world_state: BTreeMap<String, String>,
    /// Private entries grouped by collection
    #[serde(default)]
    pub private_data: BTreeMap<String, BTreeMap<String, String>>,
}

/// In-process ledger substrate shared by every invocation
#[derive(Debug, Clone)]
pub struct LedgerPeer {
    world: MemoryWorldState,
    private: MemoryPrivateData,
}

impl LedgerPeer {
    /// Create a peer with the given collection definitions
    pub fn new(collections: impl IntoIterator<Item = CollectionConfig>) -> Result<Self, StorageError> {
        Ok(Self {
            world: MemoryWorldState::new(),
            private: MemoryPrivateData::new(collections)?,
        })
    }

    /// Committed world state
    pub fn world_state(&self) -> &MemoryWorldState {
        &self.world
    }

    /// Committed private collections
    pub fn private_data(&self) -> &MemoryPrivateData {
        &self.private
    }

    /// Open a transaction for one invocation by `caller`
    pub fn begin(&self, caller: OrgId, transient: TransientMap) -> TransactionContext {
        let tx = TransactionContext::new(self.world.clone(), self.private.clone(), caller, transient);
        debug!(tx_id = %tx.tx_id(), caller = %tx.caller(), "transaction opened");
        tx
    }

    /// Copy the committed state into a snapshot
    pub async fn export_snapshot(&self) -> LedgerSnapshot {
        let world_state = self
            .world
            .snapshot()
            .await
            .iter()
            .map(|(key, value)| (key.clone(), hex::encode(value)))
            .collect();
        let private_data = self
            .private
            .contents()
            .await
            .into_iter()
            .map(|(collection, records)| {
                let records = records
                    .into_iter()
                    .map(|(key, value)| (key, hex::encode(value)))
                    .collect();
                (collection, records)
            })
            .collect();
        LedgerSnapshot {
            world_state,
            private_data,
        }
    }

    /// Replace the committed state with a snapshot
    ///
    /// Fails without modifying the peer if the snapshot references an
    /// undeclared collection or holds a value that is not valid hex.
    pub async fn import_snapshot(&self, snapshot: LedgerSnapshot) -> Result<(), StorageError> {
        let mut world_state = BTreeMap::new();
        for (key, value) in snapshot.world_state {
            let bytes = decode_hex(&key, &value)?;
            world_state.insert(key, bytes);
        }

        let mut private_data = BTreeMap::new();
        for (collection, records) in snapshot.private_data {
            self.private.collection(&collection)?;
            let mut decoded = BTreeMap::new();
            for (key, value) in records {
                let bytes = decode_hex(&key, &value)?;
                decoded.insert(key, bytes);
            }
            private_data.insert(collection, decoded);
        }

        let mut world = self.world.lock_for_commit().await;
        let mut collections = self.private.lock_for_commit().await;
        *world = Arc::new(world_state);
        *collections = private_data;
        Ok(())
    }
}

fn decode_hex(key: &str, value: &str) -> Result<Vec<u8>, StorageError> {
    hex::decode(value).map_err(|e| StorageError::corrupted(key, e.to_string()))
}
