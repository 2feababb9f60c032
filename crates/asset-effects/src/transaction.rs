//! Per-invocation transaction context
//!
//! A [`TransactionContext`] is what a single contract invocation runs
//! against. Writes are buffered; reads observe committed state overlaid with
//! the invocation's own earlier writes. Nothing becomes visible to other
//! invocations until [`TransactionContext::commit`], which applies the public
//! and private write-sets together. Dropping the context instead discards
//! both.

use crate::private_data::MemoryPrivateData;
use crate::world_state::{validate_key, MemoryWorldState};
use asset_core::effects::{PrivateDataEffects, WorldStateEffects};
use asset_core::range::{in_scan, KeyValue, StateRange};
use asset_core::{OrgId, StorageError, TransientMap};
use async_trait::async_trait;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::iter::Peekable;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

type PrivateKey = (String, String);

/// Summary of a committed invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitReceipt {
    /// Transaction identifier
    pub tx_id: Uuid,
    /// Number of world state keys written
    pub public_writes: usize,
    /// Number of private collection keys written
    pub private_writes: usize,
}

/// State access for exactly one invocation
#[derive(Debug)]
pub struct TransactionContext {
    tx_id: Uuid,
    caller: OrgId,
    transient: TransientMap,
    world: MemoryWorldState,
    private: MemoryPrivateData,
    public_writes: RwLock<BTreeMap<String, Vec<u8>>>,
    private_writes: RwLock<BTreeMap<PrivateKey, Vec<u8>>>,
}

impl TransactionContext {
    pub(crate) fn new(
        world: MemoryWorldState,
        private: MemoryPrivateData,
        caller: OrgId,
        transient: TransientMap,
    ) -> Self {
        Self {
            tx_id: Uuid::new_v4(),
            caller,
            transient,
            world,
            private,
            public_writes: RwLock::new(BTreeMap::new()),
            private_writes: RwLock::new(BTreeMap::new()),
        }
    }

    /// Transaction identifier
    pub fn tx_id(&self) -> Uuid {
        self.tx_id
    }

    /// Organization of the invoking client
    pub fn caller(&self) -> &OrgId {
        &self.caller
    }

    /// Off-ledger input attached to the invocation
    pub fn transient(&self) -> &TransientMap {
        &self.transient
    }

    /// Apply both write-sets
    ///
    /// Both partitions are locked before either is modified, so no other
    /// reader can observe the public writes without the private ones.
    pub async fn commit(self) -> CommitReceipt {
        let public = self.public_writes.into_inner();
        let private = self.private_writes.into_inner();
        let receipt = CommitReceipt {
            tx_id: self.tx_id,
            public_writes: public.len(),
            private_writes: private.len(),
        };

        {
            let mut world = self.world.lock_for_commit().await;
            let mut collections = self.private.lock_for_commit().await;
            Arc::make_mut(&mut world).extend(public);
            for ((collection, key), value) in private {
                collections.entry(collection).or_default().insert(key, value);
            }
        }

        info!(
            tx_id = %receipt.tx_id,
            caller = %self.caller,
            public_writes = receipt.public_writes,
            private_writes = receipt.private_writes,
            "transaction committed"
        );
        receipt
    }

    /// Discard the write-set
    pub fn abort(self) {
        debug!(tx_id = %self.tx_id, "transaction aborted");
    }
}

#[async_trait]
impl WorldStateEffects for TransactionContext {
    async fn put_state(&self, key: &str, value: Vec<u8>) -> Result<(), StorageError> {
        validate_key(key)?;
        self.public_writes
            .write()
            .await
            .insert(key.to_string(), value);
        Ok(())
    }

    async fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        if let Some(pending) = self.public_writes.read().await.get(key) {
            return Ok(Some(pending.clone()));
        }
        self.world.get_state(key).await
    }

    async fn get_state_by_range(
        &self,
        start: &str,
        end: &str,
    ) -> Result<StateRange, StorageError> {
        let pending: BTreeMap<String, Vec<u8>> = self
            .public_writes
            .read()
            .await
            .iter()
            .filter(|(key, _)| in_scan(start, end, key))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        let committed = self.world.scan(self.world.snapshot().await, start, end);

        if pending.is_empty() {
            return Ok(committed);
        }
        Ok(StateRange::new(Overlay {
            committed: committed.peekable(),
            pending: pending.into_iter().peekable(),
        }))
    }
}

#[async_trait]
impl PrivateDataEffects for TransactionContext {
    async fn put_private_data(
        &self,
        collection: &str,
        key: &str,
        value: Vec<u8>,
    ) -> Result<(), StorageError> {
        validate_key(key)?;
        self.private.check_write(collection, &self.caller)?;
        self.private_writes
            .write()
            .await
            .insert((collection.to_string(), key.to_string()), value);
        Ok(())
    }

    async fn get_private_data(
        &self,
        collection: &str,
        key: &str,
    ) -> Result<Option<Vec<u8>>, StorageError> {
        validate_key(key)?;
        self.private.check_read(collection, &self.caller)?;
        let lookup = (collection.to_string(), key.to_string());
        if let Some(pending) = self.private_writes.read().await.get(&lookup) {
            return Ok(Some(pending.clone()));
        }
        Ok(self.private.read(collection, key).await)
    }

    async fn ensure_writable(&self, collection: &str) -> Result<(), StorageError> {
        self.private.check_write(collection, &self.caller)
    }
}

/// Committed entries overlaid with the invocation's pending writes, key ordered
struct Overlay {
    committed: Peekable<StateRange>,
    pending: Peekable<std::collections::btree_map::IntoIter<String, Vec<u8>>>,
}

impl Iterator for Overlay {
    type Item = KeyValue;

    fn next(&mut self) -> Option<KeyValue> {
        let order = match (self.committed.peek(), self.pending.peek()) {
            (None, None) => return None,
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (Some(committed), Some((key, _))) => committed.key.as_str().cmp(key.as_str()),
        };
        match order {
            Ordering::Less => self.committed.next(),
            Ordering::Equal => {
                // pending write shadows the committed value
                self.committed.next();
                self.pending.next().map(|(key, value)| KeyValue::new(key, value))
            }
            Ordering::Greater => self.pending.next().map(|(key, value)| KeyValue::new(key, value)),
        }
    }
}
