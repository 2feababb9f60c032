//! In-memory private collection handler
//!
//! Collections are declared up front from [`CollectionConfig`] definitions.
//! The store itself is caller-agnostic; [`MemoryPrivateData::for_org`] gives
//! the view a specific organization sees, with the collection's read and
//! write restrictions applied.

use crate::world_state::validate_key;
use asset_core::collection::CollectionConfig;
use asset_core::effects::PrivateDataEffects;
use asset_core::{OrgId, StorageError};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::{RwLock, RwLockWriteGuard};
use tracing::debug;

/// Records per collection name, keyed by asset id
pub type CollectionData = BTreeMap<String, BTreeMap<String, Vec<u8>>>;

/// Confidential collections shared by their member organizations
#[derive(Debug, Clone)]
pub struct MemoryPrivateData {
    collections: Arc<BTreeMap<String, CollectionConfig>>,
    data: Arc<RwLock<CollectionData>>,
}

impl MemoryPrivateData {
    /// Create a store with the given collection definitions
    pub fn new(collections: impl IntoIterator<Item = CollectionConfig>) -> Result<Self, StorageError> {
        let mut defined = BTreeMap::new();
        for config in collections {
            config.validate()?;
            defined.insert(config.name.clone(), config);
        }
        Ok(Self {
            collections: Arc::new(defined),
            data: Arc::new(RwLock::new(BTreeMap::new())),
        })
    }

    /// Look up a collection definition
    pub fn collection(&self, name: &str) -> Result<&CollectionConfig, StorageError> {
        self.collections
            .get(name)
            .ok_or_else(|| StorageError::unknown_collection(name))
    }

    /// The store as seen by `org`
    pub fn for_org(&self, org: OrgId) -> OrgPrivateData {
        OrgPrivateData {
            store: self.clone(),
            org,
        }
    }

    /// Copy of every stored record, bypassing access checks
    pub async fn contents(&self) -> CollectionData {
        self.data.read().await.clone()
    }

    pub(crate) async fn lock_for_commit(&self) -> RwLockWriteGuard<'_, CollectionData> {
        self.data.write().await
    }

    pub(crate) fn check_read(&self, collection: &str, org: &OrgId) -> Result<(), StorageError> {
        if self.collection(collection)?.can_read(org) {
            Ok(())
        } else {
            debug!(collection, %org, "private read denied");
            Err(StorageError::access_denied(collection, org.as_str()))
        }
    }

    pub(crate) fn check_write(&self, collection: &str, org: &OrgId) -> Result<(), StorageError> {
        if self.collection(collection)?.can_write(org) {
            Ok(())
        } else {
            debug!(collection, %org, "private write denied");
            Err(StorageError::access_denied(collection, org.as_str()))
        }
    }

    pub(crate) async fn read(&self, collection: &str, key: &str) -> Option<Vec<u8>> {
        self.data
            .read()
            .await
            .get(collection)
            .and_then(|records| records.get(key))
            .cloned()
    }
}

/// Organization-scoped view of [`MemoryPrivateData`]
#[derive(Debug, Clone)]
pub struct OrgPrivateData {
    store: MemoryPrivateData,
    org: OrgId,
}

#[async_trait]
impl PrivateDataEffects for OrgPrivateData {
    async fn put_private_data(
        &self,
        collection: &str,
        key: &str,
        value: Vec<u8>,
    ) -> Result<(), StorageError> {
        validate_key(key)?;
        self.store.check_write(collection, &self.org)?;
        self.store
            .data
            .write()
            .await
            .entry(collection.to_string())
            .or_default()
            .insert(key.to_string(), value);
        Ok(())
    }

    async fn get_private_data(
        &self,
        collection: &str,
        key: &str,
    ) -> Result<Option<Vec<u8>>, StorageError> {
        validate_key(key)?;
        self.store.check_read(collection, &self.org)?;
        Ok(self.store.read(collection, key).await)
    }

    async fn ensure_writable(&self, collection: &str) -> Result<(), StorageError> {
        self.store.check_write(collection, &self.org)
    }
}
