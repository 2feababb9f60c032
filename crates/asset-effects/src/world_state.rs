//! In-memory world state handler

use asset_core::effects::WorldStateEffects;
use asset_core::range::{scan_bounds, KeyValue, StateRange};
use asset_core::StorageError;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::{RwLock, RwLockWriteGuard};

pub(crate) type StateMap = BTreeMap<String, Vec<u8>>;

/// Ordered, copy-on-write key space shared by every participant
///
/// Scans work on the snapshot current when they start, so writes committed
/// while a scan is open are not observed by it.
#[derive(Debug, Clone, Default)]
pub struct MemoryWorldState {
    data: Arc<RwLock<Arc<StateMap>>>,
    open_scans: Arc<AtomicUsize>,
}

impl MemoryWorldState {
    /// Create an empty world state
    pub fn new() -> Self {
        Self::default()
    }

    /// Current committed contents
    pub async fn snapshot(&self) -> Arc<StateMap> {
        self.data.read().await.clone()
    }

    /// Number of keys
    pub async fn len(&self) -> usize {
        self.data.read().await.len()
    }

    /// Whether no key has been written
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Scans that have been opened and not yet drained or dropped
    pub fn open_scans(&self) -> usize {
        self.open_scans.load(Ordering::SeqCst)
    }

    pub(crate) async fn lock_for_commit(&self) -> RwLockWriteGuard<'_, Arc<StateMap>> {
        self.data.write().await
    }

    /// Lazily scan `[start, end)` of a snapshot, tracking the open scan
    pub(crate) fn scan(&self, snapshot: Arc<StateMap>, start: &str, end: &str) -> StateRange {
        let (lower, upper) = scan_bounds(start, end);
        let inverted = !start.is_empty() && !end.is_empty() && start > end;
        let cursor = Cursor {
            snapshot,
            lower,
            upper,
            done: inverted,
        };

        let open_scans = self.open_scans.clone();
        open_scans.fetch_add(1, Ordering::SeqCst);
        StateRange::new(cursor).on_release(move || {
            open_scans.fetch_sub(1, Ordering::SeqCst);
        })
    }
}

pub(crate) fn validate_key(key: &str) -> Result<(), StorageError> {
    if key.is_empty() {
        return Err(StorageError::invalid_key("key cannot be empty"));
    }
    Ok(())
}

/// Walks a snapshot one key at a time without materializing the range
struct Cursor {
    snapshot: Arc<StateMap>,
    lower: Bound<String>,
    upper: Bound<String>,
    done: bool,
}

impl Iterator for Cursor {
    type Item = KeyValue;

    fn next(&mut self) -> Option<KeyValue> {
        if self.done {
            return None;
        }
        let next = self
            .snapshot
            .range((self.lower.clone(), self.upper.clone()))
            .next()
            .map(|(key, value)| KeyValue::new(key.clone(), value.clone()));
        match &next {
            Some(entry) => self.lower = Bound::Excluded(entry.key.clone()),
            None => self.done = true,
        }
        next
    }
}

#[async_trait]
impl WorldStateEffects for MemoryWorldState {
    async fn put_state(&self, key: &str, value: Vec<u8>) -> Result<(), StorageError> {
        validate_key(key)?;
        let mut data = self.data.write().await;
        Arc::make_mut(&mut data).insert(key.to_string(), value);
        Ok(())
    }

    async fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        validate_key(key)?;
        let data = self.data.read().await;
        Ok(data.get(key).cloned())
    }

    async fn get_state_by_range(
        &self,
        start: &str,
        end: &str,
    ) -> Result<StateRange, StorageError> {
        let snapshot = self.snapshot().await;
        Ok(self.scan(snapshot, start, end))
    }
}
