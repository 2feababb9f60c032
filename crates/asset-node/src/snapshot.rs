//! Ledger snapshot persistence
//!
//! The committed ledger is stored as one JSON [`LedgerSnapshot`]. Saves go
//! through a sibling temporary file and a rename so a crash mid-write leaves
//! the previous snapshot intact.

use crate::errors::{NodeError, Result};
use asset_effects::{LedgerPeer, LedgerSnapshot};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Snapshot file backing a [`LedgerPeer`]
#[derive(Debug, Clone)]
pub struct SnapshotFile {
    path: PathBuf,
}

impl SnapshotFile {
    /// Snapshot stored at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// File location
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Restore `peer` from the file; a missing file leaves the peer empty
    pub async fn load_into(&self, peer: &LedgerPeer) -> Result<bool> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no ledger snapshot yet");
                return Ok(false);
            }
            Err(e) => return Err(NodeError::io(&self.path, e)),
        };
        let snapshot: LedgerSnapshot =
            serde_json::from_slice(&bytes).map_err(|e| NodeError::snapshot(&self.path, e))?;
        let entries = snapshot.world_state.len();
        peer.import_snapshot(snapshot).await?;
        debug!(path = %self.path.display(), entries, "ledger snapshot loaded");
        Ok(true)
    }

    /// Write the committed state of `peer` to the file
    pub async fn save_from(&self, peer: &LedgerPeer) -> Result<()> {
        let snapshot = peer.export_snapshot().await;
        let bytes =
            serde_json::to_vec_pretty(&snapshot).map_err(|e| NodeError::snapshot(&self.path, e))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| NodeError::io(parent, e))?;
        }
        let staging = self.path.with_extension("json.tmp");
        tokio::fs::write(&staging, bytes)
            .await
            .map_err(|e| NodeError::io(&staging, e))?;
        tokio::fs::rename(&staging, &self.path)
            .await
            .map_err(|e| NodeError::io(&self.path, e))?;

        info!(
            path = %self.path.display(),
            entries = snapshot.world_state.len(),
            "ledger snapshot saved"
        );
        Ok(())
    }
}
