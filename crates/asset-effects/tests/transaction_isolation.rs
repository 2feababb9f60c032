//! Integration Tests: Transaction Context Isolation
//!
//! An invocation sees its own writes immediately, other invocations see them
//! only after commit, and an uncommitted context leaves no trace.

use asset_core::collection::CollectionConfig;
use asset_core::effects::{PrivateDataEffects, WorldStateEffects};
use asset_core::{OrgId, StorageError, TransientMap, DEFAULT_COLLECTION};
use asset_effects::LedgerPeer;
use assert_matches::assert_matches;

fn peer() -> LedgerPeer {
    LedgerPeer::new([CollectionConfig::members_only(
        DEFAULT_COLLECTION,
        ["Org1MSP", "Org2MSP"],
    )])
    .unwrap()
}

fn org1() -> OrgId {
    OrgId::new("Org1MSP")
}

#[tokio::test]
async fn test_reads_observe_own_writes_before_commit() {
    let peer = peer();
    let tx = peer.begin(org1(), TransientMap::new());

    tx.put_state("asset1", b"public".to_vec()).await.unwrap();
    tx.put_private_data(DEFAULT_COLLECTION, "asset1", b"private".to_vec())
        .await
        .unwrap();

    assert_eq!(tx.get_state("asset1").await.unwrap(), Some(b"public".to_vec()));
    assert_eq!(
        tx.get_private_data(DEFAULT_COLLECTION, "asset1")
            .await
            .unwrap(),
        Some(b"private".to_vec())
    );

    let other = peer.begin(org1(), TransientMap::new());
    assert_eq!(other.get_state("asset1").await.unwrap(), None);
    assert!(peer.world_state().is_empty().await);
}

#[tokio::test]
async fn test_commit_publishes_both_partitions() {
    let peer = peer();
    let tx = peer.begin(org1(), TransientMap::new());
    tx.put_state("asset1", b"public".to_vec()).await.unwrap();
    tx.put_private_data(DEFAULT_COLLECTION, "asset1", b"private".to_vec())
        .await
        .unwrap();

    let receipt = tx.commit().await;
    assert_eq!(receipt.public_writes, 1);
    assert_eq!(receipt.private_writes, 1);

    let reader = peer.begin(OrgId::new("Org2MSP"), TransientMap::new());
    assert_eq!(
        reader.get_state("asset1").await.unwrap(),
        Some(b"public".to_vec())
    );
    assert_eq!(
        reader
            .get_private_data(DEFAULT_COLLECTION, "asset1")
            .await
            .unwrap(),
        Some(b"private".to_vec())
    );
}

#[tokio::test]
async fn test_dropped_context_discards_writes() {
    let peer = peer();
    {
        let tx = peer.begin(org1(), TransientMap::new());
        tx.put_state("asset1", b"public".to_vec()).await.unwrap();
    }
    let tx = peer.begin(org1(), TransientMap::new());
    tx.put_state("asset2", b"public".to_vec()).await.unwrap();
    tx.abort();

    assert!(peer.world_state().is_empty().await);
    assert!(peer.private_data().contents().await.is_empty());
}

#[tokio::test]
async fn test_range_overlays_pending_writes_in_key_order() {
    let peer = peer();
    let seed = peer.begin(org1(), TransientMap::new());
    seed.put_state("asset1", b"old-1".to_vec()).await.unwrap();
    seed.put_state("asset3", b"old-3".to_vec()).await.unwrap();
    seed.commit().await;

    let tx = peer.begin(org1(), TransientMap::new());
    tx.put_state("asset2", b"new-2".to_vec()).await.unwrap();
    tx.put_state("asset3", b"new-3".to_vec()).await.unwrap();
    tx.put_state("asset4", b"new-4".to_vec()).await.unwrap();

    let entries: Vec<(String, Vec<u8>)> = tx
        .get_state_by_range("", "asset4")
        .await
        .unwrap()
        .map(|kv| (kv.key, kv.value))
        .collect();
    assert_eq!(
        entries,
        vec![
            ("asset1".to_string(), b"old-1".to_vec()),
            ("asset2".to_string(), b"new-2".to_vec()),
            ("asset3".to_string(), b"new-3".to_vec()),
        ]
    );
    assert_eq!(peer.world_state().open_scans(), 0);
}

#[tokio::test]
async fn test_abandoned_overlay_scan_is_released() {
    let peer = peer();
    let seed = peer.begin(org1(), TransientMap::new());
    seed.put_state("asset1", b"1".to_vec()).await.unwrap();
    seed.commit().await;

    let tx = peer.begin(org1(), TransientMap::new());
    tx.put_state("asset2", b"2".to_vec()).await.unwrap();
    let mut scan = tx.get_state_by_range("", "").await.unwrap();
    assert_eq!(peer.world_state().open_scans(), 1);
    assert!(scan.next().is_some());
    drop(scan);
    assert_eq!(peer.world_state().open_scans(), 0);
}

#[tokio::test]
async fn test_outsider_private_access_is_refused_at_put() {
    let peer = peer();
    let tx = peer.begin(OrgId::new("Org3MSP"), TransientMap::new());
    assert_matches!(
        tx.ensure_writable(DEFAULT_COLLECTION).await,
        Err(StorageError::AccessDenied { .. })
    );
    assert_matches!(
        tx.put_private_data(DEFAULT_COLLECTION, "asset1", b"x".to_vec())
            .await,
        Err(StorageError::AccessDenied { .. })
    );
    assert_matches!(
        tx.get_private_data(DEFAULT_COLLECTION, "asset1").await,
        Err(StorageError::AccessDenied { .. })
    );
}
