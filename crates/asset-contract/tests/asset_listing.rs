//! Integration Tests: Asset Listing and Seeding
//!
//! `GetAllAssets` ordering, per-caller visibility, tolerance of unreadable
//! entries and release of the underlying scan.

mod common;

use asset_contract::{demo_assets, AssetContract};
use asset_core::effects::{PrivateDataEffects, WorldStateEffects};
use asset_core::transient::asset_transient;
use asset_core::{Asset, Disclosed};
use common::{Harness, MEMBER, OUTSIDER};

#[tokio::test]
async fn test_empty_ledger_lists_nothing() {
    let harness = Harness::new();
    assert!(harness.all(MEMBER).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_init_ledger_then_list() {
    let harness = Harness::new();
    harness.init(MEMBER).await.unwrap();

    let member_view = harness.all(MEMBER).await.unwrap();
    let summary: Vec<(String, Disclosed<String>, Disclosed<i64>)> = member_view
        .into_iter()
        .map(|view| (view.id, view.owner, view.value))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("asset1".to_string(), Disclosed::Visible("Org1".to_string()), Disclosed::Visible(100)),
            ("asset2".to_string(), Disclosed::Visible("Org2".to_string()), Disclosed::Visible(200)),
            ("asset3".to_string(), Disclosed::Visible("Org1".to_string()), Disclosed::Visible(300)),
        ]
    );

    let outsider_view = harness.all(OUTSIDER).await.unwrap();
    assert_eq!(outsider_view.len(), 3);
    assert!(outsider_view
        .iter()
        .all(|view| view.value == Disclosed::Confidential && view.owner.is_visible()));
    assert_eq!(harness.peer.world_state().open_scans(), 0);
}

#[tokio::test]
async fn test_init_ledger_is_repeatable() {
    let harness = Harness::new();
    harness.init(MEMBER).await.unwrap();
    let first = harness.peer.export_snapshot().await;
    harness.init(MEMBER).await.unwrap();
    assert_eq!(harness.peer.export_snapshot().await, first);
    assert_eq!(harness.peer.world_state().len().await, demo_assets().len());
}

#[tokio::test]
async fn test_listing_is_key_ordered_with_one_entry_per_key() {
    let harness = Harness::new();
    for (id, value) in [("b-asset", 2), ("c-asset", 3), ("a-asset", 1), ("b-asset", 20)] {
        harness
            .create(MEMBER, &Asset::new(id, "Org1", value))
            .await
            .unwrap();
    }
    let ids: Vec<String> = harness
        .all(MEMBER)
        .await
        .unwrap()
        .into_iter()
        .map(|view| view.id)
        .collect();
    assert_eq!(ids, vec!["a-asset", "b-asset", "c-asset"]);
}

#[tokio::test]
async fn test_unreadable_entries_do_not_abort_listing() {
    let harness = Harness::new();
    harness.init(MEMBER).await.unwrap();

    let tx = harness.begin(MEMBER, Default::default());
    tx.put_state("asset0", b"garbage".to_vec()).await.unwrap();
    tx.put_private_data(&harness.settings.collection, "asset2", b"{\"value\":".to_vec())
        .await
        .unwrap();
    tx.commit().await;

    let listing = harness.all(MEMBER).await.unwrap();
    let ids: Vec<&str> = listing.iter().map(|view| view.id.as_str()).collect();
    assert_eq!(ids, vec!["asset1", "asset2", "asset3"]);
    assert_eq!(listing[1].value, Disclosed::Confidential);
    assert_eq!(listing[0].value, Disclosed::Visible(100));
    assert_eq!(harness.peer.world_state().open_scans(), 0);
}

#[tokio::test]
async fn test_listing_inside_invocation_sees_own_writes() {
    let harness = Harness::new();
    harness.init(MEMBER).await.unwrap();

    let transient = asset_transient(&Asset::new("asset4", "Org2", 400)).unwrap();
    let tx = harness.begin(MEMBER, transient);
    let contract = AssetContract::new(&tx, &tx, &harness.settings);
    contract.create_asset(tx.transient()).await.unwrap();
    let listing = contract.get_all_assets().await.unwrap();
    assert_eq!(listing.len(), 4);
    assert_eq!(listing[3].value, Disclosed::Visible(400));
    tx.abort();

    assert_eq!(harness.all(MEMBER).await.unwrap().len(), 3);
}
