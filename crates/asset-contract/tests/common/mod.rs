//! Shared harness: a local peer where every call runs as its own
//! transaction, committed only when the operation succeeds.

#![allow(dead_code)]

use asset_contract::{AssetContract, ContractSettings, Invocation};
use asset_core::collection::CollectionConfig;
use asset_core::transient::asset_transient;
use asset_core::{Asset, AssetView, OrgId, PartitionPolicy, Result, TransientMap};
use asset_effects::{LedgerPeer, TransactionContext};

/// Member of the confidential collection
pub const MEMBER: &str = "Org1MSP";
/// Second member of the confidential collection
pub const OTHER_MEMBER: &str = "Org2MSP";
/// Organization outside the confidential collection
pub const OUTSIDER: &str = "Org3MSP";

pub struct Harness {
    pub peer: LedgerPeer,
    pub settings: ContractSettings,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_policy(PartitionPolicy::SplitPublicPrivate)
    }

    pub fn with_policy(policy: PartitionPolicy) -> Self {
        let settings = ContractSettings::with_policy(policy);
        let peer = LedgerPeer::new([CollectionConfig::members_only(
            settings.collection.clone(),
            [MEMBER, OTHER_MEMBER],
        )])
        .unwrap();
        Self { peer, settings }
    }

    pub fn begin(&self, org: &str, transient: TransientMap) -> TransactionContext {
        self.peer.begin(OrgId::new(org), transient)
    }

    pub async fn create(&self, org: &str, asset: &Asset) -> Result<()> {
        let tx = self.begin(org, asset_transient(asset)?);
        let result = AssetContract::new(&tx, &tx, &self.settings)
            .create_asset(tx.transient())
            .await;
        finish(tx, result).await
    }

    pub async fn create_raw(&self, org: &str, transient: TransientMap) -> Result<()> {
        let tx = self.begin(org, transient);
        let result = AssetContract::new(&tx, &tx, &self.settings)
            .create_asset(tx.transient())
            .await;
        finish(tx, result).await
    }

    pub async fn update(&self, org: &str, asset: &Asset) -> Result<()> {
        let tx = self.begin(org, asset_transient(asset)?);
        let result = AssetContract::new(&tx, &tx, &self.settings)
            .update_asset(tx.transient())
            .await;
        finish(tx, result).await
    }

    pub async fn read(&self, org: &str, id: &str) -> Result<AssetView> {
        let tx = self.begin(org, TransientMap::new());
        let result = AssetContract::new(&tx, &tx, &self.settings)
            .read_asset(id)
            .await;
        finish(tx, result).await
    }

    pub async fn all(&self, org: &str) -> Result<Vec<AssetView>> {
        let tx = self.begin(org, TransientMap::new());
        let result = AssetContract::new(&tx, &tx, &self.settings)
            .get_all_assets()
            .await;
        finish(tx, result).await
    }

    pub async fn init(&self, org: &str) -> Result<()> {
        let tx = self.begin(org, TransientMap::new());
        let result = AssetContract::new(&tx, &tx, &self.settings)
            .init_ledger()
            .await;
        finish(tx, result).await
    }

    pub async fn invoke(
        &self,
        org: &str,
        invocation: &Invocation,
        transient: TransientMap,
    ) -> Result<Vec<u8>> {
        let tx = self.begin(org, transient);
        let result = AssetContract::new(&tx, &tx, &self.settings)
            .invoke(invocation, tx.transient())
            .await;
        finish(tx, result).await
    }
}

async fn finish<T>(tx: TransactionContext, result: Result<T>) -> Result<T> {
    match result {
        Ok(value) => {
            tx.commit().await;
            Ok(value)
        }
        Err(error) => {
            tx.abort();
            Err(error)
        }
    }
}
