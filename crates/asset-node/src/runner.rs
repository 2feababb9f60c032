//! Local invocation runner
//!
//! Runs one contract invocation per transaction against an in-process
//! [`LedgerPeer`]. A successful invocation commits its whole write-set; a
//! failed one is aborted and leaves the ledger as it was.

use crate::config::NodeConfig;
use crate::errors::Result as NodeResult;
use asset_contract::{AssetContract, ContractSettings, Function, Invocation};
use asset_core::{AssetError, AssetView, OrgId, Result, TransientMap};
use asset_effects::{CommitReceipt, LedgerPeer};
use std::collections::BTreeSet;
use tracing::{info, warn};

/// Result payload and commit summary of a successful invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationOutcome {
    /// Function that ran
    pub function: Function,
    /// JSON payload, empty for write operations
    pub payload: Vec<u8>,
    /// What the invocation committed
    pub receipt: CommitReceipt,
}

/// Contract host bound to one peer and one deployment
#[derive(Debug, Clone)]
pub struct NodeRunner {
    peer: LedgerPeer,
    settings: ContractSettings,
}

impl NodeRunner {
    /// Create a runner with an empty ledger for `config`
    pub fn new(config: &NodeConfig) -> NodeResult<Self> {
        Ok(Self {
            peer: LedgerPeer::new(config.collections.iter().cloned())?,
            settings: config.contract.clone(),
        })
    }

    /// Underlying peer
    pub fn peer(&self) -> &LedgerPeer {
        &self.peer
    }

    /// Run `invocation` as `org` and commit it if it succeeds
    pub async fn invoke(
        &self,
        org: OrgId,
        invocation: &Invocation,
        transient: TransientMap,
    ) -> Result<InvocationOutcome> {
        let function = invocation.resolve()?;
        let tx = self.peer.begin(org, transient);
        let result = AssetContract::new(&tx, &tx, &self.settings)
            .invoke(invocation, tx.transient())
            .await;
        match result {
            Ok(payload) => {
                let receipt = tx.commit().await;
                Ok(InvocationOutcome {
                    function,
                    payload,
                    receipt,
                })
            }
            Err(error) => {
                warn!(
                    tx_id = %tx.tx_id(),
                    function = %invocation.function,
                    %error,
                    "invocation failed, write-set discarded"
                );
                tx.abort();
                Err(error)
            }
        }
    }

    /// Seed the demonstration assets as `seeder` and list them for every observer
    pub async fn demo(
        &self,
        seeder: OrgId,
        observers: &BTreeSet<OrgId>,
    ) -> Result<Vec<(OrgId, Vec<AssetView>)>> {
        self.invoke(seeder, &Invocation::new("InitLedger", vec![]), TransientMap::new())
            .await?;

        let mut views = Vec::with_capacity(observers.len());
        for org in observers {
            let outcome = self
                .invoke(
                    org.clone(),
                    &Invocation::new("GetAllAssets", vec![]),
                    TransientMap::new(),
                )
                .await?;
            let assets: Vec<AssetView> = serde_json::from_slice(&outcome.payload)?;
            info!(%org, assets = assets.len(), "listed assets");
            views.push((org.clone(), assets));
        }
        Ok(views)
    }
}

/// Parse a `key=value` transient entry; the value is taken as UTF-8 bytes
pub fn parse_transient_entry(entry: &str) -> std::result::Result<(String, Vec<u8>), String> {
    match entry.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.as_bytes().to_vec())),
        _ => Err(format!("expected key=value, got {entry}")),
    }
}

/// Collect parsed entries into a transient map, rejecting duplicate keys
pub fn transient_map(entries: Vec<(String, Vec<u8>)>) -> Result<TransientMap> {
    let mut map = TransientMap::new();
    for (key, value) in entries {
        if map.insert(key.clone(), value).is_some() {
            return Err(AssetError::invalid_invocation(format!(
                "transient key {key} given more than once"
            )));
        }
    }
    Ok(map)
}
