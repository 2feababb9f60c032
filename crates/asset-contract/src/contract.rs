//! Asset contract operations
//!
//! Every write goes to both partitions: the public record into the world
//! state, the private record into the configured collection, both under the
//! asset id. Reads merge the two, substituting the confidential sentinel for
//! whatever the caller cannot read from the collection.
//!
//! The contract holds no state of its own. Atomicity across the two writes
//! comes from the store handed in (one transaction per invocation); the
//! contract only makes sure nothing is written when it can already tell the
//! private write would be refused.

use crate::fixtures::demo_assets;
use crate::settings::ContractSettings;
use asset_core::codec::{decode_record, encode_record};
use asset_core::effects::{PrivateDataEffects, WorldStateEffects};
use asset_core::{
    decode_asset, Asset, AssetError, AssetView, PrivateRecord, PublicRecord, Result, TransientMap,
};
use tracing::{debug, info, warn};

/// Split-storage asset contract bound to one invocation's stores
pub struct AssetContract<'a, W: ?Sized, P: ?Sized> {
    world: &'a W,
    private: &'a P,
    settings: &'a ContractSettings,
}

impl<'a, W, P> AssetContract<'a, W, P>
where
    W: WorldStateEffects + ?Sized,
    P: PrivateDataEffects + ?Sized,
{
    /// Bind the contract to its stores
    pub fn new(world: &'a W, private: &'a P, settings: &'a ContractSettings) -> Self {
        Self {
            world,
            private,
            settings,
        }
    }

    /// Create an asset from the `asset_properties` transient payload
    ///
    /// An existing asset with the same id is overwritten.
    pub async fn create_asset(&self, transient: &TransientMap) -> Result<()> {
        let asset = decode_asset(transient)?;
        self.write_asset(&asset).await?;
        info!(asset_id = %asset.id, "asset created");
        Ok(())
    }

    /// Read an asset as visible to the caller
    pub async fn read_asset(&self, id: &str) -> Result<AssetView> {
        if id.is_empty() {
            return Err(AssetError::not_found(id));
        }
        let public = self
            .public_record(id)
            .await?
            .ok_or_else(|| AssetError::not_found(id))?;
        Ok(self.disclose(id, public).await)
    }

    /// Overwrite an existing asset from the `asset_properties` transient payload
    pub async fn update_asset(&self, transient: &TransientMap) -> Result<()> {
        let asset = decode_asset(transient)?;
        if !self.asset_exists(&asset.id).await? {
            return Err(AssetError::not_found(&asset.id));
        }
        self.write_asset(&asset).await?;
        info!(asset_id = %asset.id, "asset updated");
        Ok(())
    }

    /// Every asset in key order, as visible to the caller
    ///
    /// An entry whose public record cannot be decoded is logged and left out
    /// rather than failing the listing.
    pub async fn get_all_assets(&self) -> Result<Vec<AssetView>> {
        let scan = self.world.get_state_by_range("", "").await?;
        let mut assets = Vec::new();
        for entry in scan {
            let public: PublicRecord = match decode_record(&entry.key, &entry.value) {
                Ok(record) => record,
                Err(error) => {
                    warn!(asset_id = %entry.key, %error, "skipping unreadable asset");
                    continue;
                }
            };
            assets.push(self.disclose(&entry.key, public).await);
        }
        debug!(count = assets.len(), "assets listed");
        Ok(assets)
    }

    /// Seed the demonstration assets, overwriting any previous values
    pub async fn init_ledger(&self) -> Result<()> {
        for asset in demo_assets() {
            self.write_asset(&asset).await?;
        }
        info!("ledger initialized with demonstration assets");
        Ok(())
    }

    /// Whether a public record exists for `id`
    ///
    /// No asset can be registered under an empty id.
    pub async fn asset_exists(&self, id: &str) -> Result<bool> {
        if id.is_empty() {
            return Ok(false);
        }
        Ok(self.world.get_state(id).await?.is_some())
    }

    async fn write_asset(&self, asset: &Asset) -> Result<()> {
        let collection = self.settings.collection.as_str();
        let (public, private) = self.settings.policy.split(asset);
        let public = encode_record(&public)?;
        let private = encode_record(&private)?;

        self.private.ensure_writable(collection).await?;
        self.world.put_state(&asset.id, public).await?;
        self.private
            .put_private_data(collection, &asset.id, private)
            .await?;
        Ok(())
    }

    async fn public_record(&self, id: &str) -> Result<Option<PublicRecord>> {
        match self.world.get_state(id).await? {
            Some(bytes) => Ok(Some(decode_record(id, &bytes)?)),
            None => Ok(None),
        }
    }

    /// Merge in whatever private record the caller can read
    async fn disclose(&self, id: &str, public: PublicRecord) -> AssetView {
        let view = AssetView::merge(public, self.private_record(id).await);
        if view.is_redacted() {
            debug!(asset_id = %id, "confidential fields withheld");
        }
        view
    }

    /// The caller's view of the private record; absence, denial and
    /// unreadable bytes all collapse to `None`
    async fn private_record(&self, id: &str) -> Option<PrivateRecord> {
        let collection = self.settings.collection.as_str();
        let bytes = match self.private.get_private_data(collection, id).await {
            Ok(bytes) => bytes?,
            Err(error) => {
                debug!(asset_id = %id, collection, %error, "private record unavailable");
                return None;
            }
        };
        match decode_record(id, &bytes) {
            Ok(record) => Some(record),
            Err(error) => {
                warn!(asset_id = %id, collection, %error, "private record unreadable");
                None
            }
        }
    }
}
