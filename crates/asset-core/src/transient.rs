//! Transient input decoding
//!
//! Writers never pass asset fields as invocation arguments; they attach them
//! as a JSON payload under [`ASSET_PROPERTIES_KEY`] in the transient map so
//! the confidential value stays out of the transaction record.

use crate::errors::{AssetError, Result};
use crate::types::Asset;
use std::collections::BTreeMap;

/// Transient key carrying the asset payload
pub const ASSET_PROPERTIES_KEY: &str = "asset_properties";

/// Off-ledger input attached to an invocation
pub type TransientMap = BTreeMap<String, Vec<u8>>;

/// Decode the asset carried in the transient map
///
/// Fails with `MissingInput` when the key is absent and with `Decode` when the
/// payload is not exactly `{id, owner, value}` or the id is empty.
pub fn decode_asset(transient: &TransientMap) -> Result<Asset> {
    let payload = transient
        .get(ASSET_PROPERTIES_KEY)
        .ok_or_else(|| AssetError::missing_input(ASSET_PROPERTIES_KEY))?;

    let asset: Asset = serde_json::from_slice(payload)?;
    if asset.id.is_empty() {
        return Err(AssetError::decode("asset id must not be empty"));
    }
    Ok(asset)
}

/// Build a transient map holding an encoded asset
pub fn asset_transient(asset: &Asset) -> Result<TransientMap> {
    let payload = serde_json::to_vec(asset)?;
    Ok(TransientMap::from([(ASSET_PROPERTIES_KEY.to_string(), payload)]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn transient(payload: &str) -> TransientMap {
        TransientMap::from([(ASSET_PROPERTIES_KEY.to_string(), payload.as_bytes().to_vec())])
    }

    #[test]
    fn test_decode_valid_payload() {
        let asset = decode_asset(&transient(r#"{"id":"asset1","owner":"Org1","value":100}"#))
            .unwrap();
        assert_eq!(asset, Asset::new("asset1", "Org1", 100));
    }

    #[test]
    fn test_missing_key() {
        let err = decode_asset(&TransientMap::new()).unwrap_err();
        assert_matches!(err, AssetError::MissingInput { key } if key == ASSET_PROPERTIES_KEY);
    }

    #[test]
    fn test_malformed_payloads() {
        for payload in [
            "not json",
            r#"{"id":"asset1","owner":"Org1"}"#,
            r#"{"id":"asset1","owner":"Org1","value":"lots"}"#,
            r#"{"id":"asset1","owner":"Org1","value":1,"color":"blue"}"#,
            r#"{"id":"","owner":"Org1","value":1}"#,
        ] {
            assert_matches!(
                decode_asset(&transient(payload)),
                Err(AssetError::Decode { .. }),
                "payload {payload} should not decode"
            );
        }
    }

    #[test]
    fn test_asset_transient_decodes_back() {
        let asset = Asset::new("asset7", "Org2", -5);
        let map = asset_transient(&asset).unwrap();
        assert_eq!(decode_asset(&map).unwrap(), asset);
    }
}
