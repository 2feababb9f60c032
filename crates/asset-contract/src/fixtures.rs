//! Demonstration assets written by `InitLedger`

use asset_core::Asset;

/// The fixed assets seeded by `InitLedger`, in key order
pub fn demo_assets() -> Vec<Asset> {
    vec![
        Asset::new("asset1", "Org1", 100),
        Asset::new("asset2", "Org2", 200),
        Asset::new("asset3", "Org1", 300),
    ]
}
