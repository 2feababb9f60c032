//! Deployment settings for the contract

use asset_core::{PartitionPolicy, DEFAULT_COLLECTION};
use serde::{Deserialize, Serialize};

/// Where the contract keeps confidential fields and which fields those are
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContractSettings {
    /// Name of the confidential collection
    pub collection: String,
    /// Public/private field split
    pub policy: PartitionPolicy,
}

impl ContractSettings {
    /// Settings with an explicit policy and the default collection
    pub fn with_policy(policy: PartitionPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }
}

impl Default for ContractSettings {
    fn default() -> Self {
        Self {
            collection: DEFAULT_COLLECTION.to_string(),
            policy: PartitionPolicy::default(),
        }
    }
}
