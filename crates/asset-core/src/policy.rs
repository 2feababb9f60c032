//! Partitioning policy: which asset fields are public and which are private

use crate::types::{Asset, PrivateRecord, PublicRecord};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Deployment-time choice of how an asset is split across partitions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartitionPolicy {
    /// `{id, owner}` in the world state, `{value}` in the collection
    #[default]
    SplitPublicPrivate,
    /// Only an `{id}` anchor in the world state, `{owner, value}` in the collection
    AllPrivate,
}

impl PartitionPolicy {
    /// Split an asset into its public and private records
    pub fn split(&self, asset: &Asset) -> (PublicRecord, PrivateRecord) {
        match self {
            Self::SplitPublicPrivate => (
                PublicRecord {
                    id: asset.id.clone(),
                    owner: Some(asset.owner.clone()),
                },
                PrivateRecord {
                    owner: None,
                    value: asset.value,
                },
            ),
            Self::AllPrivate => (
                PublicRecord {
                    id: asset.id.clone(),
                    owner: None,
                },
                PrivateRecord {
                    owner: Some(asset.owner.clone()),
                    value: asset.value,
                },
            ),
        }
    }

    /// Configuration name of the policy
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SplitPublicPrivate => "split_public_private",
            Self::AllPrivate => "all_private",
        }
    }
}

impl fmt::Display for PartitionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PartitionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "split_public_private" => Ok(Self::SplitPublicPrivate),
            "all_private" => Ok(Self::AllPrivate),
            other => Err(format!(
                "unknown partition policy '{other}' (expected split_public_private or all_private)"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_keeps_owner_public() {
        let asset = Asset::new("asset1", "Org1", 100);
        let (public, private) = PartitionPolicy::SplitPublicPrivate.split(&asset);
        assert_eq!(public.owner.as_deref(), Some("Org1"));
        assert_eq!(private.owner, None);
        assert_eq!(private.value, 100);
    }

    #[test]
    fn test_all_private_leaves_anchor() {
        let asset = Asset::new("asset1", "Org1", 100);
        let (public, private) = PartitionPolicy::AllPrivate.split(&asset);
        assert_eq!(public.id, "asset1");
        assert_eq!(public.owner, None);
        assert_eq!(private.owner.as_deref(), Some("Org1"));
    }

    #[test]
    fn test_policy_names_round_trip() {
        for policy in [PartitionPolicy::SplitPublicPrivate, PartitionPolicy::AllPrivate] {
            assert_eq!(policy.as_str().parse::<PartitionPolicy>(), Ok(policy));
        }
        assert!("public".parse::<PartitionPolicy>().is_err());
    }
}
