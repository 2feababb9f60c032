//! Private data collection definitions
//!
//! Field names follow the ledger's collections file, e.g.
//!
//! ```json
//! [{
//!     "name": "collectionPrivate",
//!     "policy": "OR('Org1MSP.member','Org2MSP.member')",
//!     "requiredPeerCount": 0,
//!     "maxPeerCount": 1,
//!     "blockToLive": 0,
//!     "memberOnlyRead": true,
//!     "memberOnlyWrite": true
//! }]
//! ```

use crate::errors::StorageError;
use crate::types::OrgId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Default collection name used by the contract
pub const DEFAULT_COLLECTION: &str = "collectionPrivate";

fn default_max_peer_count() -> u32 {
    1
}

/// Definition of one confidential collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionConfig {
    /// Collection name
    pub name: String,
    /// Signature policy naming the member organizations
    pub policy: String,
    /// Peers that must receive the data before endorsement succeeds
    #[serde(default, alias = "required_peer_count")]
    pub required_peer_count: u32,
    /// Upper bound on peers the data is disseminated to
    #[serde(default = "default_max_peer_count", alias = "max_peer_count")]
    pub max_peer_count: u32,
    /// Blocks after which the data is purged (0 keeps it forever)
    #[serde(default, alias = "block_to_live")]
    pub block_to_live: u64,
    /// Only members may read
    #[serde(default, alias = "member_only_read")]
    pub member_only_read: bool,
    /// Only members may write
    #[serde(default, alias = "member_only_write")]
    pub member_only_write: bool,
}

impl CollectionConfig {
    /// Member-restricted collection for the given organizations
    pub fn members_only<I, O>(name: impl Into<String>, orgs: I) -> Self
    where
        I: IntoIterator<Item = O>,
        O: Into<OrgId>,
    {
        let principals: Vec<String> = orgs
            .into_iter()
            .map(|org| {
                let org: OrgId = org.into();
                format!("'{org}.member'")
            })
            .collect();
        Self {
            name: name.into(),
            policy: format!("OR({})", principals.join(",")),
            required_peer_count: 0,
            max_peer_count: default_max_peer_count(),
            block_to_live: 0,
            member_only_read: true,
            member_only_write: true,
        }
    }

    /// Organizations named by the signature policy
    ///
    /// Every quoted principal (`'Org1MSP.member'`, `'Org2MSP.peer'`, ...)
    /// contributes its MSP id regardless of role or of the combinator
    /// (`OR`, `AND`, `OutOf`) it appears under.
    pub fn member_orgs(&self) -> BTreeSet<OrgId> {
        self.policy
            .split('\'')
            .skip(1)
            .step_by(2)
            .filter_map(|principal| principal.rsplit_once('.').map(|(msp, _role)| msp))
            .filter(|msp| !msp.is_empty())
            .map(OrgId::new)
            .collect()
    }

    /// Whether `org` is a member of this collection
    pub fn is_member(&self, org: &OrgId) -> bool {
        self.member_orgs().contains(org)
    }

    /// Whether `org` may read from this collection
    pub fn can_read(&self, org: &OrgId) -> bool {
        !self.member_only_read || self.is_member(org)
    }

    /// Whether `org` may write to this collection
    pub fn can_write(&self, org: &OrgId) -> bool {
        !self.member_only_write || self.is_member(org)
    }

    /// Check the definition is usable
    pub fn validate(&self) -> Result<(), StorageError> {
        if self.name.is_empty() {
            return Err(StorageError::invalid_key("collection name must not be empty"));
        }
        if self.member_orgs().is_empty() {
            return Err(StorageError::invalid_key(format!(
                "collection {} policy names no organizations: {}",
                self.name, self.policy
            )));
        }
        if self.max_peer_count < self.required_peer_count {
            return Err(StorageError::invalid_key(format!(
                "collection {} maxPeerCount {} is below requiredPeerCount {}",
                self.name, self.max_peer_count, self.required_peer_count
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_orgs_from_policy() {
        let config = CollectionConfig {
            policy: "OR('Org1MSP.member', AND('Org2MSP.peer','Org3MSP.admin'))".to_string(),
            ..CollectionConfig::members_only("c", ["Org1MSP"])
        };
        let orgs: Vec<String> = config
            .member_orgs()
            .into_iter()
            .map(|o| o.to_string())
            .collect();
        assert_eq!(orgs, vec!["Org1MSP", "Org2MSP", "Org3MSP"]);
    }

    #[test]
    fn test_read_write_flags() {
        let mut config = CollectionConfig::members_only(DEFAULT_COLLECTION, ["Org1MSP"]);
        let outsider = OrgId::new("Org2MSP");
        assert!(!config.can_read(&outsider));
        assert!(!config.can_write(&outsider));

        config.member_only_write = false;
        assert!(config.can_write(&outsider));
        assert!(config.can_read(&OrgId::new("Org1MSP")));
    }

    #[test]
    fn test_parses_collections_file() {
        let json = r#"[{
            "name": "collectionPrivate",
            "policy": "OR('Org1MSP.member','Org2MSP.member')",
            "requiredPeerCount": 0,
            "maxPeerCount": 3,
            "blockToLive": 1000000,
            "memberOnlyRead": true,
            "memberOnlyWrite": false
        }]"#;
        let configs: Vec<CollectionConfig> = serde_json::from_str(json).unwrap();
        assert_eq!(configs.len(), 1);
        assert_eq!(configs[0].max_peer_count, 3);
        assert!(configs[0].member_only_read);
        assert!(!configs[0].member_only_write);
        assert!(configs[0].validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_definitions() {
        let mut config = CollectionConfig::members_only("c", ["Org1MSP"]);
        config.policy = "OR()".to_string();
        assert!(config.validate().is_err());

        let mut config = CollectionConfig::members_only("c", ["Org1MSP"]);
        config.required_peer_count = 2;
        assert!(config.validate().is_err());
    }
}
