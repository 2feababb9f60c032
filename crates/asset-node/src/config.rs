//! Node Configuration
//!
//! Resolved in layers: built-in defaults, then the optional TOML file, then
//! the bootstrap environment variables, then validation.

use crate::errors::{NodeError, Result};
use asset_contract::ContractSettings;
use asset_core::{CollectionConfig, DEFAULT_COLLECTION};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable naming the contract instance
pub const CHAINCODE_ID_ENV: &str = "CORE_CHAINCODE_ID_NAME";
/// Environment variable holding the listen address
pub const SERVER_ADDRESS_ENV: &str = "CHAINCODE_SERVER_ADDRESS";
/// Environment variable relocating the node's data directory
pub const NODE_PATH_ENV: &str = "ASSET_NODE_PATH";

const DEFAULT_CHAINCODE_ID: &str = "private-asset";
const DEFAULT_SERVER_ADDRESS: &str = "0.0.0.0:9999";

/// Resolve the default ledger snapshot path.
///
/// Priority:
/// 1. `$ASSET_NODE_PATH/.asset-node/ledger.json` if ASSET_NODE_PATH is set
/// 2. `~/.asset-node/ledger.json` (home directory)
/// 3. `./.asset-node/ledger.json` (current directory fallback)
pub fn default_state_path() -> PathBuf {
    std::env::var(NODE_PATH_ENV)
        .ok()
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".asset-node")
        .join("ledger.json")
}

/// Node configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeConfig {
    /// Contract instance name
    pub chaincode_id: String,

    /// Listen address (`host:port`)
    pub server_address: String,

    /// Ledger snapshot file
    pub state_path: PathBuf,

    /// JSON collections file; replaces `collections` when set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collections_config: Option<PathBuf>,

    /// Contract deployment settings
    pub contract: ContractSettings,

    /// Private collection definitions
    pub collections: Vec<CollectionConfig>,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            chaincode_id: DEFAULT_CHAINCODE_ID.to_string(),
            server_address: DEFAULT_SERVER_ADDRESS.to_string(),
            state_path: default_state_path(),
            collections_config: None,
            contract: ContractSettings::default(),
            collections: vec![CollectionConfig::members_only(
                DEFAULT_COLLECTION,
                ["Org1MSP", "Org2MSP"],
            )],
        }
    }
}

impl NodeConfig {
    /// Load, apply the environment and validate
    ///
    /// A missing file is not an error; the defaults are used instead.
    pub fn load(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let text = std::fs::read_to_string(path).map_err(|e| NodeError::io(path, e))?;
            Self::from_toml(&text)?
        } else {
            debug!(path = %path.display(), "no config file, using defaults");
            Self::default()
        };
        config.apply_env();
        config.resolve_collections()?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML document on top of the defaults
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| NodeError::config(e.to_string()))
    }

    /// Render as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| NodeError::config(e.to_string()))
    }

    /// Override fields from the bootstrap environment variables
    pub fn apply_env(&mut self) {
        if let Some(id) = non_empty_env(CHAINCODE_ID_ENV) {
            self.chaincode_id = id;
        }
        if let Some(address) = non_empty_env(SERVER_ADDRESS_ENV) {
            self.server_address = address;
        }
    }

    /// Replace `collections` with the contents of `collections_config`
    pub fn resolve_collections(&mut self) -> Result<()> {
        let Some(path) = &self.collections_config else {
            return Ok(());
        };
        let text = std::fs::read_to_string(path).map_err(|e| NodeError::io(path, e))?;
        self.collections = serde_json::from_str(&text)
            .map_err(|e| NodeError::config(format!("{}: {e}", path.display())))?;
        Ok(())
    }

    /// Check the resolved configuration
    pub fn validate(&self) -> Result<()> {
        if self.chaincode_id.trim().is_empty() {
            return Err(NodeError::config("chaincode_id cannot be empty"));
        }
        validate_address(&self.server_address)?;
        if self.contract.collection.is_empty() {
            return Err(NodeError::config("contract.collection cannot be empty"));
        }
        for collection in &self.collections {
            collection.validate()?;
        }
        if self.collection().is_none() {
            return Err(NodeError::config(format!(
                "collection {} is not declared",
                self.contract.collection
            )));
        }
        Ok(())
    }

    /// Definition of the collection the contract writes to
    pub fn collection(&self) -> Option<&CollectionConfig> {
        self.collections
            .iter()
            .find(|collection| collection.name == self.contract.collection)
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}

fn validate_address(address: &str) -> Result<()> {
    let (host, port) = address
        .rsplit_once(':')
        .ok_or_else(|| NodeError::config(format!("server_address {address} is not host:port")))?;
    if host.is_empty() {
        return Err(NodeError::config(format!(
            "server_address {address} has no host"
        )));
    }
    port.parse::<u16>()
        .map_err(|_| NodeError::config(format!("server_address {address} has an invalid port")))?;
    Ok(())
}
