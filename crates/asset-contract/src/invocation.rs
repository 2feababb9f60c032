//! Named-function invocation surface
//!
//! Clients address the contract by function name with string arguments.
//! Results are returned as JSON bytes; write operations return an empty
//! payload.

use crate::contract::AssetContract;
use asset_core::effects::{PrivateDataEffects, WorldStateEffects};
use asset_core::{AssetError, Result, TransientMap};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Operations exposed by the contract
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Function {
    /// Create an asset from transient input
    CreateAsset,
    /// Read one asset by id
    ReadAsset,
    /// Overwrite an existing asset from transient input
    UpdateAsset,
    /// List every asset
    GetAllAssets,
    /// Seed the demonstration assets
    InitLedger,
}

impl Function {
    /// Every function, in declaration order
    pub const ALL: [Function; 5] = [
        Function::CreateAsset,
        Function::ReadAsset,
        Function::UpdateAsset,
        Function::GetAllAssets,
        Function::InitLedger,
    ];

    /// Invocation name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CreateAsset => "CreateAsset",
            Self::ReadAsset => "ReadAsset",
            Self::UpdateAsset => "UpdateAsset",
            Self::GetAllAssets => "GetAllAssets",
            Self::InitLedger => "InitLedger",
        }
    }

    /// Number of string arguments the function takes
    pub fn arity(&self) -> usize {
        match self {
            Self::ReadAsset => 1,
            _ => 0,
        }
    }

    /// Whether the function writes ledger state
    pub fn is_write(&self) -> bool {
        matches!(self, Self::CreateAsset | Self::UpdateAsset | Self::InitLedger)
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Function {
    type Err = AssetError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|function| function.as_str() == s)
            .ok_or_else(|| AssetError::invalid_invocation(format!("unknown function {s}")))
    }
}

/// One call to the contract
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invocation {
    /// Function name
    pub function: String,
    /// Positional string arguments
    #[serde(default)]
    pub args: Vec<String>,
}

impl Invocation {
    /// Create an invocation
    pub fn new(function: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            function: function.into(),
            args,
        }
    }

    /// Resolve the function and check the argument count
    pub fn resolve(&self) -> Result<Function> {
        let function: Function = self.function.parse()?;
        if self.args.len() != function.arity() {
            return Err(AssetError::invalid_invocation(format!(
                "{function} expects {} argument(s), got {}",
                function.arity(),
                self.args.len()
            )));
        }
        Ok(function)
    }
}

impl<'a, W, P> AssetContract<'a, W, P>
where
    W: WorldStateEffects + ?Sized,
    P: PrivateDataEffects + ?Sized,
{
    /// Route an invocation to the matching operation
    pub async fn invoke(&self, invocation: &Invocation, transient: &TransientMap) -> Result<Vec<u8>> {
        let function = invocation.resolve()?;
        debug!(%function, args = ?invocation.args, "dispatching invocation");
        match function {
            Function::CreateAsset => {
                self.create_asset(transient).await?;
                Ok(Vec::new())
            }
            Function::ReadAsset => {
                let view = self.read_asset(&invocation.args[0]).await?;
                Ok(serde_json::to_vec(&view)?)
            }
            Function::UpdateAsset => {
                self.update_asset(transient).await?;
                Ok(Vec::new())
            }
            Function::GetAllAssets => {
                let assets = self.get_all_assets().await?;
                Ok(serde_json::to_vec(&assets)?)
            }
            Function::InitLedger => {
                self.init_ledger().await?;
                Ok(Vec::new())
            }
        }
    }
}
