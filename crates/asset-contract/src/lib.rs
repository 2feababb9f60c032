//! # Asset Contract - Layer 4: Orchestration
//!
//! **Purpose**: Manage assets whose id and owner are public while the value
//! lives in a confidential collection readable only by its member
//! organizations.
//!
//! Operations: `CreateAsset`, `ReadAsset`, `UpdateAsset`, `GetAllAssets` and
//! `InitLedger`. The contract is handed its stores explicitly through
//! [`AssetContract::new`]; it never reaches for ledger state on its own.
//!
//! A caller outside the collection still gets a result from reads. The
//! fields it cannot see are reported as `"CONFIDENTIAL"` instead of failing
//! the call.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Contract operations
pub mod contract;

/// Demonstration seed data
pub mod fixtures;

/// Named-function dispatch
pub mod invocation;

/// Deployment settings
pub mod settings;

pub use contract::AssetContract;
pub use fixtures::demo_assets;
pub use invocation::{Function, Invocation};
pub use settings::ContractSettings;
