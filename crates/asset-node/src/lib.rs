//! # Asset Node - Layer 7: Runtime
//!
//! **Purpose**: Host the confidential asset contract as a local node:
//! resolve the bootstrap configuration, run invocations against an
//! in-process ledger and persist the committed state between runs.
//!
//! # Architecture Constraints
//!
//! - YES Configuration loading and environment overrides
//! - YES One transaction per invocation, committed only on success
//! - YES Snapshot persistence of the committed ledger
//! - NO wire transport to a remote peer
//! - NO contract semantics (see `asset-contract`)

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Node configuration
pub mod config;

/// Error types
pub mod errors;

/// Invocation runner
pub mod runner;

/// Ledger snapshot persistence
pub mod snapshot;

pub use config::NodeConfig;
pub use errors::{NodeError, Result};
pub use runner::{InvocationOutcome, NodeRunner};
pub use snapshot::SnapshotFile;
