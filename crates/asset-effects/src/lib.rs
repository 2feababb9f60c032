//! # Asset Effects - Layer 3: Store Handlers
//!
//! In-memory implementations of the partition store traits from
//! `asset-core`, plus the per-invocation [`TransactionContext`] that gives a
//! contract invocation its read-your-writes view and all-or-nothing commit.
//!
//! The contract itself does not depend on this crate; it is parameterized
//! over `WorldStateEffects` and `PrivateDataEffects`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Local ledger peer and snapshots
pub mod peer;

/// Private collection handler
pub mod private_data;

/// Per-invocation transaction context
pub mod transaction;

/// World state handler
pub mod world_state;

pub use peer::{LedgerPeer, LedgerSnapshot};
pub use private_data::{CollectionData, MemoryPrivateData, OrgPrivateData};
pub use transaction::{CommitReceipt, TransactionContext};
pub use world_state::MemoryWorldState;
