//! # Asset Core - Layer 1: Foundation
//!
//! **Purpose**: Define the asset data model, the transient input decoder, the
//! error vocabulary and the partition store traits the contract runs against.
//!
//! # Architecture Constraints
//!
//! - YES Record types and the public/private partitioning policy
//! - YES Pure decoding of transient input
//! - YES Effect traits for the world state and for private collections
//! - NO store implementations (see `asset-effects`)
//! - NO contract orchestration (see `asset-contract`)

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// JSON encoding of stored records
pub mod codec;

/// Private data collection definitions
pub mod collection;

/// Partition store effect traits
pub mod effects;

/// Error types
pub mod errors;

/// Partitioning policy
pub mod policy;

/// Range scan sequence
pub mod range;

/// Transient input decoding
pub mod transient;

/// Asset record types
pub mod types;

pub use collection::{CollectionConfig, DEFAULT_COLLECTION};
pub use effects::{PrivateDataEffects, WorldStateEffects};
pub use errors::{AssetError, Result, StorageError};
pub use policy::PartitionPolicy;
pub use range::{KeyValue, StateRange};
pub use transient::{decode_asset, TransientMap, ASSET_PROPERTIES_KEY};
pub use types::{Asset, AssetView, Disclosed, OrgId, PrivateRecord, PublicRecord, CONFIDENTIAL};
