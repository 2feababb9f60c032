//! Asset record types
//!
//! An [`Asset`] never hits storage as a whole. It is split into a
//! [`PublicRecord`] kept in the replicated world state and a [`PrivateRecord`]
//! kept in a confidential collection, and merged back into an [`AssetView`]
//! on read. Which fields land where is decided by
//! [`PartitionPolicy`](crate::policy::PartitionPolicy).

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Sentinel shown in place of a field the caller is not allowed to see
pub const CONFIDENTIAL: &str = "CONFIDENTIAL";

/// Organization (MSP) identifier of an invoking client
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrgId(String);

impl OrgId {
    /// Create an organization id
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identifier
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrgId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OrgId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Full asset as supplied by a writer through transient input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Asset {
    /// Ledger-wide unique key
    pub id: String,
    /// Descriptive owner name
    pub owner: String,
    /// Confidential amount
    pub value: i64,
}

impl Asset {
    /// Create an asset
    pub fn new(id: impl Into<String>, owner: impl Into<String>, value: i64) -> Self {
        Self {
            id: id.into(),
            owner: owner.into(),
            value,
        }
    }
}

/// Portion of an asset stored in the world state under its id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PublicRecord {
    /// Asset id, identical to the world state key
    pub id: String,
    /// Owner, absent when the owner is kept private
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
}

/// Portion of an asset stored in the confidential collection under its id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PrivateRecord {
    /// Owner, present only when the owner is kept private
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    /// Confidential amount
    pub value: i64,
}

/// A field value as seen by a particular caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Disclosed<T> {
    /// The caller can read the value
    Visible(T),
    /// The value is withheld; serialized as [`CONFIDENTIAL`]
    Confidential,
}

impl<T> Disclosed<T> {
    /// Whether the value is readable
    pub fn is_visible(&self) -> bool {
        matches!(self, Self::Visible(_))
    }
}

impl<T> From<Option<T>> for Disclosed<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Confidential, Self::Visible)
    }
}

impl<T: Serialize> Serialize for Disclosed<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Visible(value) => value.serialize(serializer),
            Self::Confidential => serializer.serialize_str(CONFIDENTIAL),
        }
    }
}

/// Accepts only the literal sentinel string
struct Sentinel;

impl<'de> Deserialize<'de> for Sentinel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if raw == CONFIDENTIAL {
            Ok(Sentinel)
        } else {
            Err(serde::de::Error::custom("not the confidential sentinel"))
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DisclosedRepr<T> {
    Confidential(Sentinel),
    Visible(T),
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Disclosed<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match DisclosedRepr::deserialize(deserializer)? {
            DisclosedRepr::Confidential(Sentinel) => Self::Confidential,
            DisclosedRepr::Visible(value) => Self::Visible(value),
        })
    }
}

/// Merged read result returned by `ReadAsset` and `GetAllAssets`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetView {
    /// Asset id
    pub id: String,
    /// Owner, or the sentinel when kept private and unreadable
    pub owner: Disclosed<String>,
    /// Value, or the sentinel when unreadable
    pub value: Disclosed<i64>,
}

impl AssetView {
    /// Merge a public record with the private record the caller could read
    pub fn merge(public: PublicRecord, private: Option<PrivateRecord>) -> Self {
        let (private_owner, value) = match private {
            Some(record) => (record.owner, Some(record.value)),
            None => (None, None),
        };
        Self {
            id: public.id,
            owner: public.owner.or(private_owner).into(),
            value: value.into(),
        }
    }

    /// Whether any field was withheld from the caller
    pub fn is_redacted(&self) -> bool {
        !self.owner.is_visible() || !self.value.is_visible()
    }
}
