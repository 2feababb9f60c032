//! JSON encoding shared by transient input and persisted records

use crate::errors::{AssetError, StorageError};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Encode a record for storage
pub fn encode_record<T: Serialize>(record: &T) -> Result<Vec<u8>, AssetError> {
    serde_json::to_vec(record)
        .map_err(|e| AssetError::Storage(StorageError::WriteFailed(e.to_string())))
}

/// Decode a stored record, reporting the key on failure
pub fn decode_record<T: DeserializeOwned>(key: &str, bytes: &[u8]) -> Result<T, StorageError> {
    serde_json::from_slice(bytes).map_err(|e| StorageError::corrupted(key, e.to_string()))
}
