//! Shared key and URL generation for storage backends.
//!
//! Key format: `{project_name}/{YYYY-MM-DD}/{file_name}`.
//! Public URL format: `http://{endpoint}/{bucket}/{key}`.

use chrono::NaiveDate;
use courier_core::constants::DATE_PARTITION_FORMAT;

use crate::{StorageError, StorageResult};

/// Render the date partition segment of a storage key.
pub fn date_partition(date: NaiveDate) -> String {
    date.format(DATE_PARTITION_FORMAT).to_string()
}

/// Generate the storage key of an artifact.
///
/// The artifact and its thumbnail must be keyed with the same `date` so that both land
/// in the same partition.
pub fn generate_storage_key(project_name: &str, date: NaiveDate, file_name: &str) -> String {
    format!("{}/{}/{}", project_name, date_partition(date), file_name)
}

/// Public URL of an object. Stores are reached over plain HTTP.
pub fn public_url(endpoint: &str, bucket: &str, storage_key: &str) -> String {
    format!(
        "http://{}/{}/{}",
        endpoint.trim_end_matches('/'),
        bucket,
        storage_key
    )
}

/// Reject keys that are empty, absolute, or contain traversal segments.
pub fn validate_storage_key(storage_key: &str) -> StorageResult<()> {
    if storage_key.is_empty() {
        return Err(StorageError::InvalidKey("Storage key is empty".to_string()));
    }
    if storage_key.starts_with('/') || storage_key.split('/').any(|s| s == "..") {
        return Err(StorageError::InvalidKey(
            "Storage key contains invalid characters".to_string(),
        ));
    }
    Ok(())
}
