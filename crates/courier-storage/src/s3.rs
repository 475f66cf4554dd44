use crate::keys;
use crate::traits::{Storage, StorageError, StorageResult};
use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use courier_core::StoreTarget;
use object_store::aws::{AmazonS3, AmazonS3Builder};
use object_store::path::Path;
use object_store::Error as ObjectStoreError;
use object_store::{ObjectStoreExt, PutPayload, Result as ObjectResult, RetryConfig};

/// S3-compatible storage implementation (MinIO, AWS S3, ...)
#[derive(Clone)]
pub struct S3Storage {
    store: AmazonS3,
    bucket: String,
    endpoint: String,
}

impl S3Storage {
    /// Create a new S3Storage bound to the target's bucket.
    ///
    /// The store is addressed as `http://{endpoint}` with path-style requests. Requests
    /// are not retried: a failed put is reported to the caller straight away.
    pub fn new(target: &StoreTarget, region: &str) -> StorageResult<Self> {
        let endpoint = target.endpoint.trim().trim_end_matches('/').to_string();
        if endpoint.is_empty() {
            return Err(StorageError::ConfigError(
                "Store endpoint is empty".to_string(),
            ));
        }

        let retry = RetryConfig {
            max_retries: 0,
            ..Default::default()
        };

        let store = AmazonS3Builder::new()
            .with_endpoint(format!("http://{}", endpoint))
            .with_allow_http(true)
            .with_region(region)
            .with_bucket_name(target.bucket.clone())
            .with_access_key_id(target.access_key.clone())
            .with_secret_access_key(target.secret_key.clone())
            .with_retry(retry)
            .build()
            .map_err(|e| StorageError::ConfigError(e.to_string()))?;

        Ok(S3Storage {
            store,
            bucket: target.bucket.clone(),
            endpoint,
        })
    }
}

#[async_trait]
impl Storage for S3Storage {
    async fn upload_with_key(&self, storage_key: &str, data: Vec<u8>) -> StorageResult<String> {
        keys::validate_storage_key(storage_key)?;
        let size = data.len() as u64;
        let bytes = Bytes::from(data);
        let location = Path::from(storage_key.to_string());
        let start = std::time::Instant::now();

        let result: ObjectResult<_> = self.store.put(&location, PutPayload::from(bytes)).await;

        result.map_err(|e| {
            tracing::error!(
                error = %e,
                bucket = %self.bucket,
                key = %storage_key,
                size_bytes = size,
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "S3 upload failed"
            );
            StorageError::UploadFailed(e.to_string())
        })?;

        let url = self.public_url(storage_key);

        tracing::info!(
            bucket = %self.bucket,
            key = %storage_key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 upload successful"
        );

        Ok(url)
    }

    async fn download(&self, storage_key: &str) -> StorageResult<Vec<u8>> {
        let start = std::time::Instant::now();
        let location = Path::from(storage_key.to_string());

        let result: ObjectResult<_> = self.store.get(&location).await;

        let result = result.map_err(|e| match e {
            ObjectStoreError::NotFound { .. } => StorageError::NotFound(storage_key.to_string()),
            other => {
                tracing::error!(
                    error = %other,
                    bucket = %self.bucket,
                    key = %storage_key,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "S3 download failed"
                );
                StorageError::DownloadFailed(other.to_string())
            }
        })?;

        let bytes = result
            .bytes()
            .await
            .map_err(|e| StorageError::DownloadFailed(e.to_string()))?;

        tracing::debug!(
            bucket = %self.bucket,
            key = %storage_key,
            size_bytes = bytes.len() as u64,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 download successful"
        );

        Ok(bytes.to_vec())
    }

    async fn exists(&self, storage_key: &str) -> StorageResult<bool> {
        let location = Path::from(storage_key.to_string());
        match self.store.head(&location).await {
            Ok(_) => Ok(true),
            Err(ObjectStoreError::NotFound { .. }) => Ok(false),
            Err(e) => Err(StorageError::BackendError(e.to_string())),
        }
    }

    fn public_url(&self, storage_key: &str) -> String {
        keys::public_url(&self.endpoint, &self.bucket, storage_key)
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::S3
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(endpoint: &str) -> StoreTarget {
        StoreTarget {
            bucket: "att".to_string(),
            endpoint: endpoint.to_string(),
            access_key: "minioadmin".to_string(),
            secret_key: "minioadmin".to_string(),
        }
    }

    #[test]
    fn test_public_url_is_path_style_over_http() {
        let storage = S3Storage::new(&target("s3.local"), "us-east-1").unwrap();
        assert_eq!(
            storage.public_url("proj1/2024-01-02/a.jpg"),
            "http://s3.local/att/proj1/2024-01-02/a.jpg"
        );
        assert_eq!(storage.backend_type(), StorageBackend::S3);
    }

    #[test]
    fn test_empty_endpoint_is_config_error() {
        let result = S3Storage::new(&target("  "), "us-east-1");
        assert!(matches!(result, Err(StorageError::ConfigError(_))));
    }

    #[tokio::test]
    async fn test_upload_to_unreachable_store_fails() {
        // Port 1 on loopback refuses connections.
        let storage = S3Storage::new(&target("127.0.0.1:1"), "us-east-1").unwrap();
        let result = storage
            .upload_with_key("proj1/2024-01-02/a.txt", b"hello".to_vec())
            .await;
        assert!(matches!(result, Err(StorageError::UploadFailed(_))));
    }

    #[tokio::test]
    async fn test_upload_rejects_traversal_key() {
        let storage = S3Storage::new(&target("127.0.0.1:1"), "us-east-1").unwrap();
        let result = storage.upload_with_key("../escape", b"x".to_vec()).await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));
    }
}
