#[cfg(feature = "storage-local")]
use crate::LocalStorage;
#[cfg(feature = "storage-s3")]
use crate::S3Storage;
use crate::{Storage, StorageBackend, StorageError, StorageResult};
use async_trait::async_trait;
use courier_core::{IngestConfig, StoreTarget};
#[cfg(feature = "storage-local")]
use std::path::PathBuf;
use std::sync::Arc;

/// Opens a storage backend for the store target named in a request.
///
/// Every ingestion request carries its own endpoint, bucket and credentials, so a
/// backend is created per call rather than once at startup.
#[async_trait]
pub trait StorageConnector: Send + Sync {
    async fn connect(&self, target: &StoreTarget) -> StorageResult<Arc<dyn Storage>>;

    fn backend_type(&self) -> StorageBackend;
}

/// Connects to S3-compatible object stores over plain HTTP.
#[cfg(feature = "storage-s3")]
#[derive(Clone, Debug)]
pub struct S3Connector {
    region: String,
}

#[cfg(feature = "storage-s3")]
impl S3Connector {
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
        }
    }
}

#[cfg(feature = "storage-s3")]
#[async_trait]
impl StorageConnector for S3Connector {
    async fn connect(&self, target: &StoreTarget) -> StorageResult<Arc<dyn Storage>> {
        let storage = S3Storage::new(target, &self.region)?;
        Ok(Arc::new(storage))
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::S3
    }
}

/// Writes objects below a local directory; credentials in the target are ignored.
#[cfg(feature = "storage-local")]
#[derive(Clone, Debug)]
pub struct LocalConnector {
    base_path: PathBuf,
}

#[cfg(feature = "storage-local")]
impl LocalConnector {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }
}

#[cfg(feature = "storage-local")]
#[async_trait]
impl StorageConnector for LocalConnector {
    async fn connect(&self, target: &StoreTarget) -> StorageResult<Arc<dyn Storage>> {
        let storage = LocalStorage::new(&self.base_path, &target.bucket, &target.endpoint).await?;
        Ok(Arc::new(storage))
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}

/// Create the connector selected by configuration
pub fn connector_for(config: &IngestConfig) -> StorageResult<Arc<dyn StorageConnector>> {
    match config.storage_backend {
        #[cfg(feature = "storage-s3")]
        StorageBackend::S3 => Ok(Arc::new(S3Connector::new(config.s3_region.clone()))),

        #[cfg(not(feature = "storage-s3"))]
        StorageBackend::S3 => Err(StorageError::ConfigError(
            "S3 storage backend not available (storage-s3 feature not enabled)".to_string(),
        )),

        #[cfg(feature = "storage-local")]
        StorageBackend::Local => {
            let base_path = config.local_storage_path.clone().ok_or_else(|| {
                StorageError::ConfigError("LOCAL_STORAGE_PATH not configured".to_string())
            })?;
            Ok(Arc::new(LocalConnector::new(base_path)))
        }

        #[cfg(not(feature = "storage-local"))]
        StorageBackend::Local => Err(StorageError::ConfigError(
            "Local storage backend not available (storage-local feature not enabled)".to_string(),
        )),
    }
}
