//! A storage connector whose backends refuse thumbnail uploads.

use async_trait::async_trait;
use courier_core::constants::THUMBNAIL_SUFFIX;
use courier_core::StoreTarget;
use courier_storage::{
    LocalConnector, Storage, StorageBackend, StorageConnector, StorageError, StorageResult,
};
use std::path::Path;
use std::sync::Arc;

pub struct ThumbnailRejectingConnector {
    inner: LocalConnector,
}

impl ThumbnailRejectingConnector {
    pub fn new(base_path: &Path) -> Self {
        Self {
            inner: LocalConnector::new(base_path),
        }
    }
}

#[async_trait]
impl StorageConnector for ThumbnailRejectingConnector {
    async fn connect(&self, target: &StoreTarget) -> StorageResult<Arc<dyn Storage>> {
        let inner = self.inner.connect(target).await?;
        Ok(Arc::new(ThumbnailRejectingStorage { inner }))
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}

struct ThumbnailRejectingStorage {
    inner: Arc<dyn Storage>,
}

#[async_trait]
impl Storage for ThumbnailRejectingStorage {
    async fn upload_with_key(&self, storage_key: &str, data: Vec<u8>) -> StorageResult<String> {
        if storage_key.contains(THUMBNAIL_SUFFIX) {
            return Err(StorageError::UploadFailed("store refused thumbnail".to_string()));
        }
        self.inner.upload_with_key(storage_key, data).await
    }

    async fn download(&self, storage_key: &str) -> StorageResult<Vec<u8>> {
        self.inner.download(storage_key).await
    }

    async fn exists(&self, storage_key: &str) -> StorageResult<bool> {
        self.inner.exists(storage_key).await
    }

    fn public_url(&self, storage_key: &str) -> String {
        self.inner.public_url(storage_key)
    }

    fn backend_type(&self) -> StorageBackend {
        self.inner.backend_type()
    }
}
