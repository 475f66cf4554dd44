use crate::keys;
use crate::traits::{Storage, StorageError, StorageResult};
use crate::StorageBackend;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Local filesystem storage implementation
///
/// Objects live under `{base_path}/{bucket}/{key}` and are advertised with the same
/// public URL an object store at `endpoint` would use, so callers cannot tell the
/// backends apart.
#[derive(Clone)]
pub struct LocalStorage {
    bucket_path: PathBuf,
    bucket: String,
    endpoint: String,
}

impl LocalStorage {
    /// Create a new LocalStorage instance
    ///
    /// # Arguments
    /// * `base_path` - Root directory holding one sub-directory per bucket
    /// * `bucket` - Bucket this instance writes into
    /// * `endpoint` - Host used in public URLs (e.g. "files.internal:8080")
    pub async fn new(
        base_path: impl Into<PathBuf>,
        bucket: &str,
        endpoint: &str,
    ) -> StorageResult<Self> {
        if bucket.is_empty() || bucket.contains('/') || bucket == ".." || bucket == "." {
            return Err(StorageError::ConfigError(format!(
                "Invalid bucket name: {:?}",
                bucket
            )));
        }

        let bucket_path = base_path.into().join(bucket);

        fs::create_dir_all(&bucket_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                bucket_path.display(),
                e
            ))
        })?;

        Ok(LocalStorage {
            bucket_path,
            bucket: bucket.to_string(),
            endpoint: endpoint.trim_end_matches('/').to_string(),
        })
    }

    /// Convert storage key to filesystem path with security validation
    fn key_to_path(&self, storage_key: &str) -> StorageResult<PathBuf> {
        keys::validate_storage_key(storage_key)?;
        Ok(self.bucket_path.join(storage_key))
    }

    /// Ensure parent directory exists
    async fn ensure_parent_dir(&self, path: &Path) -> StorageResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl Storage for LocalStorage {
    async fn upload_with_key(&self, storage_key: &str, data: Vec<u8>) -> StorageResult<String> {
        let path = self.key_to_path(storage_key)?;
        let size = data.len();

        self.ensure_parent_dir(&path).await?;

        let start = std::time::Instant::now();

        let mut file = fs::File::create(&path).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to create file {}: {}", path.display(), e))
        })?;

        file.write_all(&data).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to write file {}: {}", path.display(), e))
        })?;

        file.sync_all().await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to sync file {}: {}", path.display(), e))
        })?;

        let url = self.public_url(storage_key);

        tracing::info!(
            path = %path.display(),
            key = %storage_key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage upload successful"
        );

        Ok(url)
    }

    async fn upload_file(&self, storage_key: &str, source: &Path) -> StorageResult<String> {
        let path = self.key_to_path(storage_key)?;
        self.ensure_parent_dir(&path).await?;

        let start = std::time::Instant::now();

        let size = fs::copy(source, &path).await.map_err(|e| {
            StorageError::UploadFailed(format!(
                "Failed to copy {} to {}: {}",
                source.display(),
                path.display(),
                e
            ))
        })?;

        let url = self.public_url(storage_key);

        tracing::info!(
            path = %path.display(),
            key = %storage_key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage upload successful"
        );

        Ok(url)
    }

    async fn download(&self, storage_key: &str) -> StorageResult<Vec<u8>> {
        let path = self.key_to_path(storage_key)?;

        if !fs::try_exists(&path).await.unwrap_or(false) {
            return Err(StorageError::NotFound(storage_key.to_string()));
        }

        fs::read(&path).await.map_err(|e| {
            StorageError::DownloadFailed(format!("Failed to read file {}: {}", path.display(), e))
        })
    }

    async fn exists(&self, storage_key: &str) -> StorageResult<bool> {
        let path = self.key_to_path(storage_key)?;
        Ok(fs::try_exists(&path).await?)
    }

    fn public_url(&self, storage_key: &str) -> String {
        keys::public_url(&self.endpoint, &self.bucket, storage_key)
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}

#[cfg(all(test, feature = "storage-local"))]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_local_storage_upload_download() {
        let dir = tempdir().unwrap();
        let storage = LocalStorage::new(dir.path(), "att", "s3.local").await.unwrap();

        let data = b"test data".to_vec();
        let url = storage
            .upload_with_key("proj1/2024-01-02/test.txt", data.clone())
            .await
            .unwrap();

        assert_eq!(url, "http://s3.local/att/proj1/2024-01-02/test.txt");
        assert!(dir.path().join("att/proj1/2024-01-02/test.txt").exists());

        let downloaded = storage.download("proj1/2024-01-02/test.txt").await.unwrap();
        assert_eq!(data, downloaded);
    }

    #[tokio::test]
    async fn test_local_storage_upload_file() {
        let dir = tempdir().unwrap();
        let storage = LocalStorage::new(dir.path().join("store"), "att", "s3.local")
            .await
            .unwrap();

        let source = dir.path().join("source.bin");
        tokio::fs::write(&source, b"file body").await.unwrap();

        let url = storage
            .upload_file("proj1/2024-01-02/source.bin", &source)
            .await
            .unwrap();

        assert!(url.ends_with("/att/proj1/2024-01-02/source.bin"));
        assert!(storage.exists("proj1/2024-01-02/source.bin").await.unwrap());
        assert_eq!(
            storage.download("proj1/2024-01-02/source.bin").await.unwrap(),
            b"file body".to_vec()
        );
    }

    #[tokio::test]
    async fn test_path_traversal_rejected() {
        let dir = tempdir().unwrap();
        let storage = LocalStorage::new(dir.path(), "att", "s3.local").await.unwrap();

        let result = storage.download("../../../etc/passwd").await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));

        let result = storage.upload_with_key("../escape.txt", b"x".to_vec()).await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));

        let result = storage.exists("/etc/passwd").await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));
    }

    #[tokio::test]
    async fn test_invalid_bucket_rejected() {
        let dir = tempdir().unwrap();
        let result = LocalStorage::new(dir.path(), "../outside", "s3.local").await;
        assert!(matches!(result, Err(StorageError::ConfigError(_))));
    }

    #[tokio::test]
    async fn test_download_missing_is_not_found() {
        let dir = tempdir().unwrap();
        let storage = LocalStorage::new(dir.path(), "att", "s3.local").await.unwrap();

        let result = storage.download("proj1/missing.txt").await;
        assert!(matches!(result, Err(StorageError::NotFound(_))));
        assert!(!storage.exists("proj1/missing.txt").await.unwrap());
    }
}
