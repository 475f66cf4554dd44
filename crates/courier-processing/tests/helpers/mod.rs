//! Shared setup for ingestion integration tests.

#![allow(dead_code)]

pub mod failing_store;
pub mod fixtures;
pub mod source_server;

use courier_core::{IngestConfig, IngestionRequest, StorageBackend, StoreTarget};
use courier_processing::Ingestor;
use courier_storage::{LocalConnector, StorageConnector};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

pub const TEST_ENDPOINT: &str = "store.test:9000";
pub const TEST_BUCKET: &str = "attachments-test";
pub const TEST_PROJECT: &str = "proj1";
pub const TEST_TOKEN: &str = "pat-token";

/// An ingestor over a local store, with its own work and storage directories.
pub struct TestIngest {
    pub ingestor: Ingestor,
    work_dir: TempDir,
    storage_dir: TempDir,
}

impl TestIngest {
    pub fn work_dir(&self) -> &Path {
        self.work_dir.path()
    }

    pub fn storage_root(&self) -> &Path {
        self.storage_dir.path()
    }

    /// Filesystem location of an object advertised at `public_path`.
    pub fn stored_file(&self, public_path: &str) -> PathBuf {
        let prefix = format!("http://{}/", TEST_ENDPOINT);
        let relative = public_path
            .strip_prefix(&prefix)
            .unwrap_or_else(|| panic!("unexpected public path {public_path}"));
        self.storage_dir.path().join(relative)
    }

    /// Number of entries left in the work directory.
    pub fn leftover_files(&self) -> usize {
        std::fs::read_dir(self.work_dir.path())
            .map(|entries| entries.count())
            .unwrap_or(0)
    }
}

pub fn setup_ingest() -> TestIngest {
    setup_ingest_with(true)
}

pub fn setup_ingest_with(fetch_require_success: bool) -> TestIngest {
    build_ingest(fetch_require_success, |storage_root| {
        let connector: Arc<dyn StorageConnector> = Arc::new(LocalConnector::new(storage_root));
        connector
    })
}

/// An ingestor whose store is built by `connector` over the test storage directory.
pub fn setup_ingest_with_connector<F>(connector: F) -> TestIngest
where
    F: FnOnce(&Path) -> Arc<dyn StorageConnector>,
{
    build_ingest(true, connector)
}

fn build_ingest<F>(fetch_require_success: bool, connector: F) -> TestIngest
where
    F: FnOnce(&Path) -> Arc<dyn StorageConnector>,
{
    let work_dir = TempDir::new().expect("Failed to create work dir");
    let storage_dir = TempDir::new().expect("Failed to create storage dir");

    let config = IngestConfig {
        storage_backend: StorageBackend::Local,
        local_storage_path: Some(storage_dir.path().to_path_buf()),
        work_dir: work_dir.path().to_path_buf(),
        fetch_timeout: Duration::from_secs(5),
        fetch_require_success,
        ..IngestConfig::default()
    };

    let ingestor =
        Ingestor::new(&config, connector(storage_dir.path())).expect("Failed to build ingestor");

    TestIngest {
        ingestor,
        work_dir,
        storage_dir,
    }
}

pub fn store_target() -> StoreTarget {
    StoreTarget {
        bucket: TEST_BUCKET.to_string(),
        endpoint: TEST_ENDPOINT.to_string(),
        access_key: "access".to_string(),
        secret_key: "secret".to_string(),
    }
}

pub fn url_request(url: &str, extension: &str) -> IngestionRequest {
    IngestionRequest {
        store: store_target(),
        source_url: Some(url.to_string()),
        inline_chunks: None,
        file_extension: extension.to_string(),
        project_name: TEST_PROJECT.to_string(),
        auth_token: TEST_TOKEN.to_string(),
    }
}

pub fn chunk_request(chunks: &[&str], extension: &str) -> IngestionRequest {
    IngestionRequest {
        store: store_target(),
        source_url: None,
        inline_chunks: Some(chunks.iter().map(|c| c.to_string()).collect()),
        file_extension: extension.to_string(),
        project_name: TEST_PROJECT.to_string(),
        auth_token: TEST_TOKEN.to_string(),
    }
}

pub fn bad_attachment_path() -> String {
    format!("http://{}/attachments/bad-attachment.png", TEST_ENDPOINT)
}
