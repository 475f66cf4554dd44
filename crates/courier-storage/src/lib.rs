//! Courier Storage Library
//!
//! Storage abstraction and backends for ingested attachments: an S3-compatible object
//! store (MinIO in the usual deployment) and the local filesystem.
//!
//! # Storage key format
//!
//! Keys are partitioned by project and UTC date:
//!
//! - `{project_name}/{YYYY-MM-DD}/{file_name}`
//!
//! and every backend exposes the object at `http://{endpoint}/{bucket}/{key}`.
//! Key and URL construction live in the `keys` module so all backends stay consistent.

pub mod factory;
pub mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use courier_core::StorageBackend;
pub use factory::{connector_for, StorageConnector};
#[cfg(feature = "storage-local")]
pub use factory::LocalConnector;
#[cfg(feature = "storage-s3")]
pub use factory::S3Connector;
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use traits::{Storage, StorageError, StorageResult};
