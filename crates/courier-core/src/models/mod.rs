//! Domain models for attachment ingestion.

pub mod ingestion;

pub use ingestion::{IngestionRequest, IngestionResult, StoreTarget, StoredArtifact};
