//! Courier Processing Library
//!
//! The attachment ingestion pipeline: source resolution (URL fetch, data URI, chunked
//! base64), validation, upload, thumbnail derivation and fallback composition.

pub mod artifact;
pub mod ingest;
pub mod source;
pub mod thumbnail;
pub mod validator;

// Re-export commonly used types
pub use artifact::PendingArtifact;
pub use ingest::{IngestError, IngestFailure, IngestStage, Ingestor};
pub use source::{AcquisitionError, HttpFetcher, SourceDescriptor, SourceResolver};
pub use thumbnail::{ThumbnailError, ThumbnailGenerator};
pub use validator::{ArtifactValidator, ValidationError};
