//! The ingestion pipeline and its error model.

mod error;
mod pipeline;

pub use error::{IngestError, IngestFailure, IngestStage};
pub use pipeline::Ingestor;
