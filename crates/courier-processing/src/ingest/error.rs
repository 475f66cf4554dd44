use courier_core::LogLevel;
use courier_storage::StorageError;
use std::fmt;

use crate::source::AcquisitionError;
use crate::thumbnail::ThumbnailError;
use crate::validator::ValidationError;

/// Ingestion errors
///
/// None of these reach the caller of [`Ingestor::ingest`](super::Ingestor::ingest); they
/// are logged and replaced by the fallback payload.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error(transparent)]
    Acquisition(#[from] AcquisitionError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Store error: {0}")]
    Store(#[from] StorageError),

    #[error(transparent)]
    ImageProcessing(#[from] ThumbnailError),

    #[error("Local workspace error: {0}")]
    Workspace(#[from] std::io::Error),

    #[error("Thumbnail task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl IngestError {
    /// Machine-readable error code
    pub fn error_code(&self) -> &'static str {
        match self {
            IngestError::Acquisition(_) => "ACQUISITION_ERROR",
            IngestError::Validation(ValidationError::EmptyFile) => "EMPTY_ARTIFACT",
            IngestError::Validation(ValidationError::InvalidExtension(_)) => "INVALID_EXTENSION",
            IngestError::Store(_) => "STORE_ERROR",
            IngestError::ImageProcessing(_) | IngestError::Task(_) => "IMAGE_PROCESSING_ERROR",
            IngestError::Workspace(_) => "WORKSPACE_ERROR",
        }
    }

    /// Bad input is a warning; failures on our side are errors.
    pub fn log_level(&self) -> LogLevel {
        match self {
            IngestError::Acquisition(_) | IngestError::Validation(_) => LogLevel::Warn,
            IngestError::Store(_)
            | IngestError::ImageProcessing(_)
            | IngestError::Task(_)
            | IngestError::Workspace(_) => LogLevel::Error,
        }
    }
}

/// Pipeline stage, used to report where a run failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestStage {
    Resolving,
    Validating,
    Uploading,
    Thumbnailing,
}

impl IngestStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            IngestStage::Resolving => "resolving",
            IngestStage::Validating => "validating",
            IngestStage::Uploading => "uploading",
            IngestStage::Thumbnailing => "thumbnailing",
        }
    }

    /// Tag an error with this stage, for use with `map_err`.
    pub fn fail<E: Into<IngestError>>(self) -> impl FnOnce(E) -> IngestFailure {
        move |error| IngestFailure {
            stage: self,
            error: error.into(),
        }
    }
}

impl fmt::Display for IngestStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An [`IngestError`] together with the stage it happened in.
#[derive(Debug, thiserror::Error)]
#[error("Ingestion failed while {stage}: {error}")]
pub struct IngestFailure {
    pub stage: IngestStage,
    #[source]
    pub error: IngestError,
}
