//! Ingestion pipeline: resolve → validate → upload → (thumbnail) → result.
//!
//! [`Ingestor::try_ingest`] returns the real outcome; [`Ingestor::ingest`] is the public
//! contract and collapses every failure into the fallback payload after logging it.
//! Local files are owned by [`PendingArtifact`] guards and removed on every path.

use chrono::{NaiveDate, Utc};
use courier_core::constants::{is_thumbnail_extension, THUMBNAIL_SUFFIX};
use courier_core::{IngestConfig, IngestionRequest, IngestionResult, LogLevel, StoredArtifact};
use courier_storage::{keys, Storage, StorageConnector};
use std::path::PathBuf;
use std::sync::Arc;
use uuid::Uuid;

use super::error::{IngestError, IngestFailure, IngestStage};
use crate::artifact::PendingArtifact;
use crate::source::{HttpFetcher, SourceResolver};
use crate::thumbnail::ThumbnailGenerator;
use crate::validator::ArtifactValidator;

/// Runs ingestion requests. Holds no per-call state, so one instance serves
/// concurrent calls.
#[derive(Clone)]
pub struct Ingestor {
    resolver: SourceResolver,
    connector: Arc<dyn StorageConnector>,
    validator: ArtifactValidator,
    thumbnails: ThumbnailGenerator,
    work_dir: PathBuf,
}

impl Ingestor {
    pub fn new(
        config: &IngestConfig,
        connector: Arc<dyn StorageConnector>,
    ) -> Result<Self, IngestError> {
        let fetcher = HttpFetcher::new(config.fetch_timeout, config.fetch_require_success)?;

        Ok(Self {
            resolver: SourceResolver::new(fetcher),
            connector,
            validator: ArtifactValidator::new(),
            thumbnails: ThumbnailGenerator::default(),
            work_dir: config.work_dir.clone(),
        })
    }

    /// Replace the thumbnail generator (canvas size).
    pub fn with_thumbnails(mut self, thumbnails: ThumbnailGenerator) -> Self {
        self.thumbnails = thumbnails;
        self
    }

    pub fn work_dir(&self) -> &PathBuf {
        &self.work_dir
    }

    /// Ingest one attachment. Never fails: errors yield the fallback payload.
    #[tracing::instrument(
        skip_all,
        fields(
            project = %request.project_name,
            bucket = %request.store.bucket,
            extension = %request.file_extension,
        )
    )]
    pub async fn ingest(&self, request: &IngestionRequest) -> IngestionResult {
        let today = Utc::now().date_naive();

        match self.try_ingest(request, today).await {
            Ok(result) => result,
            Err(failure) => {
                log_failure(&failure);
                IngestionResult::bad_attachment(&request.store.endpoint)
            }
        }
    }

    /// Ingest one attachment under the date partition `date`.
    pub async fn try_ingest(
        &self,
        request: &IngestionRequest,
        date: NaiveDate,
    ) -> Result<IngestionResult, IngestFailure> {
        let extension = request.file_extension.as_str();

        // RESOLVING
        self.validator
            .validate_extension(extension)
            .map_err(IngestStage::Resolving.fail())?;

        let base_id = Uuid::new_v4().to_string();
        let file_name = format!("{}{}", base_id, extension);

        let bytes = self
            .resolver
            .resolve(request)
            .await
            .map_err(IngestStage::Resolving.fail())?;
        let artifact = PendingArtifact::create(&self.work_dir, &file_name, &bytes)
            .await
            .map_err(IngestStage::Resolving.fail())?;
        drop(bytes);

        // VALIDATING
        let size = artifact
            .len()
            .await
            .map_err(IngestStage::Validating.fail())?;
        self.validator
            .validate_file_size(size)
            .map_err(IngestStage::Validating.fail())?;

        // UPLOADING
        let storage = self
            .connector
            .connect(&request.store)
            .await
            .map_err(IngestStage::Uploading.fail())?;
        let storage_key = keys::generate_storage_key(&request.project_name, date, &file_name);
        let public_path = storage
            .upload_file(&storage_key, artifact.path())
            .await
            .map_err(IngestStage::Uploading.fail())?;

        tracing::info!(
            artifact = %file_name,
            key = %storage_key,
            size_bytes = size,
            "Attachment stored"
        );

        let stored = StoredArtifact {
            name: file_name,
            public_path,
        };

        if !is_thumbnail_extension(extension) {
            artifact.discard();
            return Ok(IngestionResult::stored(stored));
        }

        // THUMBNAILING
        let thumbnail = self
            .derive_thumbnail(storage.as_ref(), &artifact, request, &base_id, date)
            .await
            .map_err(IngestStage::Thumbnailing.fail())?;
        artifact.discard();

        Ok(IngestionResult::with_thumbnail(stored, thumbnail))
    }

    async fn derive_thumbnail(
        &self,
        storage: &dyn Storage,
        artifact: &PendingArtifact,
        request: &IngestionRequest,
        base_id: &str,
        date: NaiveDate,
    ) -> Result<StoredArtifact, IngestError> {
        let extension = request.file_extension.clone();
        let thumbnail_name = format!("{}{}{}", base_id, THUMBNAIL_SUFFIX, extension);

        let data = artifact.read().await?;
        let generator = self.thumbnails;
        let encoded =
            tokio::task::spawn_blocking(move || generator.generate(&data, &extension)).await??;

        let local = PendingArtifact::create(&self.work_dir, &thumbnail_name, &encoded).await?;
        let storage_key = keys::generate_storage_key(&request.project_name, date, &thumbnail_name);
        let public_path = storage.upload_file(&storage_key, local.path()).await?;
        local.discard();

        tracing::info!(
            artifact = %thumbnail_name,
            key = %storage_key,
            size_bytes = encoded.len(),
            "Thumbnail stored"
        );

        Ok(StoredArtifact {
            name: thumbnail_name,
            public_path,
        })
    }
}

fn log_failure(failure: &IngestFailure) {
    let error = &failure.error;
    let stage = failure.stage.as_str();
    let error_kind = error.error_code();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, error_kind, stage, "Ingestion failed, returning fallback")
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, error_kind, stage, "Ingestion failed, returning fallback")
        }
        LogLevel::Error => {
            tracing::error!(error = %error, error_kind, stage, "Ingestion failed, returning fallback")
        }
    }
}
