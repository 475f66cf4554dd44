//! `POST /uploadAttachment`: ingest one attachment and report where it was stored.

use axum::{extract::State, Json};
use courier_core::{AppError, IngestionRequest, IngestionResult, StoreTarget};
use serde::Deserialize;
use std::sync::Arc;

use crate::error::{HttpAppError, ValidatedJson};
use crate::state::AppState;

/// Request body. Every field is optional at the wire level so that a request with a
/// store endpoint but otherwise incomplete still gets the fallback payload.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadAttachmentBody {
    pub bucket_name: Option<String>,
    pub minio_end_point: Option<String>,
    pub minio_access_key: Option<String>,
    pub minio_secret_key: Option<String>,
    pub download_url: Option<String>,
    pub file_extension: Option<String>,
    pub project_name: Option<String>,
    pub token: Option<String>,
    #[serde(default)]
    pub is_base64: bool,
    pub base64_content: Option<Vec<String>>,
}

impl UploadAttachmentBody {
    /// Build the ingestion request, or `None` when a required field is missing.
    pub fn into_request(self, endpoint: String) -> Option<IngestionRequest> {
        let inline_chunks = if self.is_base64 {
            self.base64_content
        } else {
            None
        };

        Some(IngestionRequest {
            store: StoreTarget {
                bucket: self.bucket_name?,
                endpoint,
                access_key: self.minio_access_key?,
                secret_key: self.minio_secret_key?,
            },
            source_url: self.download_url,
            inline_chunks,
            file_extension: self.file_extension?,
            project_name: self.project_name?,
            auth_token: self.token?,
        })
    }
}

#[tracing::instrument(skip_all)]
pub async fn upload_attachment(
    State(state): State<Arc<AppState>>,
    ValidatedJson(body): ValidatedJson<UploadAttachmentBody>,
) -> Result<Json<IngestionResult>, HttpAppError> {
    let endpoint = match body.minio_end_point.clone() {
        Some(endpoint) if !endpoint.trim().is_empty() => endpoint,
        _ => {
            return Err(HttpAppError::new(
                AppError::InvalidInput("minioEndPoint is required".to_string()),
                &state.config,
            ));
        }
    };

    let Some(request) = body.into_request(endpoint.clone()) else {
        tracing::warn!(endpoint = %endpoint, "Upload request is missing required fields");
        return Ok(Json(IngestionResult::bad_attachment(&endpoint)));
    };

    let result = state.ingestor.ingest(&request).await;
    Ok(Json(result))
}
