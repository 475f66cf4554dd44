use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::{BAD_ATTACHMENT_BUCKET, BAD_ATTACHMENT_FILE_NAME};

/// Object store connection parameters carried by every ingestion request.
#[derive(Clone, PartialEq, Eq)]
pub struct StoreTarget {
    pub bucket: String,
    /// Host (and optional port) of the store, without scheme, e.g. `minio:9000`.
    pub endpoint: String,
    pub access_key: String,
    pub secret_key: String,
}

impl fmt::Debug for StoreTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreTarget")
            .field("bucket", &self.bucket)
            .field("endpoint", &self.endpoint)
            .field("access_key", &self.access_key)
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

/// A single ingestion call, fully parsed by the transport layer.
#[derive(Clone)]
pub struct IngestionRequest {
    pub store: StoreTarget,
    /// HTTP(S) URL or `data:` URI.
    pub source_url: Option<String>,
    /// Base64 fragments, joined in order before decoding. Takes precedence over `source_url`.
    pub inline_chunks: Option<Vec<String>>,
    /// Extension including the leading dot, e.g. `.png`.
    pub file_extension: String,
    pub project_name: String,
    pub auth_token: String,
}

impl fmt::Debug for IngestionRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IngestionRequest")
            .field("store", &self.store)
            .field("source_url", &self.source_url.as_deref().map(source_label))
            .field(
                "inline_chunks",
                &self.inline_chunks.as_ref().map(|chunks| chunks.len()),
            )
            .field("file_extension", &self.file_extension)
            .field("project_name", &self.project_name)
            .field("auth_token", &"<redacted>")
            .finish()
    }
}

/// Data URIs can be megabytes long; keep only the header in logs.
fn source_label(source: &str) -> &str {
    if source.starts_with("data:") {
        source.split(',').next().unwrap_or("data:")
    } else {
        source
    }
}

/// An object that has been written to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredArtifact {
    pub name: String,
    pub public_path: String,
}

/// Outcome of one ingestion call.
///
/// The two-field form is shared by plain uploads and the fallback payload; compare
/// `file_name` with [`BAD_ATTACHMENT_FILE_NAME`] (or call [`is_bad_attachment`]) to tell
/// them apart.
///
/// [`is_bad_attachment`]: IngestionResult::is_bad_attachment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestionResult {
    pub attachment_path: String,
    pub file_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_name: Option<String>,
}

impl IngestionResult {
    /// The fallback payload substituted for any failure.
    pub fn bad_attachment(store_endpoint: &str) -> Self {
        Self {
            attachment_path: format!(
                "http://{}/{}/{}",
                store_endpoint, BAD_ATTACHMENT_BUCKET, BAD_ATTACHMENT_FILE_NAME
            ),
            file_name: BAD_ATTACHMENT_FILE_NAME.to_string(),
            thumbnail_path: None,
            thumbnail_name: None,
        }
    }

    pub fn stored(artifact: StoredArtifact) -> Self {
        Self {
            attachment_path: artifact.public_path,
            file_name: artifact.name,
            thumbnail_path: None,
            thumbnail_name: None,
        }
    }

    pub fn with_thumbnail(artifact: StoredArtifact, thumbnail: StoredArtifact) -> Self {
        Self {
            attachment_path: artifact.public_path,
            file_name: artifact.name,
            thumbnail_path: Some(thumbnail.public_path),
            thumbnail_name: Some(thumbnail.name),
        }
    }

    pub fn is_bad_attachment(&self) -> bool {
        self.file_name == BAD_ATTACHMENT_FILE_NAME
    }

    pub fn has_thumbnail(&self) -> bool {
        self.thumbnail_path.is_some()
    }
}
