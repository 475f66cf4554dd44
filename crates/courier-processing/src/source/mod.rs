//! Source resolution: turn an ingestion request into the attachment's bytes.
//!
//! Precedence: non-empty inline chunks, then a `data:` URI, then an HTTP(S) URL.

mod data_uri;
mod fetch;

pub use data_uri::{decode_base64, parse_data_uri};
pub use fetch::{basic_auth_header, HttpFetcher};

use courier_core::IngestionRequest;

/// Acquisition errors
#[derive(Debug, thiserror::Error)]
pub enum AcquisitionError {
    #[error("Request has neither inline chunks nor a source URL")]
    MissingSource,

    #[error("Malformed data URI")]
    MalformedDataUri,

    #[error("Invalid base64 payload: {0}")]
    InvalidBase64(#[from] base64::DecodeError),

    #[error("Failed to build HTTP client: {0}")]
    Client(String),

    #[error("Failed to fetch source: {0}")]
    Fetch(#[source] reqwest::Error),

    #[error("Source returned status code: {0}")]
    UnexpectedStatus(u16),
}

/// Where the attachment's bytes come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceDescriptor<'a> {
    InlineChunks(&'a [String]),
    DataUri(&'a str),
    Url(&'a str),
}

impl<'a> SourceDescriptor<'a> {
    pub fn from_request(request: &'a IngestionRequest) -> Result<Self, AcquisitionError> {
        if let Some(chunks) = request.inline_chunks.as_deref() {
            if !chunks.is_empty() {
                return Ok(SourceDescriptor::InlineChunks(chunks));
            }
        }

        match request.source_url.as_deref().map(str::trim) {
            Some(url) if url.starts_with("data:") => Ok(SourceDescriptor::DataUri(url)),
            Some(url) if !url.is_empty() => Ok(SourceDescriptor::Url(url)),
            _ => Err(AcquisitionError::MissingSource),
        }
    }

    /// Short label for logs; never includes payload data.
    pub fn kind(&self) -> &'static str {
        match self {
            SourceDescriptor::InlineChunks(_) => "inline_chunks",
            SourceDescriptor::DataUri(_) => "data_uri",
            SourceDescriptor::Url(_) => "url",
        }
    }
}

/// Resolves request sources to bytes.
#[derive(Clone)]
pub struct SourceResolver {
    fetcher: HttpFetcher,
}

impl SourceResolver {
    pub fn new(fetcher: HttpFetcher) -> Self {
        Self { fetcher }
    }

    pub async fn resolve(&self, request: &IngestionRequest) -> Result<Vec<u8>, AcquisitionError> {
        let source = SourceDescriptor::from_request(request)?;
        tracing::debug!(source = source.kind(), "Resolving attachment source");

        match source {
            SourceDescriptor::InlineChunks(chunks) => decode_base64(&chunks.concat()),
            SourceDescriptor::DataUri(uri) => {
                let payload = parse_data_uri(uri).ok_or(AcquisitionError::MalformedDataUri)?;
                decode_base64(payload)
            }
            SourceDescriptor::Url(url) => self.fetcher.fetch(url, &request.auth_token).await,
        }
    }
}
