use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::header::AUTHORIZATION;
use std::time::Duration;

use super::AcquisitionError;

/// `Basic base64(":" + token)`: a personal access token with an empty user name.
pub fn basic_auth_header(token: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!(":{}", token)))
}

/// Downloads attachment sources over HTTP(S).
#[derive(Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    require_success: bool,
}

impl HttpFetcher {
    /// `require_success` turns non-2xx responses into acquisition failures; without it the
    /// body is used whatever the status.
    pub fn new(timeout: Duration, require_success: bool) -> Result<Self, AcquisitionError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AcquisitionError::Client(e.to_string()))?;

        Ok(Self {
            client,
            require_success,
        })
    }

    /// GET `url` with `download=true` appended to its query string.
    pub async fn fetch(&self, url: &str, auth_token: &str) -> Result<Vec<u8>, AcquisitionError> {
        let start = std::time::Instant::now();

        let response = self
            .client
            .get(url)
            .query(&[("download", "true")])
            .header(AUTHORIZATION, basic_auth_header(auth_token))
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, url = %url, "Failed to download source");
                AcquisitionError::Fetch(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            if self.require_success {
                tracing::warn!(url = %url, status = status.as_u16(), "Source returned non-success status");
                return Err(AcquisitionError::UnexpectedStatus(status.as_u16()));
            }
            tracing::debug!(url = %url, status = status.as_u16(), "Using body of non-success response");
        }

        let body = response.bytes().await.map_err(AcquisitionError::Fetch)?;

        tracing::info!(
            url = %url,
            status = status.as_u16(),
            size_bytes = body.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Source downloaded"
        );

        Ok(body.to_vec())
    }
}
