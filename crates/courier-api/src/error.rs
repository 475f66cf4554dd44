//! HTTP error response conversion
//!
//! Only malformed requests reach this module. Ingestion failures are answered with the
//! fallback payload by the handler and never become error responses.

use axum::{
    extract::rejection::JsonRejection,
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use courier_core::{AppError, Config, ErrorMetadata, LogLevel};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    /// Machine-readable error code for programmatic handling
    pub code: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
            error_type: None,
            code: code.into(),
        }
    }
}

/// AppError ready to be rendered, with the detail policy of the running configuration.
///
/// Required by Rust's orphan rules: IntoResponse (external trait) cannot be implemented
/// for AppError (external type from courier-core).
#[derive(Debug)]
pub struct HttpAppError {
    error: AppError,
    expose_details: bool,
}

impl HttpAppError {
    /// Details are shown outside production only.
    pub fn new(error: AppError, config: &Config) -> Self {
        Self {
            error,
            expose_details: !config.is_production(),
        }
    }
}

/// Map JSON body failures (wrong content type, syntax, types) to an AppError.
fn json_rejection_error(rejection: JsonRejection) -> AppError {
    match rejection {
        JsonRejection::BytesRejection(ref inner)
            if inner.status() == StatusCode::PAYLOAD_TOO_LARGE =>
        {
            AppError::PayloadTooLarge(rejection.body_text())
        }
        _ => AppError::InvalidInput(format!("Invalid request body: {}", rejection.body_text())),
    }
}

/// JSON body extractor that answers with our ErrorResponse format on rejection.
#[derive(Debug, Clone, Copy)]
pub struct ValidatedJson<T>(pub T);

impl<T> FromRequest<Arc<AppState>> for ValidatedJson<T>
where
    T: DeserializeOwned + Send,
{
    type Rejection = HttpAppError;

    async fn from_request(req: Request, state: &Arc<AppState>) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(inner)) => Ok(ValidatedJson(inner)),
            Err(rejection) => Err(HttpAppError::new(
                json_rejection_error(rejection),
                &state.config,
            )),
        }
    }
}

fn log_error(error: &AppError) {
    let error_type = error.error_type();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Error => {
            tracing::error!(error = %error, error_type = error_type, "Error occurred");
        }
    }
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let app_error = &self.error;

        let status = StatusCode::from_u16(app_error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(app_error);

        let mut body = ErrorResponse::new(app_error.client_message(), app_error.error_code());
        if self.expose_details {
            body.details = Some(app_error.to_string());
            body.error_type = Some(app_error.error_type().to_string());
        }

        (status, Json(body)).into_response()
    }
}
