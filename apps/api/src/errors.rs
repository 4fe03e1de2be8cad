use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Endpoint error: {0}")]
    Endpoint(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Extraction failed: {0}")]
    Extraction(String),

    #[error("No results: {0}")]
    NoResults(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl From<LlmError> for AppError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::Http(_) | LlmError::Api { .. } => AppError::Endpoint(err.to_string()),
            LlmError::MalformedResponse(_) => AppError::MalformedResponse(err.to_string()),
            LlmError::MissingApiKey { .. } => AppError::Configuration(err.to_string()),
        }
    }
}

impl AppError {
    /// Stable machine-readable code sent to the client.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Endpoint(_) => "ENDPOINT_ERROR",
            AppError::MalformedResponse(_) => "MALFORMED_RESPONSE",
            AppError::Extraction(_) => "EXTRACTION_FAILED",
            AppError::NoResults(_) => "NO_RESULTS",
            AppError::Configuration(_) => "CONFIGURATION_ERROR",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::NoResults(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Endpoint(msg) => {
                tracing::error!("Endpoint error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "The text generation service could not be reached. Please retry.".to_string(),
                )
            }
            AppError::MalformedResponse(msg) => {
                tracing::error!("Malformed response: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "The text generation service returned an unexpected response. Please try again."
                        .to_string(),
                )
            }
            AppError::Extraction(msg) => {
                tracing::warn!("Extraction failed: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "Could not read structured results from the response. Please try again."
                        .to_string(),
                )
            }
            AppError::Configuration(msg) => {
                tracing::error!("Configuration error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "The service is not configured to reach the text generation provider."
                        .to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": self.code(),
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
