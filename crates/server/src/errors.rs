//! # Server Error Handling
//!
//! Defines the `AppError` type and its mapping onto HTTP responses, so
//! handlers can use `?` and return domain errors directly.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use studygen::{CompletionError, ExtractError, GenerationError};
use tracing::error;

/// The unified error type for all API handlers.
#[derive(Debug)]
pub enum AppError {
    /// A malformed upload request. Maps to `400 Bad Request`.
    BadRequest(String),
    /// Text extraction failed. Maps to `422 Unprocessable Entity`.
    Extract(ExtractError),
    /// The generation pipeline failed. Maps to `502 Bad Gateway`, or
    /// `408 Request Timeout` for completion timeouts.
    Generation(GenerationError),
    /// A stage exceeded its time budget. Maps to `408 Request Timeout`.
    Timeout(String),
    /// An unexpected internal failure. Maps to `500 Internal Server Error`.
    Internal(anyhow::Error),
}

impl From<ExtractError> for AppError {
    fn from(err: ExtractError) -> Self {
        AppError::Extract(err)
    }
}

impl From<GenerationError> for AppError {
    fn from(err: GenerationError) -> Self {
        AppError::Generation(err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status_code, error_message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Extract(err) => {
                error!("Extraction error: {err:?}");
                (StatusCode::UNPROCESSABLE_ENTITY, err.to_string())
            }
            AppError::Generation(err) => {
                error!("Generation error: {err:?}");
                match err {
                    GenerationError::Completion(CompletionError::Timeout) => (
                        StatusCode::REQUEST_TIMEOUT,
                        "Request timed out. The PDF might be too large or complex. Please try with a smaller file."
                            .to_string(),
                    ),
                    GenerationError::Completion(err) => (
                        StatusCode::BAD_GATEWAY,
                        format!("Completion provider error: {err}"),
                    ),
                    GenerationError::EmptySegment => {
                        (StatusCode::UNPROCESSABLE_ENTITY, err.to_string())
                    }
                    GenerationError::Payload(e) => (
                        StatusCode::BAD_GATEWAY,
                        format!("Malformed completion payload: {e}"),
                    ),
                }
            }
            AppError::Timeout(msg) => (StatusCode::REQUEST_TIMEOUT, msg),
            AppError::Internal(err) => {
                error!("Internal server error: {err:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred.".to_string(),
                )
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status_code, body).into_response()
    }
}
