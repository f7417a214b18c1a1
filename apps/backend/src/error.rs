//! Error handling for the backend API

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use listening_core::{ContentError, DrillError};
use serde::Serialize;
use thiserror::Error;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Content error: {0}")]
    Content(#[from] ContentError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// Carries the message shown to the learner.
    #[error("{0}")]
    SpeechUnavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<DrillError> for ApiError {
    fn from(err: DrillError) -> Self {
        match err {
            DrillError::AlreadyChecked => ApiError::Conflict(err.to_string()),
            DrillError::NoActiveItem | DrillError::NotInPool { .. } => {
                ApiError::BadRequest(err.to_string())
            }
        }
    }
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type) = match &self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            ApiError::Conflict(_) => (StatusCode::CONFLICT, "conflict"),
            ApiError::Content(ContentError::UnknownPhoneme { .. }) => {
                (StatusCode::BAD_REQUEST, "content_error")
            }
            ApiError::Content(ContentError::EmptyPool { .. }) => {
                (StatusCode::NOT_FOUND, "content_error")
            }
            ApiError::Content(_) => (StatusCode::INTERNAL_SERVER_ERROR, "content_error"),
            ApiError::SpeechUnavailable(_) => {
                (StatusCode::SERVICE_UNAVAILABLE, "speech_unavailable")
            }
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        };

        let body = Json(ErrorResponse {
            error: error_type.to_string(),
            message: self.to_string(),
        });

        (status, body).into_response()
    }
}

/// Result type alias for API operations
pub type Result<T> = std::result::Result<T, ApiError>;
