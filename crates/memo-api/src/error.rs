//! Mapping from domain errors to HTTP responses.

use axum::{http::StatusCode, response::IntoResponse, Json};
use tracing::error;

/// Error returned by HTTP handlers.
#[derive(Debug)]
pub enum ApiError {
    /// Persistence failure. Logged server-side; the client sees a bare 500.
    Store(memo_core::Error),
    NotFound(String),
    BadRequest(String),
}

impl From<memo_core::Error> for ApiError {
    fn from(err: memo_core::Error) -> Self {
        match err {
            memo_core::Error::NotFound(msg) => ApiError::NotFound(msg),
            memo_core::Error::InvalidInput(msg) => ApiError::BadRequest(msg),
            other => ApiError::Store(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            ApiError::Store(err) => {
                error!(
                    subsystem = "api",
                    error = %err,
                    duplicate = matches!(err, memo_core::Error::DuplicateNoteBody),
                    "Request failed on store operation"
                );
                return StatusCode::INTERNAL_SERVER_ERROR.into_response();
            }
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
        };

        let body = Json(serde_json::json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}
