//! HTTP error mapping.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Body of the non-fatal chat failure response.
pub const STREAM_FAILED: &str = "Error. Answer stream failed.";

/// Errors a handler can answer with.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Malformed request or configuration error. `400 {error}`.
    #[error("{0}")]
    BadRequest(String),

    /// Failure the caller cannot fix. `500 {error}`.
    #[error("{0}")]
    Internal(String),

    /// Vendor failure with detail. `500 {error, details}`.
    #[error("{error}: {details}")]
    Upstream {
        /// Summary.
        error: &'static str,
        /// Underlying cause.
        details: String,
    },

    /// The chat stream could not start. `202` with a plain-text notice, so
    /// clients treat it as recoverable.
    #[error("chat stream failed to start")]
    StreamFailed,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::BadRequest(error) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": error }))).into_response()
            }
            Self::Internal(error) => {
                (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": error }))).into_response()
            }
            Self::Upstream { error, details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": error, "details": details })),
            )
                .into_response(),
            Self::StreamFailed => (StatusCode::ACCEPTED, STREAM_FAILED).into_response(),
        }
    }
}
