//! API Error Mapping
//!
//! Pipeline failures caused by the request payload become 400 responses
//! carrying the underlying message; everything else becomes a 500 with a
//! fixed detail string so internals never leak to callers.

use audio_decoder::DecodeError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use feature_engine::FeatureError;
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The request payload was malformed or the audio unusable
    #[error("{0}")]
    BadRequest(String),
    /// Unexpected server-side failure
    #[error("internal error")]
    Internal,
}

impl From<DecodeError> for ApiError {
    fn from(err: DecodeError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<FeatureError> for ApiError {
    fn from(err: FeatureError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<base64::DecodeError> for ApiError {
    fn from(err: base64::DecodeError) -> Self {
        ApiError::BadRequest(format!("invalid base64 audio data: {err}"))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            ApiError::BadRequest(detail) => (StatusCode::BAD_REQUEST, detail),
            ApiError::Internal => {
                error!("unexpected failure while handling detection request");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error processing audio".to_string(),
                )
            }
        };

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}
