//! API error types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use intrinsic_analytics::AnalyticsError;
use intrinsic_core::ValidationError;
use serde::Serialize;
use thiserror::Error;

/// API error type.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Required query parameters were absent.
    #[error("Missing query parameters: {}", .0.join(", "))]
    MissingParameters(Vec<String>),

    /// A query parameter could not be parsed.
    #[error("Invalid query parameters")]
    InvalidParameters,

    /// The engine rejected the inputs.
    #[error(transparent)]
    Validation(ValidationError),

    /// The engine failed after validation.
    #[error("Calculation error: {0}")]
    Calculation(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable message.
    pub error: String,
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingParameters(_) | ApiError::InvalidParameters => StatusCode::BAD_REQUEST,
            ApiError::Validation(_) | ApiError::Calculation(_) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(ErrorResponse {
            error: self.to_string(),
        });

        (status, body).into_response()
    }
}

impl From<AnalyticsError> for ApiError {
    fn from(err: AnalyticsError) -> Self {
        match err {
            AnalyticsError::Validation(validation) => ApiError::Validation(validation),
            other => ApiError::Calculation(other.to_string()),
        }
    }
}

/// Result type for API operations.
pub type ApiResult<T> = Result<T, ApiError>;
