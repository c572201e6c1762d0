//! HTTP error responses for reva-api

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::services::AnalyzeError;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Invalid request (400)
    #[error("{0}")]
    BadRequest(String),

    /// Internal server error (500)
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<AnalyzeError> for ApiError {
    fn from(err: AnalyzeError) -> Self {
        match err {
            AnalyzeError::Validation(msg) => ApiError::BadRequest(msg),
            AnalyzeError::Storage(e) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<reva_common::Error> for ApiError {
    fn from(err: reva_common::Error) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let body = Json(json!({ "error": self.to_string() }));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_maps_to_bad_request() {
        let err: ApiError = AnalyzeError::Validation("too short".to_string()).into();
        assert!(matches!(err, ApiError::BadRequest(ref msg) if msg == "too short"));
    }

    #[test]
    fn storage_maps_to_internal_with_detail() {
        let err: ApiError =
            AnalyzeError::Storage(reva_common::Error::Internal("disk full".to_string())).into();
        assert_eq!(
            err.to_string(),
            "Internal server error: Internal error: disk full"
        );
    }
}
