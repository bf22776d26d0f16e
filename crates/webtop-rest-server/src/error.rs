//! REST error mapping
//!
//! Failed delegations become a 500 with the underlying message, invalid
//! parameters a 400; both use the shared JSON envelope.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use webtop_automation::{CaptureError, InputError, SessionError};
use webtop_protocol::{ApiResponse, CoordinateError};

/// Error returned by route handlers
#[derive(Debug, Error)]
pub enum ApiError {
    /// Invalid request parameters
    #[error("{0}")]
    BadRequest(String),

    /// The underlying operation failed
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }
}

impl From<SessionError> for ApiError {
    fn from(e: SessionError) -> Self {
        Self::Internal(e.to_string())
    }
}

impl From<InputError> for ApiError {
    fn from(e: InputError) -> Self {
        Self::Internal(e.to_string())
    }
}

impl From<CaptureError> for ApiError {
    fn from(e: CaptureError) -> Self {
        Self::Internal(e.to_string())
    }
}

impl From<CoordinateError> for ApiError {
    fn from(e: CoordinateError) -> Self {
        Self::BadRequest(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let message = self.to_string();
        tracing::error!("Request failed ({}): {}", status, message);
        (status, Json(ApiResponse::error(message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_errors_map_to_bad_request() {
        let err: ApiError = CoordinateError::OutsideViewport {
            x: -1.0,
            y: 0.0,
            width: 100.0,
            height: 100.0,
        }
        .into();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }

    #[test]
    fn test_session_errors_map_to_internal() {
        let err: ApiError = SessionError::NotInitialized.into();
        assert!(matches!(err, ApiError::Internal(_)));
        assert!(err.to_string().contains("not initialized"));
    }
}
