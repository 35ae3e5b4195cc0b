//! Error types for veil-api

use axum::Json;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use serde_json::json;
use veil_auth::AuthError;

/// Object API error code: object not found.
pub const OBJECT_NOT_FOUND: u32 = 101;
/// Object API error code: invalid session token.
pub const INVALID_SESSION_TOKEN: u32 = 209;
/// Object API error code: internal server error.
pub const INTERNAL_SERVER_ERROR: u32 = 1;

/// Result type alias for veil-api handlers
pub type Result<T> = std::result::Result<T, ApiError>;

/// Errors a handler can return.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ApiError {
    /// Error from the read path
    #[error(transparent)]
    Core(#[from] veil_core::Error),

    /// Credential rejection
    #[error(transparent)]
    Auth(#[from] AuthError),
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Core(veil_core::Error::NotFound { .. }) => StatusCode::NOT_FOUND,
            ApiError::Core(veil_core::Error::InvalidSession) => StatusCode::BAD_REQUEST,
            ApiError::Core(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Auth(err) => err.status_code(),
        }
    }

    /// JSON error body.
    ///
    /// Missing and unreadable objects produce the same body.
    pub fn body(&self) -> serde_json::Value {
        match self {
            ApiError::Core(veil_core::Error::NotFound { .. }) => {
                json!({ "code": OBJECT_NOT_FOUND, "error": "Object not found." })
            }
            ApiError::Core(veil_core::Error::InvalidSession) => {
                json!({ "code": INVALID_SESSION_TOKEN, "error": "Invalid session token" })
            }
            ApiError::Core(_) => {
                json!({ "code": INTERNAL_SERVER_ERROR, "error": "Internal server error." })
            }
            ApiError::Auth(err) => err.body(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (status, Json(self.body())).into_response()
    }
}
