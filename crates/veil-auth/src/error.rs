//! Credential rejection errors.

use axum::response::{IntoResponse, Response};
use http::StatusCode;

/// Errors that reject a request before any object is read.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum AuthError {
    /// No application ID header.
    #[error("missing application id")]
    MissingApplicationId,

    /// Application ID does not match the configured one.
    #[error("invalid application id")]
    InvalidApplicationId,

    /// Master key presented but not accepted.
    #[error("invalid master key")]
    InvalidMasterKey,

    /// Session token does not resolve to a user.
    #[error("Invalid session token")]
    InvalidSession,

    /// The session lookup itself failed.
    #[error("identity resolution failed: {0}")]
    Resolution(#[source] veil_core::Error),
}

impl AuthError {
    /// Whether the request itself is at fault (4xx rather than 5xx).
    pub fn is_client_error(&self) -> bool {
        !matches!(self, AuthError::Resolution(_))
    }

    /// HTTP status for this rejection.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MissingApplicationId
            | AuthError::InvalidApplicationId
            | AuthError::InvalidMasterKey => StatusCode::FORBIDDEN,
            AuthError::InvalidSession => StatusCode::BAD_REQUEST,
            AuthError::Resolution(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// JSON error body in the object API's format.
    ///
    /// Credential rejections say only `unauthorized`; session failures
    /// carry error code 209.
    pub fn body(&self) -> serde_json::Value {
        match self {
            AuthError::MissingApplicationId
            | AuthError::InvalidApplicationId
            | AuthError::InvalidMasterKey => serde_json::json!({ "error": "unauthorized" }),
            AuthError::InvalidSession => {
                serde_json::json!({ "code": 209, "error": "Invalid session token" })
            }
            AuthError::Resolution(_) => {
                serde_json::json!({ "code": 1, "error": "Internal server error." })
            }
        }
    }
}

impl From<veil_core::Error> for AuthError {
    fn from(err: veil_core::Error) -> Self {
        match err {
            veil_core::Error::InvalidSession => AuthError::InvalidSession,
            other => AuthError::Resolution(other),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        (self.status_code(), axum::Json(self.body())).into_response()
    }
}
