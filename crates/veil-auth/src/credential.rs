//! Request credentials.

use http::HeaderMap;

use crate::{AuthConfig, AuthError};

/// Header carrying the application ID. Required on every request.
pub const APPLICATION_ID_HEADER: &str = "x-parse-application-id";
/// Header carrying a session token.
pub const SESSION_TOKEN_HEADER: &str = "x-parse-session-token";
/// Header carrying the master key.
pub const MASTER_KEY_HEADER: &str = "x-parse-master-key";
/// Client key header; accepted and ignored.
pub const JAVASCRIPT_KEY_HEADER: &str = "x-parse-javascript-key";

/// The credential a request presented.
///
/// Only one is honored per request. A master key has already been checked
/// against configuration by the time it becomes [`Credential::MasterKey`].
#[derive(Clone, PartialEq, Eq)]
pub enum Credential {
    /// Nothing presented.
    Anonymous,
    /// An unverified session token.
    SessionToken(String),
    /// A verified master key.
    MasterKey,
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Anonymous => write!(f, "Anonymous"),
            Self::SessionToken(_) => write!(f, "SessionToken(..)"),
            Self::MasterKey => write!(f, "MasterKey"),
        }
    }
}

/// Read the credential from request headers.
///
/// The application ID must be present and match. A master key wins over a
/// session token, and a master key that does not match the configured one
/// is rejected outright instead of falling back to the session token.
pub fn credential_from_headers(
    headers: &HeaderMap,
    config: &AuthConfig,
) -> Result<Credential, AuthError> {
    let application_id =
        header_value(headers, APPLICATION_ID_HEADER).ok_or(AuthError::MissingApplicationId)?;
    if application_id != config.application_id {
        return Err(AuthError::InvalidApplicationId);
    }

    if let Some(presented) = header_value(headers, MASTER_KEY_HEADER) {
        return match config.master_key.as_deref() {
            Some(expected) if expected == presented => Ok(Credential::MasterKey),
            _ => Err(AuthError::InvalidMasterKey),
        };
    }

    match header_value(headers, SESSION_TOKEN_HEADER) {
        Some(token) => Ok(Credential::SessionToken(token.to_string())),
        None => Ok(Credential::Anonymous),
    }
}

/// Non-empty header value as a string.
fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}
