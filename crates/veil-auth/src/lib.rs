//! Identity resolution for Veil.
//!
//! Provides:
//! - [`Credential`]: the credential a request presented, read from its headers
//! - [`IdentityResolver`]: credential to [`Identity`] (principal plus trust)
//! - [`AuthLayer`] / [`AuthService`]: Tower middleware that resolves the
//!   identity once per request and stores it in the request extensions
//! - [`AuthConfig`]: application ID and master key the middleware checks
//! - [`AuthError`]: credential rejections and their wire responses

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod credential;
mod error;
mod middleware;
mod resolver;

pub use credential::{
    APPLICATION_ID_HEADER, Credential, JAVASCRIPT_KEY_HEADER, MASTER_KEY_HEADER,
    SESSION_TOKEN_HEADER, credential_from_headers,
};
pub use error::AuthError;
pub use middleware::{AuthLayer, AuthService};
pub use resolver::{Identity, IdentityResolver};

use veil_core::config::ServerConfig;

/// Configuration for credential extraction.
#[derive(Clone, Debug, Default)]
pub struct AuthConfig {
    /// Application ID every request must present.
    pub application_id: String,
    /// Master key. When `None`, any presented master key is rejected.
    pub master_key: Option<String>,
}

impl AuthConfig {
    /// Build the auth configuration from the server section.
    pub fn from_server_config(server: &ServerConfig) -> Self {
        Self {
            application_id: server.application_id.clone(),
            master_key: server.master_key.clone(),
        }
    }
}
