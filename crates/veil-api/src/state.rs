//! Shared application state.

use std::sync::Arc;

use veil_acl::ProtectedFields;
use veil_auth::{AuthConfig, IdentityResolver};
use veil_core::VeilConfig;
use veil_redact::Redactor;
use veil_storage::{ObjectStore, RoleStore, SessionStore};

/// State shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Object reads.
    pub objects: Arc<dyn ObjectStore>,
    /// The redaction choke point.
    pub redactor: Arc<Redactor>,
    /// Session resolution for the credential middleware.
    pub identities: Arc<IdentityResolver>,
    /// Application ID and master key.
    pub auth: AuthConfig,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("application_id", &self.auth.application_id)
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Build the state over a single store that serves objects, roles and
    /// sessions.
    pub fn from_store<S>(store: Arc<S>, config: &VeilConfig) -> Self
    where
        S: ObjectStore + RoleStore + SessionStore + 'static,
    {
        let policy = ProtectedFields::from_config(config);
        Self {
            objects: store.clone(),
            redactor: Arc::new(Redactor::from_store(store.clone(), policy)),
            identities: Arc::new(IdentityResolver::new(store)),
            auth: AuthConfig::from_server_config(&config.server),
        }
    }

    /// Replace the sensitive user fields for requests that start after this
    /// call. In-flight requests keep the fields they started with.
    pub async fn reconfigure_sensitive_fields<I, S>(&self, fields: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.redactor.reconfigure(ProtectedFields::new(fields)).await;
    }
}
