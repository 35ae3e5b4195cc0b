//! Per-request authorization state.

use std::sync::Arc;
use tokio::sync::OnceCell;

use veil_acl::{ProtectedFields, RoleGraph, RoleSet};
use veil_auth::Identity;
use veil_core::{Principal, Result};

/// State shared by every object presented within one request.
///
/// Never shared across requests: the role closure belongs to one principal
/// and the policy snapshot to one point in time.
#[derive(Debug)]
pub struct RequestScope {
    identity: Identity,
    policy: Arc<ProtectedFields>,
    roles: OnceCell<RoleSet>,
}

impl RequestScope {
    /// Create a scope for `identity` under `policy`.
    pub fn new(identity: Identity, policy: Arc<ProtectedFields>) -> Self {
        Self {
            identity,
            policy,
            roles: OnceCell::new(),
        }
    }

    /// The caller.
    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// The caller's principal.
    pub fn principal(&self) -> &Principal {
        &self.identity.principal
    }

    /// The protected-field snapshot for this request.
    pub fn policy(&self) -> &ProtectedFields {
        &self.policy
    }

    /// The caller's role closure, computed on first use.
    pub async fn roles(&self, graph: &RoleGraph) -> Result<&RoleSet> {
        self.roles
            .get_or_try_init(|| graph.roles_for(&self.identity.principal))
            .await
    }

    /// Returns `true` once the role closure has been computed.
    pub fn roles_resolved(&self) -> bool {
        self.roles.initialized()
    }
}
