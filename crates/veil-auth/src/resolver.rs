//! Credential to identity resolution.

use std::sync::Arc;

use veil_core::{Error, Principal, Result};
use veil_storage::SessionStore;

use crate::credential::Credential;

/// A resolved caller: who they are and whether they hold master trust.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// The principal.
    pub principal: Principal,
    /// `true` only for the master key.
    pub trusted: bool,
}

impl Identity {
    /// An anonymous caller.
    pub fn anonymous() -> Self {
        Self {
            principal: Principal::Anonymous,
            trusted: false,
        }
    }

    /// A master-key caller.
    pub fn master() -> Self {
        Self {
            principal: Principal::MasterKey,
            trusted: true,
        }
    }

    /// An authenticated user.
    pub fn user(id: impl Into<veil_core::UserId>) -> Self {
        Self {
            principal: Principal::User(id.into()),
            trusted: false,
        }
    }
}

/// Maps credentials to identities through a [`SessionStore`].
#[derive(Clone)]
pub struct IdentityResolver {
    sessions: Arc<dyn SessionStore>,
}

impl std::fmt::Debug for IdentityResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityResolver").finish_non_exhaustive()
    }
}

impl IdentityResolver {
    /// Create a resolver backed by `sessions`.
    pub fn new(sessions: Arc<dyn SessionStore>) -> Self {
        Self { sessions }
    }

    /// Resolve a credential.
    ///
    /// An unknown session token is [`Error::InvalidSession`]; a failing
    /// session store propagates its own error.
    pub async fn resolve(&self, credential: &Credential) -> Result<Identity> {
        match credential {
            Credential::Anonymous => Ok(Identity::anonymous()),
            Credential::MasterKey => Ok(Identity::master()),
            Credential::SessionToken(token) => {
                match self.sessions.user_for_session_token(token).await? {
                    Some(user) => {
                        log::debug!("Session resolved to user {user}");
                        Ok(Identity::user(user))
                    }
                    None => {
                        log::warn!("Rejected unknown session token");
                        Err(Error::InvalidSession)
                    }
                }
            }
        }
    }
}
