//! The redaction pipeline.

use std::sync::Arc;
use tokio::sync::RwLock;

use veil_acl::{ProtectedFields, RoleGraph, RoleSet, evaluate_object, requires_role_closure};
use veil_auth::{Credential, Identity, IdentityResolver};
use veil_core::{Error, RedactedObject, Result, StoredObject};
use veil_storage::{RoleStore, SessionStore};

use crate::scope::RequestScope;

/// Decides what each caller sees of each object.
///
/// Cheap to share behind an `Arc`; the protected-field policy can be swapped
/// at runtime with [`Redactor::reconfigure`] without affecting requests that
/// already hold a [`RequestScope`].
pub struct Redactor {
    roles: RoleGraph,
    identities: IdentityResolver,
    policy: RwLock<Arc<ProtectedFields>>,
}

impl std::fmt::Debug for Redactor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Redactor")
            .field("roles", &self.roles)
            .field("identities", &self.identities)
            .finish_non_exhaustive()
    }
}

impl Redactor {
    /// Create a redactor from its collaborators.
    pub fn new(roles: RoleGraph, identities: IdentityResolver, policy: ProtectedFields) -> Self {
        Self {
            roles,
            identities,
            policy: RwLock::new(Arc::new(policy)),
        }
    }

    /// Create a redactor reading roles and sessions from one store.
    pub fn from_store<S>(store: Arc<S>, policy: ProtectedFields) -> Self
    where
        S: RoleStore + SessionStore + 'static,
    {
        Self::new(
            RoleGraph::new(store.clone()),
            IdentityResolver::new(store),
            policy,
        )
    }

    /// The current protected-field snapshot.
    pub async fn policy(&self) -> Arc<ProtectedFields> {
        self.policy.read().await.clone()
    }

    /// Replace the protected-field policy for subsequent scopes.
    pub async fn reconfigure(&self, policy: ProtectedFields) {
        log::info!(
            "Protected user fields reconfigured: {:?}",
            policy.sensitive_fields()
        );
        *self.policy.write().await = Arc::new(policy);
    }

    /// Open a scope for an already resolved identity.
    pub async fn scope_for(&self, identity: Identity) -> RequestScope {
        RequestScope::new(identity, self.policy().await)
    }

    /// Resolve `credential` and open a scope for it.
    pub async fn scope(&self, credential: &Credential) -> Result<RequestScope> {
        let identity = self.identities.resolve(credential).await?;
        Ok(self.scope_for(identity).await)
    }

    /// Present one object to the scope's caller.
    ///
    /// Returns `None` when the caller may not read the object at all.
    pub async fn present(
        &self,
        scope: &RequestScope,
        object: StoredObject,
    ) -> Result<Option<RedactedObject>> {
        let principal = scope.principal();
        if principal.is_master() {
            log::debug!("{}/{}: master key, no redaction", object.class_name, object.id);
            return Ok(Some(RedactedObject::new(
                object.class_name,
                object.id,
                object.fields,
            )));
        }

        let grant = if requires_role_closure(&object.acl, object.owner.as_ref(), principal) {
            let roles = scope.roles(&self.roles).await?;
            evaluate_object(&object, principal, roles)
        } else {
            evaluate_object(&object, principal, &RoleSet::empty())
        };

        if !grant.can_read {
            log::debug!(
                "{}/{}: not readable by {principal}",
                object.class_name,
                object.id
            );
            return Ok(None);
        }

        let StoredObject {
            class_name,
            id,
            mut fields,
            ..
        } = object;
        let removed = scope.policy().strip(&class_name, &grant, &mut fields);
        log::debug!(
            "{class_name}/{id}: {} grant for {principal}, {removed} field(s) redacted",
            grant.kind
        );
        Ok(Some(RedactedObject::new(class_name, id, fields)))
    }

    /// Present a single object, as for a get-by-id.
    ///
    /// An unreadable object is [`Error::NotFound`], the same error a missing
    /// object produces.
    pub async fn present_one_in(
        &self,
        scope: &RequestScope,
        object: StoredObject,
    ) -> Result<RedactedObject> {
        let class = object.class_name.to_string();
        let id = object.id.to_string();
        self.present(scope, object)
            .await?
            .ok_or_else(|| Error::not_found(class, id))
    }

    /// Present a batch of objects, as for a find. Unreadable objects are
    /// dropped; order is preserved.
    pub async fn present_many_in(
        &self,
        scope: &RequestScope,
        objects: Vec<StoredObject>,
    ) -> Result<Vec<RedactedObject>> {
        let mut visible = Vec::with_capacity(objects.len());
        for object in objects {
            if let Some(view) = self.present(scope, object).await? {
                visible.push(view);
            }
        }
        Ok(visible)
    }

    /// Resolve `credential` and present a single object.
    pub async fn present_one(
        &self,
        object: StoredObject,
        credential: &Credential,
    ) -> Result<RedactedObject> {
        let scope = self.scope(credential).await?;
        self.present_one_in(&scope, object).await
    }

    /// Resolve `credential` and present a batch of objects.
    pub async fn present_many(
        &self,
        objects: Vec<StoredObject>,
        credential: &Credential,
    ) -> Result<Vec<RedactedObject>> {
        let scope = self.scope(credential).await?;
        self.present_many_in(&scope, objects).await
    }
}
