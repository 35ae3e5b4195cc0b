//! Collaborator traits.
//!
//! Implementations own their timeouts and cancellation. Every failure must
//! come back as an `Err`; an implementation that answers "no roles" or
//! "no such session" when the backend is actually unreachable turns an
//! outage into a silent denial.

use async_trait::async_trait;
use veil_core::{ClassName, ObjectId, Result, Role, RoleName, StoredObject, UserId};

/// Resolves session tokens to users.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// The user owning `token`, or `None` if the token is unknown.
    async fn user_for_session_token(&self, token: &str) -> Result<Option<UserId>>;
}

/// Read access to roles.
#[async_trait]
pub trait RoleStore: Send + Sync {
    /// Load a role by name.
    ///
    /// Lookup by name for store clients. Role closure only walks
    /// [`roles_with_user`](Self::roles_with_user) and
    /// [`roles_containing`](Self::roles_containing), so it never calls this.
    async fn load_role(&self, name: &RoleName) -> Result<Option<Role>>;

    /// Roles listing `user` as a direct member.
    async fn roles_with_user(&self, user: &UserId) -> Result<Vec<Role>>;

    /// Roles listing `role` as a child role (one step up the hierarchy).
    async fn roles_containing(&self, role: &RoleName) -> Result<Vec<Role>>;
}

/// Read access to stored objects.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Fetch one object.
    async fn get_object(&self, class: &ClassName, id: &ObjectId) -> Result<Option<StoredObject>>;

    /// All objects of a class, ordered by ID.
    async fn find_objects(&self, class: &ClassName) -> Result<Vec<StoredObject>>;
}
