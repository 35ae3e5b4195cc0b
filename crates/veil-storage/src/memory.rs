//! In-memory storage backend.
//!
//! Used by tests and the demo server. All maps sit behind `tokio` read-write
//! locks, so the store can be shared across concurrent requests as an
//! `Arc<MemoryStore>`.

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;

use veil_core::{ClassName, Error, ObjectId, Result, Role, RoleName, StoredObject, UserId};

use crate::traits::{ObjectStore, RoleStore, SessionStore};

/// In-memory implementation of every storage collaborator.
#[derive(Debug, Default)]
pub struct MemoryStore {
    objects: RwLock<BTreeMap<(ClassName, ObjectId), StoredObject>>,
    roles: RwLock<BTreeMap<RoleName, Role>>,
    sessions: RwLock<HashMap<String, UserId>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an object.
    pub async fn insert_object(&self, object: StoredObject) {
        let key = (object.class_name.clone(), object.id.clone());
        self.objects.write().await.insert(key, object);
    }

    /// Insert or replace a role.
    pub async fn insert_role(&self, role: Role) {
        self.roles.write().await.insert(role.name.clone(), role);
    }

    /// Add a direct user member to an existing role.
    pub async fn add_role_user(&self, role: &RoleName, user: UserId) -> Result<()> {
        let mut roles = self.roles.write().await;
        let entry = roles
            .get_mut(role)
            .ok_or_else(|| Error::storage(format!("role '{role}' does not exist")))?;
        log::debug!("Added user {user} to role {role}");
        entry.users.insert(user);
        Ok(())
    }

    /// Make `child`'s members members of `parent`. Both roles must exist.
    pub async fn add_child_role(&self, parent: &RoleName, child: &RoleName) -> Result<()> {
        let mut roles = self.roles.write().await;
        if !roles.contains_key(child) {
            return Err(Error::storage(format!("role '{child}' does not exist")));
        }
        let entry = roles
            .get_mut(parent)
            .ok_or_else(|| Error::storage(format!("role '{parent}' does not exist")))?;
        entry.roles.insert(child.clone());
        log::debug!("Role {child} is now a child of {parent}");
        Ok(())
    }

    /// Register a session token for a user. Issuing tokens is somebody
    /// else's job; this only seeds the lookup table.
    pub async fn insert_session(&self, token: impl Into<String>, user: UserId) {
        self.sessions.write().await.insert(token.into(), user);
    }

    /// Number of stored objects across all classes.
    pub async fn object_count(&self) -> usize {
        self.objects.read().await.len()
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn user_for_session_token(&self, token: &str) -> Result<Option<UserId>> {
        Ok(self.sessions.read().await.get(token).cloned())
    }
}

#[async_trait]
impl RoleStore for MemoryStore {
    async fn load_role(&self, name: &RoleName) -> Result<Option<Role>> {
        Ok(self.roles.read().await.get(name).cloned())
    }

    async fn roles_with_user(&self, user: &UserId) -> Result<Vec<Role>> {
        let roles = self.roles.read().await;
        Ok(roles
            .values()
            .filter(|role| role.users.contains(user))
            .cloned()
            .collect())
    }

    async fn roles_containing(&self, role: &RoleName) -> Result<Vec<Role>> {
        let roles = self.roles.read().await;
        Ok(roles
            .values()
            .filter(|candidate| candidate.roles.contains(role))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn get_object(&self, class: &ClassName, id: &ObjectId) -> Result<Option<StoredObject>> {
        let key = (class.clone(), id.clone());
        Ok(self.objects.read().await.get(&key).cloned())
    }

    async fn find_objects(&self, class: &ClassName) -> Result<Vec<StoredObject>> {
        let objects = self.objects.read().await;
        Ok(objects
            .iter()
            .filter(|((object_class, _), _)| object_class == class)
            .map(|(_, object)| object.clone())
            .collect())
    }
}

// ============================================================================
// Tests
// ============================================================================
