//! Per-object access control lists.
//!
//! An [`Acl`] is a sparse structure: a public permission pair plus two maps
//! keyed by user ID and role name. A missing entry means no permission.
//!
//! On the wire the ACL uses the flat JSON shape the object API has always
//! used:
//!
//! ```json
//! {
//!   "*": { "read": true },
//!   "u1": { "read": true, "write": true },
//!   "role:Administrator": { "read": true }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::ids::{RoleName, UserId};

/// ACL key for the public entry.
pub const PUBLIC_KEY: &str = "*";

/// Prefix of ACL keys that name a role.
pub const ROLE_PREFIX: &str = "role:";

// ============================================================================
// Permission
// ============================================================================

/// A read/write permission pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Permission {
    /// Read access.
    #[serde(default, skip_serializing_if = "is_false")]
    pub read: bool,
    /// Write access.
    #[serde(default, skip_serializing_if = "is_false")]
    pub write: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl Permission {
    /// No access.
    pub const NONE: Self = Self {
        read: false,
        write: false,
    };

    /// Read access only.
    pub const READ_ONLY: Self = Self {
        read: true,
        write: false,
    };

    /// Full access.
    pub const READ_WRITE: Self = Self {
        read: true,
        write: true,
    };

    /// Returns `true` if neither read nor write is granted.
    pub fn is_none(&self) -> bool {
        !self.read && !self.write
    }
}

// ============================================================================
// Acl
// ============================================================================

/// Access control list attached to every stored object.
///
/// The default ACL grants nothing to anyone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<String, Permission>",
    into = "BTreeMap<String, Permission>"
)]
pub struct Acl {
    public: Permission,
    users: BTreeMap<UserId, Permission>,
    roles: BTreeMap<RoleName, Permission>,
}

impl Acl {
    /// Creates an ACL that grants nothing.
    pub fn private() -> Self {
        Self::default()
    }

    /// Creates an ACL granting read and write to a single user.
    pub fn owner_default(owner: &UserId) -> Self {
        let mut acl = Self::private();
        acl.set_user_access(owner.clone(), Permission::READ_WRITE);
        acl
    }

    /// Creates the default ACL of a newly signed-up user: anyone may read
    /// the object, only the user may write it.
    pub fn public_read_owner_write(owner: &UserId) -> Self {
        let mut acl = Self::owner_default(owner);
        acl.set_public_read(true);
        acl
    }

    /// Grants or revokes public read access.
    pub fn set_public_read(&mut self, allowed: bool) -> &mut Self {
        self.public.read = allowed;
        self
    }

    /// Grants or revokes public write access.
    pub fn set_public_write(&mut self, allowed: bool) -> &mut Self {
        self.public.write = allowed;
        self
    }

    /// Sets the permission pair for a user. [`Permission::NONE`] removes the entry.
    pub fn set_user_access(&mut self, user: UserId, permission: Permission) -> &mut Self {
        if permission.is_none() {
            self.users.remove(&user);
        } else {
            self.users.insert(user, permission);
        }
        self
    }

    /// Sets the permission pair for a role. [`Permission::NONE`] removes the entry.
    pub fn set_role_access(&mut self, role: RoleName, permission: Permission) -> &mut Self {
        if permission.is_none() {
            self.roles.remove(&role);
        } else {
            self.roles.insert(role, permission);
        }
        self
    }

    /// Public permission pair.
    pub fn public(&self) -> Permission {
        self.public
    }

    /// Explicit permission pair of a user, [`Permission::NONE`] when absent.
    pub fn user(&self, user: &UserId) -> Permission {
        self.users.get(user).copied().unwrap_or_default()
    }

    /// Explicit permission pair of a role, [`Permission::NONE`] when absent.
    pub fn role(&self, role: &RoleName) -> Permission {
        self.roles.get(role).copied().unwrap_or_default()
    }

    /// Iterate over the role entries.
    pub fn role_entries(&self) -> impl Iterator<Item = (&RoleName, Permission)> {
        self.roles.iter().map(|(name, perm)| (name, *perm))
    }

    /// Returns `true` if any role entry exists.
    ///
    /// Callers use this to skip role-closure computation entirely for ACLs
    /// that could never be satisfied by a role grant.
    pub fn has_role_entries(&self) -> bool {
        !self.roles.is_empty()
    }
}

impl From<BTreeMap<String, Permission>> for Acl {
    fn from(entries: BTreeMap<String, Permission>) -> Self {
        let mut acl = Acl::private();
        for (key, permission) in entries {
            if key == PUBLIC_KEY {
                acl.public = permission;
            } else if let Some(role) = key.strip_prefix(ROLE_PREFIX) {
                acl.set_role_access(RoleName::new(role), permission);
            } else {
                acl.set_user_access(UserId::new(key), permission);
            }
        }
        acl
    }
}

impl From<Acl> for BTreeMap<String, Permission> {
    fn from(acl: Acl) -> Self {
        let mut entries = BTreeMap::new();
        if !acl.public.is_none() {
            entries.insert(PUBLIC_KEY.to_string(), acl.public);
        }
        for (user, permission) in acl.users {
            entries.insert(user.into_inner(), permission);
        }
        for (role, permission) in acl.roles {
            entries.insert(format!("{ROLE_PREFIX}{role}"), permission);
        }
        entries
    }
}
