//! Transitive role closure.
//!
//! A user holds every role that lists them directly, plus every role that
//! lists one of those as a child, and so on up the hierarchy. The closure is
//! computed breadth-first, one frontier at a time: all parent lookups for a
//! frontier go to the store concurrently and are joined before the next
//! frontier is formed. A visited set guarantees termination on cyclic data.

use futures::future::try_join_all;
use std::collections::HashSet;
use std::sync::Arc;

use veil_core::{Error, Principal, Result, Role, RoleName, UserId};
use veil_storage::RoleStore;

/// Upper bound on the number of distinct roles in one closure.
pub const MAX_CLOSURE_ROLES: usize = 1_000;

// ============================================================================
// RoleSet
// ============================================================================

/// The closed set of roles a principal belongs to. Order is irrelevant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleSet {
    roles: HashSet<RoleName>,
}

impl RoleSet {
    /// The empty set.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns `true` if the set contains `role`.
    pub fn contains(&self, role: &RoleName) -> bool {
        self.roles.contains(role)
    }

    /// Number of roles.
    pub fn len(&self) -> usize {
        self.roles.len()
    }

    /// Returns `true` if the principal holds no roles.
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    /// Iterate over the roles in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = &RoleName> {
        self.roles.iter()
    }
}

impl FromIterator<RoleName> for RoleSet {
    fn from_iter<I: IntoIterator<Item = RoleName>>(iter: I) -> Self {
        Self {
            roles: iter.into_iter().collect(),
        }
    }
}

// ============================================================================
// RoleGraph
// ============================================================================

/// Computes role closures over a [`RoleStore`].
#[derive(Clone)]
pub struct RoleGraph {
    store: Arc<dyn RoleStore>,
}

impl std::fmt::Debug for RoleGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoleGraph").finish_non_exhaustive()
    }
}

impl RoleGraph {
    /// Create a role graph reading from `store`.
    pub fn new(store: Arc<dyn RoleStore>) -> Self {
        Self { store }
    }

    /// All roles `principal` belongs to, transitively.
    ///
    /// Anonymous callers hold no roles. The master key never consults the
    /// role graph and gets the empty set as well.
    pub async fn roles_for(&self, principal: &Principal) -> Result<RoleSet> {
        match principal {
            Principal::User(user) => self.closure_for_user(user).await,
            Principal::Anonymous | Principal::MasterKey => Ok(RoleSet::empty()),
        }
    }

    /// Transitive closure of the roles `user` is a direct member of.
    pub async fn closure_for_user(&self, user: &UserId) -> Result<RoleSet> {
        let direct = self.store.roles_with_user(user).await.map_err(|e| {
            log::warn!("Role lookup for user {user} failed: {e}");
            Error::role_resolution_with_source(format!("loading roles of user '{user}'"), e)
        })?;

        let mut visited: HashSet<RoleName> = HashSet::new();
        let mut frontier: Vec<RoleName> = Vec::new();
        enqueue(direct, &mut visited, &mut frontier)?;

        let mut frontiers = 0usize;
        while !frontier.is_empty() {
            frontiers += 1;
            let lookups = frontier.iter().map(|role| self.parents_of(role));
            let parents = try_join_all(lookups).await?;

            let mut next = Vec::new();
            for roles in parents {
                enqueue(roles, &mut visited, &mut next)?;
            }
            frontier = next;
        }

        log::debug!(
            "Role closure for user {user}: {} role(s) in {frontiers} frontier(s)",
            visited.len()
        );
        Ok(RoleSet { roles: visited })
    }

    async fn parents_of(&self, role: &RoleName) -> Result<Vec<Role>> {
        self.store.roles_containing(role).await.map_err(|e| {
            log::warn!("Parent lookup for role {role} failed: {e}");
            Error::role_resolution_with_source(format!("loading parents of role '{role}'"), e)
        })
    }
}

/// Move unseen roles into `visited` and `frontier`, enforcing the size cap.
fn enqueue(
    roles: Vec<Role>,
    visited: &mut HashSet<RoleName>,
    frontier: &mut Vec<RoleName>,
) -> Result<()> {
    for role in roles {
        if visited.insert(role.name.clone()) {
            if visited.len() > MAX_CLOSURE_ROLES {
                return Err(Error::role_resolution(format!(
                    "role closure exceeds {MAX_CLOSURE_ROLES} roles"
                )));
            }
            frontier.push(role.name);
        }
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
