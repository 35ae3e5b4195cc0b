//! Grant records produced by ACL evaluation.
//!
//! A [`Grant`] records not only *whether* a principal may read an object but
//! *why*. The reason survives past the row-level check into the field policy,
//! which treats a public grant very differently from a targeted one.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Why read access was granted, ordered from weakest to strongest.
///
/// The derived `Ord` is load-bearing: when several rules grant read access
/// the evaluator reports the maximum.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum GrantKind {
    /// No rule granted read access.
    #[default]
    None,
    /// The ACL's public entry granted read access.
    Public,
    /// An explicit per-user ACL entry for a non-owner.
    UserGrant,
    /// An ACL entry for a role in the principal's role closure.
    RoleGrant,
    /// The principal owns the object.
    #[serde(rename = "self")]
    SelfOwned,
    /// Master key.
    Master,
}

impl GrantKind {
    /// Returns `true` for grants aimed at this specific principal (or
    /// elevated trust), as opposed to public or absent grants.
    pub fn is_targeted(&self) -> bool {
        matches!(
            self,
            Self::UserGrant | Self::RoleGrant | Self::SelfOwned | Self::Master
        )
    }

    /// Wire name of the grant kind.
    pub fn name(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Public => "public",
            Self::UserGrant => "user_grant",
            Self::RoleGrant => "role_grant",
            Self::SelfOwned => "self",
            Self::Master => "master",
        }
    }
}

impl fmt::Display for GrantKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Result of evaluating an ACL for one principal. Computed per request,
/// never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grant {
    /// Row-level read access.
    pub can_read: bool,
    /// Row-level write access.
    pub can_write: bool,
    /// Strongest reason for `can_read`; [`GrantKind::None`] when unreadable.
    pub kind: GrantKind,
}

impl Grant {
    /// Nothing granted.
    pub fn denied() -> Self {
        Self::default()
    }

    /// Unconditional access.
    pub fn master() -> Self {
        Self {
            can_read: true,
            can_write: true,
            kind: GrantKind::Master,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_grant_kind_strength_order() {
        assert!(GrantKind::Master > GrantKind::SelfOwned);
        assert!(GrantKind::SelfOwned > GrantKind::RoleGrant);
        assert!(GrantKind::RoleGrant > GrantKind::UserGrant);
        assert!(GrantKind::UserGrant > GrantKind::Public);
        assert!(GrantKind::Public > GrantKind::None);
    }

    #[test]
    fn test_targeted_kinds() {
        assert!(!GrantKind::None.is_targeted());
        assert!(!GrantKind::Public.is_targeted());
        assert!(GrantKind::UserGrant.is_targeted());
        assert!(GrantKind::RoleGrant.is_targeted());
        assert!(GrantKind::SelfOwned.is_targeted());
        assert!(GrantKind::Master.is_targeted());
    }

    #[test]
    fn test_grant_kind_serde_names() {
        let json = serde_json::to_string(&GrantKind::SelfOwned).unwrap();
        assert_eq!(json, "\"self\"");
        let back: GrantKind = serde_json::from_str("\"role_grant\"").unwrap();
        assert_eq!(back, GrantKind::RoleGrant);
        assert_eq!(GrantKind::UserGrant.to_string(), "user_grant");
    }

    #[test]
    fn test_denied_and_master() {
        let denied = Grant::denied();
        assert!(!denied.can_read && !denied.can_write);
        assert_eq!(denied.kind, GrantKind::None);

        let master = Grant::master();
        assert!(master.can_read && master.can_write);
        assert_eq!(master.kind, GrantKind::Master);
    }
}
