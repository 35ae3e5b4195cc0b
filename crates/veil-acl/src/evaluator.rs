//! ACL evaluation.
//!
//! Each way a principal can be granted access is a [`Rule`] in [`RULES`],
//! listed strongest first. Read and write are evaluated independently across
//! every rule; the reported [`GrantKind`] is the kind of the strongest rule
//! that granted read.

use veil_core::{Acl, Grant, GrantKind, Permission, Principal, StoredObject, UserId};

use crate::roles::RoleSet;

/// Everything a rule may look at.
struct Subject<'a> {
    acl: &'a Acl,
    owner: Option<&'a UserId>,
    principal: &'a Principal,
    roles: &'a RoleSet,
}

impl Subject<'_> {
    fn is_owner(&self) -> bool {
        match (self.principal.user_id(), self.owner) {
            (Some(user), Some(owner)) => user == owner,
            _ => false,
        }
    }
}

/// A single source of access.
struct Rule {
    kind: GrantKind,
    permission: fn(&Subject<'_>) -> Permission,
}

/// Access rules, strongest first.
const RULES: &[Rule] = &[
    Rule {
        kind: GrantKind::Master,
        permission: master_permission,
    },
    Rule {
        kind: GrantKind::SelfOwned,
        permission: owner_permission,
    },
    Rule {
        kind: GrantKind::RoleGrant,
        permission: role_permission,
    },
    Rule {
        kind: GrantKind::UserGrant,
        permission: user_permission,
    },
    Rule {
        kind: GrantKind::Public,
        permission: public_permission,
    },
];

fn master_permission(subject: &Subject<'_>) -> Permission {
    if subject.principal.is_master() {
        Permission::READ_WRITE
    } else {
        Permission::NONE
    }
}

fn owner_permission(subject: &Subject<'_>) -> Permission {
    if subject.is_owner() {
        Permission::READ_WRITE
    } else {
        Permission::NONE
    }
}

fn role_permission(subject: &Subject<'_>) -> Permission {
    subject
        .acl
        .role_entries()
        .filter(|(role, _)| subject.roles.contains(role))
        .fold(Permission::NONE, |acc, (_, perm)| union(acc, perm))
}

fn user_permission(subject: &Subject<'_>) -> Permission {
    match subject.principal.user_id() {
        Some(user) if !subject.is_owner() => subject.acl.user(user),
        _ => Permission::NONE,
    }
}

fn public_permission(subject: &Subject<'_>) -> Permission {
    subject.acl.public()
}

fn union(a: Permission, b: Permission) -> Permission {
    Permission {
        read: a.read || b.read,
        write: a.write || b.write,
    }
}

/// Evaluate `acl` for `principal`.
///
/// `owner` is the object's owning user, if the owner's implicit access has
/// not been removed. `roles` must be the principal's full role closure, or
/// may be empty when [`requires_role_closure`] says it cannot matter.
pub fn evaluate(
    acl: &Acl,
    owner: Option<&UserId>,
    principal: &Principal,
    roles: &RoleSet,
) -> Grant {
    let subject = Subject {
        acl,
        owner,
        principal,
        roles,
    };

    let mut grant = Grant::denied();
    for rule in RULES {
        let permission = (rule.permission)(&subject);
        if permission.read && !grant.can_read {
            grant.can_read = true;
            grant.kind = rule.kind;
        }
        grant.can_write |= permission.write;
    }
    grant
}

/// Evaluate a stored object's ACL for `principal`.
pub fn evaluate_object(object: &StoredObject, principal: &Principal, roles: &RoleSet) -> Grant {
    evaluate(&object.acl, object.owner.as_ref(), principal, roles)
}

/// Returns `true` if the principal's role closure can affect the grant.
///
/// Only authenticated users hold roles, and only ACLs with role entries can
/// honor them. Owners and the master key already hold read and write, so a
/// role grant could change neither.
pub fn requires_role_closure(acl: &Acl, owner: Option<&UserId>, principal: &Principal) -> bool {
    match principal.user_id() {
        Some(user) => acl.has_role_entries() && owner != Some(user),
        None => false,
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use veil_core::RoleName;

    fn user(id: &str) -> Principal {
        Principal::User(UserId::new(id))
    }

    fn roles(names: &[&str]) -> RoleSet {
        names.iter().map(|n| RoleName::new(*n)).collect()
    }

    #[test]
    fn test_rules_are_ordered_strongest_first() {
        for pair in RULES.windows(2) {
            assert!(pair[0].kind > pair[1].kind);
        }
    }

    #[test]
    fn test_master_key_bypasses_acl() {
        let grant = evaluate(&Acl::private(), None, &Principal::MasterKey, &RoleSet::empty());
        assert_eq!(grant, Grant::master());
    }

    #[test]
    fn test_owner_gets_self_grant() {
        let owner = UserId::new("u1");
        let grant = evaluate(&Acl::private(), Some(&owner), &user("u1"), &RoleSet::empty());
        assert!(grant.can_read && grant.can_write);
        assert_eq!(grant.kind, GrantKind::SelfOwned);
    }

    #[test]
    fn test_owner_with_explicit_entry_stays_self() {
        let owner = UserId::new("u1");
        let acl = Acl::public_read_owner_write(&owner);
        let grant = evaluate(&acl, Some(&owner), &user("u1"), &RoleSet::empty());
        assert_eq!(grant.kind, GrantKind::SelfOwned);
    }

    #[test]
    fn test_excluded_owner_falls_back_to_acl() {
        let mut acl = Acl::private();
        acl.set_public_read(true);
        let grant = evaluate(&acl, None, &user("u1"), &RoleSet::empty());
        assert!(grant.can_read && !grant.can_write);
        assert_eq!(grant.kind, GrantKind::Public);
    }

    #[test]
    fn test_explicit_user_entry_is_user_grant() {
        let owner = UserId::new("u1");
        let mut acl = Acl::owner_default(&owner);
        acl.set_user_access(UserId::new("u2"), Permission::READ_ONLY);

        let grant = evaluate(&acl, Some(&owner), &user("u2"), &RoleSet::empty());
        assert!(grant.can_read && !grant.can_write);
        assert_eq!(grant.kind, GrantKind::UserGrant);
    }

    #[test]
    fn test_role_grant_beats_public() {
        let mut acl = Acl::private();
        acl.set_public_read(true)
            .set_role_access(RoleName::new("managementOf_u1"), Permission::READ_ONLY);

        let grant = evaluate(&acl, None, &user("admin"), &roles(&["managementOf_u1"]));
        assert_eq!(grant.kind, GrantKind::RoleGrant);

        let outsider = evaluate(&acl, None, &user("u3"), &RoleSet::empty());
        assert!(outsider.can_read);
        assert_eq!(outsider.kind, GrantKind::Public);
    }

    #[test]
    fn test_role_grant_beats_user_grant() {
        let mut acl = Acl::private();
        acl.set_user_access(UserId::new("u2"), Permission::READ_ONLY)
            .set_role_access(RoleName::new("Staff"), Permission::READ_ONLY);
        let grant = evaluate(&acl, None, &user("u2"), &roles(&["Staff"]));
        assert_eq!(grant.kind, GrantKind::RoleGrant);
    }

    #[test]
    fn test_read_and_write_are_independent() {
        let mut acl = Acl::private();
        acl.set_public_read(true).set_role_access(
            RoleName::new("Editors"),
            Permission {
                read: false,
                write: true,
            },
        );

        let grant = evaluate(&acl, None, &user("u2"), &roles(&["Editors"]));
        assert!(grant.can_read && grant.can_write);
        // Write came from the role, but read only from the public entry.
        assert_eq!(grant.kind, GrantKind::Public);
    }

    #[test]
    fn test_write_only_grant_reports_none() {
        let mut acl = Acl::private();
        acl.set_public_write(true);
        let grant = evaluate(&acl, None, &Principal::Anonymous, &RoleSet::empty());
        assert!(!grant.can_read && grant.can_write);
        assert_eq!(grant.kind, GrantKind::None);
    }

    #[test]
    fn test_nothing_matches() {
        let owner = UserId::new("u1");
        let acl = Acl::owner_default(&owner);
        let grant = evaluate(&acl, Some(&owner), &Principal::Anonymous, &RoleSet::empty());
        assert_eq!(grant, Grant::denied());

        let stranger = evaluate(&acl, Some(&owner), &user("u2"), &roles(&["Admins"]));
        assert_eq!(stranger, Grant::denied());
    }

    #[test]
    fn test_roles_not_in_acl_are_ignored() {
        let mut acl = Acl::private();
        acl.set_role_access(RoleName::new("Admins"), Permission::READ_WRITE);
        let grant = evaluate(&acl, None, &user("u2"), &roles(&["Moderators"]));
        assert!(!grant.can_read);
    }

    #[test]
    fn test_evaluate_object_uses_owner() {
        let object = StoredObject::user("u1", Default::default());
        let grant = evaluate_object(&object, &user("u1"), &RoleSet::empty());
        assert_eq!(grant.kind, GrantKind::SelfOwned);

        let other = evaluate_object(&object, &user("u2"), &RoleSet::empty());
        assert_eq!(other.kind, GrantKind::Public);
        assert!(!other.can_write);
    }

    #[test]
    fn test_requires_role_closure() {
        let owner = UserId::new("u1");
        let mut acl = Acl::owner_default(&owner);
        assert!(!requires_role_closure(&acl, Some(&owner), &user("u2")));

        acl.set_role_access(RoleName::new("Admins"), Permission::READ_ONLY);
        assert!(requires_role_closure(&acl, Some(&owner), &user("u2")));
        assert!(!requires_role_closure(&acl, Some(&owner), &user("u1")));
        assert!(!requires_role_closure(&acl, Some(&owner), &Principal::Anonymous));
        assert!(!requires_role_closure(&acl, Some(&owner), &Principal::MasterKey));
    }
}
