//! Property-based tests for role closure and ACL evaluation.

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crate::{RoleGraph, RoleSet, evaluate};
    use proptest::prelude::*;
    use std::collections::{HashSet, VecDeque};
    use std::sync::Arc;
    use veil_core::{Acl, GrantKind, Permission, Principal, Role, RoleName, UserId};
    use veil_storage::MemoryStore;

    const ROLE_COUNT: usize = 8;

    fn role_name(i: usize) -> RoleName {
        RoleName::new(format!("r{i}"))
    }

    /// Reference closure: plain sequential BFS over the parent edges.
    fn expected_closure(edges: &[(usize, usize)], members: &[usize]) -> HashSet<usize> {
        let mut seen: HashSet<usize> = members.iter().copied().collect();
        let mut queue: VecDeque<usize> = seen.iter().copied().collect();
        while let Some(child) = queue.pop_front() {
            for &(parent, c) in edges {
                if c == child && seen.insert(parent) {
                    queue.push_back(parent);
                }
            }
        }
        seen
    }

    fn runtime() -> tokio::runtime::Runtime {
        tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap()
    }

    proptest! {
        #[test]
        fn test_closure_terminates_and_matches_bfs(
            edges in prop::collection::vec((0..ROLE_COUNT, 0..ROLE_COUNT), 0..24),
            members in prop::collection::vec(0..ROLE_COUNT, 0..3),
        ) {
            let closure = runtime().block_on(async {
                let store = MemoryStore::new();
                for i in 0..ROLE_COUNT {
                    let mut role = Role::new(role_name(i), Acl::private());
                    if members.contains(&i) {
                        role = role.with_user("u1");
                    }
                    for &(parent, child) in &edges {
                        if parent == i {
                            role = role.with_child_role(role_name(child));
                        }
                    }
                    store.insert_role(role).await;
                }
                RoleGraph::new(Arc::new(store))
                    .closure_for_user(&UserId::new("u1"))
                    .await
                    .unwrap()
            });

            let expected = expected_closure(&edges, &members);
            prop_assert_eq!(closure.len(), expected.len());
            for i in expected {
                prop_assert!(closure.contains(&role_name(i)));
            }
        }

        #[test]
        fn test_grant_kind_is_strongest_read_reason(
            public_read in any::<bool>(),
            user_read in any::<bool>(),
            role_read in any::<bool>(),
            is_owner in any::<bool>(),
        ) {
            let principal_id = UserId::new("u2");
            let mut acl = Acl::private();
            acl.set_public_read(public_read);
            if user_read {
                acl.set_user_access(principal_id.clone(), Permission::READ_ONLY);
            }
            if role_read {
                acl.set_role_access(RoleName::new("Staff"), Permission::READ_ONLY);
            }
            let owner = if is_owner { Some(&principal_id) } else { None };
            let roles: RoleSet = [RoleName::new("Staff")].into_iter().collect();

            let grant = evaluate(&acl, owner, &Principal::User(principal_id.clone()), &roles);

            let expected = if is_owner {
                GrantKind::SelfOwned
            } else if role_read {
                GrantKind::RoleGrant
            } else if user_read {
                GrantKind::UserGrant
            } else if public_read {
                GrantKind::Public
            } else {
                GrantKind::None
            };
            prop_assert_eq!(grant.kind, expected);
            prop_assert_eq!(grant.can_read, expected != GrantKind::None);
        }
    }
}
