//! Demo data for `veil-server --seed-demo`.

use serde_json::{Map, json};

use veil_core::{Acl, Permission, Result, Role, RoleName, StoredObject, UserId};
use veil_storage::MemoryStore;

/// Session tokens created by [`seed_demo`], by user.
pub const DEMO_SESSIONS: &[(&str, &str)] = &[
    ("tester", "r:tester"),
    ("another", "r:another"),
    ("administrator", "r:administrator"),
];

/// Seed the memory store with the PII demo scenario.
///
/// - `tester` holds email, zip and ssn. Its ACL grants public read and read
///   to `managementOf_usertester`, which contains `Administrator`.
/// - `administrator` is a direct member of `Administrator`.
/// - `another` is an unrelated user.
pub async fn seed_demo(store: &MemoryStore) -> Result<()> {
    let tester = UserId::new("tester");

    let mut fields = Map::new();
    fields.insert("username".to_string(), json!("tester"));
    fields.insert("email".to_string(), json!("foo@bar.com"));
    fields.insert("zip".to_string(), json!("10001"));
    fields.insert("ssn".to_string(), json!("999-99-9999"));

    let management = RoleName::new(format!("managementOf_user{tester}"));
    let mut acl = Acl::public_read_owner_write(&tester);
    acl.set_role_access(management.clone(), Permission::READ_ONLY);
    store
        .insert_object(StoredObject::user(tester.clone(), fields).with_acl(acl))
        .await;

    for (user, _) in DEMO_SESSIONS.iter().filter(|(user, _)| *user != "tester") {
        let mut fields = Map::new();
        fields.insert("username".to_string(), json!(user));
        store
            .insert_object(StoredObject::user(*user, fields))
            .await;
    }
    for (user, token) in DEMO_SESSIONS {
        store.insert_session(*token, UserId::new(*user)).await;
    }

    store
        .insert_role(Role::new("Administrator", Acl::private()))
        .await;
    store
        .insert_role(Role::new(management.clone(), Acl::owner_default(&tester)))
        .await;
    store
        .add_child_role(&management, &RoleName::new("Administrator"))
        .await?;
    store
        .add_role_user(&RoleName::new("Administrator"), UserId::new("administrator"))
        .await?;

    log::info!(
        "Seeded demo data: {} users, 2 roles",
        DEMO_SESSIONS.len()
    );
    Ok(())
}
