//! Principals, roles, and objects.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeSet;

use crate::acl::Acl;
use crate::ids::{ClassName, ObjectId, RoleName, UserId};

// ============================================================================
// Principal
// ============================================================================

/// Who is making a request. Exactly one holds per request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Principal {
    /// No credential presented.
    Anonymous,
    /// A user identified by a session token.
    User(UserId),
    /// Master-key trust level; not a user identity.
    MasterKey,
}

impl Principal {
    /// The user ID, if this principal is an authenticated user.
    pub fn user_id(&self) -> Option<&UserId> {
        match self {
            Self::User(id) => Some(id),
            _ => None,
        }
    }

    /// Returns `true` for the master key.
    pub fn is_master(&self) -> bool {
        matches!(self, Self::MasterKey)
    }
}

impl std::fmt::Display for Principal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Anonymous => write!(f, "anonymous"),
            Self::User(id) => write!(f, "user:{id}"),
            Self::MasterKey => write!(f, "master"),
        }
    }
}

// ============================================================================
// Role
// ============================================================================

/// A named role.
///
/// Membership is transitive through `roles`: every member of a child role
/// listed there is also a member of this role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    /// Unique role name.
    pub name: RoleName,
    /// Who may read or write the role itself.
    #[serde(rename = "ACL", default)]
    pub acl: Acl,
    /// Directly assigned users.
    #[serde(default)]
    pub users: BTreeSet<UserId>,
    /// Child roles whose members inherit this role.
    #[serde(default)]
    pub roles: BTreeSet<RoleName>,
}

impl Role {
    /// Creates an empty role.
    pub fn new(name: impl Into<RoleName>, acl: Acl) -> Self {
        Self {
            name: name.into(),
            acl,
            users: BTreeSet::new(),
            roles: BTreeSet::new(),
        }
    }

    /// Adds a direct user member.
    pub fn with_user(mut self, user: impl Into<UserId>) -> Self {
        self.users.insert(user.into());
        self
    }

    /// Adds a child role.
    pub fn with_child_role(mut self, role: impl Into<RoleName>) -> Self {
        self.roles.insert(role.into());
        self
    }
}

// ============================================================================
// StoredObject
// ============================================================================

/// An object as held by the storage layer, ACL included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredObject {
    /// Object class.
    #[serde(rename = "className")]
    pub class_name: ClassName,
    /// Object ID.
    #[serde(rename = "objectId")]
    pub id: ObjectId,
    /// Owning user; `None` when the owner's implicit access was removed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<UserId>,
    /// Access control list.
    #[serde(rename = "ACL", default)]
    pub acl: Acl,
    /// Field values.
    #[serde(default)]
    pub fields: Map<String, Value>,
}

impl StoredObject {
    /// Creates an object with a private ACL and no owner.
    pub fn new(class_name: impl Into<ClassName>, id: impl Into<ObjectId>) -> Self {
        Self {
            class_name: class_name.into(),
            id: id.into(),
            owner: None,
            acl: Acl::private(),
            fields: Map::new(),
        }
    }

    /// Creates a user object. The user owns itself and gets the default
    /// signup ACL (public read, owner write).
    pub fn user(id: impl Into<UserId>, fields: Map<String, Value>) -> Self {
        let user: UserId = id.into();
        Self {
            class_name: ClassName::user(),
            id: ObjectId::from(&user),
            acl: Acl::public_read_owner_write(&user),
            owner: Some(user),
            fields,
        }
    }

    /// Sets the owner.
    pub fn with_owner(mut self, owner: impl Into<UserId>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    /// Replaces the ACL.
    pub fn with_acl(mut self, acl: Acl) -> Self {
        self.acl = acl;
        self
    }

    /// Sets a field value.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }
}

// ============================================================================
// RedactedObject
// ============================================================================

/// Keys the wire format owns. Stored fields with these names are never
/// emitted next to them.
pub const RESERVED_FIELDS: &[&str] = &["objectId", "className", "ACL"];

/// The representation of an object handed back to a caller.
///
/// Serializes flat: `{"objectId": "...", "<field>": ...}`. Redacted fields
/// are absent, never `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RedactedObject {
    /// Object class (not serialized; the route already names it).
    #[serde(skip)]
    pub class_name: ClassName,
    /// Object ID.
    #[serde(rename = "objectId")]
    pub id: ObjectId,
    /// Remaining field values.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl RedactedObject {
    /// Creates a redacted view from its parts. Any field named in
    /// [`RESERVED_FIELDS`] is dropped.
    pub fn new(class_name: ClassName, id: ObjectId, mut fields: Map<String, Value>) -> Self {
        fields.retain(|name, _| !RESERVED_FIELDS.contains(&name.as_str()));
        Self {
            class_name,
            id,
            fields,
        }
    }

    /// Value of a field, if present.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Returns `true` if the field survived redaction.
    pub fn has_field(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::acl::Permission;
    use serde_json::json;

    #[test]
    fn test_principal_helpers() {
        let user = Principal::User(UserId::new("u1"));
        assert_eq!(user.user_id().unwrap().as_str(), "u1");
        assert!(!user.is_master());
        assert!(Principal::MasterKey.is_master());
        assert!(Principal::Anonymous.user_id().is_none());
        assert_eq!(user.to_string(), "user:u1");
    }

    #[test]
    fn test_user_object_defaults() {
        let obj = StoredObject::user("u1", Map::new());
        assert!(obj.class_name.is_user());
        assert_eq!(obj.id.as_str(), "u1");
        assert_eq!(obj.owner, Some(UserId::new("u1")));
        assert_eq!(obj.acl.public(), Permission::READ_ONLY);
        assert_eq!(obj.acl.user(&UserId::new("u1")), Permission::READ_WRITE);
    }

    #[test]
    fn test_role_builder() {
        let role = Role::new("managementOf_u1", Acl::private())
            .with_child_role("Administrator")
            .with_user("u7");
        assert!(role.roles.contains(&RoleName::new("Administrator")));
        assert!(role.users.contains(&UserId::new("u7")));
    }

    #[test]
    fn test_redacted_object_serializes_flat() {
        let mut fields = Map::new();
        fields.insert("zip".to_string(), json!("10001"));
        let view = RedactedObject::new(ClassName::user(), ObjectId::new("u1"), fields);

        let value = serde_json::to_value(&view).unwrap();
        assert_eq!(value, json!({ "objectId": "u1", "zip": "10001" }));
        assert!(view.has_field("zip"));
        assert!(!view.has_field("email"));
        assert!(value.get("email").is_none());
    }

    #[test]
    fn test_redacted_object_drops_reserved_fields() {
        let mut fields = Map::new();
        fields.insert("objectId".to_string(), json!("other"));
        fields.insert("ACL".to_string(), json!({ "*": { "read": true } }));
        fields.insert("className".to_string(), json!("Other"));
        fields.insert("zip".to_string(), json!("10001"));
        let view = RedactedObject::new(ClassName::user(), ObjectId::new("u1"), fields);

        assert_eq!(view.fields.len(), 1);
        assert_eq!(
            serde_json::to_string(&view).unwrap(),
            r#"{"objectId":"u1","zip":"10001"}"#
        );
    }

    #[test]
    fn test_stored_object_wire_roundtrip() {
        let obj = StoredObject::new("GameScore", "g1")
            .with_owner("u1")
            .with_field("score", 42);
        let value = serde_json::to_value(&obj).unwrap();
        assert_eq!(value["className"], "GameScore");
        assert_eq!(value["objectId"], "g1");
        assert_eq!(value["ACL"], json!({}));

        let back: StoredObject = serde_json::from_value(value).unwrap();
        assert_eq!(back, obj);
    }
}
