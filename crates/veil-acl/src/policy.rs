//! Protected-field policy for the User class.
//!
//! Public readability of a user never implies visibility of its sensitive
//! fields. Only a targeted grant (owner, explicit user entry, role entry) or
//! the master key lifts redaction.

use serde_json::{Map, Value};

use veil_core::config::DEFAULT_SENSITIVE_FIELDS;
use veil_core::{ClassName, Grant, VeilConfig};

/// Immutable snapshot of the sensitive user fields.
///
/// Built once from configuration and shared by reference across requests;
/// reconfiguration builds a new snapshot instead of mutating this one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtectedFields {
    user_fields: Vec<String>,
}

impl Default for ProtectedFields {
    fn default() -> Self {
        Self::new(DEFAULT_SENSITIVE_FIELDS.iter().map(|f| (*f).to_string()))
    }
}

impl ProtectedFields {
    /// Create a policy protecting exactly `fields` on the User class.
    ///
    /// Duplicates are dropped, first occurrence wins.
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut user_fields: Vec<String> = Vec::new();
        for field in fields {
            let field = field.into();
            if !user_fields.contains(&field) {
                user_fields.push(field);
            }
        }
        Self { user_fields }
    }

    /// Create the policy described by `config`.
    pub fn from_config(config: &VeilConfig) -> Self {
        Self::new(config.sensitive_fields())
    }

    /// The active sensitive fields, in configuration order.
    pub fn sensitive_fields(&self) -> &[String] {
        &self.user_fields
    }

    /// Fields to omit from an object of `class` read under `grant`.
    ///
    /// Non-user classes are never redacted here; their row-level ACL already
    /// governs visibility.
    pub fn fields_to_redact(&self, class: &ClassName, grant: &Grant) -> &[String] {
        if !class.is_user() || grant.kind.is_targeted() {
            return &[];
        }
        &self.user_fields
    }

    /// Remove the fields `grant` may not see from `fields`.
    ///
    /// Returns the number of fields actually removed.
    pub fn strip(&self, class: &ClassName, grant: &Grant, fields: &mut Map<String, Value>) -> usize {
        self.fields_to_redact(class, grant)
            .iter()
            .filter(|field| fields.remove(field.as_str()).is_some())
            .count()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;
    use veil_core::GrantKind;

    fn grant(kind: GrantKind) -> Grant {
        Grant {
            can_read: kind != GrantKind::None,
            can_write: false,
            kind,
        }
    }

    #[test]
    fn test_default_protects_email() {
        let policy = ProtectedFields::default();
        assert_eq!(policy.sensitive_fields(), ["email".to_string()]);
    }

    #[test]
    fn test_config_replaces_default() {
        let config = VeilConfig::from_toml_str("[users]\nsensitive_fields = [\"ssn\", \"zip\"]\n")
            .unwrap();
        let policy = ProtectedFields::from_config(&config);
        assert_eq!(policy.sensitive_fields(), ["ssn".to_string(), "zip".to_string()]);
    }

    #[test]
    fn test_public_and_none_redact_everything() {
        let policy = ProtectedFields::new(["ssn", "zip"]);
        for kind in [GrantKind::Public, GrantKind::None] {
            let redacted = policy.fields_to_redact(&ClassName::user(), &grant(kind));
            assert_eq!(redacted, ["ssn".to_string(), "zip".to_string()]);
        }
    }

    #[test]
    fn test_targeted_grants_redact_nothing() {
        let policy = ProtectedFields::default();
        for kind in [
            GrantKind::UserGrant,
            GrantKind::RoleGrant,
            GrantKind::SelfOwned,
            GrantKind::Master,
        ] {
            assert!(policy.fields_to_redact(&ClassName::user(), &grant(kind)).is_empty());
        }
    }

    #[test]
    fn test_other_classes_never_redacted() {
        let policy = ProtectedFields::default();
        let redacted = policy.fields_to_redact(&ClassName::new("GameScore"), &grant(GrantKind::Public));
        assert!(redacted.is_empty());
    }

    #[test]
    fn test_new_drops_duplicates() {
        let policy = ProtectedFields::new(["zip", "ssn", "zip"]);
        assert_eq!(policy.sensitive_fields().len(), 2);
    }

    #[test]
    fn test_strip_removes_only_present_sensitive_fields() {
        let policy = ProtectedFields::new(["email", "ssn"]);
        let mut fields = json!({
            "email": "foo@bar.com",
            "nickname": "foo",
            "zip": "10001"
        })
        .as_object()
        .unwrap()
        .clone();

        let removed = policy.strip(&ClassName::user(), &grant(GrantKind::Public), &mut fields);
        assert_eq!(removed, 1);
        assert!(!fields.contains_key("email"));
        assert!(fields.contains_key("nickname"));
        assert!(fields.contains_key("zip"));
    }

    #[test]
    fn test_strip_keeps_everything_for_owner() {
        let policy = ProtectedFields::default();
        let mut fields = Map::new();
        fields.insert("email".to_string(), json!("foo@bar.com"));
        let removed = policy.strip(&ClassName::user(), &grant(GrantKind::SelfOwned), &mut fields);
        assert_eq!(removed, 0);
        assert!(fields.contains_key("email"));
    }
}
