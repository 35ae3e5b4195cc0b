//! Identifier newtypes.
//!
//! All identifiers are opaque strings on the wire. Wrapping them keeps a
//! user ID from being passed where a role name is expected, which matters
//! here because ACL entries are keyed by both.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier from a string.
            pub fn new<S: Into<String>>(id: S) -> Self {
                Self(id.into())
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Converts into the inner string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

string_id!(
    /// Identifier of a user (the `objectId` of a `_User` object).
    UserId
);

string_id!(
    /// Unique name of a role, as referenced by `role:<name>` ACL entries.
    RoleName
);

string_id!(
    /// Identifier of a stored object within its class.
    ObjectId
);

string_id!(
    /// Name of an object class (e.g. `_User`, `GameScore`).
    ClassName
);

/// Class name of user objects.
pub const USER_CLASS: &str = "_User";

/// Class name of role objects.
pub const ROLE_CLASS: &str = "_Role";

impl ObjectId {
    /// Generates a fresh random object ID.
    ///
    /// # Examples
    ///
    /// ```
    /// use veil_core::ObjectId;
    ///
    /// let id = ObjectId::generate();
    /// assert_eq!(id.as_str().len(), 32);
    /// ```
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }
}

impl ClassName {
    /// The user class, the only class subject to field redaction.
    pub fn user() -> Self {
        Self::new(USER_CLASS)
    }

    /// The role class.
    pub fn role() -> Self {
        Self::new(ROLE_CLASS)
    }

    /// Returns `true` for the user class.
    pub fn is_user(&self) -> bool {
        self.0 == USER_CLASS
    }
}

impl From<&UserId> for ObjectId {
    fn from(id: &UserId) -> Self {
        Self(id.0.clone())
    }
}

impl From<&ObjectId> for UserId {
    fn from(id: &ObjectId) -> Self {
        Self(id.0.clone())
    }
}
