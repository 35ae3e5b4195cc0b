#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! Veil Core
//!
//! # Modules
//!
//! - [`error`]: Error taxonomy and Result alias
//! - [`ids`]: Identifier newtypes (users, roles, objects, classes)
//! - [`acl`]: Per-object access control lists
//! - [`grant`]: Computed grant records and grant kinds
//! - [`model`]: Principals, roles, stored and redacted objects
//! - [`config`]: TOML configuration

pub mod acl;
pub mod config;
pub mod error;
pub mod grant;
pub mod ids;
pub mod model;

// Re-exports for convenience
pub use acl::{Acl, Permission};
pub use config::VeilConfig;
pub use error::{Error, Result};
pub use grant::{Grant, GrantKind};
pub use ids::{ClassName, ObjectId, RoleName, UserId};
pub use model::{Principal, RESERVED_FIELDS, RedactedObject, Role, StoredObject};
