//! # veil-storage
//!
//! Storage collaborators consumed by Veil's read path.
//!
//! Persistence itself lives elsewhere; this crate only fixes the interface
//! the access-control core reads through:
//! - [`SessionStore`]: session token → user
//! - [`RoleStore`]: role lookups for closure computation
//! - [`ObjectStore`]: object get/find, ACL included
//!
//! [`MemoryStore`] implements all three for tests and the demo server.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod memory;
pub mod traits;

pub use memory::MemoryStore;
pub use traits::{ObjectStore, RoleStore, SessionStore};
