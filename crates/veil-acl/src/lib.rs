//! # veil-acl
//!
//! Read-path authorization for Veil.
//!
//! This crate decides, per object and per principal:
//! - which roles the principal holds, transitively ([`RoleGraph`])
//! - whether the object is readable or writable, and why ([`evaluate`])
//! - which fields must be stripped from the readable object ([`ProtectedFields`])
//!
//! Everything except the role closure is a pure function of its inputs.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod evaluator;
pub mod policy;
pub mod roles;

#[cfg(test)]
mod proptests;

pub use evaluator::{evaluate, evaluate_object, requires_role_closure};
pub use policy::ProtectedFields;
pub use roles::{MAX_CLOSURE_ROLES, RoleGraph, RoleSet};
