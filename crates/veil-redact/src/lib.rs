//! # veil-redact
//!
//! The single choke point every read path goes through.
//!
//! For each object a caller is about to receive, the [`Redactor`]:
//! 1. skips all checks for the master key,
//! 2. evaluates the object's ACL, dropping unreadable objects,
//! 3. strips the sensitive fields the grant does not cover.
//!
//! A [`RequestScope`] carries the caller's identity, the protected-field
//! snapshot in force when the request started, and a lazily computed role
//! closure shared by every object presented in that request.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod pipeline;
pub mod scope;

pub use pipeline::Redactor;
pub use scope::RequestScope;
