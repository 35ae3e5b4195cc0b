//! # veil-api
//!
//! Read-only object API in front of the Veil redaction pipeline.
//!
//! Every object this server returns has gone through
//! [`veil_redact::Redactor`]; handlers never serialize a stored object
//! directly.
//!
//! - `GET /classes/{class_name}`: find, `{"results": [...]}`
//! - `GET /classes/{class_name}/{object_id}`: get by ID
//! - `GET /health`: liveness, no credentials needed
//!
//! The class routes are also mounted under `/1`.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod error;
pub mod routes;
pub mod seed;
pub mod server;
pub mod state;

pub use error::{ApiError, Result};
pub use routes::router;
pub use server::Server;
pub use state::AppState;
