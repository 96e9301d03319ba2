//! litepolis-router - user and conversation endpoints over a database actor
//!
//! The crate provides:
//! - A route table with a health check plus create/list endpoints for users and conversations
//! - A uniform response envelope and a single server-error failure shape
//! - A pluggable database actor with in-memory and JSON-file backends

pub mod api;
pub mod config;
pub mod database;
pub mod error;
pub mod types;

pub use error::{Error, Result};
