//! Records handed out by the database actor

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User and conversation identifier
pub type RecordId = i64;

/// Privilege assigned when a create-user request omits one
pub const DEFAULT_PRIVILEGE: &str = "user";

/// A stored user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: RecordId,
    pub email: String,
    pub password: String,
    pub privilege: String,
    pub created: DateTime<Utc>,
}

/// A stored conversation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Conversation {
    pub id: RecordId,
    pub title: String,
    pub description: String,
    pub creator_id: RecordId,
    pub created: DateTime<Utc>,
}
