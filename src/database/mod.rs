//! Database actor abstraction
//!
//! The router only talks to a [`DatabaseActor`]; the backends here keep the
//! user and conversation tables either in memory or in a JSON snapshot file.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::types::{Conversation, RecordId, User};
use crate::{Error, Result};

pub mod file;
pub mod memory;

/// Create/read operations the router delegates to
#[async_trait]
pub trait DatabaseActor: Send + Sync {
    /// Create a user and return the stored record
    async fn create_user(&self, email: &str, password: &str, privilege: &str) -> Result<User>;

    /// Read every user
    async fn read_users(&self) -> Result<Vec<User>>;

    /// Create a conversation owned by an existing user
    async fn create_conversation(
        &self,
        title: &str,
        description: &str,
        creator_id: RecordId,
    ) -> Result<Conversation>;

    /// Read every conversation
    async fn read_conversations(&self) -> Result<Vec<Conversation>>;
}

/// Database backend configuration
#[derive(Debug, Clone)]
pub enum DatabaseConfig {
    Memory,
    File { path: PathBuf },
}

/// Create database backend from config
pub async fn create_database(config: DatabaseConfig) -> Result<Box<dyn DatabaseActor>> {
    match config {
        DatabaseConfig::Memory => Ok(Box::new(memory::MemoryDatabase::new())),
        DatabaseConfig::File { path } => {
            let backend = file::FileDatabase::open(path).await?;
            Ok(Box::new(backend))
        }
    }
}

/// Table state shared by the backends.
///
/// Ids start at 1 and are never reused; rows stay in id order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct Tables {
    last_user_id: RecordId,
    last_conversation_id: RecordId,
    users: Vec<User>,
    conversations: Vec<Conversation>,
}

impl Tables {
    pub(crate) fn insert_user(
        &mut self,
        email: &str,
        password: &str,
        privilege: &str,
    ) -> Result<User> {
        if email.trim().is_empty() {
            return Err(Error::invalid_request("email must not be empty"));
        }

        self.last_user_id += 1;
        let user = User {
            id: self.last_user_id,
            email: email.to_string(),
            password: password.to_string(),
            privilege: privilege.to_string(),
            created: chrono::Utc::now(),
        };
        self.users.push(user.clone());
        Ok(user)
    }

    pub(crate) fn insert_conversation(
        &mut self,
        title: &str,
        description: &str,
        creator_id: RecordId,
    ) -> Result<Conversation> {
        if !self.users.iter().any(|u| u.id == creator_id) {
            return Err(Error::CreatorNotFound(creator_id));
        }

        self.last_conversation_id += 1;
        let conversation = Conversation {
            id: self.last_conversation_id,
            title: title.to_string(),
            description: description.to_string(),
            creator_id,
            created: chrono::Utc::now(),
        };
        self.conversations.push(conversation.clone());
        Ok(conversation)
    }

    pub(crate) fn users(&self) -> Vec<User> {
        self.users.clone()
    }

    pub(crate) fn conversations(&self) -> Vec<Conversation> {
        self.conversations.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_sequential_per_table() {
        let mut tables = Tables::default();

        let alice = tables.insert_user("alice@example.com", "pw", "admin").unwrap();
        let bob = tables.insert_user("bob@example.com", "pw", "user").unwrap();
        assert_eq!((alice.id, bob.id), (1, 2));

        let conv = tables.insert_conversation("t", "d", bob.id).unwrap();
        assert_eq!(conv.id, 1);
        assert_eq!(conv.creator_id, 2);
    }

    #[test]
    fn test_blank_email_rejected() {
        let mut tables = Tables::default();
        let err = tables.insert_user("   ", "pw", "user").unwrap_err();
        assert!(matches!(err, Error::InvalidRequest(_)));
        assert!(tables.users().is_empty());
    }

    #[test]
    fn test_unknown_creator_rejected() {
        let mut tables = Tables::default();
        let err = tables.insert_conversation("t", "d", 42).unwrap_err();
        assert!(matches!(err, Error::CreatorNotFound(42)));
        assert!(tables.conversations().is_empty());
    }

    #[test]
    fn test_duplicate_email_allowed() {
        let mut tables = Tables::default();
        tables.insert_user("same@example.com", "a", "user").unwrap();
        tables.insert_user("same@example.com", "b", "user").unwrap();
        assert_eq!(tables.users().len(), 2);
    }
}
