//! In-memory database backend

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::types::{Conversation, RecordId, User};
use crate::Result;

use super::{DatabaseActor, Tables};

/// Tables kept in process memory; lost on restart
#[derive(Default)]
pub struct MemoryDatabase {
    tables: RwLock<Tables>,
}

impl MemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DatabaseActor for MemoryDatabase {
    async fn create_user(&self, email: &str, password: &str, privilege: &str) -> Result<User> {
        let mut tables = self.tables.write().await;
        let user = tables.insert_user(email, password, privilege)?;
        tracing::debug!(user_id = user.id, "User stored in memory");
        Ok(user)
    }

    async fn read_users(&self) -> Result<Vec<User>> {
        Ok(self.tables.read().await.users())
    }

    async fn create_conversation(
        &self,
        title: &str,
        description: &str,
        creator_id: RecordId,
    ) -> Result<Conversation> {
        let mut tables = self.tables.write().await;
        let conversation = tables.insert_conversation(title, description, creator_id)?;
        tracing::debug!(conversation_id = conversation.id, "Conversation stored in memory");
        Ok(conversation)
    }

    async fn read_conversations(&self) -> Result<Vec<Conversation>> {
        Ok(self.tables.read().await.conversations())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_memory_database() {
        let db = MemoryDatabase::new();

        let user = db
            .create_user("test@example.com", "password123", "user")
            .await
            .unwrap();
        assert_eq!(user.id, 1);
        assert_eq!(user.email, "test@example.com");

        let conv = db
            .create_conversation("Title", "Description", user.id)
            .await
            .unwrap();
        assert_eq!(conv.creator_id, user.id);

        assert_eq!(db.read_users().await.unwrap().len(), 1);
        assert_eq!(db.read_conversations().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_creates_get_distinct_ids() {
        let db = Arc::new(MemoryDatabase::new());

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let db = db.clone();
                tokio::spawn(async move {
                    db.create_user(&format!("user{i}@example.com"), "pw", "user")
                        .await
                        .unwrap()
                        .id
                })
            })
            .collect();

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap());
        }
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 16);
    }
}
