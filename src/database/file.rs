//! JSON snapshot file backend

use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs;
use tokio::sync::RwLock;

use crate::types::{Conversation, RecordId, User};
use crate::Result;

use super::{DatabaseActor, Tables};

/// Tables persisted as a single JSON document.
///
/// Every mutation rewrites the whole snapshot through a temporary sibling
/// file followed by a rename. The in-memory tables are only replaced once the
/// snapshot is on disk.
pub struct FileDatabase {
    path: PathBuf,
    tables: RwLock<Tables>,
}

impl FileDatabase {
    /// Open the snapshot at `path`, starting empty if it does not exist yet
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let tables = if fs::try_exists(&path).await? {
            let data = fs::read(&path).await?;
            let tables: Tables = serde_json::from_slice(&data)?;
            tracing::info!(
                path = %path.display(),
                users = tables.users().len(),
                conversations = tables.conversations().len(),
                "Loaded database snapshot",
            );
            tables
        } else {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).await?;
            }
            tracing::info!(path = %path.display(), "Starting with empty database snapshot");
            Tables::default()
        };

        Ok(Self {
            path,
            tables: RwLock::new(tables),
        })
    }

    async fn persist(&self, tables: &Tables) -> Result<()> {
        let data = serde_json::to_vec_pretty(tables)?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, &data).await?;
        fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl DatabaseActor for FileDatabase {
    async fn create_user(&self, email: &str, password: &str, privilege: &str) -> Result<User> {
        let mut tables = self.tables.write().await;

        let mut next = tables.clone();
        let user = next.insert_user(email, password, privilege)?;
        self.persist(&next).await?;
        *tables = next;

        tracing::debug!(user_id = user.id, "User persisted");
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

        let mut next = tables.clone();
        let conversation = next.insert_conversation(title, description, creator_id)?;
        self.persist(&next).await?;
        *tables = next;

        tracing::debug!(conversation_id = conversation.id, "Conversation persisted");
        Ok(conversation)
    }

    async fn read_conversations(&self) -> Result<Vec<Conversation>> {
        Ok(self.tables.read().await.conversations())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_snapshot_survives_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested/db.json");

        {
            let db = FileDatabase::open(&path).await.unwrap();
            let user = db.create_user("a@b.com", "x", "user").await.unwrap();
            db.create_conversation("Title", "Desc", user.id)
                .await
                .unwrap();
        }

        let db = FileDatabase::open(&path).await.unwrap();
        let users = db.read_users().await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].email, "a@b.com");
        assert_eq!(db.read_conversations().await.unwrap().len(), 1);

        // ids continue from the snapshot
        let next = db.create_user("c@d.com", "y", "admin").await.unwrap();
        assert_eq!(next.id, 2);
    }

    #[tokio::test]
    async fn test_rejected_write_leaves_snapshot_untouched() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("db.json");

        let db = FileDatabase::open(&path).await.unwrap();
        assert!(db.create_conversation("t", "d", 7).await.is_err());
        assert!(!path.exists());
        assert!(db.read_conversations().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_snapshot_fails_to_open() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("db.json");
        std::fs::write(&path, b"not json").unwrap();

        let result = FileDatabase::open(&path).await;
        assert!(matches!(result, Err(crate::Error::Serialization(_))));
    }
}
