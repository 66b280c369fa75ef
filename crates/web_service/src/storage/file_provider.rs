use crate::error::Result;
use async_trait::async_trait;
use chat_core::MessageRef;
use std::path::{Path, PathBuf};
use tokio::fs;

use super::provider::MessageStore;

/// One JSON file per message: `{base_dir}/{id}.json`.
pub struct FileMessageStore {
    base_dir: PathBuf,
}

impl FileMessageStore {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    fn get_path(&self, id: i64) -> PathBuf {
        self.base_dir.join(format!("{}.json", id))
    }

    #[cfg(test)]
    pub async fn save_message(&self, message: &MessageRef) -> Result<()> {
        fs::create_dir_all(&self.base_dir).await?;
        let content = serde_json::to_string_pretty(message)?;
        fs::write(self.get_path(message.id), content).await?;
        Ok(())
    }
}

#[async_trait]
impl MessageStore for FileMessageStore {
    async fn get_messages(&self, ids: &[i64]) -> Result<Vec<MessageRef>> {
        let mut found = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(message) = self.get_message(*id).await? {
                found.push(message);
            }
        }
        Ok(found)
    }

    async fn get_message(&self, id: i64) -> Result<Option<MessageRef>> {
        let path = self.get_path(id);

        if !fs::try_exists(&path).await? {
            tracing::debug!(
                message_id = id,
                path = %path.display(),
                "FileMessageStore: File does not exist"
            );
            return Ok(None);
        }

        let content = fs::read_to_string(&path).await?;
        let mut message: MessageRef = serde_json::from_str(&content)?;
        // The file name is authoritative for the id.
        message.id = id;
        Ok(Some(message))
    }
}
