use std::collections::HashMap;
use std::path::Path;

use anyhow::Context;
use async_trait::async_trait;
use chat_core::MessageRef;
use tokio::fs;
use tokio::sync::RwLock;

use super::provider::MessageStore;
use crate::error::Result;

#[derive(Default)]
pub struct InMemoryMessageStore {
    messages: RwLock<HashMap<i64, MessageRef>>,
}

impl InMemoryMessageStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_messages(messages: impl IntoIterator<Item = MessageRef>) -> Self {
        let messages = messages.into_iter().map(|m| (m.id, m)).collect();
        Self {
            messages: RwLock::new(messages),
        }
    }

    /// Seed a store from a JSON array of `{"id": .., "content": ..}` objects.
    pub async fn load_json(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read message seed {}", path.display()))?;
        let messages: Vec<MessageRef> = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse message seed {}", path.display()))?;

        tracing::info!(
            path = %path.display(),
            count = messages.len(),
            "InMemoryMessageStore: seeded from file"
        );

        Ok(Self::from_messages(messages))
    }

    pub async fn insert(&self, message: MessageRef) {
        self.messages.write().await.insert(message.id, message);
    }

    pub async fn len(&self) -> usize {
        self.messages.read().await.len()
    }
}

#[async_trait]
impl MessageStore for InMemoryMessageStore {
    async fn get_messages(&self, ids: &[i64]) -> Result<Vec<MessageRef>> {
        let messages = self.messages.read().await;
        Ok(ids.iter().filter_map(|id| messages.get(id).cloned()).collect())
    }

    async fn get_message(&self, id: i64) -> Result<Option<MessageRef>> {
        Ok(self.messages.read().await.get(&id).cloned())
    }
}
