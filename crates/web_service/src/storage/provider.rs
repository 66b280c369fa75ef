use crate::error::Result;
use async_trait::async_trait;
use chat_core::MessageRef;

/// Read-only lookup of stored messages by id.
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Fetch every message whose id is in `ids`. Unknown ids are skipped and
    /// the result order is unspecified.
    async fn get_messages(&self, ids: &[i64]) -> Result<Vec<MessageRef>>;

    async fn get_message(&self, id: i64) -> Result<Option<MessageRef>>;
}
