//! Resolve the texts a topic suggestion is based on.

use crate::error::{AppError, Result};
use crate::services::message_lookup::fetch_in_request_order;
use crate::storage::MessageStore;

use super::types::TopicTitleRequest;

/// Trimmed, non-blank message texts in request order.
///
/// With `message_ids` only that batch is read; otherwise the anchor message
/// alone is used and must exist.
pub(super) async fn resolve_texts(
    store: &dyn MessageStore,
    request: &TopicTitleRequest,
) -> Result<Vec<String>> {
    if !request.message_ids.is_empty() {
        let messages = fetch_in_request_order(store, &request.message_ids).await?;
        return Ok(messages
            .iter()
            .map(|m| m.text.trim())
            .filter(|text| !text.is_empty())
            .map(str::to_string)
            .collect());
    }

    let anchor = store
        .get_message(request.anchor_id)
        .await?
        .ok_or_else(|| AppError::bad_request("anchor message not found"))?;
    let text = anchor.text.trim();
    Ok(if text.is_empty() {
        Vec::new()
    } else {
        vec![text.to_string()]
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::FormFields;
    use crate::storage::InMemoryMessageStore;
    use chat_core::MessageRef;

    fn store() -> InMemoryMessageStore {
        InMemoryMessageStore::from_messages(vec![
            MessageRef::new(1, "  first message  "),
            MessageRef::new(2, "   "),
            MessageRef::new(3, "third message"),
        ])
    }

    fn request(body: &str) -> TopicTitleRequest {
        TopicTitleRequest::from_form(&FormFields::parse(body.as_bytes())).unwrap()
    }

    #[tokio::test]
    async fn batch_texts_are_trimmed_and_blank_dropped() {
        let req = request("message_ids=3&message_ids=2&message_ids=1&message_ids=99");
        let texts = resolve_texts(&store(), &req).await.unwrap();
        assert_eq!(texts, vec!["third message", "first message"]);
    }

    #[tokio::test]
    async fn anchor_only_reads_one_message() {
        let texts = resolve_texts(&store(), &request("message_id=1")).await.unwrap();
        assert_eq!(texts, vec!["first message"]);

        let texts = resolve_texts(&store(), &request("message_id=2")).await.unwrap();
        assert!(texts.is_empty());
    }

    #[tokio::test]
    async fn missing_anchor_is_bad_request() {
        let err = resolve_texts(&store(), &request("message_id=42"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "anchor message not found");
    }

    #[tokio::test]
    async fn batch_ignores_anchor_existence() {
        let texts = resolve_texts(&store(), &request("message_id=42&message_ids=3"))
            .await
            .unwrap();
        assert_eq!(texts, vec!["third message"]);
    }
}
