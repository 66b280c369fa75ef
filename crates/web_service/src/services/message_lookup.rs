use std::collections::HashMap;

use chat_core::MessageRef;

use crate::error::Result;
use crate::storage::MessageStore;

/// Fetch `ids` and return them in the requested order.
///
/// Ids without a stored message are dropped; repeated ids repeat the message.
pub async fn fetch_in_request_order(
    store: &dyn MessageStore,
    ids: &[i64],
) -> Result<Vec<MessageRef>> {
    let found = store.get_messages(ids).await?;
    Ok(order_by_request(ids, found))
}

pub fn order_by_request(requested: &[i64], found: Vec<MessageRef>) -> Vec<MessageRef> {
    let by_id: HashMap<i64, MessageRef> = found.into_iter().map(|m| (m.id, m)).collect();
    requested
        .iter()
        .filter_map(|id| by_id.get(id).cloned())
        .collect()
}
