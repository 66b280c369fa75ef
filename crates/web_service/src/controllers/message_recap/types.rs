//! Message recap request parsing and DTOs

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::dto::{parse_int, FormFields, MessageRefDTO};
use crate::error::{AppError, Result};
use crate::services::recap_service::RECAP_MAX_MESSAGES;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Deserialize, Debug, Default)]
pub struct MessageRecapJsonRequest {
    #[serde(default)]
    pub message_ids: Option<Value>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct MessageRecapResponse {
    pub recap_html: String,
    pub message_refs: Vec<MessageRefDTO>,
}

// ============================================================================
// Parsing
// ============================================================================

/// Raw id values from the form field `message_ids`, or from a JSON body
/// `{"message_ids": [...]}` when the form carries none.
pub(super) fn collect_raw_ids(form: &FormFields, body: &[u8]) -> Vec<String> {
    let from_form: Vec<String> = form
        .get_list("message_ids")
        .into_iter()
        .map(str::to_string)
        .collect();
    if !from_form.is_empty() || body.is_empty() {
        return from_form;
    }

    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => match map.get("message_ids") {
            Some(Value::Array(items)) => items.iter().map(raw_id_from_json).collect(),
            _ => Vec::new(),
        },
        Ok(_) => Vec::new(),
        Err(err) => {
            warn!(error = %err, "Failed to parse JSON body for message_recap");
            Vec::new()
        }
    }
}

fn raw_id_from_json(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Validate raw ids: present, all integers, at most 200.
pub(super) fn parse_message_ids(raw_ids: &[String]) -> Result<Vec<i64>> {
    if raw_ids.is_empty() {
        return Err(AppError::bad_request("message_ids is required"));
    }

    let ids = raw_ids
        .iter()
        .map(|raw| parse_int(raw))
        .collect::<Option<Vec<i64>>>()
        .ok_or_else(|| AppError::bad_request("message_ids must be integers"))?;

    if ids.len() > RECAP_MAX_MESSAGES {
        return Err(AppError::bad_request(format!(
            "Too many messages requested (max {})",
            RECAP_MAX_MESSAGES
        )));
    }

    Ok(ids)
}
