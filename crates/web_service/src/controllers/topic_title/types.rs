//! Topic title request parsing and DTOs

use serde::{Deserialize, Serialize};

use crate::dto::{parse_int, FormFields};
use crate::error::{AppError, Result};

pub const MAX_TOPIC_IDS: usize = 50;

#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct TopicTitleResponse {
    pub suggested_title: String,
    pub anchor_id: i64,
}

/// A validated topic suggestion request.
#[derive(Debug, Clone, PartialEq)]
pub struct TopicTitleRequest {
    pub current_title: String,
    pub message_id: Option<i64>,
    pub message_ids: Vec<i64>,
    /// The message the client renames the topic through: `message_id` when
    /// given, otherwise the last of `message_ids`.
    pub anchor_id: i64,
}

impl TopicTitleRequest {
    pub fn from_form(form: &FormFields) -> Result<Self> {
        let current_title = form.get("current_title").unwrap_or("").to_string();
        let message_id = parse_optional_int(form.get("message_id"), "message_id")?;
        let message_ids = parse_int_list(form, "message_ids")?;

        let anchor_id = match (message_id, message_ids.last()) {
            (Some(id), _) => id,
            (None, Some(last)) => *last,
            (None, None) => {
                return Err(AppError::bad_request("message_id or message_ids is required"))
            }
        };
        if message_ids.len() > MAX_TOPIC_IDS {
            return Err(AppError::bad_request(format!(
                "Too many messages requested (max {})",
                MAX_TOPIC_IDS
            )));
        }

        Ok(Self {
            current_title,
            message_id,
            message_ids,
            anchor_id,
        })
    }
}

fn parse_optional_int(value: Option<&str>, field: &str) -> Result<Option<i64>> {
    match value {
        None | Some("") => Ok(None),
        Some(raw) => parse_int(raw)
            .map(Some)
            .ok_or_else(|| AppError::bad_request(format!("{} is not an integer", field))),
    }
}

/// Reads `key[]` when present, else `key`. Empty entries are skipped.
fn parse_int_list(form: &FormFields, key: &str) -> Result<Vec<i64>> {
    let mut raw = form.get_list(&format!("{}[]", key));
    if raw.is_empty() {
        raw = form.get_list(key);
    }

    raw.into_iter()
        .filter(|item| !item.is_empty())
        .map(|item| {
            parse_int(item).ok_or_else(|| {
                AppError::bad_request(format!("{} contains non-integer value", key))
            })
        })
        .collect()
}
