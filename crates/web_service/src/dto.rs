//! Request body helpers shared by the AI endpoints.
//!
//! The chat frontend posts `application/x-www-form-urlencoded` bodies with
//! repeated keys (`message_ids=1&message_ids=2`, or the jQuery-style
//! `message_ids[]=1`), which `web::Form` cannot represent, so bodies are read
//! as raw bytes and decoded here.

use actix_web::{http::header, HttpRequest};
use chat_core::MessageRef;
use serde::{Deserialize, Serialize};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Decoded form fields, in body order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormFields {
    pairs: Vec<(String, String)>,
}

impl FormFields {
    pub fn parse(body: &[u8]) -> Self {
        Self {
            pairs: url::form_urlencoded::parse(body).into_owned().collect(),
        }
    }

    /// Decode the body when the request declares a form content type; any
    /// other body yields no fields.
    pub fn from_request(req: &HttpRequest, body: &[u8]) -> Self {
        if is_form_request(req) {
            Self::parse(body)
        } else {
            Self::default()
        }
    }

    /// Last value submitted for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Every value submitted for `key`, in order.
    pub fn get_list(&self, key: &str) -> Vec<&str> {
        self.pairs
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.pairs.iter().map(|(k, _)| k.as_str()).collect();
        keys.sort_unstable();
        keys.dedup();
        keys
    }
}

fn is_form_request(req: &HttpRequest) -> bool {
    req.headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| {
            value
                .split(';')
                .next()
                .unwrap_or("")
                .trim()
                .eq_ignore_ascii_case(FORM_CONTENT_TYPE)
        })
        .unwrap_or(false)
}

/// Parse an integer the way form values are written: surrounding whitespace
/// and a leading sign are accepted.
pub fn parse_int(value: &str) -> Option<i64> {
    value.trim().parse::<i64>().ok()
}

/// A message link returned next to a recap.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MessageRefDTO {
    pub message_id: i64,
    pub anchor: String,
    pub snippet: String,
}

const SNIPPET_CHARS: usize = 300;

impl From<&MessageRef> for MessageRefDTO {
    fn from(message: &MessageRef) -> Self {
        MessageRefDTO {
            message_id: message.id,
            anchor: format!("/#narrow/near/{}", message.id),
            snippet: chat_core::text::flatten_newlines(chat_core::text::truncate_chars(
                &message.text,
                SNIPPET_CHARS,
            )),
        }
    }
}
