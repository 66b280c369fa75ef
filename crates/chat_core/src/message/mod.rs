//! Message module - message records as seen by the AI helpers
//!
//! Messages are owned by an external store; this crate only sees the id and the
//! raw text of each one.

use serde::{Deserialize, Serialize};

/// A stored chat message, reduced to the fields the AI helpers read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageRef {
    pub id: i64,
    #[serde(alias = "content", default)]
    pub text: String,
}

impl MessageRef {
    pub fn new(id: i64, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
        }
    }
}
