//! chat_core - Core types shared by the chat assist crates
//!
//! - `config` - LLM settings and their file/env loading
//! - `message` - Message records read from the store
//! - `text` - Character-based truncation helpers

pub mod config;
pub mod message;
pub mod text;

pub use config::{Config, ConfigError, LlmSettings};
pub use message::MessageRef;
