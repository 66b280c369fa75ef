use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::ChatCompletionRequest;

#[derive(Error, Debug)]
pub enum LLMError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("API error: HTTP {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Unsupported LLM provider: {0}")]
    UnsupportedProvider(String),

    #[error("Authentication error: {0}")]
    Auth(String),
}

pub type Result<T> = std::result::Result<T, LLMError>;

/// The providers this crate can talk to. Only the OpenAI chat-completions
/// shape is implemented; any other configured name fails to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    OpenAi,
}

impl Provider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::OpenAi => "openai",
        }
    }
}

impl FromStr for Provider {
    type Err = LLMError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "openai" => Ok(Provider::OpenAi),
            other => Err(LLMError::UnsupportedProvider(other.to_string())),
        }
    }
}

/// A successful chat completion.
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub status: u16,
    pub content: String,
}

#[async_trait]
pub trait LLMProvider: Send + Sync {
    /// Send one non-streaming chat completion request.
    ///
    /// Non-2xx responses are errors. `timeout` bounds the whole exchange.
    async fn chat_completion(
        &self,
        request: &ChatCompletionRequest,
        timeout: Duration,
    ) -> Result<Completion>;
}
