use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::models::{ChatCompletionRequest, ChatCompletionResponse};
use crate::provider::{Completion, LLMError, LLMProvider, Result};

pub struct OpenAIProvider {
    client: Client,
    api_key: String,
    base_url: String,
}

impl OpenAIProvider {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: chat_core::config::DEFAULT_API_BASE.to_string(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl LLMProvider for OpenAIProvider {
    async fn chat_completion(
        &self,
        request: &ChatCompletionRequest,
        timeout: Duration,
    ) -> Result<Completion> {
        log::debug!(
            "OpenAI chat completion: model={} max_tokens={} messages={}",
            request.model,
            request.max_tokens,
            request.messages.len()
        );

        let response = self
            .client
            .post(self.completions_url())
            .header("Authorization", format!("Bearer {}", self.api_key))
            .timeout(timeout)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LLMError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.bytes().await?;
        let completion: ChatCompletionResponse = serde_json::from_slice(&body)?;
        let content = completion
            .first_content()
            .ok_or_else(|| LLMError::MalformedResponse("response has no choices".to_string()))?
            .to_string();

        Ok(Completion {
            status: status.as_u16(),
            content,
        })
    }
}
