//! Provider Factory
//!
//! Creates the LLM provider described by the settings.

use std::sync::Arc;

use chat_core::LlmSettings;
use reqwest::Client;

use crate::provider::{LLMError, LLMProvider, Provider};
use crate::providers::OpenAIProvider;

/// Create a provider with its own HTTP client.
pub fn create_provider(settings: &LlmSettings) -> Result<Arc<dyn LLMProvider>, LLMError> {
    create_provider_with_client(settings, Client::new())
}

/// Create a provider that reuses an existing HTTP client.
///
/// Fails with [`LLMError::UnsupportedProvider`] before any network activity
/// when the configured provider is not `openai`.
pub fn create_provider_with_client(
    settings: &LlmSettings,
    client: Client,
) -> Result<Arc<dyn LLMProvider>, LLMError> {
    match settings.provider.parse::<Provider>()? {
        Provider::OpenAi => {
            let api_key = settings
                .api_key()
                .ok_or_else(|| LLMError::Auth("OpenAI API key is required".to_string()))?;

            let provider = OpenAIProvider::new(api_key)
                .with_base_url(&settings.api_base)
                .with_client(client);

            Ok(Arc::new(provider))
        }
    }
}
