pub mod models;
pub mod provider;
pub mod provider_factory;
pub mod providers;

pub use chat_core::LlmSettings;
pub use models::*;
pub use provider::{Completion, LLMError, LLMProvider, Provider, Result};
pub use provider_factory::{create_provider, create_provider_with_client};
pub use providers::OpenAIProvider;
