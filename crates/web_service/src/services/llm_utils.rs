use std::time::Duration;

use chat_core::LlmSettings;
use llm_client::{create_provider, ChatCompletionRequest, ChatMessage, Completion};

/// Separator placed between messages in prompts and fallback excerpts.
pub const MESSAGE_SEPARATOR: &str = "\n\n---\n\n";

/// Build a two-message (system + user) completion request.
pub fn build_request(
    model: &str,
    system_prompt: &str,
    user_prompt: String,
    max_tokens: u32,
    temperature: f32,
) -> ChatCompletionRequest {
    ChatCompletionRequest {
        model: model.to_string(),
        messages: vec![
            ChatMessage::system(system_prompt),
            ChatMessage::user(user_prompt),
        ],
        max_tokens,
        temperature,
    }
}

/// Resolve the configured provider and send one completion request.
///
/// An unsupported provider fails here, before any network activity.
pub async fn request_completion(
    settings: &LlmSettings,
    request: &ChatCompletionRequest,
    timeout: Duration,
) -> llm_client::Result<Completion> {
    let provider = create_provider(settings)?;
    provider.chat_completion(request, timeout).await
}

/// Remove one surrounding triple-backtick fence (with its info string).
///
/// Only the opening line and the last closing fence are removed; fences nested
/// inside the body are left alone.
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    if !trimmed.starts_with("```") {
        return trimmed;
    }

    let body = match trimmed.split_once('\n') {
        Some((_, rest)) => rest,
        None => "",
    };
    let body = match body.rfind("```") {
        Some(end) => &body[..end],
        None => body,
    };
    body.trim()
}
