//! HTML recap of a batch of chat messages.
//!
//! Two non-LLM paths exist and stay separate in the control flow:
//! - no API key configured: the deterministic excerpt is the *mode*, not an error
//! - LLM failure (unsupported provider, transport, non-2xx, bad body): the same
//!   excerpt is returned and the failure is logged

use std::time::Duration;

use chat_core::text::truncate_chars;
use chat_core::LlmSettings;
use tracing::{error, warn};

use super::html_sanitizer::{escape_text, sanitize_recap_html};
use super::llm_utils::{build_request, request_completion, strip_code_fence, MESSAGE_SEPARATOR};

pub const DEFAULT_RECAP_MAX_TOKENS: u32 = 800;
pub const RECAP_MAX_MESSAGES: usize = 200;

const RECAP_MESSAGE_CHARS: usize = 3000;
const FALLBACK_MESSAGES: usize = 10;
const FALLBACK_CHARS: usize = 4000;
const RECAP_TIMEOUT: Duration = Duration::from_secs(20);
const RECAP_TEMPERATURE: f32 = 0.2;
const LOG_PREVIEW_CHARS: usize = 200;

pub const NO_MESSAGES_HTML: &str = "<p>(no messages)</p>";
pub const EMPTY_RECAP_HTML: &str = "<p>(empty recap)</p>";

const RECAP_SYSTEM_PROMPT: &str = "You are a concise assistant.\n\
Return ONLY valid HTML.\n\
DO NOT use Markdown.\n\
DO NOT wrap output in ``` or ```html.\n\
DO NOT include message IDs like MSG 12.\n\
Use <p>, <ul>, <li>, <strong> only.\n";

/// Generate an HTML recap of `messages`.
///
/// `message_ids` runs parallel to `messages`; the pairing bounds how many
/// messages are used but ids are never written into the prompt. The returned
/// HTML is never empty.
pub async fn generate_message_recap(
    settings: &LlmSettings,
    messages: &[String],
    message_ids: &[i64],
    max_tokens: u32,
) -> String {
    if messages.is_empty() {
        return NO_MESSAGES_HTML.to_string();
    }

    let labelled: Vec<&str> = messages
        .iter()
        .zip(message_ids)
        .map(|(text, _id)| truncate_chars(text, RECAP_MESSAGE_CHARS))
        .take(RECAP_MAX_MESSAGES)
        .collect();

    if settings.api_key().is_none() {
        warn!("LLM API key not configured; returning fallback recap");
        return fallback_recap(&labelled);
    }

    let request = build_request(
        &settings.recap_model,
        RECAP_SYSTEM_PROMPT,
        format!("Messages:\n\n{}", labelled.join(MESSAGE_SEPARATOR)),
        max_tokens,
        RECAP_TEMPERATURE,
    );

    let completion = match request_completion(settings, &request, RECAP_TIMEOUT).await {
        Ok(completion) => completion,
        Err(err) => {
            error!(
                error = %err,
                provider = %settings.provider,
                model = %settings.recap_model,
                "LLM request failed; returning fallback recap"
            );
            return fallback_recap(&labelled);
        }
    };

    warn!(status = completion.status, "LLM status");

    let content = completion.content;
    if content.is_empty() {
        return EMPTY_RECAP_HTML.to_string();
    }

    warn!(
        len = content.chars().count(),
        head = ?truncate_chars(&content, LOG_PREVIEW_CHARS),
        "LLM content"
    );

    let clean = sanitize_recap_html(strip_code_fence(&content));
    format!("<div class=\"ai-recap\">{}</div>", clean)
}

/// Escaped plain-text excerpt of the first few messages.
fn fallback_recap(labelled: &[&str]) -> String {
    let shown = &labelled[..labelled.len().min(FALLBACK_MESSAGES)];
    let joined = shown.join(MESSAGE_SEPARATOR);
    format!(
        "<p><strong>Recap (fallback):</strong></p><pre>{}</pre>",
        escape_text(truncate_chars(&joined, FALLBACK_CHARS))
    )
}
