//! Short topic title suggestions for a conversation.

use std::time::Duration;

use chat_core::text::{first_line, truncate_chars};
use chat_core::LlmSettings;
use tracing::error;

use super::llm_utils::{build_request, request_completion, MESSAGE_SEPARATOR};

pub const DEFAULT_TOPIC_MAX_TOKENS: u32 = 64;
pub const MAX_TITLE_CHARS: usize = 60;

const RECENT_MESSAGES: usize = 30;
const TOPIC_MESSAGE_CHARS: usize = 800;
const TOPIC_TIMEOUT: Duration = Duration::from_secs(10);
const TOPIC_TEMPERATURE: f32 = 0.0;

const TOPIC_SYSTEM_PROMPT: &str = "You generate short chat topic titles.\n\
Return ONLY the title text (no quotes, no markdown).\n\
Keep it <= 60 characters.\n\
Do NOT reuse boilerplate prefixes from the current topic (e.g., 'Changing focus to', 'Topic shift:', 'New topic:', 'Discussion:').\n\
Write the title as a neutral noun phrase describing the subject.\n\
If the current topic is still accurate, return an empty string.";

/// Suggest a single-line title (at most 60 characters) for `messages`, most
/// recent last.
///
/// An empty string means "keep the current title". Failures never surface:
/// without an API key, or when the call fails, the first line of the latest
/// message is used instead.
pub async fn suggest_topic_title(
    settings: &LlmSettings,
    messages: &[String],
    current_title: Option<&str>,
    max_tokens: u32,
) -> String {
    if messages.is_empty() {
        return String::new();
    }

    let current_title = current_title.filter(|title| !title.is_empty());
    let start = messages.len().saturating_sub(RECENT_MESSAGES);
    let labelled: Vec<&str> = messages[start..]
        .iter()
        .map(|text| truncate_chars(text, TOPIC_MESSAGE_CHARS))
        .collect();

    if settings.api_key().is_none() {
        return heuristic_title(&labelled, current_title);
    }

    let request = build_request(
        &settings.topic_model,
        TOPIC_SYSTEM_PROMPT,
        build_user_prompt(&labelled, current_title),
        max_tokens,
        TOPIC_TEMPERATURE,
    );

    match request_completion(settings, &request, TOPIC_TIMEOUT).await {
        // An empty answer means "keep the current title", not a failure.
        Ok(completion) => clean_title(&completion.content),
        Err(err) => {
            error!(
                error = %err,
                provider = %settings.provider,
                model = %settings.topic_model,
                "Topic suggestion LLM failed; using fallback heuristic"
            );
            heuristic_title(&labelled, current_title)
        }
    }
}

fn build_user_prompt(labelled: &[&str], current_title: Option<&str>) -> String {
    let mut prompt = String::new();
    if let Some(title) = current_title {
        prompt.push_str(&format!("Current topic: {}\n\n", title));
    }
    prompt.push_str("Recent messages:\n");
    prompt.push_str(&labelled.join(MESSAGE_SEPARATOR));
    prompt.push_str("\n\nSuggest a better topic title if the discussion focus has changed.");
    prompt
}

/// First line of the latest message, or the current title when that is blank.
fn heuristic_title(labelled: &[&str], current_title: Option<&str>) -> String {
    let latest = labelled.last().copied().unwrap_or("");
    let candidate = truncate_chars(first_line(latest).trim(), MAX_TITLE_CHARS);
    if candidate.is_empty() {
        current_title.unwrap_or("").to_string()
    } else {
        candidate.to_string()
    }
}

fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\x0b' | '\x0c' | '\x1c'..='\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

fn clean_title(content: &str) -> String {
    let line = content.trim().split(is_line_break).next().unwrap_or("");
    truncate_chars(line, MAX_TITLE_CHARS)
        .replace('\n', " ")
        .trim()
        .to_string()
}
