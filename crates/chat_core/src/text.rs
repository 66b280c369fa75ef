//! Character-based text helpers
//!
//! All limits in the AI helpers count characters, never bytes, so multi-byte
//! text is never split inside a code point.

/// Returns at most the first `max_chars` characters of `text`.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Returns the text before the first `\n`.
pub fn first_line(text: &str) -> &str {
    text.split('\n').next().unwrap_or("")
}

/// Replaces every newline with a single space.
pub fn flatten_newlines(text: &str) -> String {
    text.replace('\n', " ")
}
