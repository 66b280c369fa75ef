//! Cheap checks that decide whether a topic suggestion is worth an LLM call.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

pub const MIN_MESSAGES: usize = 2;
pub const MIN_AVERAGE_CHARS: f64 = 20.0;
pub const TITLE_MATCH_RATIO: f64 = 0.6;

static TITLE_TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\w{3,}").expect("Failed to compile title token regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// All checks passed; ask the model.
    Suggest,
    TooFewMessages,
    TooShort,
    /// Most messages still mention the current title.
    TitleStillFits,
}

impl GateDecision {
    pub fn should_suggest(self) -> bool {
        self == GateDecision::Suggest
    }
}

/// Run the checks in order; the first failing one decides.
pub fn evaluate(texts: &[String], current_title: &str) -> GateDecision {
    if texts.len() < MIN_MESSAGES {
        return GateDecision::TooFewMessages;
    }

    let total_chars: usize = texts.iter().map(|t| t.chars().count()).sum();
    let average = total_chars as f64 / texts.len() as f64;
    if average < MIN_AVERAGE_CHARS {
        return GateDecision::TooShort;
    }

    let tokens = title_tokens(current_title);
    if !tokens.is_empty() {
        let matches = texts
            .iter()
            .filter(|text| {
                let lowered = text.to_lowercase();
                tokens.iter().any(|token| lowered.contains(token.as_str()))
            })
            .count();
        if matches as f64 / texts.len() as f64 > TITLE_MATCH_RATIO {
            return GateDecision::TitleStillFits;
        }
    }

    GateDecision::Suggest
}

/// Lower-cased word tokens of three or more characters.
pub fn title_tokens(title: &str) -> HashSet<String> {
    let lowered = title.to_lowercase();
    TITLE_TOKEN_RE
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn single_long_message_is_not_enough() {
        let one = vec!["x".repeat(500)];
        assert_eq!(evaluate(&one, ""), GateDecision::TooFewMessages);
        assert_eq!(evaluate(&[], ""), GateDecision::TooFewMessages);
    }

    #[test]
    fn short_messages_are_skipped() {
        let short = texts(&["0123456789", "abcdefghij"]);
        assert_eq!(evaluate(&short, ""), GateDecision::TooShort);
    }

    #[test]
    fn average_uses_characters() {
        // 10 characters each, 30 bytes each.
        let wide = texts(&["日本語日本語日本語日", "日本語日本語日本語日"]);
        assert_eq!(evaluate(&wide, ""), GateDecision::TooShort);
    }

    #[test]
    fn title_matching_most_messages_still_fits() {
        let msgs = texts(&[
            "The database migration finished on staging",
            "Database rollback plan is ready for tonight",
            "Did anyone check the DATABASE indexes yet?",
            "Lunch order is in the kitchen channel today",
        ]);
        assert_eq!(
            evaluate(&msgs, "Database Migration"),
            GateDecision::TitleStillFits
        );
    }

    #[test]
    fn ratio_at_threshold_still_suggests() {
        // 3 of 5 = 0.6, not greater than 0.6.
        let msgs = texts(&[
            "database numbers are in the sheet now",
            "database numbers are in the sheet now",
            "database numbers are in the sheet now",
            "totally unrelated chatter about lunch",
            "totally unrelated chatter about lunch",
        ]);
        assert_eq!(evaluate(&msgs, "Database"), GateDecision::Suggest);
    }

    #[test]
    fn short_title_words_are_ignored() {
        assert!(title_tokens("Q3 to do").is_empty());
        let msgs = texts(&[
            "q3 to do list is long and getting longer",
            "q3 to do list is long and getting longer",
        ]);
        assert_eq!(evaluate(&msgs, "Q3 to do"), GateDecision::Suggest);
    }

    #[test]
    fn tokens_are_lowercased_words() {
        let tokens = title_tokens("API: Rate-Limits & v2_rollout");
        assert!(tokens.contains("api"));
        assert!(tokens.contains("rate"));
        assert!(tokens.contains("limits"));
        assert!(tokens.contains("v2_rollout"));
        assert_eq!(tokens.len(), 4);
    }

    #[test]
    fn drifted_conversation_passes() {
        let msgs = texts(&[
            "Has anyone looked at the new office floor plan?",
            "Yes, the kitchen moved to the north side of it",
        ]);
        assert!(evaluate(&msgs, "Database Migration").should_suggest());
    }
}
