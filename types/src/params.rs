//! Board parameters — the tunable values of the engagement engine.
//!
//! Loaded once at startup as part of the board configuration and never
//! mutated at runtime.

use serde::{Deserialize, Serialize};

/// All board parameters consulted by the engine.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BoardParams {
    // ── Moderation ───────────────────────────────────────────────────────
    /// Report count at which an active post is automatically hidden
    /// pending human review.
    pub report_threshold: u32,

    // ── Content ──────────────────────────────────────────────────────────
    /// Minimum post/comment length after sanitisation.
    pub min_content_len: usize,

    /// Maximum post/comment length after sanitisation.
    pub max_content_len: usize,

    /// Allowed post categories, matched case-insensitively.
    pub categories: Vec<String>,

    /// Words the content filter rejects, matched case-insensitively as
    /// whole words so ordinary words containing a listed one still pass.
    pub profanity: Vec<String>,

    // ── Polls ────────────────────────────────────────────────────────────
    /// Minimum number of options a poll must offer.
    pub min_poll_options: usize,

    /// Poll lifetime in hours when the creator does not specify one.
    pub default_poll_duration_hours: u64,

    // ── Feeds ────────────────────────────────────────────────────────────
    /// Page size used when the caller does not specify a limit.
    pub default_page_size: usize,
}

impl BoardParams {
    /// The campus board defaults.
    pub fn board_defaults() -> Self {
        Self {
            report_threshold: 5,

            min_content_len: 3,
            max_content_len: 500,
            categories: [
                "Movies",
                "Rant",
                "Confession",
                "Meme",
                "Academic",
                "Appreciation",
                "Advice",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),

            profanity: [
                "fuck", "shit", "bitch", "cunt", "asshole", "bastard", "dickhead", "slut",
                "whore",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),

            min_poll_options: 2,
            default_poll_duration_hours: 24,

            default_page_size: 20,
        }
    }

    /// Whether `category` names one of the configured categories
    /// (case-insensitive exact match).
    pub fn is_valid_category(&self, category: &str) -> bool {
        self.categories
            .iter()
            .any(|c| c.eq_ignore_ascii_case(category))
    }

    /// Whether `text` contains a listed word. Words are delimited by
    /// non-alphanumeric characters, so "classic" never matches a listed
    /// "ass"-style entry.
    pub fn is_profane(&self, text: &str) -> bool {
        text.split(|c: char| !c.is_ascii_alphanumeric())
            .filter(|w| !w.is_empty())
            .any(|word| self.profanity.iter().any(|p| p.eq_ignore_ascii_case(word)))
    }
}

impl Default for BoardParams {
    fn default() -> Self {
        Self::board_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_threshold_is_five() {
        assert_eq!(BoardParams::default().report_threshold, 5);
    }

    #[test]
    fn profanity_matches_whole_words_any_case() {
        let params = BoardParams::default();
        assert!(params.is_profane("this is SHIT honestly"));
        assert!(params.is_profane("shit."));
        assert!(!params.is_profane("the shittake mushrooms were great"));
        assert!(!params.is_profane("a perfectly civil post"));
    }

    #[test]
    fn category_match_is_case_insensitive() {
        let params = BoardParams::default();
        assert!(params.is_valid_category("Rant"));
        assert!(params.is_valid_category("rant"));
        assert!(params.is_valid_category("ACADEMIC"));
        assert!(!params.is_valid_category("Gossip"));
    }
}
