//! URL-safe slug derivation from study titles.
//!
//! A slug is a deterministic, lowercase-hyphenated identifier derived from a
//! title: non-alphanumeric characters stripped, stop words removed, capped at
//! a fixed token count. Collision handling is the caller's job — two distinct
//! titles can reduce to the same slug, and a degenerate title (all
//! punctuation or all stop words) reduces to the empty string.

use std::collections::HashSet;

/// The 100 most common English words, excluded from slugs.
///
/// Matching is case-sensitive against the already-lowercased title tokens,
/// so the list itself is all lowercase.
const DEFAULT_STOP_WORDS: &[&str] = &[
    "the", "be", "to", "of", "and", "a", "in", "that", "have", "i", "it", "for", "not", "on",
    "with", "he", "as", "you", "do", "at", "this", "but", "his", "by", "from", "they", "we",
    "say", "her", "she", "or", "an", "will", "my", "one", "all", "would", "there", "their",
    "what", "so", "up", "out", "if", "about", "who", "get", "which", "go", "me", "when", "make",
    "can", "like", "time", "no", "just", "him", "know", "take", "people", "into", "year", "your",
    "good", "some", "could", "them", "see", "other", "than", "then", "now", "look", "only",
    "come", "its", "over", "think", "also", "back", "after", "use", "two", "how", "our", "work",
    "first", "well", "way", "even", "new", "want", "because", "any", "these", "give", "day",
    "most", "us",
];

const DEFAULT_MAX_TOKENS: usize = 8;

/// Immutable configuration for slug generation.
///
/// Injected into [`slugify`] rather than living as a hidden module global, so
/// deployments can swap the stop-word list or token cap via configuration.
#[derive(Debug, Clone)]
pub struct SlugConfig {
    /// Tokens removed from slugs (lowercase, exact match).
    pub stop_words: HashSet<String>,
    /// Maximum number of surviving tokens kept, in original order.
    pub max_tokens: usize,
}

impl SlugConfig {
    /// Build a config from an explicit stop-word list and token cap.
    #[must_use]
    pub fn new<I, S>(stop_words: I, max_tokens: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            stop_words: stop_words.into_iter().map(Into::into).collect(),
            max_tokens,
        }
    }
}

impl Default for SlugConfig {
    fn default() -> Self {
        Self::new(DEFAULT_STOP_WORDS.iter().copied(), DEFAULT_MAX_TOKENS)
    }
}

/// Derive a slug from a title. Pure and deterministic.
///
/// Algorithm: lowercase; strip every character that is not a lowercase
/// letter, digit, or whitespace; collapse whitespace runs; split into
/// tokens; drop stop words; keep the first `max_tokens` survivors; join
/// with hyphens.
///
/// A title with no surviving tokens yields `""` — a legal, degenerate slug
/// that callers must still run through collision detection.
#[must_use]
pub fn slugify(title: &str, config: &SlugConfig) -> String {
    let lowered = title.to_lowercase();
    let cleaned: String = lowered
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace())
        .collect();

    cleaned
        .split_whitespace()
        .filter(|token| !config.stop_words.contains(*token))
        .take(config.max_tokens)
        .collect::<Vec<_>>()
        .join("-")
}
