//! Slug generation settings.

use corpus_core::slug::SlugConfig;
use serde::{Deserialize, Serialize};

const fn default_max_tokens() -> usize {
    8
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SlugSettings {
    /// Maximum number of tokens kept in a slug.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: usize,

    /// Replacement stop-word list. `None` uses the built-in list of the
    /// 100 most common English words.
    #[serde(default)]
    pub stop_words: Option<Vec<String>>,
}

impl SlugSettings {
    /// Materialize the immutable config the slug generator consumes.
    #[must_use]
    pub fn to_slug_config(&self) -> SlugConfig {
        self.stop_words.as_ref().map_or_else(
            || SlugConfig {
                max_tokens: self.max_tokens,
                ..SlugConfig::default()
            },
            |words| SlugConfig::new(words.iter().cloned(), self.max_tokens),
        )
    }
}

impl Default for SlugSettings {
    fn default() -> Self {
        Self {
            max_tokens: default_max_tokens(),
            stop_words: None,
        }
    }
}
