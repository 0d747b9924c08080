//! # corpus-config
//!
//! Layered configuration loading for Corpus using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`CORPUS_*` prefix, `__` as separator)
//! 2. Project-level `.corpus/config.toml`
//! 3. User-level `~/.config/corpus/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `CORPUS_DATABASE__PATH` -> `database.path`,
//! `CORPUS_SLUG__MAX_TOKENS` -> `slug.max_tokens`, etc. The `__` (double
//! underscore) separates nested config sections.

mod database;
mod error;
mod slug;

pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use slug::SlugSettings;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CorpusConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub slug: SlugSettings,
}

impl CorpusConfig {
    /// Load configuration from all sources (TOML files + environment
    /// variables).
    ///
    /// Does NOT call `dotenvy` — use [`Self::load_with_dotenv`] if you need
    /// `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction fails.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load configuration with `.env` file support.
    ///
    /// Loads a `.env` from the current directory (if present) before
    /// building the figment. This is the typical entry point for the CLI.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction fails.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add additional
    /// providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".corpus/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("CORPUS_").split("__"))
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("corpus").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_load_without_any_sources() {
        let config = CorpusConfig::default();
        assert_eq!(config.database.path, ".corpus/corpus.db");
        assert_eq!(config.slug.max_tokens, 8);
        assert!(config.slug.stop_words.is_none());
    }
}
