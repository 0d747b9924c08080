//! Service layer exposing the repository operations.
//!
//! `CorpusService` wraps `CorpusDb` (raw database access) together with the
//! slug configuration used by the analysis migration. All repo methods are
//! implemented as `impl CorpusService` blocks in `repos/`.

use corpus_core::slug::SlugConfig;

use crate::CorpusDb;
use crate::error::DatabaseError;

/// Orchestrates all study index operations against one database.
pub struct CorpusService {
    db: CorpusDb,
    slug: SlugConfig,
}

impl CorpusService {
    /// Create a new service wrapping a local database.
    ///
    /// # Arguments
    ///
    /// * `db_path` — Path to the libSQL database file, or `":memory:"` for
    ///   tests.
    /// * `slug` — Stop-word set and token cap for slug derivation.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn new_local(db_path: &str, slug: SlugConfig) -> Result<Self, DatabaseError> {
        let db = CorpusDb::open_local(db_path).await?;
        Ok(Self { db, slug })
    }

    /// Create from an existing `CorpusDb` (for testing).
    #[must_use]
    pub fn from_db(db: CorpusDb, slug: SlugConfig) -> Self {
        Self { db, slug }
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &CorpusDb {
        &self.db
    }

    /// Access the slug configuration.
    #[must_use]
    pub const fn slug_config(&self) -> &SlugConfig {
        &self.slug
    }
}
