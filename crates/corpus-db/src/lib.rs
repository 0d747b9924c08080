//! # corpus-db
//!
//! libSQL storage and repositories for the Corpus study index.
//!
//! Handles all relational state: studies, authors, keywords, the two join
//! tables, and analysis records. The repositories implement the ingestion
//! and normalization core — idempotent name resolution, atomic study
//! creation, fan-out aggregation for search, and the one-time analysis
//! migration.
//!
//! Uses the `libsql` crate (C `SQLite` fork) — local file or `:memory:`
//! databases, per-connection foreign keys, transactional writes.

pub mod aggregate;
pub mod error;
pub mod helpers;
mod migrations;
pub mod repos;
pub mod service;

mod test_support;

use error::DatabaseError;
use libsql::Builder;

/// Central database handle for all Corpus state operations.
pub struct CorpusDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
}

impl CorpusDb {
    /// Open a local database at the given path (`":memory:"` for tests).
    ///
    /// Runs migrations automatically on open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        // Enable foreign keys (must be per-connection in SQLite)
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        let corpus_db = Self { db, conn };
        corpus_db.run_migrations().await?;
        Ok(corpus_db)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }
}
