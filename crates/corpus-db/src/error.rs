//! Database error types for corpus-db.

use thiserror::Error;

/// Errors from database operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A study with the exact same title is already indexed. Not retried.
    #[error("A study with this title has already been indexed")]
    DuplicateTitle,

    /// A SQL query failed.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// Inconsistent data encountered (e.g., one id carrying two names).
    #[error("Data integrity violation: {0}")]
    Integrity(String),

    /// Underlying libSQL error. Includes uniqueness violations from the
    /// resolver's create-if-missing race; retrying the whole operation
    /// finds the entity pre-existing.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
