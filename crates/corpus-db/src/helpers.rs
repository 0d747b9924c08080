//! Row-to-entity parsing helpers.
//!
//! Repos convert `libsql::Row` (column-indexed) into typed structs. These
//! helpers isolate the parsing logic and handle the dual datetime format
//! issue (`SQLite`'s `datetime('now')` vs Rust's `to_rfc3339()`).

use chrono::{DateTime, Utc};

use corpus_core::entities::Study;

use crate::error::DatabaseError;

/// Parse a required TEXT column as `DateTime<Utc>`.
///
/// Handles both RFC 3339 (`"2026-02-09T14:30:00+00:00"`) and `SQLite`'s
/// default format (`"2026-02-09 14:30:00"`).
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string cannot be parsed as either
/// format.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, DatabaseError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .map(|naive| naive.and_utc())
        .map_err(|e| DatabaseError::Query(format!("Failed to parse datetime '{s}': {e}")))
}

/// Read a nullable TEXT column. Returns `None` for both SQL NULL and empty
/// string.
///
/// `row.get::<String>(idx)` on a NULL column returns an error, not `""`.
/// You must use `get::<Option<String>>()` for nullable columns.
///
/// # Errors
///
/// Returns `DatabaseError` if the column read fails.
pub fn get_opt_string(row: &libsql::Row, idx: i32) -> Result<Option<String>, DatabaseError> {
    match row.get::<Option<String>>(idx)? {
        Some(s) if s.is_empty() => Ok(None),
        other => Ok(other),
    }
}

/// Parse the nine study scalar columns (id, title, fulltext, year, month,
/// abstract, conclusions, `includes_fqs`, `created_at`) starting at `offset`.
pub(crate) fn row_to_study(row: &libsql::Row, offset: i32) -> Result<Study, DatabaseError> {
    Ok(Study {
        id: row.get(offset)?,
        title: row.get(offset + 1)?,
        fulltext: get_opt_string(row, offset + 2)?,
        year: row.get::<Option<i64>>(offset + 3)?,
        month: row.get::<Option<i64>>(offset + 4)?,
        abstract_text: get_opt_string(row, offset + 5)?,
        conclusions: get_opt_string(row, offset + 6)?,
        includes_fqs: row.get::<i64>(offset + 7)? != 0,
        created_at: parse_datetime(&row.get::<String>(offset + 8)?)?,
    })
}
