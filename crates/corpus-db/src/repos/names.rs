//! Name resolution (identity) and discovery (autocomplete) for the author
//! and keyword dimensions.
//!
//! The two policies are deliberately different scopes and must not be
//! unified: resolution matches names exactly (identity), discovery matches
//! case-insensitive substrings (autocomplete).

use std::collections::BTreeMap;

use corpus_core::enums::NameKind;
use corpus_core::views::{NameCount, Suggestions};

use crate::error::DatabaseError;
use crate::service::CorpusService;

/// Resolve free-text names to canonical ids, creating missing rows.
///
/// Names are de-duplicated internally, then matched exactly against the
/// kind's table; every name without an existing row is inserted and its
/// generated id captured. The returned map has exactly one entry per
/// distinct input name.
///
/// Takes any connection so `add_study` can place the resolution inside its
/// transaction. The read-then-insert sequence is not atomic across
/// connections; the UNIQUE constraint on name is the enforced backstop, and
/// a constraint violation from a concurrent creator propagates — retrying
/// the whole operation finds the entity pre-existing.
///
/// # Errors
///
/// Returns `DatabaseError` if any query or insertion fails; no partial map
/// is returned.
pub async fn resolve_names(
    conn: &libsql::Connection,
    kind: NameKind,
    names: &[String],
) -> Result<BTreeMap<String, i64>, DatabaseError> {
    let mut distinct: Vec<&str> = Vec::new();
    for name in names {
        if !distinct.contains(&name.as_str()) {
            distinct.push(name);
        }
    }
    if distinct.is_empty() {
        return Ok(BTreeMap::new());
    }

    let placeholders = (1..=distinct.len())
        .map(|i| format!("?{i}"))
        .collect::<Vec<_>>()
        .join(", ");
    let sql = format!(
        "SELECT name, id FROM {} WHERE name IN ({placeholders})",
        kind.table()
    );
    let params: Vec<libsql::Value> = distinct.iter().map(|n| (*n).into()).collect();

    let mut resolved = BTreeMap::new();
    let mut rows = conn.query(&sql, libsql::params_from_iter(params)).await?;
    while let Some(row) = rows.next().await? {
        resolved.insert(row.get::<String>(0)?, row.get::<i64>(1)?);
    }

    let insert_sql = format!(
        "INSERT INTO {} (name) VALUES (?1) RETURNING id",
        kind.table()
    );
    for name in &distinct {
        if resolved.contains_key(*name) {
            continue;
        }
        let mut rows = conn.query(&insert_sql, [*name]).await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        resolved.insert((*name).to_string(), row.get::<i64>(0)?);
    }

    Ok(resolved)
}

impl CorpusService {
    /// Resolve names against the service's own connection.
    ///
    /// # Errors
    ///
    /// See [`resolve_names`].
    pub async fn resolve_names(
        &self,
        kind: NameKind,
        names: &[String],
    ) -> Result<BTreeMap<String, i64>, DatabaseError> {
        resolve_names(self.db().conn(), kind, names).await
    }

    /// Case-insensitive substring match on name with per-entity study
    /// counts. An empty query matches everything.
    ///
    /// The count joins through the kind's own join table — authors through
    /// `study_authors`, keywords through `study_keywords`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn name_counts(
        &self,
        kind: NameKind,
        query: &str,
    ) -> Result<Vec<NameCount>, DatabaseError> {
        let sql = format!(
            "SELECT n.id, n.name, COUNT(j.study_id) AS study_count
             FROM {table} n
             LEFT JOIN {join} j ON j.{col} = n.id
             WHERE n.name LIKE '%' || ?1 || '%'
             GROUP BY n.id
             ORDER BY n.name",
            table = kind.table(),
            join = kind.join_table(),
            col = kind.join_column(),
        );

        let mut rows = self.db().conn().query(&sql, [query]).await?;
        let mut counts = Vec::new();
        while let Some(row) = rows.next().await? {
            counts.push(NameCount {
                id: row.get(0)?,
                name: row.get(1)?,
                study_count: row.get(2)?,
            });
        }
        Ok(counts)
    }

    /// Autocomplete payload: the query echoed back with its matches.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn suggest_names(
        &self,
        kind: NameKind,
        query: &str,
    ) -> Result<Suggestions, DatabaseError> {
        let suggestions = self.name_counts(kind, query).await?;
        Ok(Suggestions {
            query: query.to_string(),
            suggestions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{new_study, test_service};
    use pretty_assertions::assert_eq;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_string()).collect()
    }

    #[tokio::test]
    async fn resolve_creates_missing_names() {
        let svc = test_service().await;

        let resolved = svc
            .resolve_names(NameKind::Author, &names(&["Jane Doe", "John Roe"]))
            .await
            .unwrap();

        assert_eq!(resolved.len(), 2);
        assert!(resolved.contains_key("Jane Doe"));
        assert!(resolved.contains_key("John Roe"));
        assert_ne!(resolved["Jane Doe"], resolved["John Roe"]);
    }

    #[tokio::test]
    async fn resolve_returns_one_entry_per_distinct_name() {
        let svc = test_service().await;

        // Repeated input names collapse to a single entity.
        let resolved = svc
            .resolve_names(NameKind::Keyword, &names(&["sleep", "sleep", "caffeine"]))
            .await
            .unwrap();

        assert_eq!(resolved.len(), 2);

        let mut rows = svc
            .db()
            .conn()
            .query("SELECT COUNT(*) FROM keywords", ())
            .await
            .unwrap();
        let count: i64 = rows.next().await.unwrap().unwrap().get(0).unwrap();
        assert_eq!(count, 2);
    }

    #[tokio::test]
    async fn resolve_twice_never_duplicates() {
        let svc = test_service().await;

        let first = svc
            .resolve_names(NameKind::Author, &names(&["Jane Doe"]))
            .await
            .unwrap();
        let second = svc
            .resolve_names(NameKind::Author, &names(&["Jane Doe", "John Roe"]))
            .await
            .unwrap();

        assert_eq!(first["Jane Doe"], second["Jane Doe"]);

        let mut rows = svc
            .db()
            .conn()
            .query("SELECT COUNT(*) FROM authors", ())
            .await
            .unwrap();
        let count: i64 = rows.next().await.unwrap().unwrap().get(0).unwrap();
        assert_eq!(count, 2);
    }

    #[tokio::test]
    async fn resolve_is_exact_match_on_case() {
        let svc = test_service().await;

        // Identity policy: "Sleep" and "sleep" are different keywords.
        let resolved = svc
            .resolve_names(NameKind::Keyword, &names(&["Sleep", "sleep"]))
            .await
            .unwrap();
        assert_eq!(resolved.len(), 2);
    }

    #[tokio::test]
    async fn resolve_empty_input_is_empty_map() {
        let svc = test_service().await;
        let resolved = svc.resolve_names(NameKind::Author, &[]).await.unwrap();
        assert!(resolved.is_empty());
    }

    #[tokio::test]
    async fn kinds_are_independent_namespaces() {
        let svc = test_service().await;

        let authors = svc
            .resolve_names(NameKind::Author, &names(&["overlap"]))
            .await
            .unwrap();
        let keywords = svc
            .resolve_names(NameKind::Keyword, &names(&["overlap"]))
            .await
            .unwrap();

        // Same name, separate entity sets — ids generated independently.
        assert_eq!(authors.len(), 1);
        assert_eq!(keywords.len(), 1);
    }

    #[tokio::test]
    async fn suggest_matches_substring_case_insensitive() {
        let svc = test_service().await;
        svc.add_study(&new_study("S1", &["Jane Doe"], &["Magnesium"]))
            .await
            .unwrap();

        let result = svc.suggest_names(NameKind::Keyword, "NESI").await.unwrap();
        assert_eq!(result.query, "NESI");
        assert_eq!(result.suggestions.len(), 1);
        assert_eq!(result.suggestions[0].name, "Magnesium");
        assert_eq!(result.suggestions[0].study_count, 1);
    }

    #[tokio::test]
    async fn suggest_counts_use_the_right_join_table() {
        let svc = test_service().await;
        svc.add_study(&new_study("S1", &["Jane Doe"], &["sleep"]))
            .await
            .unwrap();
        svc.add_study(&new_study("S2", &["Jane Doe"], &["caffeine"]))
            .await
            .unwrap();

        let authors = svc.name_counts(NameKind::Author, "jane").await.unwrap();
        assert_eq!(authors.len(), 1);
        assert_eq!(authors[0].study_count, 2);

        let keywords = svc.name_counts(NameKind::Keyword, "sleep").await.unwrap();
        assert_eq!(keywords.len(), 1);
        assert_eq!(keywords[0].study_count, 1);
    }

    #[tokio::test]
    async fn unlinked_names_count_zero() {
        let svc = test_service().await;
        svc.resolve_names(NameKind::Author, &names(&["Unlinked Author"]))
            .await
            .unwrap();

        let counts = svc.name_counts(NameKind::Author, "").await.unwrap();
        assert_eq!(counts.len(), 1);
        assert_eq!(counts[0].study_count, 0);
    }
}
