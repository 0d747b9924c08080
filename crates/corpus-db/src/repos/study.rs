//! Study repository — atomic ingestion, faceted search, title checks.

use corpus_core::entities::NewStudy;
use corpus_core::enums::NameKind;
use corpus_core::views::{NameRef, StudyView};

use crate::aggregate::{StudyJoinRow, aggregate_study_rows};
use crate::error::DatabaseError;
use crate::helpers::get_opt_string;
use crate::repos::names::resolve_names;
use crate::service::CorpusService;

impl CorpusService {
    /// Index a new study with its author and keyword name lists.
    ///
    /// The whole sequence runs in one transaction: exact-title duplicate
    /// check, name resolution, the study row, the join rows. A failure
    /// partway rolls back and leaves no orphaned study or join rows.
    ///
    /// Returns the new study's id.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::DuplicateTitle` if a study with the exact
    /// same title exists, or `DatabaseError` for underlying store failures
    /// (including a UNIQUE violation from a concurrent name creation, which
    /// is safe to retry).
    pub async fn add_study(&self, new: &NewStudy) -> Result<i64, DatabaseError> {
        let tx = self.db().conn().transaction().await?;
        match insert_study_tx(&tx, new).await {
            Ok(study_id) => {
                tx.commit().await?;
                Ok(study_id)
            }
            Err(e) => {
                let _ = tx.rollback().await;
                Err(e)
            }
        }
    }

    /// Faceted search: an empty filter returns every study; a non-empty
    /// filter returns studies linked to at least one of the given keyword
    /// names (OR across the names).
    ///
    /// Builds the fan-out left-join and collapses it through the
    /// aggregator.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or the row set violates
    /// the one-name-per-id invariant.
    pub async fn search_studies(
        &self,
        keyword_filter: &[String],
    ) -> Result<Vec<StudyView>, DatabaseError> {
        let mut sql = String::from(
            "SELECT s.id, s.title, s.fulltext, s.year, s.month, s.abstract, s.conclusions,
                    s.includes_fqs, an.slug, a.id, a.name, k.id, k.name
             FROM studies s
             LEFT JOIN study_authors sa ON sa.study_id = s.id
             LEFT JOIN authors a ON a.id = sa.author_id
             LEFT JOIN study_keywords sk ON sk.study_id = s.id
             LEFT JOIN keywords k ON k.id = sk.keyword_id
             LEFT JOIN study_analysis an ON an.study_id = s.id",
        );

        let mut params: Vec<libsql::Value> = Vec::new();
        if !keyword_filter.is_empty() {
            let placeholders = (1..=keyword_filter.len())
                .map(|i| format!("?{i}"))
                .collect::<Vec<_>>()
                .join(", ");
            // Filter on linkage, not on the joined rows, so a matching
            // study still carries its full keyword list.
            sql.push_str(&format!(
                " WHERE s.id IN (SELECT fj.study_id FROM study_keywords fj
                                 JOIN keywords fk ON fk.id = fj.keyword_id
                                 WHERE fk.name IN ({placeholders}))"
            ));
            params.extend(keyword_filter.iter().map(|n| n.as_str().into()));
        }
        sql.push_str(" ORDER BY s.id");

        let mut rows = self
            .db()
            .conn()
            .query(&sql, libsql::params_from_iter(params))
            .await?;

        let mut flat = Vec::new();
        while let Some(row) = rows.next().await? {
            let author = match row.get::<Option<i64>>(9)? {
                Some(id) => Some(NameRef {
                    id,
                    name: row.get(10)?,
                }),
                None => None,
            };
            let keyword = match row.get::<Option<i64>>(11)? {
                Some(id) => Some(NameRef {
                    id,
                    name: row.get(12)?,
                }),
                None => None,
            };
            flat.push(StudyJoinRow {
                id: row.get(0)?,
                title: row.get(1)?,
                fulltext: get_opt_string(&row, 2)?,
                year: row.get::<Option<i64>>(3)?,
                month: row.get::<Option<i64>>(4)?,
                abstract_text: get_opt_string(&row, 5)?,
                conclusions: get_opt_string(&row, 6)?,
                includes_fqs: row.get::<i64>(7)? != 0,
                slug: get_opt_string(&row, 8)?,
                author,
                keyword,
            });
        }

        aggregate_study_rows(flat)
    }

    /// Case-insensitive prefix match on title, returning the first match's
    /// id. A soft "did you mean" signal for callers before submission —
    /// deliberately looser than the exact-match duplicate check in
    /// [`add_study`](Self::add_study).
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn check_title_exists(&self, title: &str) -> Result<Option<i64>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT id FROM studies WHERE title LIKE ?1 || '%' LIMIT 1",
                [title],
            )
            .await?;
        Ok(match rows.next().await? {
            Some(row) => Some(row.get(0)?),
            None => None,
        })
    }
}

/// The transactional body of `add_study`: duplicate check, name resolution,
/// the study row, both join tables. Runs entirely against `tx`.
async fn insert_study_tx(
    tx: &libsql::Transaction,
    new: &NewStudy,
) -> Result<i64, DatabaseError> {
    {
        let mut rows = tx
            .query(
                "SELECT id FROM studies WHERE title = ?1",
                [new.title.as_str()],
            )
            .await?;
        if rows.next().await?.is_some() {
            return Err(DatabaseError::DuplicateTitle);
        }
    }

    let authors = resolve_names(tx, NameKind::Author, &new.authors).await?;
    let keywords = resolve_names(tx, NameKind::Keyword, &new.keywords).await?;

    let mut rows = tx
        .query(
            "INSERT INTO studies (title, fulltext, year, month, abstract, conclusions, includes_fqs)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
             RETURNING id",
            libsql::params![
                new.title.as_str(),
                new.fulltext.as_deref(),
                new.year,
                new.month,
                new.abstract_text.as_deref(),
                new.conclusions.as_deref(),
                i64::from(new.includes_fqs)
            ],
        )
        .await?;
    let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
    let study_id: i64 = row.get(0)?;

    for author_id in authors.values() {
        tx.execute(
            "INSERT INTO study_authors (study_id, author_id) VALUES (?1, ?2)",
            libsql::params![study_id, *author_id],
        )
        .await?;
    }
    for keyword_id in keywords.values() {
        tx.execute(
            "INSERT INTO study_keywords (study_id, keyword_id) VALUES (?1, ?2)",
            libsql::params![study_id, *keyword_id],
        )
        .await?;
    }

    Ok(study_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{new_study, test_service};
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn add_study_links_authors_and_keywords() {
        let svc = test_service().await;

        let id = svc
            .add_study(&new_study(
                "Caffeine and Sleep",
                &["Jane Doe", "John Roe"],
                &["caffeine", "sleep"],
            ))
            .await
            .unwrap();

        let views = svc.search_studies(&[]).await.unwrap();
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].id, id);
        assert_eq!(views[0].title, "Caffeine and Sleep");
        assert_eq!(views[0].authors.len(), 2);
        assert_eq!(views[0].keywords.len(), 2);
    }

    #[tokio::test]
    async fn add_study_reuses_existing_names() {
        let svc = test_service().await;

        svc.add_study(&new_study("S1", &["Jane Doe"], &["sleep"]))
            .await
            .unwrap();
        svc.add_study(&new_study("S2", &["Jane Doe"], &["sleep", "caffeine"]))
            .await
            .unwrap();

        let mut rows = svc
            .db()
            .conn()
            .query("SELECT COUNT(*) FROM authors", ())
            .await
            .unwrap();
        let authors: i64 = rows.next().await.unwrap().unwrap().get(0).unwrap();
        assert_eq!(authors, 1);

        let mut rows = svc
            .db()
            .conn()
            .query("SELECT COUNT(*) FROM keywords", ())
            .await
            .unwrap();
        let keywords: i64 = rows.next().await.unwrap().unwrap().get(0).unwrap();
        assert_eq!(keywords, 2);
    }

    #[tokio::test]
    async fn add_study_rejects_exact_duplicate_title() {
        let svc = test_service().await;

        svc.add_study(&new_study("Same Title", &["A"], &["k"]))
            .await
            .unwrap();
        let result = svc.add_study(&new_study("Same Title", &["B"], &["j"])).await;
        assert!(matches!(result, Err(DatabaseError::DuplicateTitle)));

        // Second call performed no writes
        let mut rows = svc
            .db()
            .conn()
            .query("SELECT COUNT(*) FROM studies", ())
            .await
            .unwrap();
        let studies: i64 = rows.next().await.unwrap().unwrap().get(0).unwrap();
        assert_eq!(studies, 1);

        let mut rows = svc
            .db()
            .conn()
            .query("SELECT COUNT(*) FROM authors", ())
            .await
            .unwrap();
        let authors: i64 = rows.next().await.unwrap().unwrap().get(0).unwrap();
        assert_eq!(authors, 1, "duplicate call must not create author 'B'");
    }

    #[tokio::test]
    async fn add_study_rolls_back_on_join_failure() {
        let svc = test_service().await;

        // Force the join insertion to fail mid-transaction.
        svc.db()
            .conn()
            .execute("DROP TABLE study_keywords", ())
            .await
            .unwrap();

        let result = svc
            .add_study(&new_study("Orphan Candidate", &["Jane Doe"], &["sleep"]))
            .await;
        assert!(result.is_err());

        // Neither the study row nor the resolved names survive.
        let mut rows = svc
            .db()
            .conn()
            .query("SELECT COUNT(*) FROM studies", ())
            .await
            .unwrap();
        let studies: i64 = rows.next().await.unwrap().unwrap().get(0).unwrap();
        assert_eq!(studies, 0, "failed add must not leave a study behind");

        let mut rows = svc
            .db()
            .conn()
            .query("SELECT COUNT(*) FROM authors", ())
            .await
            .unwrap();
        let authors: i64 = rows.next().await.unwrap().unwrap().get(0).unwrap();
        assert_eq!(authors, 0, "failed add must not leave resolved names behind");
    }

    #[tokio::test]
    async fn search_filters_by_any_of_the_given_keywords() {
        let svc = test_service().await;

        svc.add_study(&new_study("S1", &["A"], &["sleep", "caffeine"]))
            .await
            .unwrap();
        svc.add_study(&new_study("S2", &["B"], &["magnesium"]))
            .await
            .unwrap();
        svc.add_study(&new_study("S3", &["C"], &["exercise"]))
            .await
            .unwrap();

        let filter = vec!["sleep".to_string(), "magnesium".to_string()];
        let views = svc.search_studies(&filter).await.unwrap();
        let titles: Vec<&str> = views.iter().map(|v| v.title.as_str()).collect();
        assert_eq!(titles, vec!["S1", "S2"]);
    }

    #[tokio::test]
    async fn search_keeps_full_keyword_list_on_filtered_studies() {
        let svc = test_service().await;

        svc.add_study(&new_study("S1", &["A"], &["sleep", "caffeine"]))
            .await
            .unwrap();

        let filter = vec!["sleep".to_string()];
        let views = svc.search_studies(&filter).await.unwrap();
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].keywords.len(), 2);
    }

    #[tokio::test]
    async fn search_returns_studies_without_links() {
        let svc = test_service().await;

        svc.add_study(&new_study("Bare Study", &[], &[]))
            .await
            .unwrap();

        let views = svc.search_studies(&[]).await.unwrap();
        assert_eq!(views.len(), 1);
        assert!(views[0].authors.is_empty());
        assert!(views[0].keywords.is_empty());
        assert!(views[0].slug.is_none());
    }

    #[tokio::test]
    async fn search_includes_slug_after_migration() {
        let svc = test_service().await;

        svc.add_study(&new_study("Caffeine Metabolism Rates", &["A"], &["caffeine"]))
            .await
            .unwrap();
        svc.migrate_analysis().await.unwrap();

        let views = svc.search_studies(&[]).await.unwrap();
        assert_eq!(
            views[0].slug.as_deref(),
            Some("caffeine-metabolism-rates")
        );
    }

    #[tokio::test]
    async fn check_title_prefix_match_is_case_insensitive() {
        let svc = test_service().await;

        let id = svc
            .add_study(&new_study("Impact of X on Y", &["A"], &["k"]))
            .await
            .unwrap();

        assert_eq!(
            svc.check_title_exists("impact of x").await.unwrap(),
            Some(id)
        );
        assert_eq!(
            svc.check_title_exists("IMPACT OF X ON Y").await.unwrap(),
            Some(id)
        );
        assert_eq!(svc.check_title_exists("of X on Y").await.unwrap(), None);
        assert_eq!(svc.check_title_exists("unrelated").await.unwrap(), None);
    }
}
