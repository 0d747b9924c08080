//! Analysis repository — slug-keyed analysis records and the one-time
//! backfill migration.

use corpus_core::entities::Analysis;
use corpus_core::slug::slugify;
use corpus_core::views::AnalysisView;

use crate::error::DatabaseError;
use crate::helpers::row_to_study;
use crate::service::CorpusService;

/// Body text for analysis records created by the migration.
pub const PLACEHOLDER_BODY: &str =
    "No analysis of this study has been created. You may still comment on this study.";

impl CorpusService {
    /// Backfill an analysis record for every study lacking one.
    ///
    /// Derives the slug from the study title, checks for an existing
    /// analysis with that exact slug, and inserts only when the slug is
    /// free. A second study reducing to the same slug is skipped, not
    /// disambiguated. Running the migration again creates nothing new.
    ///
    /// Returns the number of analysis rows created.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if any query or insertion fails.
    pub async fn migrate_analysis(&self) -> Result<u64, DatabaseError> {
        let conn = self.db().conn();

        let mut pending: Vec<(i64, String)> = Vec::new();
        {
            let mut rows = conn
                .query(
                    "SELECT s.id, s.title FROM studies s
                     LEFT JOIN study_analysis an ON an.study_id = s.id
                     WHERE an.id IS NULL
                     ORDER BY s.id",
                    (),
                )
                .await?;
            while let Some(row) = rows.next().await? {
                pending.push((row.get(0)?, row.get(1)?));
            }
        }

        let mut created = 0u64;
        for (study_id, title) in pending {
            let slug = slugify(&title, self.slug_config());

            let taken = {
                let mut rows = conn
                    .query(
                        "SELECT id FROM study_analysis WHERE slug = ?1",
                        [slug.as_str()],
                    )
                    .await?;
                rows.next().await?.is_some()
            };
            if taken {
                tracing::warn!(study_id, slug = %slug, "skipping analysis: slug already taken");
                continue;
            }

            conn.execute(
                "INSERT INTO study_analysis (slug, study_id, title, body) VALUES (?1, ?2, ?3, ?4)",
                libsql::params![slug.as_str(), study_id, title.as_str(), PLACEHOLDER_BODY],
            )
            .await?;
            created += 1;
        }

        Ok(created)
    }

    /// Look up an analysis by its slug, joined with its study's scalar
    /// fields. Unknown slugs return `None`, not an error.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn get_analysis_by_slug(
        &self,
        slug: &str,
    ) -> Result<Option<AnalysisView>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT an.id, an.slug, an.study_id, an.title, an.body,
                        s.id, s.title, s.fulltext, s.year, s.month, s.abstract,
                        s.conclusions, s.includes_fqs, s.created_at
                 FROM study_analysis an
                 JOIN studies s ON s.id = an.study_id
                 WHERE an.slug = ?1",
                [slug],
            )
            .await?;

        let Some(row) = rows.next().await? else {
            return Ok(None);
        };

        let analysis = Analysis {
            id: row.get(0)?,
            slug: row.get(1)?,
            study_id: row.get(2)?,
            title: row.get(3)?,
            body: row.get(4)?,
        };
        let study = row_to_study(&row, 5)?;

        Ok(Some(AnalysisView { analysis, study }))
    }
}
