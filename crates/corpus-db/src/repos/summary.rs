//! Site summary — the aggregate payload for initial page load.

use corpus_core::enums::NameKind;
use corpus_core::views::SiteSummary;

use crate::error::DatabaseError;
use crate::service::CorpusService;

impl CorpusService {
    /// Every keyword and author with study counts, plus the total study
    /// count, in one payload.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if any query fails.
    pub async fn site_summary(&self) -> Result<SiteSummary, DatabaseError> {
        let keywords = self.name_counts(NameKind::Keyword, "").await?;
        let authors = self.name_counts(NameKind::Author, "").await?;

        let mut rows = self
            .db()
            .conn()
            .query("SELECT COUNT(*) FROM studies", ())
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        let total_studies: i64 = row.get(0)?;

        Ok(SiteSummary {
            keywords,
            authors,
            total_studies,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::helpers::{new_study, test_service};
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn summary_counts_everything() {
        let svc = test_service().await;

        svc.add_study(&new_study("S1", &["Jane Doe"], &["sleep", "caffeine"]))
            .await
            .unwrap();
        svc.add_study(&new_study("S2", &["Jane Doe", "John Roe"], &["sleep"]))
            .await
            .unwrap();

        let summary = svc.site_summary().await.unwrap();
        assert_eq!(summary.total_studies, 2);
        assert_eq!(summary.authors.len(), 2);
        assert_eq!(summary.keywords.len(), 2);

        let sleep = summary
            .keywords
            .iter()
            .find(|k| k.name == "sleep")
            .unwrap();
        assert_eq!(sleep.study_count, 2);

        let jane = summary
            .authors
            .iter()
            .find(|a| a.name == "Jane Doe")
            .unwrap();
        assert_eq!(jane.study_count, 2);
    }

    #[tokio::test]
    async fn summary_on_empty_index() {
        let svc = test_service().await;
        let summary = svc.site_summary().await.unwrap();
        assert_eq!(summary.total_studies, 0);
        assert!(summary.keywords.is_empty());
        assert!(summary.authors.is_empty());
    }
}
