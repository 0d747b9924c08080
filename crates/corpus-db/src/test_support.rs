//! Shared test utilities for corpus-db tests.

#[cfg(test)]
pub(crate) mod helpers {
    use corpus_core::entities::NewStudy;
    use corpus_core::slug::SlugConfig;

    use crate::CorpusDb;
    use crate::service::CorpusService;

    /// Create an in-memory `CorpusService` with the default slug config.
    pub async fn test_service() -> CorpusService {
        let db = CorpusDb::open_local(":memory:").await.unwrap();
        CorpusService::from_db(db, SlugConfig::default())
    }

    /// Minimal study payload with the given title and name lists.
    pub fn new_study(title: &str, authors: &[&str], keywords: &[&str]) -> NewStudy {
        NewStudy {
            title: title.to_string(),
            fulltext: Some(format!("https://example.org/{title}")),
            year: Some(2019),
            month: Some(6),
            abstract_text: Some("abstract text".to_string()),
            conclusions: Some("conclusions text".to_string()),
            includes_fqs: false,
            authors: authors.iter().map(|s| (*s).to_string()).collect(),
            keywords: keywords.iter().map(|s| (*s).to_string()).collect(),
        }
    }
}
