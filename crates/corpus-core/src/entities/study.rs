use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An indexed academic study.
///
/// Immutable after creation within the ingestion core; the author and
/// keyword join sets exactly reflect the name lists supplied to `add_study`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Study {
    pub id: i64,
    pub title: String,
    /// URI of the full text, or a `/files/<name>` reference for uploads.
    pub fulltext: Option<String>,
    pub year: Option<i64>,
    pub month: Option<i64>,
    #[serde(rename = "abstract")]
    pub abstract_text: Option<String>,
    pub conclusions: Option<String>,
    pub includes_fqs: bool,
    pub created_at: DateTime<Utc>,
}

/// Input payload for indexing a new study.
///
/// `authors` and `keywords` are free-text names, already split and trimmed
/// by the transport layer. The repository resolves them to canonical ids,
/// creating missing entities on the way.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewStudy {
    pub title: String,
    pub fulltext: Option<String>,
    pub year: Option<i64>,
    pub month: Option<i64>,
    #[serde(rename = "abstract")]
    pub abstract_text: Option<String>,
    pub conclusions: Option<String>,
    #[serde(default)]
    pub includes_fqs: bool,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
}
