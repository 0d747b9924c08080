//! View objects returned across the request/response contract.
//!
//! These are the aggregated, de-duplicated shapes the transport layer
//! consumes — plain structured data, serialized as JSON.

use serde::{Deserialize, Serialize};

use crate::entities::{Analysis, Study};

/// A resolved name reference — one author or keyword linked to a study.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NameRef {
    pub id: i64,
    pub name: String,
}

/// A name with the number of studies linked to it, for autocomplete and the
/// site summary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NameCount {
    pub id: i64,
    pub name: String,
    pub study_count: i64,
}

/// One study with its de-duplicated author and keyword lists.
///
/// Produced by the fan-out aggregator from the search join. `slug` is
/// present once the analysis migration has run for this study.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StudyView {
    pub id: i64,
    pub slug: Option<String>,
    pub title: String,
    pub fulltext: Option<String>,
    pub year: Option<i64>,
    pub month: Option<i64>,
    #[serde(rename = "abstract")]
    pub abstract_text: Option<String>,
    pub conclusions: Option<String>,
    pub includes_fqs: bool,
    pub authors: Vec<NameRef>,
    pub keywords: Vec<NameRef>,
}

/// Autocomplete suggestions for a free-text name query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Suggestions {
    pub query: String,
    pub suggestions: Vec<NameCount>,
}

/// Aggregate payload for initial page load: every keyword and author with
/// study counts, plus the total study count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteSummary {
    pub keywords: Vec<NameCount>,
    pub authors: Vec<NameCount>,
    pub total_studies: i64,
}

/// An analysis record joined with its study's scalar fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnalysisView {
    #[serde(flatten)]
    pub analysis: Analysis,
    pub study: Study,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn study_view_serializes_abstract_field() {
        let view = StudyView {
            id: 1,
            slug: None,
            title: "t".into(),
            fulltext: None,
            year: None,
            month: None,
            abstract_text: Some("a".into()),
            conclusions: None,
            includes_fqs: false,
            authors: vec![],
            keywords: vec![],
        };
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["abstract"], "a");
        assert!(json.get("abstract_text").is_none());
    }
}
