//! Fan-out join aggregation.
//!
//! The search query left-joins studies against authors and keywords, so a
//! study with A authors and K keywords arrives as A×K rows, each carrying
//! the study's scalar fields plus one author pair and one keyword pair.
//! Store-level set aggregation duplicated entries across the cross
//! dimension, so de-duplication is an explicit application-level step here.

use std::collections::HashMap;

use corpus_core::views::{NameRef, StudyView};

use crate::error::DatabaseError;

/// One flat row of the study search join.
#[derive(Debug, Clone)]
pub struct StudyJoinRow {
    pub id: i64,
    pub slug: Option<String>,
    pub title: String,
    pub fulltext: Option<String>,
    pub year: Option<i64>,
    pub month: Option<i64>,
    pub abstract_text: Option<String>,
    pub conclusions: Option<String>,
    pub includes_fqs: bool,
    /// Present unless the study has no linked authors.
    pub author: Option<NameRef>,
    /// Present unless the study has no linked keywords.
    pub keyword: Option<NameRef>,
}

/// Collapse a fan-out row set into one view per distinct study id.
///
/// Output order follows the first occurrence of each study id; within a
/// study, authors and keywords are de-duplicated by id, keeping the
/// first-seen name.
///
/// # Errors
///
/// Returns `DatabaseError::Integrity` if the same id arrives with two
/// different names — one name per id is a data invariant, and a mismatch is
/// surfaced rather than silently resolved.
pub fn aggregate_study_rows(rows: Vec<StudyJoinRow>) -> Result<Vec<StudyView>, DatabaseError> {
    let mut order: Vec<i64> = Vec::new();
    let mut by_id: HashMap<i64, StudyView> = HashMap::new();

    for row in rows {
        let StudyJoinRow {
            id,
            slug,
            title,
            fulltext,
            year,
            month,
            abstract_text,
            conclusions,
            includes_fqs,
            author,
            keyword,
        } = row;

        let view = by_id.entry(id).or_insert_with(|| {
            order.push(id);
            StudyView {
                id,
                slug,
                title,
                fulltext,
                year,
                month,
                abstract_text,
                conclusions,
                includes_fqs,
                authors: Vec::new(),
                keywords: Vec::new(),
            }
        });

        if let Some(author) = author {
            merge_name(id, "author", &mut view.authors, author)?;
        }
        if let Some(keyword) = keyword {
            merge_name(id, "keyword", &mut view.keywords, keyword)?;
        }
    }

    Ok(order.into_iter().filter_map(|id| by_id.remove(&id)).collect())
}

fn merge_name(
    study_id: i64,
    kind: &str,
    seen: &mut Vec<NameRef>,
    incoming: NameRef,
) -> Result<(), DatabaseError> {
    if let Some(existing) = seen.iter().find(|n| n.id == incoming.id) {
        if existing.name != incoming.name {
            return Err(DatabaseError::Integrity(format!(
                "study {study_id}: {kind} id {} seen with names '{}' and '{}'",
                incoming.id, existing.name, incoming.name
            )));
        }
        return Ok(());
    }
    seen.push(incoming);
    Ok(())
}
