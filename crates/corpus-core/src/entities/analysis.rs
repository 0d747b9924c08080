use serde::{Deserialize, Serialize};

/// A secondary analysis record attached to a study.
///
/// Created by the one-time migration routine; `slug` is globally unique and
/// derived from the study title at creation time. `title` is a copy of the
/// study title as it stood when the record was created.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Analysis {
    pub id: i64,
    pub slug: String,
    pub study_id: i64,
    pub title: String,
    pub body: String,
}
