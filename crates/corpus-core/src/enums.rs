//! The name-kind enum distinguishing the two name dimensions.
//!
//! Authors and keywords share an identical lifecycle (unique name, created
//! lazily on first reference, never deleted) and identical resolution logic;
//! `NameKind` selects which set of tables a resolver or discovery query
//! operates on.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which name dimension an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NameKind {
    Author,
    Keyword,
}

impl NameKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Author => "author",
            Self::Keyword => "keyword",
        }
    }

    /// Table holding the canonical names for this kind.
    #[must_use]
    pub const fn table(self) -> &'static str {
        match self {
            Self::Author => "authors",
            Self::Keyword => "keywords",
        }
    }

    /// Join table linking this kind to studies.
    #[must_use]
    pub const fn join_table(self) -> &'static str {
        match self {
            Self::Author => "study_authors",
            Self::Keyword => "study_keywords",
        }
    }

    /// Column in the join table referencing this kind's id.
    #[must_use]
    pub const fn join_column(self) -> &'static str {
        match self {
            Self::Author => "author_id",
            Self::Keyword => "keyword_id",
        }
    }
}

impl fmt::Display for NameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
