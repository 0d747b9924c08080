//! Clap argument definitions.

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "corpus", about = "Study index over libSQL", version)]
pub struct Cli {
    /// Suppress everything below errors
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Debug-level logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Index a new study
    Add(AddArgs),

    /// List studies, optionally filtered by keyword names (OR across names)
    Search {
        /// Comma-separated keyword names
        #[arg(long)]
        keywords: Option<String>,
    },

    /// Check whether a title is already indexed (case-insensitive prefix match)
    CheckTitle { title: String },

    /// Keyword autocomplete suggestions with study counts
    SearchKeywords {
        #[arg(default_value = "")]
        query: String,
    },

    /// Author autocomplete suggestions with study counts
    SearchAuthors {
        #[arg(default_value = "")]
        query: String,
    },

    /// All keywords and authors with study counts, plus the total study count
    Summary,

    /// Look up an analysis record by slug
    Analysis { slug: String },

    /// Backfill an analysis record for every study lacking one
    MigrateAnalysis,
}

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Study title (exact duplicates are rejected)
    #[arg(long)]
    pub title: String,

    /// URI or file reference for the full text
    #[arg(long)]
    pub fulltext: Option<String>,

    #[arg(long)]
    pub year: Option<i64>,

    #[arg(long)]
    pub month: Option<i64>,

    /// Study abstract
    #[arg(long = "abstract")]
    pub abstract_text: Option<String>,

    #[arg(long)]
    pub conclusions: Option<String>,

    /// Set the includes_fqs flag on the study
    #[arg(long)]
    pub includes_fqs: bool,

    /// Comma-separated author names
    #[arg(long, default_value = "")]
    pub authors: String,

    /// Comma-separated keyword names
    #[arg(long, default_value = "")]
    pub keywords: String,
}

/// Split a comma-separated name list, trimming whitespace and dropping
/// empty segments. The core expects pre-trimmed lists; this is where the
/// splitting lives.
#[must_use]
pub fn split_names(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
