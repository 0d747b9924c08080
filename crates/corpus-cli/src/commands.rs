//! Command handlers: call the service, print JSON.

use anyhow::Context;
use corpus_core::entities::NewStudy;
use corpus_core::enums::NameKind;
use corpus_db::service::CorpusService;

use crate::cli::{AddArgs, Commands, split_names};

/// Open the service at the configured database path, creating the parent
/// directory if needed.
pub async fn open_service(
    config: &corpus_config::CorpusConfig,
) -> anyhow::Result<CorpusService> {
    let path = &config.database.path;
    if path != ":memory:" {
        if let Some(parent) = std::path::Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("failed to create database directory {}", parent.display())
                })?;
            }
        }
    }

    CorpusService::new_local(path, config.slug.to_slug_config())
        .await
        .with_context(|| format!("failed to open database at {path}"))
}

pub async fn dispatch(command: Commands, service: &CorpusService) -> anyhow::Result<()> {
    match command {
        Commands::Add(args) => add(args, service).await,
        Commands::Search { keywords } => search(keywords.as_deref(), service).await,
        Commands::CheckTitle { title } => check_title(&title, service).await,
        Commands::SearchKeywords { query } => {
            suggest(NameKind::Keyword, &query, service).await
        }
        Commands::SearchAuthors { query } => suggest(NameKind::Author, &query, service).await,
        Commands::Summary => summary(service).await,
        Commands::Analysis { slug } => analysis(&slug, service).await,
        Commands::MigrateAnalysis => migrate_analysis(service).await,
    }
}

async fn add(args: AddArgs, service: &CorpusService) -> anyhow::Result<()> {
    let new = NewStudy {
        title: args.title,
        fulltext: args.fulltext,
        year: args.year,
        month: args.month,
        abstract_text: args.abstract_text,
        conclusions: args.conclusions,
        includes_fqs: args.includes_fqs,
        authors: split_names(&args.authors),
        keywords: split_names(&args.keywords),
    };

    let id = service.add_study(&new).await?;
    print_json(&serde_json::json!({ "success": true, "id": id }))
}

async fn search(keywords: Option<&str>, service: &CorpusService) -> anyhow::Result<()> {
    let filter = keywords.map(split_names).unwrap_or_default();
    let views = service.search_studies(&filter).await?;
    print_json(&views)
}

async fn check_title(title: &str, service: &CorpusService) -> anyhow::Result<()> {
    let existing_id = service.check_title_exists(title).await?;
    print_json(&serde_json::json!({ "existing_id": existing_id }))
}

async fn suggest(kind: NameKind, query: &str, service: &CorpusService) -> anyhow::Result<()> {
    let suggestions = service.suggest_names(kind, query).await?;
    print_json(&suggestions)
}

async fn summary(service: &CorpusService) -> anyhow::Result<()> {
    let summary = service.site_summary().await?;
    print_json(&summary)
}

async fn analysis(slug: &str, service: &CorpusService) -> anyhow::Result<()> {
    match service.get_analysis_by_slug(slug).await? {
        Some(view) => print_json(&view),
        None => print_json(&serde_json::Value::Null),
    }
}

async fn migrate_analysis(service: &CorpusService) -> anyhow::Result<()> {
    let total = service.migrate_analysis().await?;
    print_json(&serde_json::json!({ "total": total }))
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
