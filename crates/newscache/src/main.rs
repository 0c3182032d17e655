mod cache;
mod config;
mod repository;
mod storage;

use std::num::NonZeroU32;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::json;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use newscache_core::cache::KeyValueCache;
use newscache_core::news::NewsItem;
use newscache_core::storage::NewsStore;

use crate::config::Config;
use crate::repository::{NewsRepository, NewsRepositoryError};

/// NewsCache - News storage with page, detail and count caching
#[derive(Parser, Debug)]
#[command(name = "newscache")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Number of news items per page, overriding NEWS_PAGE_SIZE
    #[arg(long, global = true)]
    page_size: Option<NonZeroU32>,

    /// Path to the SQLite database file
    #[arg(long, global = true, env = "SQLITE_PATH")]
    database: Option<String>,

    /// Keep news in memory for this run instead of opening the database
    #[arg(long, global = true)]
    ephemeral: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a news item
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// Change the title or description of a news item
    Update {
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete a news item
    Delete { id: i64 },
    /// Show one page of news, newest first
    Page { page: u32 },
    /// Show the details of a news item
    Show {
        id: i64,
        /// Drop the cached entry and read the store
        #[arg(long)]
        regenerate: bool,
    },
    /// Show the number of news items
    Count {
        /// Drop the cached count and recount
        #[arg(long)]
        regenerate: bool,
    },
    /// Create, update and delete a news item, then read pages and details
    Demo,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays valid JSON
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "newscache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match try_main(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::from(exit_code(&err))
        }
    }
}

/// Maps rejected requests to their own exit codes, like clap does for usage errors.
fn exit_code(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<NewsRepositoryError>() {
        Some(NewsRepositoryError::News(news)) if news.is_validation() => 2,
        Some(NewsRepositoryError::News(news)) if news.is_state() => 3,
        _ => 1,
    }
}

async fn try_main(cli: Cli) -> Result<()> {
    let mut config = Config::from_env();
    if let Some(page_size) = cli.page_size {
        config.page_size = page_size;
    }
    if let Some(database) = cli.database {
        config.sqlite_path = database;
    }

    let cache = Arc::new(init_cache(&config).await?);

    #[cfg(feature = "sqlite")]
    if !cli.ephemeral {
        let store = Arc::new(
            storage::SqliteNewsStore::new(&config.sqlite_path)
                .await
                .with_context(|| format!("failed to open database {}", config.sqlite_path))?,
        );
        tracing::info!(path = %config.sqlite_path, "Using SQLite store");

        run(cli.command, Arc::clone(&store), cache, config.page_size).await?;

        if let Ok(store) = Arc::try_unwrap(store) {
            store.close().await?;
        }
        return Ok(());
    }

    let store = Arc::new(storage::InMemoryNewsStore::new());
    tracing::info!(ephemeral = cli.ephemeral, "Using in-memory store");

    run(cli.command, store, cache, config.page_size).await
}

#[cfg(feature = "redis")]
async fn init_cache(config: &Config) -> Result<cache::RedisCache> {
    let cache = cache::RedisCache::new(&config.redis_url)
        .await
        .with_context(|| format!("failed to connect to {}", config.redis_url))?;
    tracing::info!(url = %config.redis_url, "Using Redis cache");
    Ok(cache)
}

#[cfg(not(feature = "redis"))]
async fn init_cache(config: &Config) -> Result<cache::MemoryCache> {
    tracing::info!(
        max_entries = config.cache_max_entries,
        "Using in-memory cache"
    );
    Ok(cache::MemoryCache::new(config.cache_max_entries))
}

async fn run<S, C>(
    command: Command,
    store: Arc<S>,
    cache: Arc<C>,
    page_size: NonZeroU32,
) -> Result<()>
where
    S: NewsStore,
    C: KeyValueCache,
{
    let repository = NewsRepository::new(store, cache, page_size);

    match command {
        Command::Create { title, description } => {
            let mut item = NewsItem::new(title);
            item.description = description;
            repository.save(&mut item).await?;
            print_json(&item.snapshot())
        }
        Command::Update {
            id,
            title,
            description,
        } => {
            let mut item = repository
                .find_by_pk(id)
                .await?
                .with_context(|| format!("news {id} not found"))?;
            if let Some(title) = title {
                item.title = title;
            }
            if description.is_some() {
                item.description = description;
            }
            let updated = repository.save(&mut item).await?;
            print_json(&json!({ "updated": updated, "news": item.snapshot() }))
        }
        Command::Delete { id } => {
            let mut item = NewsItem::default();
            item.assign_id(id);
            let deleted = repository.delete(&mut item).await?;
            print_json(&json!({ "deleted": deleted }))
        }
        Command::Page { page } => print_json(&repository.get_news_by_page(page).await?),
        Command::Show { id, regenerate } => {
            print_json(&repository.get_news_details(id, regenerate).await?)
        }
        Command::Count { regenerate } => {
            let count = repository.warm_count_cache(regenerate).await?;
            let page_size = u64::from(repository.page_size().get());
            print_json(&json!({
                "count": count,
                "page_size": page_size,
                "pages": count.div_ceil(page_size),
            }))
        }
        Command::Demo => demo(&repository).await,
    }
}

/// Runs every repository operation once and prints what each one returns.
async fn demo<S, C>(repository: &NewsRepository<S, C>) -> Result<()>
where
    S: NewsStore,
    C: KeyValueCache,
{
    let mut news = NewsItem::new("News").with_description("Description 1");
    repository.save(&mut news).await?;
    print_step("created", &news.snapshot())?;

    let id = news.id().context("created news has no identifier")?;
    let mut news = repository
        .find_by_pk(id)
        .await?
        .with_context(|| format!("news {id} disappeared"))?;
    news.description = Some("Description 2".to_string());
    repository.save(&mut news).await?;
    print_step("updated", &news.snapshot())?;

    repository.delete(&mut news).await?;
    print_step("deleted", &json!({ "id": news.id(), "title": news.title }))?;

    let first = repository.get_news_by_page(1).await?;
    let second = repository.get_news_by_page(2).await?;
    print_step("page 1", &first)?;
    print_step("page 2", &second)?;

    for snapshot in first.iter().take(3) {
        let details = repository.get_news_details(snapshot.id, false).await?;
        print_step(&format!("details {}", snapshot.id), &details)?;
    }

    print_step("count", &repository.warm_count_cache(false).await?)
}

fn print_step<T: Serialize>(step: &str, value: &T) -> Result<()> {
    print_json(&json!({ "step": step, "result": value }))
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
