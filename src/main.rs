//! Wikipath main entry point
//!
//! This is the command-line interface for the wikipath link-path solver.

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use wikipath::api::WikiApiClient;
use wikipath::config::load_config_with_hash;
use wikipath::ingest::ingest_year;
use wikipath::storage::{shared, LinkStore, SqliteLinkCache};
use wikipath::{Config, LinkSource, PathFinder, PathOutcome};

/// Wikipath: a Wikipedia link-path solver
///
/// Wikipath finds chains of hyperlinks between Wikipedia articles. Fetched
/// link sets are cached in a local SQLite database, so every search makes
/// the next one cheaper.
#[derive(Parser, Debug)]
#[command(name = "wikipath")]
#[command(version)]
#[command(about = "Find hyperlink paths between Wikipedia articles", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults apply without one)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Find a shortest hyperlink path between two articles
    Path {
        /// Title of the article to start from
        source: String,

        /// Title of the article to reach
        target: String,

        /// Maximum number of hops to search (overrides the config)
        #[arg(long, value_name = "N")]
        max_depth: Option<u32>,
    },

    /// Show the outbound article links of one article
    Links {
        /// Article title to resolve
        title: String,
    },

    /// Prime the cache with a year's most viewed articles
    Ingest {
        /// Year of pageview rankings to ingest
        year: u16,
    },

    /// Show statistics from the link cache and exit
    Stats,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("failed to load config from {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    match cli.command {
        Command::Path {
            source,
            target,
            max_depth,
        } => handle_path(&config, &source, &target, max_depth).await,
        Command::Links { title } => handle_links(&config, &title).await,
        Command::Ingest { year } => handle_ingest(&config, year).await,
        Command::Stats => handle_stats(&config),
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("wikipath=info,warn"),
            1 => EnvFilter::new("wikipath=debug,info"),
            2 => EnvFilter::new("wikipath=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Builds the link source shared by all online subcommands
fn build_link_source(config: &Config) -> anyhow::Result<LinkSource> {
    let cache = SqliteLinkCache::new(Path::new(&config.cache.database_path))
        .with_context(|| format!("failed to open cache at {}", config.cache.database_path))?;
    let client = WikiApiClient::new(&config.api, &config.user_agent)
        .context("failed to build API client")?;
    Ok(LinkSource::new(shared(cache), client))
}

/// Handles the `path` subcommand: runs the search and prints the chain
async fn handle_path(
    config: &Config,
    source: &str,
    target: &str,
    max_depth: Option<u32>,
) -> anyhow::Result<()> {
    let link_source = build_link_source(config)?;
    let finder = PathFinder::new(
        link_source,
        config.search.max_concurrent_fetches as usize,
    );

    let max_depth = max_depth.unwrap_or(config.search.max_depth);

    match finder.find_path(source, target, max_depth).await? {
        PathOutcome::Found(path) => {
            println!("Found a path of {} hops:", path.len().saturating_sub(1));
            for (hop, title) in path.iter().enumerate() {
                println!("  {}. {}", hop, title);
            }
        }
        PathOutcome::NotReachable => {
            println!(
                "No path from '{}' to '{}' within {} hops",
                source, target, max_depth
            );
        }
    }

    Ok(())
}

/// Handles the `links` subcommand: resolves one article's outbound links
async fn handle_links(config: &Config, title: &str) -> anyhow::Result<()> {
    use wikipath::graph::Node;
    use wikipath::Title;

    let link_source = build_link_source(config)?;
    let mut node = Node::new(Title::normalize(title));

    let links = node.neighbors(&link_source).await?.clone();

    let mut sorted: Vec<_> = links.iter().collect();
    sorted.sort();

    println!("'{}' links to {} articles:", node.title(), sorted.len());
    for link in sorted {
        println!("  {}", link);
    }

    Ok(())
}

/// Handles the `ingest` subcommand: bulk cache priming from pageview data
async fn handle_ingest(config: &Config, year: u16) -> anyhow::Result<()> {
    let cache = SqliteLinkCache::new(Path::new(&config.cache.database_path))
        .with_context(|| format!("failed to open cache at {}", config.cache.database_path))?;
    let client = WikiApiClient::new(&config.api, &config.user_agent)
        .context("failed to build API client")?;
    let link_source = LinkSource::new(shared(cache), client.clone());

    let report = ingest_year(&client, &link_source, year, &config.ingest).await?;

    println!("Ingested top articles for {}:", year);
    println!("  Requested: {}", report.requested);
    println!("  Resolved:  {}", report.resolved);
    println!("  Not found: {}", report.not_found);
    println!("  Failed:    {}", report.failed);

    Ok(())
}

/// Handles the `stats` subcommand: shows cache statistics
fn handle_stats(config: &Config) -> anyhow::Result<()> {
    println!("Database: {}\n", config.cache.database_path);

    let cache = SqliteLinkCache::new(Path::new(&config.cache.database_path))
        .with_context(|| format!("failed to open cache at {}", config.cache.database_path))?;

    let pages = cache.count_pages()?;
    let links = cache.count_links()?;

    println!("Cached pages: {}", pages);
    println!("Cached links: {}", links);
    if pages > 0 {
        println!("Average links per page: {:.1}", links as f64 / pages as f64);
    }

    Ok(())
}
