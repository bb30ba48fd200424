//! Bulk cache priming from pageview rankings
//!
//! Downloads the most viewed article titles for a year and resolves each one
//! through the link source, so later path searches start from a warm cache.
//! This is a collaborator of the search core: it only produces titles and
//! lets the resolution machinery do the rest.

use crate::api::{ApiError, WikiApiClient};
use crate::config::IngestConfig;
use crate::resolve::{resolve_many, LinkSource, ResolveError};
use crate::title::Title;
use crate::WikiError;
use std::collections::BTreeSet;

/// Summary of one ingestion run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct IngestReport {
    /// Unique article titles collected from the rankings
    pub requested: u64,
    /// Titles resolved into cached link sets
    pub resolved: u64,
    /// Titles the remote source does not know
    pub not_found: u64,
    /// Titles skipped because of transient failures
    pub failed: u64,
}

/// Collects the top articles of a year and primes the link cache with them
///
/// Months are fetched in order; a month that returns 404 means the pageview
/// data ends there and the collection stops, while any other per-month
/// failure is logged and skipped. Per-title resolution failures are counted
/// in the report, never fatal.
pub async fn ingest_year(
    client: &WikiApiClient,
    source: &LinkSource,
    year: u16,
    config: &IngestConfig,
) -> Result<IngestReport, WikiError> {
    let titles = collect_year_titles(client, year).await?;

    let mut report = IngestReport {
        requested: titles.len() as u64,
        ..IngestReport::default()
    };

    tracing::info!(
        "Priming cache with {} top articles from {}",
        report.requested,
        year
    );

    let interval = config.progress_interval.max(1) as u64;
    let mut processed: u64 = 0;

    let mut rx = resolve_many(
        source,
        titles.into_iter().collect(),
        config.max_concurrent_fetches as usize,
    );

    while let Some(outcome) = rx.recv().await {
        match outcome.result {
            Ok(links) => {
                tracing::debug!("Resolved '{}' ({} links)", outcome.title, links.len());
                report.resolved += 1;
            }
            Err(ResolveError::NotFound(title)) => {
                tracing::debug!("No article for ranked title '{}'", title);
                report.not_found += 1;
            }
            Err(ResolveError::Transient { title, message }) => {
                tracing::warn!("Skipping '{}': {}", title, message);
                report.failed += 1;
            }
            Err(e @ ResolveError::Storage(_)) => return Err(e.into()),
        }

        processed += 1;
        if processed % interval == 0 {
            tracing::info!(
                "Progress: {}/{} titles ({} resolved, {} skipped)",
                processed,
                report.requested,
                report.resolved,
                report.not_found + report.failed
            );
        }
    }

    tracing::info!(
        "Ingestion complete: {} resolved, {} not found, {} failed out of {}",
        report.resolved,
        report.not_found,
        report.failed,
        report.requested
    );

    Ok(report)
}

/// Fetches the monthly top-article rankings of one year into a title set
async fn collect_year_titles(
    client: &WikiApiClient,
    year: u16,
) -> Result<BTreeSet<Title>, WikiError> {
    let mut titles = BTreeSet::new();

    for month in 1..=12u8 {
        let names = match client.fetch_top_articles(year, month).await {
            Ok(names) => names,
            Err(ApiError::Status { status: 404, .. }) => {
                tracing::info!("No pageview data for {}-{:02}; stopping", year, month);
                break;
            }
            Err(e) => {
                tracing::warn!("Skipping {}-{:02}: {}", year, month, e);
                continue;
            }
        };

        for name in names {
            let title = Title::normalize(&name);
            if title.as_str().is_empty()
                || title.is_special_namespace()
                || title.as_str().eq_ignore_ascii_case("main_page")
            {
                continue;
            }
            titles.insert(title);
        }
    }

    Ok(titles)
}
