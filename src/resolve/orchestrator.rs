//! Bounded-concurrency resolution of many titles
//!
//! One fetch orchestration serves both callers: bulk cache priming and
//! per-level neighbor expansion inside the path search. A semaphore bounds
//! the number of in-flight resolutions; the bounded channel keeps completed
//! results from piling up faster than the consumer drains them.

use crate::resolve::{LinkSource, ResolveError};
use crate::title::{LinkSet, Title};
use std::sync::Arc;
use tokio::sync::{mpsc, Semaphore};

/// The result of resolving one title within a batch
#[derive(Debug)]
pub struct ResolveOutcome {
    pub title: Title,
    pub result: Result<LinkSet, ResolveError>,
}

/// Resolves a batch of titles concurrently
///
/// Produces one outcome per input title, in completion order, over a single
/// non-restartable pass. A failed title is reported as an outcome and never
/// aborts the rest of the batch.
///
/// Dropping the receiver cancels the batch: in-flight fetches run to
/// completion (their cache writes still land), but their results are
/// discarded. This is how the path search stops consuming work at the depth
/// limit.
///
/// # Arguments
///
/// * `source` - The link source shared by all workers
/// * `titles` - Titles to resolve; expected to be normalized already
/// * `limit` - Maximum number of concurrent resolutions (minimum 1)
pub fn resolve_many(
    source: &LinkSource,
    titles: Vec<Title>,
    limit: usize,
) -> mpsc::Receiver<ResolveOutcome> {
    let limit = limit.max(1);
    let (tx, rx) = mpsc::channel(limit);
    let semaphore = Arc::new(Semaphore::new(limit));

    for title in titles {
        let source = source.clone();
        let tx = tx.clone();
        let semaphore = Arc::clone(&semaphore);

        tokio::spawn(async move {
            let _permit = match semaphore.acquire_owned().await {
                Ok(permit) => permit,
                // Semaphore closed only happens on shutdown
                Err(_) => return,
            };

            let result = source.resolve(&title).await;
            if let Err(e) = &result {
                tracing::debug!("Resolution failed for '{}': {}", title, e);
            }

            // The receiver may already be gone; the outcome is discarded
            let _ = tx.send(ResolveOutcome { title, result }).await;
        });
    }

    rx
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::WikiApiClient;
    use crate::config::{ApiConfig, UserAgentConfig};
    use crate::storage::{shared, SqliteLinkCache};
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn link_source(server: &MockServer) -> LinkSource {
        let api = ApiConfig {
            parse_endpoint: format!("{}/w/api.php", server.uri()),
            ..ApiConfig::default()
        };
        let client = WikiApiClient::new(&api, &UserAgentConfig::default()).unwrap();
        LinkSource::new(shared(SqliteLinkCache::new_in_memory().unwrap()), client)
    }

    async fn mount_page(server: &MockServer, title: &str, links: &[&str]) {
        Mock::given(method("GET"))
            .and(path("/w/api.php"))
            .and(query_param("page", title))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "parse": {
                    "links": links.iter().map(|l| json!({ "ns": 0, "*": l })).collect::<Vec<_>>()
                }
            })))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_batch_reports_every_title() {
        let server = MockServer::start().await;
        mount_page(&server, "A", &["B"]).await;
        mount_page(&server, "B", &["C"]).await;

        let source = link_source(&server);
        let titles = vec![Title::normalize("A"), Title::normalize("B")];

        let mut rx = resolve_many(&source, titles, 4);
        let mut outcomes = Vec::new();
        while let Some(outcome) = rx.recv().await {
            outcomes.push(outcome);
        }

        assert_eq!(outcomes.len(), 2);
        assert!(outcomes.iter().all(|o| o.result.is_ok()));
    }

    #[tokio::test]
    async fn test_one_failure_never_aborts_the_batch() {
        let server = MockServer::start().await;
        mount_page(&server, "Good", &["Other"]).await;

        Mock::given(method("GET"))
            .and(path("/w/api.php"))
            .and(query_param("page", "Bad"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let source = link_source(&server);
        let titles = vec![Title::normalize("Good"), Title::normalize("Bad")];

        let mut rx = resolve_many(&source, titles, 2);
        let mut ok = 0;
        let mut failed = 0;
        while let Some(outcome) = rx.recv().await {
            match outcome.result {
                Ok(_) => ok += 1,
                Err(ResolveError::NotFound(_)) => failed += 1,
                Err(e) => panic!("unexpected error: {}", e),
            }
        }

        assert_eq!(ok, 1);
        assert_eq!(failed, 1);
    }

    #[tokio::test]
    async fn test_empty_batch_closes_immediately() {
        let server = MockServer::start().await;
        let source = link_source(&server);

        let mut rx = resolve_many(&source, Vec::new(), 4);
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_dropped_receiver_discards_results_but_cache_writes_land() {
        let server = MockServer::start().await;
        mount_page(&server, "A", &["B"]).await;

        let api = ApiConfig {
            parse_endpoint: format!("{}/w/api.php", server.uri()),
            ..ApiConfig::default()
        };
        let client = WikiApiClient::new(&api, &UserAgentConfig::default()).unwrap();
        let store = shared(SqliteLinkCache::new_in_memory().unwrap());
        let source = LinkSource::new(Arc::clone(&store), client);

        let rx = resolve_many(&source, vec![Title::normalize("A")], 1);
        drop(rx);

        // The in-flight fetch runs to completion; its cache write lands even
        // though the outcome has nowhere to go
        let title = Title::normalize("A");
        for _ in 0..100 {
            if store.lock().unwrap().contains(&title).unwrap() {
                return;
            }
            tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        }
        panic!("cache write never landed after the receiver was dropped");
    }

    #[tokio::test]
    async fn test_zero_limit_is_clamped() {
        let server = MockServer::start().await;
        mount_page(&server, "A", &[]).await;

        let source = link_source(&server);
        let mut rx = resolve_many(&source, vec![Title::normalize("A")], 0);

        let outcome = rx.recv().await.unwrap();
        assert!(outcome.result.is_ok());
    }
}
