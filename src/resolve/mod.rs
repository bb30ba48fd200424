//! Cache-first link resolution
//!
//! This module contains the resolution strategy for one title ([`LinkSource`])
//! and the bounded-concurrency orchestrator for resolving many titles at once
//! ([`resolve_many`]).

mod orchestrator;

pub use orchestrator::{resolve_many, ResolveOutcome};

use crate::api::WikiApiClient;
use crate::storage::{SharedLinkStore, StorageError};
use crate::title::{LinkSet, Title};
use thiserror::Error;

/// Errors that can occur while resolving a title to its link set
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The remote source has no resolvable content for this title
    ///
    /// Treated by the graph layer as "this node has no outgoing edges".
    #[error("no article found for '{0}'")]
    NotFound(Title),

    /// Network or service failure; may succeed on a later attempt
    ///
    /// The core never retries; callers decide.
    #[error("transient failure resolving '{title}': {message}")]
    Transient { title: Title, message: String },

    /// Persistent cache failure; fatal, always propagated
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Resolves a title to its outbound article links, cache first
///
/// On a cache miss the remote API is queried, the raw links are normalized,
/// special-namespace titles are dropped, and the resulting set is written back
/// to the cache before being returned. Cloning is cheap; clones share the
/// cache and the HTTP connection pool.
#[derive(Clone)]
pub struct LinkSource {
    store: SharedLinkStore,
    client: WikiApiClient,
}

impl LinkSource {
    /// Creates a link source over a shared cache and API client
    pub fn new(store: SharedLinkStore, client: WikiApiClient) -> Self {
        Self { store, client }
    }

    /// Resolves one normalized title to its link set
    ///
    /// # Returns
    ///
    /// * `Ok(LinkSet)` - From the cache, or freshly fetched and cached
    /// * `Err(ResolveError::NotFound)` - No article for this title
    /// * `Err(ResolveError::Transient)` - Fetch failed, not retried here
    /// * `Err(ResolveError::Storage)` - Cache failure
    pub async fn resolve(&self, title: &Title) -> Result<LinkSet, ResolveError> {
        let cached = {
            let store = self.store.lock().unwrap();
            store.lookup(title)?
        };

        if let Some(links) = cached {
            tracing::trace!("Cache hit for '{}' ({} links)", title, links.len());
            return Ok(links);
        }

        let raw = match self.client.fetch_links(title.as_str()).await {
            Ok(raw) => raw,
            Err(e) if e.is_not_found() => return Err(ResolveError::NotFound(title.clone())),
            Err(e) => {
                return Err(ResolveError::Transient {
                    title: title.clone(),
                    message: e.to_string(),
                })
            }
        };

        let links: LinkSet = raw
            .iter()
            .map(|raw_title| Title::normalize(raw_title))
            .filter(|link| !link.as_str().is_empty() && !link.is_special_namespace())
            .collect();

        {
            // A concurrent resolution of the same title may have won the
            // race; the duplicate write is a no-op
            let mut store = self.store.lock().unwrap();
            store.store(title, &links)?;
        }

        tracing::debug!("Fetched and cached {} links for '{}'", links.len(), title);
        Ok(links)
    }
}
