//! Lazily-resolved graph nodes
//!
//! A [`Node`] wraps one article title with its outbound link set, resolved
//! through the [`LinkSource`] at most once and memoized for the node's
//! lifetime. Nodes exist only for the duration of a single search; the
//! persistent cache is what survives.

use crate::resolve::{resolve_many, LinkSource, ResolveError};
use crate::title::{LinkSet, Title};

/// One article as a node of the implicit link graph
#[derive(Debug)]
pub struct Node {
    title: Title,
    links: Option<LinkSet>,
}

impl Node {
    /// Creates a node whose link set has not been resolved yet
    pub fn new(title: Title) -> Self {
        Self { title, links: None }
    }

    /// Creates a node with an already-resolved link set
    pub fn with_links(title: Title, links: LinkSet) -> Self {
        Self {
            title,
            links: Some(links),
        }
    }

    /// Returns the node's title
    pub fn title(&self) -> &Title {
        &self.title
    }

    /// Returns the link set if it has been resolved
    pub fn links(&self) -> Option<&LinkSet> {
        self.links.as_ref()
    }

    /// Returns the node's outbound links, resolving them on first access
    ///
    /// The link set is memoized: the link source is consulted exactly once
    /// per node, and a cache hit there makes even that cheap.
    pub async fn neighbors(&mut self, source: &LinkSource) -> Result<&LinkSet, ResolveError> {
        if self.links.is_none() {
            self.links = Some(source.resolve(&self.title).await?);
        }
        Ok(self.links.get_or_insert_with(LinkSet::new))
    }

    /// Produces the nodes directly reachable from this one
    ///
    /// Every returned node has its link set resolved. Neighbors that fail to
    /// resolve are omitted rather than failing the expansion; a node whose
    /// own links cannot be resolved expands to the empty set. Only storage
    /// failures propagate.
    pub async fn expand(
        &mut self,
        source: &LinkSource,
        limit: usize,
    ) -> Result<Vec<Node>, ResolveError> {
        let links = match self.neighbors(source).await {
            Ok(links) => links.clone(),
            Err(e @ ResolveError::Storage(_)) => return Err(e),
            Err(e) => {
                tracing::debug!("Node '{}' has no reachable links: {}", self.title, e);
                return Ok(Vec::new());
            }
        };

        resolve_nodes(links.into_iter().collect(), source, limit).await
    }
}

/// Resolves a set of titles into nodes concurrently
///
/// Titles that fail with `NotFound` or `Transient` are dropped (the edge is
/// simply not discovered this round); storage failures abort the whole
/// resolution.
pub async fn resolve_nodes(
    titles: Vec<Title>,
    source: &LinkSource,
    limit: usize,
) -> Result<Vec<Node>, ResolveError> {
    let mut rx = resolve_many(source, titles, limit);
    let mut nodes = Vec::new();

    while let Some(outcome) = rx.recv().await {
        match outcome.result {
            Ok(links) => nodes.push(Node::with_links(outcome.title, links)),
            Err(e @ ResolveError::Storage(_)) => return Err(e),
            Err(e) => {
                tracing::debug!("Dropping unresolvable node '{}': {}", outcome.title, e);
            }
        }
    }

    Ok(nodes)
}
