//! Breadth-first path search over the article link graph
//!
//! The graph is implicit: nodes are article titles, edges are hyperlinks, and
//! neighbor sets materialize lazily through the link source as the search
//! advances. Each BFS level is fully drained before the next begins, so the
//! first path found is shortest in hop count. All search-state mutation
//! happens on the coordinating task; only fetches run concurrently.

use crate::graph::{self, Node};
use crate::resolve::{LinkSource, ResolveError};
use crate::title::Title;
use crate::WikiError;
use std::collections::{HashMap, HashSet};

/// The terminal outcome of a path search
///
/// `NotReachable` is an outcome, not an error: the two articles are simply
/// not connected within the depth limit given the currently resolvable links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathOutcome {
    /// An ordered sequence of titles from source to target inclusive
    Found(Vec<Title>),

    /// No path within the depth limit
    NotReachable,
}

impl PathOutcome {
    /// Returns true if a path was found
    pub fn is_found(&self) -> bool {
        matches!(self, PathOutcome::Found(_))
    }

    /// Returns the path if one was found
    pub fn path(&self) -> Option<&[Title]> {
        match self {
            PathOutcome::Found(path) => Some(path),
            PathOutcome::NotReachable => None,
        }
    }
}

/// Searches for a shortest hyperlink path between two articles
pub struct PathFinder {
    link_source: LinkSource,
    max_concurrent: usize,
}

impl PathFinder {
    /// Creates a path finder over a link source
    ///
    /// # Arguments
    ///
    /// * `link_source` - Cache-first resolver shared with fetch workers
    /// * `max_concurrent` - Bound on concurrent fetches per BFS level
    pub fn new(link_source: LinkSource, max_concurrent: usize) -> Self {
        Self {
            link_source,
            max_concurrent,
        }
    }

    /// Finds a shortest path of hyperlink hops from `source` to `target`
    ///
    /// Titles are normalized before the search. A source or target that does
    /// not resolve to any article fails with [`WikiError::TitleNotFound`];
    /// individual neighbor failures during the search are skipped, never
    /// fatal.
    ///
    /// # Arguments
    ///
    /// * `source` - Raw source article title
    /// * `target` - Raw target article title
    /// * `max_depth` - Maximum number of hops to search
    ///
    /// # Returns
    ///
    /// * `Ok(PathOutcome::Found(path))` - Shortest path, source and target
    ///   inclusive
    /// * `Ok(PathOutcome::NotReachable)` - No path within `max_depth` hops
    /// * `Err(_)` - Unresolvable source/target or a storage failure
    pub async fn find_path(
        &self,
        source: &str,
        target: &str,
        max_depth: u32,
    ) -> Result<PathOutcome, WikiError> {
        let source = Title::normalize(source);
        let target = Title::normalize(target);

        for title in [&source, &target] {
            if title.as_str().is_empty() || title.is_special_namespace() {
                return Err(WikiError::TitleNotFound(title.clone()));
            }
        }

        // Zero fetches for the trivial case
        if source == target {
            return Ok(PathOutcome::Found(vec![source]));
        }

        // The source must resolve or there is nothing to expand
        let mut start = Node::new(source.clone());
        match start.neighbors(&self.link_source).await {
            Ok(_) => {}
            Err(ResolveError::NotFound(_)) => return Err(WikiError::TitleNotFound(source)),
            Err(e) => return Err(e.into()),
        }

        // Verify the target exists before walking the graph towards it; this
        // also primes the cache for the final hop
        match self.link_source.resolve(&target).await {
            Ok(_) => {}
            Err(ResolveError::NotFound(_)) => return Err(WikiError::TitleNotFound(target)),
            Err(ResolveError::Transient { title, message }) => {
                tracing::warn!(
                    "Could not verify target '{}' ({}); searching anyway",
                    title,
                    message
                );
            }
            Err(e) => return Err(e.into()),
        }

        tracing::info!(
            "Searching for a path '{}' -> '{}' (max {} hops)",
            source,
            target,
            max_depth
        );

        let mut visited: HashSet<Title> = HashSet::from([source.clone()]);
        let mut predecessors: HashMap<Title, Title> = HashMap::new();
        let mut frontier = vec![start];

        for depth in 0..max_depth {
            // Scan the resolved frontier on the coordinating task; this is
            // the level barrier that makes the first find a shortest path
            let mut discovered: Vec<Title> = Vec::new();

            for node in &frontier {
                let links = match node.links() {
                    Some(links) => links,
                    None => continue,
                };

                for link in links {
                    if !visited.insert(link.clone()) {
                        continue;
                    }
                    predecessors.insert(link.clone(), node.title().clone());

                    if *link == target {
                        tracing::info!("Reached '{}' after {} hops", target, depth + 1);
                        return Ok(PathOutcome::Found(reconstruct_path(
                            &predecessors,
                            &source,
                            &target,
                        )));
                    }

                    discovered.push(link.clone());
                }
            }

            // Depth limit reached: stop issuing further fetches
            if depth + 1 >= max_depth || discovered.is_empty() {
                break;
            }

            tracing::debug!(
                "Depth {}: expanding {} newly discovered titles ({} visited)",
                depth + 1,
                discovered.len(),
                visited.len()
            );

            frontier =
                graph::resolve_nodes(discovered, &self.link_source, self.max_concurrent).await?;

            if frontier.is_empty() {
                break;
            }
        }

        Ok(PathOutcome::NotReachable)
    }
}

/// Walks the predecessor map from target back to source and reverses
fn reconstruct_path(
    predecessors: &HashMap<Title, Title>,
    source: &Title,
    target: &Title,
) -> Vec<Title> {
    let mut path = vec![target.clone()];
    let mut current = target.clone();

    // The source is the only visited title without a predecessor
    while let Some(previous) = predecessors.get(&current) {
        path.push(previous.clone());
        current = previous.clone();
    }

    debug_assert_eq!(path.last(), Some(source));
    path.reverse();
    path
}
