//! Wikipath: a Wikipedia link-path solver
//!
//! This crate builds a locally cached graph of Wikipedia articles connected by
//! hyperlinks and searches it for a shortest path of links between two articles
//! (the "wiki game"). Link sets are resolved cache-first: a persistent SQLite
//! store is consulted before falling back to the MediaWiki API, and every
//! fetched link set is written back so later searches get cheaper.

pub mod api;
pub mod config;
pub mod graph;
pub mod ingest;
pub mod resolve;
pub mod search;
pub mod storage;
pub mod title;

use thiserror::Error;

/// Main error type for wikipath operations
#[derive(Debug, Error)]
pub enum WikiError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("API error: {0}")]
    Api(#[from] api::ApiError),

    #[error("Resolution error: {0}")]
    Resolve(#[from] resolve::ResolveError),

    #[error("'{0}' does not resolve to any article")]
    TitleNotFound(title::Title),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for wikipath operations
pub type Result<T> = std::result::Result<T, WikiError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use resolve::{LinkSource, ResolveError};
pub use search::{PathFinder, PathOutcome};
pub use title::{LinkSet, Title};
