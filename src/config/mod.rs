//! Configuration module for wikipath
//!
//! Handles loading, parsing, and validating TOML configuration files. All
//! sections have defaults, so a config file is optional.
//!
//! # Example
//!
//! ```no_run
//! use wikipath::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("wikipath.toml")).unwrap();
//! println!("Search depth limit: {}", config.search.max_depth);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{ApiConfig, CacheConfig, Config, IngestConfig, SearchConfig, UserAgentConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
