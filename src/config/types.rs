use serde::Deserialize;

/// Main configuration structure for wikipath
///
/// Every field has a default, so the CLI runs without a config file.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub cache: CacheConfig,
    pub search: SearchConfig,
    pub ingest: IngestConfig,
}

/// Remote API endpoints
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// MediaWiki action API endpoint used to fetch an article's links
    #[serde(rename = "parse-endpoint")]
    pub parse_endpoint: String,

    /// Wikimedia pageviews REST endpoint used for bulk top-article ingestion
    #[serde(rename = "pageviews-endpoint")]
    pub pageviews_endpoint: String,
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the client
    #[serde(rename = "client-name")]
    pub client_name: String,

    /// Version of the client
    #[serde(rename = "client-version")]
    pub client_version: String,

    /// URL with information about the client
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for client-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

/// Link cache configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Path to the SQLite link cache database
    #[serde(rename = "database-path")]
    pub database_path: String,
}

/// Path search configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Maximum number of link hops from source to target
    #[serde(rename = "max-depth")]
    pub max_depth: u32,

    /// Maximum number of concurrent link fetches during a search
    #[serde(rename = "max-concurrent-fetches")]
    pub max_concurrent_fetches: u32,
}

/// Bulk ingestion configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Maximum number of concurrent link fetches while priming the cache
    #[serde(rename = "max-concurrent-fetches")]
    pub max_concurrent_fetches: u32,

    /// How many resolved titles between progress log lines
    #[serde(rename = "progress-interval")]
    pub progress_interval: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            user_agent: UserAgentConfig::default(),
            cache: CacheConfig::default(),
            search: SearchConfig::default(),
            ingest: IngestConfig::default(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            parse_endpoint: "https://en.wikipedia.org/w/api.php".to_string(),
            pageviews_endpoint:
                "https://wikimedia.org/api/rest_v1/metrics/pageviews/top/en.wikipedia.org/all-access"
                    .to_string(),
        }
    }
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            client_name: "wikipath".to_string(),
            client_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: "https://github.com/wikipath/wikipath".to_string(),
            contact_email: "wikipath@example.com".to_string(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            database_path: "./wikipath.db".to_string(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: 5,
            max_concurrent_fetches: 16,
        }
    }
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            max_concurrent_fetches: 8,
            progress_interval: 50,
        }
    }
}
