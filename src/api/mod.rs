//! Remote Wikipedia API client
//!
//! Two endpoints are consumed:
//! - The MediaWiki action API (`action=parse&prop=links`) to fetch an
//!   article's outbound links.
//! - The Wikimedia pageviews REST API to list the most viewed articles of a
//!   month, used for bulk cache priming.
//!
//! The client distinguishes "no such article" (HTTP 404 or a response with no
//! `parse` payload) from transient failures (timeouts, connection errors,
//! 5xx), which callers may retry at their own discretion. Retries are not
//! performed here.

use crate::config::{ApiConfig, UserAgentConfig};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Errors returned by the remote API client
#[derive(Debug, Error)]
pub enum ApiError {
    /// The remote source has no parseable content for this title
    #[error("no article found for '{title}'")]
    NotFound { title: String },

    /// The response body could not be decoded into the expected payload
    #[error("malformed response from {url}: {message}")]
    Malformed { url: String, message: String },

    /// A non-success HTTP status other than 404
    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    /// Connection, TLS, or timeout failure
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// An endpoint from the configuration did not parse as a URL
    #[error("invalid endpoint URL: {0}")]
    Endpoint(String),
}

impl ApiError {
    /// Returns true if this error means the article does not exist
    ///
    /// Malformed payloads count: a response without usable content is
    /// indistinguishable from a missing article.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ApiError::NotFound { .. }
                | ApiError::Malformed { .. }
                | ApiError::Status { status: 404, .. }
        )
    }
}

/// HTTP client for the Wikipedia APIs
#[derive(Clone)]
pub struct WikiApiClient {
    client: Client,
    parse_endpoint: Url,
    pageviews_endpoint: Url,
}

/// Builds an HTTP client with proper identification and timeouts
///
/// # Arguments
///
/// * `config` - The user agent configuration
pub fn build_http_client(config: &UserAgentConfig) -> Result<Client, reqwest::Error> {
    // Format: ClientName/Version (+ContactURL; ContactEmail)
    let user_agent = format!(
        "{}/{} (+{}; {})",
        config.client_name, config.client_version, config.contact_url, config.contact_email
    );

    Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

// ===== MediaWiki parse API payload =====

#[derive(Debug, Deserialize)]
struct ParseResponse {
    parse: Option<ParsePayload>,
}

#[derive(Debug, Deserialize)]
struct ParsePayload {
    #[serde(default)]
    links: Vec<RawLink>,
}

#[derive(Debug, Deserialize)]
struct RawLink {
    #[serde(rename = "*")]
    title: String,
}

// ===== Pageviews API payload =====

#[derive(Debug, Deserialize)]
struct TopResponse {
    #[serde(default)]
    items: Vec<TopItem>,
}

#[derive(Debug, Deserialize)]
struct TopItem {
    #[serde(default)]
    articles: Vec<TopArticle>,
}

#[derive(Debug, Deserialize)]
struct TopArticle {
    article: Option<String>,
}

impl WikiApiClient {
    /// Creates a client from the API and user agent configuration
    pub fn new(api: &ApiConfig, user_agent: &UserAgentConfig) -> Result<Self, ApiError> {
        let client = build_http_client(user_agent)?;

        let parse_endpoint = Url::parse(&api.parse_endpoint)
            .map_err(|_| ApiError::Endpoint(api.parse_endpoint.clone()))?;
        let pageviews_endpoint = Url::parse(&api.pageviews_endpoint)
            .map_err(|_| ApiError::Endpoint(api.pageviews_endpoint.clone()))?;

        Ok(Self {
            client,
            parse_endpoint,
            pageviews_endpoint,
        })
    }

    /// Fetches the raw outbound link titles of one article
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<String>)` - Raw link titles, unnormalized and unfiltered
    /// * `Err(ApiError::NotFound)` - The article does not exist (404 or a
    ///   response without a `parse` payload)
    /// * `Err(_)` - Transient HTTP or decoding failure
    pub async fn fetch_links(&self, title: &str) -> Result<Vec<String>, ApiError> {
        let mut url = self.parse_endpoint.clone();
        url.query_pairs_mut()
            .append_pair("action", "parse")
            .append_pair("page", title)
            .append_pair("prop", "links")
            .append_pair("redirects", "1")
            .append_pair("format", "json");

        tracing::trace!("Fetching links for '{}'", title);
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound {
                title: title.to_string(),
            });
        }

        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let payload: ParseResponse =
            response.json().await.map_err(|e| ApiError::Malformed {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        // The API reports missing pages as a 200 with an "error" object and
        // no "parse" key
        let parse = payload.parse.ok_or_else(|| ApiError::NotFound {
            title: title.to_string(),
        })?;

        Ok(parse.links.into_iter().map(|link| link.title).collect())
    }

    /// Fetches the most viewed article names for one month
    ///
    /// # Arguments
    ///
    /// * `year` - Four digit year
    /// * `month` - Month number, 1 through 12
    ///
    /// # Returns
    ///
    /// Raw article names from the pageviews ranking. A 404 surfaces as
    /// `ApiError::Status { status: 404, .. }`, which callers use to detect
    /// the end of available data.
    pub async fn fetch_top_articles(&self, year: u16, month: u8) -> Result<Vec<String>, ApiError> {
        let base = self.pageviews_endpoint.as_str().trim_end_matches('/');
        let url_str = format!("{}/{}/{:02}/all-days", base, year, month);
        let url = Url::parse(&url_str).map_err(|_| ApiError::Endpoint(url_str.clone()))?;

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let payload: TopResponse = response.json().await.map_err(|e| ApiError::Malformed {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        let articles = payload
            .items
            .into_iter()
            .next()
            .map(|item| item.articles)
            .unwrap_or_default();

        Ok(articles
            .into_iter()
            .filter_map(|entry| entry.article)
            .collect())
    }
}
