use crate::config::types::Config;
use crate::ConfigError;
use url::Url;

/// Validates a parsed configuration
///
/// # Checks
///
/// - Endpoints parse as absolute HTTP(S) URLs
/// - Concurrency limits and max depth are non-zero
/// - User agent fields and the database path are non-empty
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_endpoint(&config.api.parse_endpoint)?;
    validate_endpoint(&config.api.pageviews_endpoint)?;

    if config.search.max_depth == 0 {
        return Err(ConfigError::Validation(
            "search.max-depth must be at least 1".to_string(),
        ));
    }

    if config.search.max_concurrent_fetches == 0 {
        return Err(ConfigError::Validation(
            "search.max-concurrent-fetches must be at least 1".to_string(),
        ));
    }

    if config.ingest.max_concurrent_fetches == 0 {
        return Err(ConfigError::Validation(
            "ingest.max-concurrent-fetches must be at least 1".to_string(),
        ));
    }

    if config.cache.database_path.trim().is_empty() {
        return Err(ConfigError::Validation(
            "cache.database-path must not be empty".to_string(),
        ));
    }

    let ua = &config.user_agent;
    for (field, value) in [
        ("user-agent.client-name", &ua.client_name),
        ("user-agent.client-version", &ua.client_version),
        ("user-agent.contact-url", &ua.contact_url),
        ("user-agent.contact-email", &ua.contact_email),
    ] {
        if value.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "{} must not be empty",
                field
            )));
        }
    }

    Ok(())
}

fn validate_endpoint(endpoint: &str) -> Result<(), ConfigError> {
    let url = Url::parse(endpoint).map_err(|_| ConfigError::InvalidUrl(endpoint.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(endpoint.to_string()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_zero_max_depth_rejected() {
        let mut config = Config::default();
        config.search.max_depth = 0;
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let mut config = Config::default();
        config.search.max_concurrent_fetches = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_bad_endpoint_rejected() {
        let mut config = Config::default();
        config.api.parse_endpoint = "not a url".to_string();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_non_http_endpoint_rejected() {
        let mut config = Config::default();
        config.api.parse_endpoint = "ftp://example.com/api".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_empty_database_path_rejected() {
        let mut config = Config::default();
        config.cache.database_path = "  ".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_empty_user_agent_field_rejected() {
        let mut config = Config::default();
        config.user_agent.contact_email = String::new();
        assert!(validate(&config).is_err());
    }
}
