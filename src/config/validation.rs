use crate::config::types::{CacheConfig, Config, CrawlerConfig, UserAgentConfig};
use crate::ConfigError;
use url::Url;

/// Longest accepted cache TTL: one year
const MAX_TTL_SECS: u64 = 31_536_000;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_http_url("origin.url", &config.origin.url)?;
    validate_http_url("gateway.site-url", &config.gateway.site_url)?;
    validate_crawler_config(&config.crawler)?;
    validate_cache_config(&config.cache)?;
    validate_user_agent_config(&config.user_agent)?;
    Ok(())
}

/// Validates crawler limits
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.fetch_timeout_secs < 1 || config.fetch_timeout_secs > 120 {
        return Err(ConfigError::Validation(format!(
            "fetch-timeout-secs must be between 1 and 120, got {}",
            config.fetch_timeout_secs
        )));
    }

    if config.connect_timeout_secs < 1 || config.connect_timeout_secs > 60 {
        return Err(ConfigError::Validation(format!(
            "connect-timeout-secs must be between 1 and 60, got {}",
            config.connect_timeout_secs
        )));
    }

    if config.max_sitemap_fanout < 1 || config.max_sitemap_fanout > 100 {
        return Err(ConfigError::Validation(format!(
            "max-sitemap-fanout must be between 1 and 100, got {}",
            config.max_sitemap_fanout
        )));
    }

    if config.max_batch_concurrency < 1 || config.max_batch_concurrency > 64 {
        return Err(ConfigError::Validation(format!(
            "max-batch-concurrency must be between 1 and 64, got {}",
            config.max_batch_concurrency
        )));
    }

    Ok(())
}

fn validate_cache_config(config: &CacheConfig) -> Result<(), ConfigError> {
    if config.ttl_secs > MAX_TTL_SECS {
        return Err(ConfigError::Validation(format!(
            "ttl-secs must be at most {}, got {}",
            MAX_TTL_SECS, config.ttl_secs
        )));
    }
    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    // Crawler name: non-empty, alphanumeric + hyphens only
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler-name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler-name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    if config.crawler_version.trim().is_empty() {
        return Err(ConfigError::Validation(
            "crawler-version cannot be empty".to_string(),
        ));
    }

    Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact-url: {}", e)))?;

    Ok(())
}

/// Validates that a configured URL is absolute HTTP(S) with a host
fn validate_http_url(field: &str, value: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {} '{}': {}", field, value, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "{} '{}' must use http or https",
            field, value
        )));
    }

    if url.host_str().is_none() {
        return Err(ConfigError::InvalidUrl(format!(
            "{} '{}' has no host",
            field, value
        )));
    }

    Ok(())
}
