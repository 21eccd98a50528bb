//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests made to the origin, including:
//! - Building the shared HTTP client with the configured user agent and timeouts
//! - GET requests for sitemaps and pages
//! - Error classification into [`FetchError`]

use crate::config::{Config, UserAgentConfig};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use reqwest::{redirect::Policy, Client};
use thiserror::Error;

/// A successfully fetched origin response
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Final URL after redirects
    pub final_url: String,

    /// HTTP status code
    pub status_code: u16,

    /// Content-Type header value, if the origin sent one
    pub content_type: Option<String>,

    /// Response body, decoded as UTF-8 (lossy)
    pub body: String,
}

/// Why an origin fetch produced no usable response
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    #[error("request to {url} timed out")]
    Timeout { url: String },

    #[error("could not connect to {url}: {message}")]
    Connect { url: String, message: String },

    #[error("{url} returned HTTP {status_code}")]
    Status { url: String, status_code: u16 },

    #[error("failed to read body of {url}: {message}")]
    Body { url: String, message: String },

    #[error("request to {url} failed: {message}")]
    Request { url: String, message: String },
}

impl FetchError {
    /// The URL the failed request was made for
    pub fn url(&self) -> &str {
        match self {
            Self::Timeout { url }
            | Self::Connect { url, .. }
            | Self::Status { url, .. }
            | Self::Body { url, .. }
            | Self::Request { url, .. } => url,
        }
    }

    fn classify(url: &str, error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout {
                url: url.to_string(),
            }
        } else if error.is_connect() {
            Self::Connect {
                url: url.to_string(),
                message: error.to_string(),
            }
        } else {
            Self::Request {
                url: url.to_string(),
                message: error.to_string(),
            }
        }
    }
}

/// Formats the user agent string sent to the origin
///
/// Format: `Mozilla/5.0 (compatible; Name/Version; +ContactURL)`
///
/// ```
/// use seo_mirror::config::UserAgentConfig;
/// use seo_mirror::crawler::user_agent_string;
///
/// let ua = user_agent_string(&UserAgentConfig::default());
/// assert!(ua.starts_with("Mozilla/5.0 (compatible; SeoMirrorBot/1.0"));
/// ```
pub fn user_agent_string(config: &UserAgentConfig) -> String {
    format!(
        "Mozilla/5.0 (compatible; {}/{}; +{})",
        config.crawler_name, config.crawler_version, config.contact_url
    )
}

/// Builds the HTTP client shared by the sitemap resolver and the content extractor
///
/// Every request made through the client is bounded by the configured fetch
/// timeout; connection setup is bounded separately.
///
/// # Example
///
/// ```no_run
/// use seo_mirror::config::Config;
/// use seo_mirror::crawler::build_http_client;
///
/// let config = Config::new("https://example.com");
/// let client = build_http_client(&config).unwrap();
/// ```
pub fn build_http_client(config: &Config) -> Result<Client, reqwest::Error> {
    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT,
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
        ),
    );
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));

    Client::builder()
        .user_agent(user_agent_string(&config.user_agent))
        .default_headers(headers)
        .timeout(config.crawler.fetch_timeout())
        .connect_timeout(config.crawler.connect_timeout())
        .redirect(Policy::limited(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL and classifies any failure
///
/// # Failure Classification
///
/// | Condition | Result |
/// |-----------|--------|
/// | Non-2xx status | `FetchError::Status` |
/// | Timeout | `FetchError::Timeout` |
/// | Connection refused / DNS / TLS | `FetchError::Connect` |
/// | Body read failure | `FetchError::Body` |
/// | Anything else | `FetchError::Request` |
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The URL to fetch
pub async fn fetch_url(client: &Client, url: &str) -> Result<FetchedPage, FetchError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| FetchError::classify(url, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status_code: status.as_u16(),
        });
    }

    let final_url = response.url().to_string();
    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let bytes = response.bytes().await.map_err(|e| {
        if e.is_timeout() {
            FetchError::Timeout {
                url: url.to_string(),
            }
        } else {
            FetchError::Body {
                url: url.to_string(),
                message: e.to_string(),
            }
        }
    })?;

    Ok(FetchedPage {
        final_url,
        status_code: status.as_u16(),
        content_type,
        body: String::from_utf8_lossy(&bytes).into_owned(),
    })
}
