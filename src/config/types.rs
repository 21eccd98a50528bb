use serde::Deserialize;
use std::time::Duration;

/// Main configuration structure for Seo-Mirror
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub origin: OriginConfig,
    #[serde(default)]
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub site: SiteDefaults,
    #[serde(default)]
    pub fallback: FallbackContent,
}

impl Config {
    /// Builds a configuration with default settings for the given origin
    ///
    /// # Example
    ///
    /// ```
    /// use seo_mirror::config::Config;
    ///
    /// let config = Config::new("https://example.com");
    /// assert_eq!(config.crawler.max_sitemap_fanout, 10);
    /// assert_eq!(config.cache.ttl_secs, 3600);
    /// ```
    pub fn new(origin_url: impl Into<String>) -> Self {
        Self {
            origin: OriginConfig {
                url: origin_url.into(),
            },
            gateway: GatewayConfig::default(),
            crawler: CrawlerConfig::default(),
            cache: CacheConfig::default(),
            user_agent: UserAgentConfig::default(),
            site: SiteDefaults::default(),
            fallback: FallbackContent::default(),
        }
    }
}

/// The mirrored origin site
#[derive(Debug, Clone, Deserialize)]
pub struct OriginConfig {
    /// Base URL of the origin (scheme, host and optional base path)
    pub url: String,
}

/// The local gateway that serves the mirrored metadata
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    /// Public base URL of the gateway, used for the mirrored sitemap
    #[serde(rename = "site-url")]
    pub site_url: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            site_url: "http://localhost:3000".to_string(),
        }
    }
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Whole-request timeout for every origin fetch (seconds)
    #[serde(rename = "fetch-timeout-secs")]
    pub fetch_timeout_secs: u64,

    /// Connection establishment timeout (seconds)
    #[serde(rename = "connect-timeout-secs")]
    pub connect_timeout_secs: u64,

    /// Maximum number of child sitemaps followed from a sitemap index
    #[serde(rename = "max-sitemap-fanout")]
    pub max_sitemap_fanout: usize,

    /// Maximum number of origin fetches in flight for batch work
    #[serde(rename = "max-batch-concurrency")]
    pub max_batch_concurrency: usize,
}

impl CrawlerConfig {
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            fetch_timeout_secs: 10,
            connect_timeout_secs: 5,
            max_sitemap_fanout: 10,
            max_batch_concurrency: 4,
        }
    }
}

/// Extraction cache configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Time-to-live for cached content summaries (seconds)
    #[serde(rename = "ttl-secs")]
    pub ttl_secs: u64,
}

impl CacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { ttl_secs: 3600 }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "SeoMirrorBot".to_string(),
            crawler_version: "1.0".to_string(),
            contact_url: "https://github.com/seo-mirror/seo-mirror".to_string(),
        }
    }
}

/// Per-field defaults applied when a fetched page lacks a value
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteDefaults {
    /// Used as the title when neither `<title>` nor `og:title` is present
    pub name: String,

    /// Used when neither the description nor `og:description` meta is present
    pub description: String,
}

impl Default for SiteDefaults {
    fn default() -> Self {
        Self {
            name: "Mirrored Site".to_string(),
            description: "Mirrored content served by the SEO gateway".to_string(),
        }
    }
}

/// Content served in place of a page whose extraction failed
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FallbackContent {
    pub title: String,
    pub description: String,
    pub keywords: String,
    pub headings: Vec<String>,
    pub paragraphs: Vec<String>,
}

impl Default for FallbackContent {
    fn default() -> Self {
        Self {
            title: "Mirrored Site".to_string(),
            description: "Mirrored content served by the SEO gateway".to_string(),
            keywords: String::new(),
            headings: vec!["Mirrored Site".to_string()],
            paragraphs: Vec::new(),
        }
    }
}
