//! Seo-Mirror: origin discovery and metadata extraction for an SEO gateway
//!
//! This crate crawls a third-party origin site's sitemap (or its homepage links
//! when no sitemap exists), extracts bounded per-page content summaries from
//! static HTML, and keeps them in a TTL cache so a gateway can serve metadata
//! and a mirrored sitemap without hitting the origin on every request.

pub mod cache;
pub mod config;
pub mod crawler;
pub mod extract;
pub mod output;
pub mod url;

use thiserror::Error;

/// Main error type for Seo-Mirror operations
///
/// The discovery and extraction entry points never return this type; they
/// degrade to fallback content instead. It covers coordinator setup.
#[derive(Debug, Error)]
pub enum MirrorError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),
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

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL")]
    MissingHost,
}

/// Result type alias for Seo-Mirror operations
pub type Result<T> = std::result::Result<T, MirrorError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use cache::ExtractionCache;
pub use config::Config;
pub use crawler::{project_paths, Coordinator, PageDescriptor, SitemapResolver};
pub use extract::{ContentExtractor, ContentSummary, ImageRef};
