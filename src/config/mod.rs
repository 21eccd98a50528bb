//! Configuration module for Seo-Mirror
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use seo_mirror::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("mirror.toml")).unwrap();
//! println!("Mirroring origin: {}", config.origin.url);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    CacheConfig, Config, CrawlerConfig, FallbackContent, GatewayConfig, OriginConfig,
    SiteDefaults, UserAgentConfig,
};

pub use parser::{load_config, parse_config};
pub use validation::validate;
