//! Integration tests for Seo-Mirror
//!
//! These tests use wiremock to stand in for the origin site and drive the
//! coordinator end-to-end: page resolution, extraction, caching, and the
//! batch operations built on top of them.

mod batch_tests;
mod discovery_tests;
mod extraction_tests;

use seo_mirror::config::Config;
use wiremock::MockServer;

/// Creates a test configuration pointing at the mock origin
pub fn test_config(server: &MockServer) -> Config {
    let mut config = Config::new(server.uri());
    config.crawler.fetch_timeout_secs = 2;
    config.crawler.connect_timeout_secs = 1;
    config.user_agent.crawler_name = "TestBot".to_string();
    config.gateway.site_url = "https://www.example.com".to_string();
    config
}

/// Wraps `<url>` entries in a urlset document
pub fn urlset(entries: &[String]) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
{}
</urlset>"#,
        entries.join("\n")
    )
}

/// A `<url>` entry with only a location
pub fn url_entry(loc: &str) -> String {
    format!("<url><loc>{}</loc></url>", loc)
}
