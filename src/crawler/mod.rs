//! Crawler module for origin page discovery
//!
//! This module contains the discovery side of the mirror, including:
//! - HTTP fetching with error classification
//! - Sitemap and sitemap index parsing
//! - Same-origin link discovery when no sitemap is usable
//! - Projection of discovered pages onto local route paths
//! - The coordinator that ties discovery, extraction and caching together

mod coordinator;
mod discovery;
mod fetcher;
mod paths;
mod resolver;
mod sitemap;

pub use coordinator::{
    BulkExport, Coordinator, ExportFailure, ExportedPage, RevalidatedPath, RevalidationReport,
    RevalidationStatus,
};
pub use discovery::{discover_pages, DISCOVERED_PRIORITY, HOME_PRIORITY};
pub use fetcher::{build_http_client, fetch_url, user_agent_string, FetchError, FetchedPage};
pub use paths::project_paths;
pub use resolver::SitemapResolver;
pub use sitemap::{
    parse_sitemap, parse_sitemap_index, parse_urlset, ChangeFrequency, PageDescriptor,
    SitemapDocument, SitemapError,
};
