//! Sitemap resolver - enumerates the origin's pages
//!
//! Resolution order:
//! 1. `{base}/sitemap.xml`, following a sitemap index one level deep
//! 2. Same-origin link discovery on the homepage
//! 3. The base URL alone
//!
//! Every step degrades to the next one; resolution never fails.

use crate::config::CrawlerConfig;
use crate::crawler::discovery::{discover_pages, HOME_PRIORITY};
use crate::crawler::fetcher::{fetch_url, FetchError};
use crate::crawler::paths::project_paths;
use crate::crawler::sitemap::{parse_sitemap, PageDescriptor, SitemapDocument, SitemapError};
use crate::url::sitemap_url_for;
use futures::stream::{self, StreamExt};
use reqwest::Client;
use std::collections::HashSet;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Why manual discovery produced nothing
#[derive(Debug, Error)]
enum DiscoveryError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("invalid base URL: {0}")]
    BaseUrl(#[from] url::ParseError),
}

/// Resolves an origin base URL into its ordered list of pages
#[derive(Debug, Clone)]
pub struct SitemapResolver {
    client: Client,
    max_sitemap_fanout: usize,
    max_concurrency: usize,
}

impl SitemapResolver {
    /// Creates a resolver that fetches through `client`
    ///
    /// The client's timeout bounds every sitemap and homepage request.
    pub fn new(client: Client, config: &CrawlerConfig) -> Self {
        Self {
            client,
            max_sitemap_fanout: config.max_sitemap_fanout.max(1),
            max_concurrency: config.max_batch_concurrency.max(1),
        }
    }

    /// Resolves the pages of the origin at `base_url`
    ///
    /// Never fails and never returns an empty list: when both the sitemap and
    /// link discovery fail, the result is the base URL alone at priority 1.0.
    ///
    /// # Ordering
    ///
    /// Pages keep the document order of their sitemap. Pages from a sitemap
    /// index are grouped per child sitemap, in the order the index lists them.
    pub async fn resolve_pages(&self, base_url: &str) -> Vec<PageDescriptor> {
        let sitemap_url = sitemap_url_for(base_url);

        match self.fetch_sitemap_pages(&sitemap_url).await {
            Ok(pages) if !pages.is_empty() => {
                info!("Found {} pages in sitemap {}", pages.len(), sitemap_url);
                pages
            }
            Ok(_) => {
                warn!(
                    "No pages found in sitemap at {}, falling back to manual discovery",
                    sitemap_url
                );
                self.discover(base_url).await
            }
            Err(e) => {
                warn!(
                    "Error reading sitemap {}: {}; falling back to manual discovery",
                    sitemap_url, e
                );
                self.discover(base_url).await
            }
        }
    }

    /// Resolves the origin's pages and projects them onto local route paths
    pub async fn resolve_paths(&self, base_url: &str) -> Vec<String> {
        let pages = self.resolve_pages(base_url).await;
        project_paths(base_url, &pages)
    }

    /// Fetches a sitemap and, for an index, every child sitemap it lists
    async fn fetch_sitemap_pages(
        &self,
        sitemap_url: &str,
    ) -> Result<Vec<PageDescriptor>, SitemapError> {
        match self.fetch_document(sitemap_url).await? {
            SitemapDocument::UrlSet(pages) => Ok(pages),
            SitemapDocument::Index(children) => {
                info!(
                    "Found sitemap index at {} listing {} sitemaps",
                    sitemap_url,
                    children.len()
                );
                Ok(self.fetch_child_sitemaps(children).await)
            }
        }
    }

    /// Fetches child sitemaps with bounded concurrency
    ///
    /// Children are deduplicated and capped at the configured fan-out. A child
    /// that fails is skipped; the others still contribute. Results are
    /// concatenated in listing order.
    async fn fetch_child_sitemaps(&self, children: Vec<String>) -> Vec<PageDescriptor> {
        let mut visited = HashSet::new();
        let children: Vec<String> = children
            .into_iter()
            .filter(|url| visited.insert(url.clone()))
            .collect();

        if children.len() > self.max_sitemap_fanout {
            warn!(
                "Sitemap index lists {} sitemaps, following the first {}",
                children.len(),
                self.max_sitemap_fanout
            );
        }

        let batches: Vec<Vec<PageDescriptor>> = stream::iter(
            children.into_iter().take(self.max_sitemap_fanout),
        )
        .map(|url| async move {
            match self.fetch_document(&url).await {
                Ok(SitemapDocument::UrlSet(pages)) => {
                    debug!("Found {} pages in child sitemap {}", pages.len(), url);
                    pages
                }
                Ok(SitemapDocument::Index(_)) => {
                    debug!("Skipping nested sitemap index {}", url);
                    Vec::new()
                }
                Err(e) => {
                    warn!("Failed to fetch sitemap {}: {}", url, e);
                    Vec::new()
                }
            }
        })
        .buffered(self.max_concurrency)
        .collect()
        .await;

        batches.into_iter().flatten().collect()
    }

    async fn fetch_document(&self, url: &str) -> Result<SitemapDocument, SitemapError> {
        let fetched = fetch_url(&self.client, url).await?;
        parse_sitemap(&fetched.body)
    }

    /// Manual discovery with the single-entry fallback
    async fn discover(&self, base_url: &str) -> Vec<PageDescriptor> {
        match self.discover_manually(base_url).await {
            Ok(pages) => {
                info!("Discovered {} pages by following links", pages.len());
                pages
            }
            Err(e) => {
                warn!("Manual page discovery failed for {}: {}", base_url, e);
                vec![PageDescriptor::new(base_url.trim()).with_priority(HOME_PRIORITY)]
            }
        }
    }

    async fn discover_manually(&self, base_url: &str) -> Result<Vec<PageDescriptor>, DiscoveryError> {
        let homepage = fetch_url(&self.client, base_url.trim()).await?;
        Ok(discover_pages(&homepage.body, base_url)?)
    }
}
