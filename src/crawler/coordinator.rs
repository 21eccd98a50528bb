//! Mirror coordinator - ties discovery, extraction and caching together
//!
//! The coordinator owns the one HTTP client and the one extraction cache of
//! the process and hands them to the resolver and extractor. Batch operations
//! (bulk export, revalidation) run with bounded concurrency and report
//! results in path order.

use crate::cache::ExtractionCache;
use crate::config::{validate, Config};
use crate::crawler::fetcher::build_http_client;
use crate::crawler::paths::project_paths;
use crate::crawler::resolver::SitemapResolver;
use crate::crawler::sitemap::PageDescriptor;
use crate::extract::{ContentExtractor, ContentSummary};
use crate::output::{build_mirrored_sitemap, SitemapUrl};
use crate::url::page_url_for;
use crate::MirrorError;
use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use serde::Serialize;
use std::sync::Arc;

/// A page whose extraction succeeded
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportedPage {
    pub path: String,
    pub url: String,
    pub seo: ContentSummary,
}

/// A page that was served fallback content
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportFailure {
    pub path: String,
    pub url: String,
    pub error: String,
}

/// Content summaries for every projected path, split by outcome
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkExport {
    pub total_pages: usize,
    pub successful: Vec<ExportedPage>,
    pub failed: Vec<ExportFailure>,
    pub generated_at: DateTime<Utc>,
}

/// Outcome of refreshing one path
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "error", rename_all = "camelCase")]
pub enum RevalidationStatus {
    /// A fresh extraction replaced the cached entry
    Refreshed,

    /// Extraction failed; fallback content was produced and the cache left as is
    Fallback(String),
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RevalidatedPath {
    pub path: String,
    pub url: String,
    #[serde(flatten)]
    pub status: RevalidationStatus,
}

/// Result of a revalidation run
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RevalidationReport {
    pub paths: Vec<RevalidatedPath>,
    pub total: usize,
    pub generated_at: DateTime<Utc>,
}

impl RevalidationReport {
    /// Number of paths that were refreshed successfully
    pub fn refreshed(&self) -> usize {
        self.paths
            .iter()
            .filter(|p| p.status == RevalidationStatus::Refreshed)
            .count()
    }
}

/// Main coordinator structure
#[derive(Debug, Clone)]
pub struct Coordinator {
    config: Arc<Config>,
    resolver: SitemapResolver,
    extractor: ContentExtractor,
    cache: Arc<ExtractionCache>,
}

impl Coordinator {
    /// Creates a new coordinator instance
    ///
    /// # Arguments
    ///
    /// * `config` - The mirror configuration; it is validated first
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Successfully created coordinator
    /// * `Err(MirrorError)` - Invalid configuration or HTTP client failure
    ///
    /// # Example
    ///
    /// ```no_run
    /// use seo_mirror::config::Config;
    /// use seo_mirror::Coordinator;
    ///
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let coordinator = Coordinator::new(Config::new("https://example.framer.website"))?;
    /// for path in coordinator.page_paths().await {
    ///     println!("{}", path);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(config: Config) -> Result<Self, MirrorError> {
        validate(&config)?;

        let client = build_http_client(&config)?;
        let cache = Arc::new(ExtractionCache::new(config.cache.ttl()));
        let resolver = SitemapResolver::new(client.clone(), &config.crawler);
        let extractor = ContentExtractor::new(client, Arc::clone(&cache), &config);

        tracing::debug!(
            "Coordinator ready for {} (cache TTL {}s)",
            config.origin.url,
            config.cache.ttl_secs
        );

        Ok(Self {
            config: Arc::new(config),
            resolver,
            extractor,
            cache,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The shared extraction cache
    pub fn cache(&self) -> &Arc<ExtractionCache> {
        &self.cache
    }

    fn origin_url(&self) -> &str {
        &self.config.origin.url
    }

    /// Resolves the origin's pages
    pub async fn resolve_pages(&self) -> Vec<PageDescriptor> {
        self.resolver.resolve_pages(self.origin_url()).await
    }

    /// Resolves the origin's pages and projects them onto local route paths
    pub async fn page_paths(&self) -> Vec<String> {
        self.resolver.resolve_paths(self.origin_url()).await
    }

    /// Extracts `url`, or the origin home page when `url` is None
    pub async fn extract(&self, url: Option<&str>) -> ContentSummary {
        let url = url.unwrap_or_else(|| self.origin_url());
        self.extractor.extract(url).await
    }

    /// Extracts every projected path and splits the results by outcome
    ///
    /// Cached summaries are reused. Results keep path order.
    pub async fn bulk_export(&self) -> BulkExport {
        let paths = self.page_paths().await;
        tracing::info!("Exporting {} pages", paths.len());

        let results: Vec<(String, String, ContentSummary)> = stream::iter(paths)
            .map(|path| async move {
                let url = page_url_for(self.origin_url(), &path);
                let summary = self.extractor.extract(&url).await;
                (path, url, summary)
            })
            .buffered(self.config.crawler.max_batch_concurrency.max(1))
            .collect()
            .await;

        let total_pages = results.len();
        let mut successful = Vec::new();
        let mut failed = Vec::new();

        for (path, url, seo) in results {
            match seo.extraction_error.clone() {
                Some(error) => failed.push(ExportFailure { path, url, error }),
                None => successful.push(ExportedPage { path, url, seo }),
            }
        }

        tracing::info!(
            "Export complete: {} successful, {} failed",
            successful.len(),
            failed.len()
        );

        BulkExport {
            total_pages,
            successful,
            failed,
            generated_at: Utc::now(),
        }
    }

    /// Re-resolves the origin's paths and refreshes every page, bypassing the cache
    pub async fn revalidate(&self) -> RevalidationReport {
        let paths = self.page_paths().await;
        tracing::info!("Revalidating {} paths", paths.len());

        let paths: Vec<RevalidatedPath> = stream::iter(paths)
            .map(|path| async move {
                let url = page_url_for(self.origin_url(), &path);
                let status = match self.extractor.refresh(&url).await.extraction_error {
                    Some(error) => RevalidationStatus::Fallback(error),
                    None => RevalidationStatus::Refreshed,
                };
                RevalidatedPath { path, url, status }
            })
            .buffered(self.config.crawler.max_batch_concurrency.max(1))
            .collect()
            .await;

        let report = RevalidationReport {
            total: paths.len(),
            paths,
            generated_at: Utc::now(),
        };
        tracing::info!(
            "Revalidation complete: {}/{} refreshed",
            report.refreshed(),
            report.total
        );
        report
    }

    /// Builds the gateway's sitemap from the origin's pages
    pub async fn mirrored_sitemap(&self) -> Vec<SitemapUrl> {
        let pages = self.resolve_pages().await;
        build_mirrored_sitemap(&pages, &self.config.gateway.site_url)
    }

    /// Projects already-resolved pages onto local route paths
    pub fn project(&self, pages: &[PageDescriptor]) -> Vec<String> {
        project_paths(self.origin_url(), pages)
    }
}
