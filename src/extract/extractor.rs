//! Cached content extraction
//!
//! [`ContentExtractor`] is total: every call produces a usable summary. On a
//! cache miss it fetches the page, and on any failure it serves the configured
//! fallback content. Only successful extractions are cached, so a failing page
//! is retried on the next request.

use crate::cache::ExtractionCache;
use crate::config::{Config, FallbackContent, SiteDefaults};
use crate::crawler::fetch_url;
use crate::extract::fields::summarize_body;
use crate::extract::summary::ContentSummary;
use crate::extract::ExtractError;
use crate::url::parse_base_url;
use reqwest::Client;
use std::sync::Arc;

/// Fetches pages and turns them into cached content summaries
#[derive(Debug, Clone)]
pub struct ContentExtractor {
    client: Client,
    cache: Arc<ExtractionCache>,
    site: SiteDefaults,
    fallback: FallbackContent,
}

impl ContentExtractor {
    /// Creates an extractor sharing `client` and `cache`
    ///
    /// # Arguments
    ///
    /// * `client` - HTTP client, already carrying the fetch timeout
    /// * `cache` - Cache shared with every other consumer in the process
    /// * `config` - Source of the site defaults and fallback content
    pub fn new(client: Client, cache: Arc<ExtractionCache>, config: &Config) -> Self {
        Self {
            client,
            cache,
            site: config.site.clone(),
            fallback: config.fallback.clone(),
        }
    }

    pub fn cache(&self) -> &Arc<ExtractionCache> {
        &self.cache
    }

    /// Returns the content summary for `url`
    ///
    /// A fresh cache entry is served without contacting the origin. Concurrent
    /// misses for the same URL wait on a shared lock, so at most one of them
    /// fetches; the rest read the entry it stored.
    pub async fn extract(&self, url: &str) -> ContentSummary {
        if let Some(hit) = self.cache.get(url) {
            tracing::debug!("Cache hit for {}", url);
            return hit;
        }

        let lock = self.cache.fetch_lock(url);
        let summary = {
            let _guard = lock.lock().await;
            match self.cache.get(url) {
                Some(hit) => {
                    tracing::debug!("Cache filled while waiting for {}", url);
                    hit
                }
                None => self.fetch_and_store(url).await,
            }
        };
        self.cache.release_fetch_lock(url, lock);

        summary
    }

    /// Re-extracts `url` regardless of any cached entry
    ///
    /// A successful result replaces the cached entry. On failure the existing
    /// entry, if any, is left in place and the fallback is returned.
    pub async fn refresh(&self, url: &str) -> ContentSummary {
        let lock = self.cache.fetch_lock(url);
        let summary = {
            let _guard = lock.lock().await;
            self.fetch_and_store(url).await
        };
        self.cache.release_fetch_lock(url, lock);

        summary
    }

    async fn fetch_and_store(&self, url: &str) -> ContentSummary {
        match self.try_extract(url).await {
            Ok(summary) => {
                tracing::info!("Extracted {} ({})", url, summary.title);
                self.cache.put(url, summary.clone());
                summary
            }
            Err(e) => {
                tracing::warn!("Extraction failed for {}: {}", url, e);
                ContentSummary::fallback(url, &self.fallback, &e)
            }
        }
    }

    async fn try_extract(&self, url: &str) -> Result<ContentSummary, ExtractError> {
        let page_url = parse_base_url(url).map_err(|e| ExtractError::InvalidUrl(e.to_string()))?;
        let fetched = fetch_url(&self.client, page_url.as_str()).await?;

        tracing::debug!(
            "Fetched {} ({} bytes, status {})",
            fetched.final_url,
            fetched.body.len(),
            fetched.status_code
        );

        summarize_body(
            &fetched.body,
            fetched.content_type.as_deref(),
            url,
            &page_url,
            &self.site,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawler::build_http_client;
    use std::time::Duration;

    fn extractor() -> ContentExtractor {
        let config = Config::new("https://example.com");
        let client = build_http_client(&config).unwrap();
        let cache = Arc::new(ExtractionCache::new(Duration::from_secs(60)));
        ContentExtractor::new(client, cache, &config)
    }

    #[tokio::test]
    async fn test_invalid_url_yields_fallback() {
        let extractor = extractor();
        let summary = extractor.extract("not a url").await;

        assert!(summary.is_fallback());
        assert_eq!(summary.title, FallbackContent::default().title);
        assert_eq!(summary.canonical_url, "not a url");
        assert!(extractor.cache().is_empty());
    }

    #[tokio::test]
    async fn test_cached_entry_is_served_without_fetch() {
        let extractor = extractor();
        let mut cached = ContentSummary::empty("https://unreachable.invalid/");
        cached.title = "Cached".to_string();
        extractor.cache().put("https://unreachable.invalid/", cached);

        let summary = extractor.extract("https://unreachable.invalid/").await;
        assert_eq!(summary.title, "Cached");
        assert!(!summary.is_fallback());
    }

    #[tokio::test]
    async fn test_failed_extractions_leave_no_fetch_locks() {
        let extractor = extractor();
        for i in 0..20 {
            let summary = extractor.extract(&format!("http://127.0.0.1:9/page-{}", i)).await;
            assert!(summary.is_fallback());
        }
        extractor.refresh("http://127.0.0.1:9/page-0").await;

        assert!(extractor.cache().is_empty());
        assert_eq!(extractor.cache().fetch_lock_count(), 0);
    }

    #[tokio::test]
    async fn test_concurrent_failures_release_shared_lock() {
        let extractor = extractor();
        let url = "http://127.0.0.1:9/shared";

        let (a, b, c) = tokio::join!(
            extractor.extract(url),
            extractor.extract(url),
            extractor.refresh(url)
        );

        assert!(a.is_fallback() && b.is_fallback() && c.is_fallback());
        assert_eq!(extractor.cache().fetch_lock_count(), 0);
    }
}
