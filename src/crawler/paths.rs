//! Path projection: origin pages to local route paths

use crate::crawler::sitemap::PageDescriptor;
use crate::url::same_origin;
use std::collections::HashSet;
use url::Url;

/// Projects page descriptors onto the gateway's local route paths
///
/// # Projection Rules
///
/// 1. Pages on another origin than `base_url` are dropped
/// 2. Each page maps to its URL path; `/` stays `/`
/// 3. One trailing slash is stripped from every other path
/// 4. Duplicates are removed, keeping first-seen order
///
/// Unparseable page URLs are skipped. An unparseable `base_url` yields no
/// paths.
///
/// # Example
///
/// ```
/// use seo_mirror::crawler::{project_paths, PageDescriptor};
///
/// let pages = vec![
///     PageDescriptor::new("https://example.test/"),
///     PageDescriptor::new("https://example.test/about/"),
///     PageDescriptor::new("https://example.test/about"),
///     PageDescriptor::new("https://elsewhere.test/blog"),
/// ];
/// assert_eq!(project_paths("https://example.test", &pages), vec!["/", "/about"]);
/// ```
pub fn project_paths(base_url: &str, pages: &[PageDescriptor]) -> Vec<String> {
    let Ok(base) = Url::parse(base_url.trim()) else {
        tracing::warn!("Cannot project paths for invalid base URL {}", base_url);
        return Vec::new();
    };

    let mut seen = HashSet::new();
    pages
        .iter()
        .filter_map(|page| Url::parse(&page.url).ok())
        .filter(|url| same_origin(url, &base))
        .map(|url| route_path(url.path()))
        .filter(|path| seen.insert(path.clone()))
        .collect()
}

fn route_path(path: &str) -> String {
    if path == "/" || path.is_empty() {
        return "/".to_string();
    }
    path.strip_suffix('/').unwrap_or(path).to_string()
}
