//! Same-origin link discovery for sites without a usable sitemap
//!
//! This module scans a homepage's anchors and turns them into page
//! descriptors:
//! - The homepage itself is always the first entry, at priority 1.0
//! - Every other unique same-origin page gets priority 0.8
//! - Query strings and fragments are stripped; pages are identified by
//!   their `origin + path` form

use crate::crawler::sitemap::PageDescriptor;
use crate::url::{clean_url, resolve_link, same_origin};
use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

/// Priority assigned to the homepage in discovered results
pub const HOME_PRIORITY: f32 = 1.0;

/// Priority assigned to every other discovered page
pub const DISCOVERED_PRIORITY: f32 = 0.8;

/// Builds page descriptors from a homepage's HTML
///
/// # Link Rules
///
/// **Include:**
/// - `<a href="...">` resolving to the same origin as `base_url`
///
/// **Exclude:**
/// - Links to other origins
/// - Fragment-only and query-only links
/// - `javascript:`, `mailto:`, `tel:` and data URIs
/// - Links whose `origin + path` was already seen, including the homepage's
///
/// Relative links resolve underneath the base URL's path.
///
/// # Arguments
///
/// * `html` - The homepage HTML
/// * `base_url` - The origin base URL, exactly as the caller gave it
///
/// # Example
///
/// ```
/// use seo_mirror::crawler::discover_pages;
///
/// let html = r#"<a href="/about">About</a><a href="/about?ref=nav">About</a>"#;
/// let pages = discover_pages(html, "https://example.com").unwrap();
/// assert_eq!(pages.len(), 2);
/// assert_eq!(pages[1].url, "https://example.com/about");
/// assert_eq!(pages[1].priority, Some(0.8));
/// ```
pub fn discover_pages(html: &str, base_url: &str) -> Result<Vec<PageDescriptor>, url::ParseError> {
    let base = Url::parse(base_url.trim())?;
    let join_base = directory_base(&base);

    let mut pages = vec![PageDescriptor::new(base_url.trim()).with_priority(HOME_PRIORITY)];
    let mut seen: HashSet<String> = HashSet::new();
    seen.insert(base_url.trim().to_string());
    seen.insert(clean_url(&base));

    for link in extract_anchor_hrefs(html) {
        let Some(absolute) = resolve_link(&link, &join_base) else {
            tracing::trace!("Skipping link {}", link);
            continue;
        };

        if !same_origin(&absolute, &base) {
            continue;
        }

        let clean = clean_url(&absolute);
        if seen.insert(clean.clone()) {
            pages.push(PageDescriptor::new(clean).with_priority(DISCOVERED_PRIORITY));
        }
    }

    Ok(pages)
}

/// Collects the raw `href` values of all anchors, in document order
fn extract_anchor_hrefs(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);

    let Ok(selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .map(str::to_string)
        .collect()
}

/// Returns the base URL with a trailing slash on its path, so that relative
/// links resolve underneath it rather than replacing its last segment
fn directory_base(base: &Url) -> Url {
    let mut dir = base.clone();
    if !dir.path().ends_with('/') {
        let path = format!("{}/", dir.path());
        dir.set_path(&path);
    }
    dir.set_query(None);
    dir.set_fragment(None);
    dir
}
