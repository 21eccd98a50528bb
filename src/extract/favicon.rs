//! Favicon resolution

use crate::extract::summary::default_favicon;
use crate::url::resolve_asset_url;
use scraper::{Html, Selector};
use url::Url;

/// Icon links in order of preference
const FAVICON_SELECTORS: &[&str] = &[
    r#"link[rel="icon"][type="image/svg+xml"]"#,
    r#"link[rel="icon"][sizes*="32"]"#,
    r#"link[rel="icon"][sizes*="16"]"#,
    r#"link[rel="shortcut icon"]"#,
    r#"link[rel="icon"]"#,
    r#"link[rel="apple-touch-icon"]"#,
];

/// Picks the page's favicon as an absolute URL
///
/// The first selector in preference order with a non-empty `href` wins.
/// Without any icon link the result is `{origin}/favicon.ico`.
pub fn resolve_favicon(document: &Html, page_url: &Url) -> String {
    FAVICON_SELECTORS
        .iter()
        .filter_map(|css| Selector::parse(css).ok())
        .find_map(|selector| {
            document
                .select(&selector)
                .filter_map(|element| element.value().attr("href"))
                .find(|href| !href.trim().is_empty())
                .and_then(|href| resolve_asset_url(href, page_url))
        })
        .unwrap_or_else(|| default_favicon(page_url.as_str()))
}
