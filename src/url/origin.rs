use crate::{UrlError, UrlResult};
use url::Url;

/// Parses a base URL and checks that it can serve as a crawl origin
///
/// # Examples
///
/// ```
/// use seo_mirror::url::parse_base_url;
///
/// assert!(parse_base_url("https://example.com").is_ok());
/// assert!(parse_base_url("mailto:someone@example.com").is_err());
/// ```
pub fn parse_base_url(base_url: &str) -> UrlResult<Url> {
    let url = Url::parse(base_url.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(url.scheme().to_string()));
    }

    if url.host_str().is_none() {
        return Err(UrlError::MissingHost);
    }

    Ok(url)
}

/// Returns true when both URLs share scheme, host and port
pub fn same_origin(a: &Url, b: &Url) -> bool {
    a.origin() == b.origin()
}

/// Returns the root of a URL's origin (`scheme://host[:port]/`)
pub fn origin_root(url: &Url) -> Url {
    let mut root = url.clone();
    root.set_path("/");
    root.set_query(None);
    root.set_fragment(None);
    root
}

/// Builds the conventional sitemap location for a base URL
///
/// ```
/// use seo_mirror::url::sitemap_url_for;
///
/// assert_eq!(sitemap_url_for("https://example.com/"), "https://example.com/sitemap.xml");
/// assert_eq!(sitemap_url_for("https://example.com/blog"), "https://example.com/blog/sitemap.xml");
/// ```
pub fn sitemap_url_for(base_url: &str) -> String {
    format!("{}/sitemap.xml", base_url.trim().trim_end_matches('/'))
}

/// Maps a local route path back onto the base URL
///
/// The root path maps to the base URL itself.
///
/// ```
/// use seo_mirror::url::page_url_for;
///
/// assert_eq!(page_url_for("https://example.com", "/"), "https://example.com");
/// assert_eq!(page_url_for("https://example.com/", "/about"), "https://example.com/about");
/// ```
pub fn page_url_for(base_url: &str, path: &str) -> String {
    let base = base_url.trim();
    if path == "/" || path.is_empty() {
        return base.to_string();
    }
    format!("{}{}", base.trim_end_matches('/'), path)
}
