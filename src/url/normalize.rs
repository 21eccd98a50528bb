use url::Url;

/// Normalizes a URL into the key used by the extraction cache
///
/// # Normalization Steps
///
/// 1. Trim surrounding whitespace
/// 2. Parse the URL; an unparseable URL is keyed by its trimmed text
/// 3. Lowercase scheme and host, drop default ports (done by the parser)
/// 4. Remove the fragment
/// 5. Remove a trailing slash from non-root paths
///
/// # Examples
///
/// ```
/// use seo_mirror::url::cache_key;
///
/// assert_eq!(cache_key("HTTPS://Example.COM/about/#team"), "https://example.com/about");
/// assert_eq!(cache_key("https://example.com"), "https://example.com/");
/// ```
pub fn cache_key(url_str: &str) -> String {
    let trimmed = url_str.trim();

    let mut url = match Url::parse(trimmed) {
        Ok(url) => url,
        Err(_) => return trimmed.to_string(),
    };

    url.set_fragment(None);

    let path = url.path();
    if path.len() > 1 && path.ends_with('/') {
        let stripped = path.trim_end_matches('/').to_string();
        url.set_path(if stripped.is_empty() { "/" } else { &stripped });
    }

    url.to_string()
}

/// Reduces a URL to its `origin + path` form, dropping query and fragment
///
/// This is the identity used to deduplicate discovered pages.
///
/// ```
/// use seo_mirror::url::clean_url;
/// use url::Url;
///
/// let url = Url::parse("https://example.com/pricing?plan=pro#faq").unwrap();
/// assert_eq!(clean_url(&url), "https://example.com/pricing");
/// ```
pub fn clean_url(url: &Url) -> String {
    format!("{}{}", url.origin().ascii_serialization(), url.path())
}
