use crate::url::origin::origin_root;
use url::Url;

/// Resolves an asset reference (favicon, image) found on a page to an absolute URL
///
/// # Resolution Rules
///
/// | Reference | Result |
/// |-----------|--------|
/// | `https://cdn.test/a.png` | unchanged |
/// | `//cdn.test/a.png` | `https://cdn.test/a.png` |
/// | `/img/a.png` | `{origin}/img/a.png` |
/// | `img/a.png` | `{origin}/img/a.png` |
///
/// Relative references resolve against the page origin's root, not the page
/// path.
///
/// # Returns
///
/// * `Some(String)` - The absolute URL
/// * `None` - The reference is empty or cannot be resolved
pub fn resolve_asset_url(href: &str, page_url: &Url) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }

    if let Some(rest) = href.strip_prefix("//") {
        return Url::parse(&format!("https://{}", rest))
            .ok()
            .map(String::from);
    }

    if let Ok(absolute) = Url::parse(href) {
        if absolute.scheme() == "http" || absolute.scheme() == "https" {
            return Some(absolute.to_string());
        }
    }

    origin_root(page_url).join(href).ok().map(String::from)
}

/// Resolves an anchor href found on a page to an absolute HTTP(S) URL
///
/// Returns None if the link should be excluded:
/// - fragment-only and query-only references
/// - javascript:, mailto:, tel: and data: references
/// - hrefs that fail to resolve or resolve to a non-HTTP(S) URL
///
/// `base` should end with a slash when relative paths are meant to resolve
/// underneath it.
pub fn resolve_link(href: &str, base: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') || href.starts_with('?') {
        return None;
    }

    let lowered = href.to_ascii_lowercase();
    if lowered.starts_with("javascript:")
        || lowered.starts_with("mailto:")
        || lowered.starts_with("tel:")
        || lowered.starts_with("data:")
    {
        return None;
    }

    match base.join(href) {
        Ok(absolute) if absolute.scheme() == "http" || absolute.scheme() == "https" => {
            Some(absolute)
        }
        _ => None,
    }
}
