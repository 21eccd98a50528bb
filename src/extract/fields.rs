//! Field extraction from static HTML
//!
//! Every rule here is pure: given the same markup and page URL the summary
//! is the same, apart from `fetched_at`. Lengths are counted in characters.

use crate::config::SiteDefaults;
use crate::extract::favicon::resolve_favicon;
use crate::extract::summary::{ContentSummary, ImageRef};
use crate::extract::ExtractError;
use crate::url::resolve_asset_url;
use chrono::Utc;
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Maximum number of headings kept
pub const MAX_HEADINGS: usize = 8;

/// Maximum number of paragraphs kept
pub const MAX_PARAGRAPHS: usize = 3;

/// Maximum number of images kept
pub const MAX_IMAGES: usize = 3;

const MAX_IMAGE_SRC_CHARS: usize = 200;
const MAX_ALT_CHARS: usize = 100;

/// Checks that a fetched body is HTML worth parsing, then summarizes it
///
/// # Arguments
///
/// * `body` - The decoded response body
/// * `content_type` - The response Content-Type header, if any
/// * `requested_url` - The URL as requested; the canonical URL when the page names none
/// * `page_url` - The parsed page URL; relative assets resolve against its origin
/// * `site` - Defaults for a missing title or description
///
/// # Returns
///
/// * `Ok(ContentSummary)` - The extracted summary
/// * `Err(ExtractError)` - The body is empty or is not HTML
pub fn summarize_body(
    body: &str,
    content_type: Option<&str>,
    requested_url: &str,
    page_url: &Url,
    site: &SiteDefaults,
) -> Result<ContentSummary, ExtractError> {
    if body.trim().is_empty() {
        return Err(ExtractError::EmptyBody);
    }

    if let Some(content_type) = content_type {
        let lowered = content_type.to_ascii_lowercase();
        if !lowered.contains("html") && !lowered.contains("xml") {
            return Err(ExtractError::NotHtml(content_type.to_string()));
        }
    }

    if body.contains('\0') || !body.contains('<') {
        return Err(ExtractError::NotHtml("body is not markup".to_string()));
    }

    Ok(extract_summary(body, requested_url, page_url, site))
}

/// Extracts a bounded content summary from an HTML document
///
/// # Field Rules
///
/// | Field | Source |
/// |-------|--------|
/// | title | `<title>`, then `og:title`, then the site name |
/// | description | `meta[name=description]`, then `og:description`, then the site description |
/// | keywords | `meta[name=keywords]`, or empty |
/// | canonical URL | `link[rel=canonical]`, or the requested URL |
/// | favicon | preferred icon link, or `{origin}/favicon.ico` |
/// | OG image | `og:image` content as written, or empty |
/// | headings | h1-h3 in order, 3..=99 chars, first 8 |
/// | paragraphs | `p` in order, 21..=299 chars, first 3 |
/// | images | `img` with a non-data src of at most 200 chars, first 3 |
///
/// # Example
///
/// ```
/// use seo_mirror::config::SiteDefaults;
/// use seo_mirror::extract::extract_summary;
/// use url::Url;
///
/// let html = "<html><head><title>Acme</title></head><body><h1>Welcome</h1></body></html>";
/// let page = Url::parse("https://acme.test/").unwrap();
/// let summary = extract_summary(html, "https://acme.test", &page, &SiteDefaults::default());
///
/// assert_eq!(summary.title, "Acme");
/// assert_eq!(summary.headings, vec!["Welcome"]);
/// ```
pub fn extract_summary(
    html: &str,
    requested_url: &str,
    page_url: &Url,
    site: &SiteDefaults,
) -> ContentSummary {
    let document = Html::parse_document(html);

    let title = first_text(&document, "title")
        .or_else(|| meta_property(&document, "og:title"))
        .unwrap_or_else(|| site.name.clone());

    let description = first_attr(&document, r#"meta[name="description"]"#, "content")
        .or_else(|| meta_property(&document, "og:description"))
        .unwrap_or_else(|| site.description.clone());

    let keywords =
        first_attr(&document, r#"meta[name="keywords"]"#, "content").unwrap_or_default();

    let canonical_url = first_attr(&document, r#"link[rel="canonical"]"#, "href")
        .unwrap_or_else(|| requested_url.trim().to_string());

    let og_image_url = meta_property(&document, "og:image").unwrap_or_default();

    ContentSummary {
        title,
        description,
        keywords,
        canonical_url,
        favicon_url: resolve_favicon(&document, page_url),
        og_image_url,
        headings: collect_text(&document, "h1, h2, h3", 3, 99, MAX_HEADINGS),
        paragraphs: collect_text(&document, "p", 21, 299, MAX_PARAGRAPHS),
        images: collect_images(&document, page_url),
        fetched_at: Utc::now(),
        extraction_error: None,
    }
}

fn select_all<'a>(document: &'a Html, css: &str) -> Vec<ElementRef<'a>> {
    match Selector::parse(css) {
        Ok(selector) => document.select(&selector).collect(),
        Err(_) => Vec::new(),
    }
}

fn element_text(element: &ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn first_text(document: &Html, css: &str) -> Option<String> {
    select_all(document, css)
        .iter()
        .map(element_text)
        .find(|text| !text.is_empty())
}

fn first_attr(document: &Html, css: &str, attr: &str) -> Option<String> {
    select_all(document, css)
        .iter()
        .filter_map(|element| element.value().attr(attr))
        .map(str::trim)
        .find(|value| !value.is_empty())
        .map(str::to_string)
}

fn meta_property(document: &Html, property: &str) -> Option<String> {
    first_attr(
        document,
        &format!(r#"meta[property="{}"]"#, property),
        "content",
    )
}

/// Trimmed text of matching elements whose char length is within `min..=max`
fn collect_text(document: &Html, css: &str, min: usize, max: usize, limit: usize) -> Vec<String> {
    select_all(document, css)
        .iter()
        .map(element_text)
        .filter(|text| (min..=max).contains(&text.chars().count()))
        .take(limit)
        .collect()
}

fn collect_images(document: &Html, page_url: &Url) -> Vec<ImageRef> {
    select_all(document, "img[src]")
        .iter()
        .filter_map(|element| {
            let src = element.value().attr("src")?.trim();
            if src.is_empty()
                || src.starts_with("data:")
                || src.chars().count() > MAX_IMAGE_SRC_CHARS
            {
                return None;
            }

            Some(ImageRef {
                src: resolve_asset_url(src, page_url)?,
                alt_text: truncate_alt(element.value().attr("alt").unwrap_or("").trim()),
            })
        })
        .take(MAX_IMAGES)
        .collect()
}

fn truncate_alt(alt: &str) -> String {
    if alt.chars().count() > MAX_ALT_CHARS {
        let mut truncated: String = alt.chars().take(MAX_ALT_CHARS).collect();
        truncated.push_str("...");
        truncated
    } else {
        alt.to_string()
    }
}
