use crate::config::FallbackContent;
use crate::url::{origin_root, parse_base_url};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An image reference taken from a page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRef {
    /// Absolute image URL
    pub src: String,

    /// Alt text, truncated to 100 characters plus `...`
    pub alt_text: String,
}

/// Normalized, bounded extraction result for one page
///
/// Every field always holds a usable value. `extraction_error` is set only
/// when the summary is fallback content standing in for a failed extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentSummary {
    pub title: String,
    pub description: String,
    pub keywords: String,
    pub canonical_url: String,
    pub favicon_url: String,
    pub og_image_url: String,
    pub headings: Vec<String>,
    pub paragraphs: Vec<String>,
    pub images: Vec<ImageRef>,
    pub fetched_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extraction_error: Option<String>,
}

impl ContentSummary {
    /// Builds the fallback summary served when extracting `url` failed
    ///
    /// # Example
    ///
    /// ```
    /// use seo_mirror::config::FallbackContent;
    /// use seo_mirror::extract::ContentSummary;
    ///
    /// let summary = ContentSummary::fallback(
    ///     "https://example.com/pricing",
    ///     &FallbackContent::default(),
    ///     "origin returned HTTP 503",
    /// );
    /// assert_eq!(summary.canonical_url, "https://example.com/pricing");
    /// assert_eq!(summary.favicon_url, "https://example.com/favicon.ico");
    /// assert!(summary.is_fallback());
    /// ```
    pub fn fallback(url: &str, content: &FallbackContent, cause: impl std::fmt::Display) -> Self {
        Self {
            title: content.title.clone(),
            description: content.description.clone(),
            keywords: content.keywords.clone(),
            canonical_url: url.trim().to_string(),
            favicon_url: default_favicon(url),
            og_image_url: String::new(),
            headings: content.headings.clone(),
            paragraphs: content.paragraphs.clone(),
            images: Vec::new(),
            fetched_at: Utc::now(),
            extraction_error: Some(format!(
                "Failed to fetch content, using fallback data: {}",
                cause
            )),
        }
    }

    /// True when this summary stands in for a failed extraction
    pub fn is_fallback(&self) -> bool {
        self.extraction_error.is_some()
    }

    #[cfg(test)]
    pub(crate) fn empty(url: &str) -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            keywords: String::new(),
            canonical_url: url.to_string(),
            favicon_url: default_favicon(url),
            og_image_url: String::new(),
            headings: Vec::new(),
            paragraphs: Vec::new(),
            images: Vec::new(),
            fetched_at: Utc::now(),
            extraction_error: None,
        }
    }
}

/// `{origin}/favicon.ico` for a page URL
pub(crate) fn default_favicon(url: &str) -> String {
    parse_base_url(url)
        .ok()
        .and_then(|parsed| origin_root(&parsed).join("favicon.ico").ok())
        .map(String::from)
        .unwrap_or_else(|| format!("{}/favicon.ico", url.trim().trim_end_matches('/')))
}
