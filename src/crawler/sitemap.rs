//! Sitemap XML parsing
//!
//! Supports:
//! - Standard `<urlset>` sitemaps
//! - Sitemap index files (`<sitemapindex>`)
//!
//! Documents are classified by their root element, then deserialized with
//! quick-xml's serde support. Unknown elements are ignored wherever they
//! appear, including between `<url>` or `<sitemap>` entries.

use crate::crawler::fetcher::FetchError;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use quick_xml::events::Event;
use quick_xml::Reader;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors raised while fetching or reading a sitemap document
#[derive(Debug, Error)]
pub enum SitemapError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("malformed XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("unreadable sitemap structure: {0}")]
    Deserialize(#[from] quick_xml::errors::serialize::DeError),

    #[error("document has no root element")]
    Empty,

    #[error("unexpected root element <{0}>")]
    UnexpectedRoot(String),
}

/// Change frequency vocabulary of the sitemap protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeFrequency {
    Always,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Never,
}

impl ChangeFrequency {
    /// The exact token used in sitemap documents
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Always => "always",
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
            Self::Never => "never",
        }
    }
}

impl fmt::Display for ChangeFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChangeFrequency {
    type Err = String;

    /// Parses a change frequency, ignoring case and surrounding whitespace
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "always" => Ok(Self::Always),
            "hourly" => Ok(Self::Hourly),
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            "yearly" => Ok(Self::Yearly),
            "never" => Ok(Self::Never),
            other => Err(format!("unknown change frequency '{}'", other)),
        }
    }
}

/// One page entry discovered on the origin
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageDescriptor {
    /// Absolute page URL
    pub url: String,

    /// Priority in [0, 1], if the source gave a valid one
    pub priority: Option<f32>,

    /// Raw `changefreq` text
    pub change_frequency: Option<String>,

    /// Raw `lastmod` text
    pub last_modified: Option<String>,
}

impl PageDescriptor {
    /// Creates a descriptor with only a URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            priority: None,
            change_frequency: None,
            last_modified: None,
        }
    }

    /// Sets the priority
    pub fn with_priority(mut self, priority: f32) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Interprets the raw change frequency against the sitemap vocabulary
    pub fn parsed_change_frequency(&self) -> Option<ChangeFrequency> {
        self.change_frequency.as_deref()?.parse().ok()
    }

    /// Interprets the raw last-modified text as a timestamp
    ///
    /// Accepts RFC 3339 timestamps and plain `YYYY-MM-DD` dates.
    pub fn last_modified_at(&self) -> Option<DateTime<Utc>> {
        let raw = self.last_modified.as_deref()?.trim();

        if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
            return Some(ts.with_timezone(&Utc));
        }

        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| Utc.from_utc_datetime(&naive))
    }
}

/// A parsed sitemap document
#[derive(Debug, Clone, PartialEq)]
pub enum SitemapDocument {
    /// A sitemap index listing child sitemap URLs, in document order
    Index(Vec<String>),

    /// A regular sitemap listing pages, in document order
    UrlSet(Vec<PageDescriptor>),
}

#[derive(Debug, Deserialize)]
struct UrlSetXml {
    #[serde(rename = "url", default)]
    urls: Vec<UrlXml>,
}

#[derive(Debug, Deserialize)]
struct UrlXml {
    loc: Option<String>,
    priority: Option<String>,
    changefreq: Option<String>,
    lastmod: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SitemapIndexXml {
    #[serde(rename = "sitemap", default)]
    sitemaps: Vec<SitemapRefXml>,
}

#[derive(Debug, Deserialize)]
struct SitemapRefXml {
    loc: Option<String>,
}

/// Parses a sitemap document, classifying it by its root element
///
/// # Example
///
/// ```
/// use seo_mirror::crawler::{parse_sitemap, SitemapDocument};
///
/// let xml = r#"<sitemapindex><sitemap><loc>https://example.com/a.xml</loc></sitemap></sitemapindex>"#;
/// assert_eq!(
///     parse_sitemap(xml).unwrap(),
///     SitemapDocument::Index(vec!["https://example.com/a.xml".to_string()])
/// );
/// ```
pub fn parse_sitemap(xml: &str) -> Result<SitemapDocument, SitemapError> {
    match root_element(xml)?.as_str() {
        "sitemapindex" => Ok(SitemapDocument::Index(parse_sitemap_index(xml)?)),
        "urlset" => Ok(SitemapDocument::UrlSet(parse_urlset(xml)?)),
        other => Err(SitemapError::UnexpectedRoot(other.to_string())),
    }
}

/// Extracts one descriptor per `<url>` entry of a regular sitemap
///
/// Entries without a non-empty `<loc>` are dropped. A `<priority>` that is
/// not a number in [0, 1] is treated as absent.
pub fn parse_urlset(xml: &str) -> Result<Vec<PageDescriptor>, SitemapError> {
    let doc: UrlSetXml = quick_xml::de::from_str(xml)?;

    Ok(doc
        .urls
        .into_iter()
        .filter_map(|entry| {
            let loc = non_empty(entry.loc)?;
            Some(PageDescriptor {
                url: loc,
                priority: entry.priority.as_deref().and_then(parse_priority),
                change_frequency: non_empty(entry.changefreq),
                last_modified: non_empty(entry.lastmod),
            })
        })
        .collect())
}

/// Extracts the child sitemap URLs of a sitemap index, in document order
pub fn parse_sitemap_index(xml: &str) -> Result<Vec<String>, SitemapError> {
    let doc: SitemapIndexXml = quick_xml::de::from_str(xml)?;

    Ok(doc
        .sitemaps
        .into_iter()
        .filter_map(|entry| non_empty(entry.loc))
        .collect())
}

/// Returns the local name of the document's first element
fn root_element(xml: &str) -> Result<String, SitemapError> {
    let mut reader = Reader::from_str(xml);

    loop {
        match reader.read_event()? {
            Event::Start(element) | Event::Empty(element) => {
                let name = element.local_name();
                return Ok(String::from_utf8_lossy(name.as_ref()).to_ascii_lowercase());
            }
            Event::Eof => return Err(SitemapError::Empty),
            _ => {}
        }
    }
}

fn parse_priority(raw: &str) -> Option<f32> {
    raw.trim()
        .parse::<f32>()
        .ok()
        .filter(|p| p.is_finite() && (0.0..=1.0).contains(p))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
