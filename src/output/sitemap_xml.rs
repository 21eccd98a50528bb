//! Mirrored sitemap generation
//!
//! Maps the origin's pages onto the gateway's own URL space and renders
//! them as a standard `<urlset>` document.

use crate::crawler::{ChangeFrequency, PageDescriptor};
use crate::output::OutputResult;
use chrono::{DateTime, SecondsFormat, Utc};
use quick_xml::se::to_string;
use serde::Serialize;
use std::collections::HashSet;
use url::Url;

/// Sitemap protocol namespace
pub const SITEMAP_NAMESPACE: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

const DEFAULT_PRIORITY: f32 = 0.5;
const HOME_PRIORITY: f32 = 1.0;

/// One `<url>` entry of the mirrored sitemap
#[derive(Debug, Clone, PartialEq)]
pub struct SitemapUrl {
    pub loc: String,
    pub lastmod: DateTime<Utc>,
    pub changefreq: ChangeFrequency,
    pub priority: f32,
}

#[derive(Serialize)]
#[serde(rename = "urlset")]
struct UrlSetXml<'a> {
    #[serde(rename = "@xmlns")]
    xmlns: &'static str,
    #[serde(rename = "url")]
    urls: Vec<UrlXml<'a>>,
}

#[derive(Serialize)]
struct UrlXml<'a> {
    loc: &'a str,
    lastmod: String,
    changefreq: &'static str,
    priority: String,
}

/// Maps origin pages onto the gateway at `site_url`
///
/// # Mapping Rules
///
/// - `loc` is `site_url` followed by the page's path
/// - `lastmod` is the page's last-modified date, or now
/// - `changefreq` is the page's value when it is a known frequency, otherwise weekly
/// - `priority` is the page's priority, or 0.5
///
/// The gateway home page is always present exactly once, at priority 1.0
/// and daily, and is prepended when the origin pages do not include it.
/// Pages with unparseable URLs are skipped; repeated locations keep their
/// first entry.
///
/// # Example
///
/// ```
/// use seo_mirror::crawler::PageDescriptor;
/// use seo_mirror::output::build_mirrored_sitemap;
///
/// let pages = vec![PageDescriptor::new("https://origin.test/about")];
/// let urls = build_mirrored_sitemap(&pages, "https://www.example.com");
///
/// assert_eq!(urls[0].loc, "https://www.example.com/");
/// assert_eq!(urls[1].loc, "https://www.example.com/about");
/// ```
pub fn build_mirrored_sitemap(pages: &[PageDescriptor], site_url: &str) -> Vec<SitemapUrl> {
    let site = site_url.trim().trim_end_matches('/');
    let home = format!("{}/", site);
    let now = Utc::now();

    let mut seen = HashSet::new();
    let mut urls: Vec<SitemapUrl> = pages
        .iter()
        .filter_map(|page| {
            let parsed = Url::parse(&page.url).ok()?;
            let loc = format!("{}{}", site, parsed.path());
            seen.insert(loc.clone()).then(|| SitemapUrl {
                loc,
                lastmod: page.last_modified_at().unwrap_or(now),
                changefreq: page
                    .parsed_change_frequency()
                    .unwrap_or(ChangeFrequency::Weekly),
                priority: page.priority.unwrap_or(DEFAULT_PRIORITY),
            })
        })
        .collect();

    match urls.iter_mut().find(|url| url.loc == home || url.loc == site) {
        Some(entry) => {
            entry.priority = HOME_PRIORITY;
            entry.changefreq = ChangeFrequency::Daily;
        }
        None => urls.insert(
            0,
            SitemapUrl {
                loc: home,
                lastmod: now,
                changefreq: ChangeFrequency::Daily,
                priority: HOME_PRIORITY,
            },
        ),
    }

    urls
}

/// Renders sitemap entries as an XML document with declaration
///
/// # Returns
///
/// * `Ok(String)` - The complete document
/// * `Err(OutputError)` - Serialization failed
pub fn render_sitemap_xml(urls: &[SitemapUrl]) -> OutputResult<String> {
    let document = UrlSetXml {
        xmlns: SITEMAP_NAMESPACE,
        urls: urls
            .iter()
            .map(|url| UrlXml {
                loc: &url.loc,
                lastmod: url.lastmod.to_rfc3339_opts(SecondsFormat::Secs, true),
                changefreq: url.changefreq.as_str(),
                priority: format_priority(url.priority),
            })
            .collect(),
    };

    let xml = to_string(&document)?;
    Ok(format!("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n{}", xml))
}

/// Shortest decimal that reads back as `priority`, keeping one fractional digit
fn format_priority(priority: f32) -> String {
    let text = priority.to_string();
    if text.contains('.') {
        text
    } else {
        format!("{}.0", text)
    }
}
