//! Content extraction module
//!
//! Turns a page's static HTML into a bounded [`ContentSummary`]: title,
//! description, keywords, canonical URL, favicon, OG image, and a handful of
//! headings, paragraphs and images. Pages are never rendered; what the origin
//! serves is what gets summarized.

mod extractor;
mod favicon;
mod fields;
mod summary;

pub use extractor::ContentExtractor;
pub use favicon::resolve_favicon;
pub use fields::{extract_summary, summarize_body, MAX_HEADINGS, MAX_IMAGES, MAX_PARAGRAPHS};
pub use summary::{ContentSummary, ImageRef};

use crate::crawler::FetchError;
use thiserror::Error;

/// Why a page could not be summarized
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("invalid page URL: {0}")]
    InvalidUrl(String),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("origin returned an empty body")]
    EmptyBody,

    #[error("response is not HTML: {0}")]
    NotHtml(String),
}
