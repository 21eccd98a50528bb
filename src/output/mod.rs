//! Output module for mirror artifacts and reports
//!
//! This module handles:
//! - Rendering the mirrored sitemap for the gateway
//! - Writing JSON documents (extractions, bulk exports, revalidation reports)
//! - Formatting markdown summaries of batch runs

mod export;
mod report;
mod sitemap_xml;

pub use export::{write_json, write_text};
pub use report::{format_export_summary, format_revalidation_summary};
pub use sitemap_xml::{build_mirrored_sitemap, render_sitemap_xml, SitemapUrl, SITEMAP_NAMESPACE};

use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to serialize XML: {0}")]
    Xml(#[from] quick_xml::errors::serialize::SeError),

    #[error("Failed to serialize JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;
