//! URL handling module for Seo-Mirror
//!
//! This module provides origin checks, cache-key normalization, and the
//! resolution rules for links and page assets.

mod normalize;
mod origin;
mod resolve;

pub use normalize::{cache_key, clean_url};
pub use origin::{origin_root, page_url_for, parse_base_url, same_origin, sitemap_url_for};
pub use resolve::{resolve_asset_url, resolve_link};
