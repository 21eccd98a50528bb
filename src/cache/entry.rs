//! A single cached extraction result

use crate::extract::ContentSummary;
use chrono::{DateTime, Duration, Utc};

/// Cached content summary for one URL
///
/// Stores the summary along with the time it was inserted, allowing for
/// expiration checks against the cache TTL.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The cached summary
    pub summary: ContentSummary,

    /// When the summary entered the cache
    pub inserted_at: DateTime<Utc>,
}

impl CacheEntry {
    /// Creates a new entry stamped with the current time
    pub fn new(summary: ContentSummary) -> Self {
        Self {
            summary,
            inserted_at: Utc::now(),
        }
    }

    /// Checks if the entry has reached the TTL
    ///
    /// An entry is expired once `now - inserted_at >= ttl`, so a zero TTL
    /// expires every entry immediately.
    pub fn is_expired(&self, ttl: Duration, now: DateTime<Utc>) -> bool {
        now - self.inserted_at >= ttl
    }

    /// Returns the age of the entry
    pub fn age(&self) -> Duration {
        Utc::now() - self.inserted_at
    }
}
