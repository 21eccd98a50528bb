//! Extraction cache
//!
//! An in-memory, TTL-bounded store of content summaries keyed by normalized
//! URL. The cache is created once per process and shared by `Arc`; nothing is
//! persisted across restarts.
//!
//! Expired entries are dropped lazily when they are looked up, and can be
//! swept eagerly with [`ExtractionCache::evict_expired`].

mod entry;

pub use entry::CacheEntry;

use crate::extract::ContentSummary;
use crate::url::cache_key;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use std::time::Duration;

/// TTL-based store mapping URL to its last successful extraction
#[derive(Debug)]
pub struct ExtractionCache {
    ttl: chrono::Duration,
    entries: RwLock<HashMap<String, CacheEntry>>,
    fetch_locks: Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>,
}

impl ExtractionCache {
    /// Creates an empty cache with a single TTL for all entries
    ///
    /// # Example
    ///
    /// ```
    /// use seo_mirror::cache::ExtractionCache;
    /// use std::time::Duration;
    ///
    /// let cache = ExtractionCache::new(Duration::from_secs(3600));
    /// assert!(cache.is_empty());
    /// ```
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl: chrono::Duration::from_std(ttl).unwrap_or_else(|_| chrono::Duration::days(365)),
            entries: RwLock::new(HashMap::new()),
            fetch_locks: Mutex::new(HashMap::new()),
        }
    }

    /// The configured time-to-live
    pub fn ttl(&self) -> chrono::Duration {
        self.ttl
    }

    /// Looks up a fresh summary for `url`
    ///
    /// Returns None on a miss or when the entry has expired; an expired entry
    /// is removed.
    pub fn get(&self, url: &str) -> Option<ContentSummary> {
        let key = cache_key(url);
        let now = Utc::now();

        {
            let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
            match entries.get(&key) {
                Some(entry) if !entry.is_expired(self.ttl, now) => {
                    return Some(entry.summary.clone());
                }
                Some(_) => {}
                None => return None,
            }
        }

        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        if entries
            .get(&key)
            .is_some_and(|entry| entry.is_expired(self.ttl, now))
        {
            entries.remove(&key);
            tracing::debug!("Evicted expired cache entry for {}", key);
        }
        None
    }

    /// Stores `summary` for `url`, replacing any previous entry
    pub fn put(&self, url: &str, summary: ContentSummary) {
        self.insert_entry(cache_key(url), CacheEntry::new(summary));
    }

    /// Removes the entry for `url`, returning whether one existed
    pub fn invalidate(&self, url: &str) -> bool {
        let key = cache_key(url);
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&key)
            .is_some()
    }

    /// Removes every entry, along with fetch locks nobody is holding
    pub fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        self.fetch_locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(|_, lock| Arc::strong_count(lock) > 1);
    }

    /// Removes all expired entries, returning how many were dropped
    pub fn evict_expired(&self) -> usize {
        let now = Utc::now();
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired(self.ttl, now));
        before - entries.len()
    }

    /// Number of stored entries, expired ones included until evicted
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the per-URL lock that serializes origin fetches for one key
    ///
    /// Holding it while checking the cache and fetching keeps concurrent
    /// misses for the same URL down to one origin request. Every lock taken
    /// here must be handed back with [`ExtractionCache::release_fetch_lock`]
    /// once its guard is dropped.
    pub fn fetch_lock(&self, url: &str) -> Arc<tokio::sync::Mutex<()>> {
        let key = cache_key(url);
        let mut locks = self
            .fetch_locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        Arc::clone(locks.entry(key).or_default())
    }

    /// Hands back a lock obtained from [`ExtractionCache::fetch_lock`]
    ///
    /// The map entry is removed when no other caller holds or waits on the
    /// lock, so the map only ever holds keys with a fetch in flight.
    pub fn release_fetch_lock(&self, url: &str, lock: Arc<tokio::sync::Mutex<()>>) {
        let key = cache_key(url);
        let mut locks = self
            .fetch_locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let idle = locks
            .get(&key)
            .is_some_and(|held| Arc::ptr_eq(held, &lock) && Arc::strong_count(held) == 2);
        drop(lock);
        if idle {
            locks.remove(&key);
        }
    }

    /// Number of keys with a fetch lock in the map
    pub fn fetch_lock_count(&self) -> usize {
        self.fetch_locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn insert_entry(&self, key: String, entry: CacheEntry) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, entry);
    }
}
