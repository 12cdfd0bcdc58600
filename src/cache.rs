//! Response cache with time-to-live expiry.
//!
//! Entries are keyed by the hash of the request URL. An entry whose age has
//! reached the TTL is purged on the lookup that observes it and is never served.

use crate::types::{cache_key, CacheKey};
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Default cache TTL (1 hour)
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(3600);

#[derive(Debug, Clone)]
struct CacheEntry<V> {
    payload: V,
    stored_at: Instant,
}

/// In-memory cache of retrieved payloads for a single run.
///
/// No size bound: a run touches a bounded set of URLs.
#[derive(Debug)]
pub struct ResponseCache<V> {
    entries: HashMap<CacheKey, CacheEntry<V>>,
    ttl: Duration,
}

impl<V: Clone> ResponseCache<V> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up the payload cached for `url`.
    pub fn lookup(&mut self, url: &str) -> Option<V> {
        self.lookup_at(&cache_key(url), Instant::now())
    }

    /// Store `payload` for `url`, replacing any previous entry.
    pub fn store(&mut self, url: &str, payload: V) {
        self.store_at(cache_key(url), payload, Instant::now());
    }

    /// Look up `key` as of `now`. Stale entries are removed.
    pub fn lookup_at(&mut self, key: &CacheKey, now: Instant) -> Option<V> {
        let entry = self.entries.get(key)?;
        if now.saturating_duration_since(entry.stored_at) < self.ttl {
            tracing::debug!(key = %hex::encode(&key[..8]), "Cache hit");
            return Some(entry.payload.clone());
        }
        tracing::debug!(key = %hex::encode(&key[..8]), "Cache expired");
        self.entries.remove(key);
        None
    }

    pub fn store_at(&mut self, key: CacheKey, payload: V, stored_at: Instant) {
        self.entries.insert(key, CacheEntry { payload, stored_at });
    }

    pub fn contains_key(&self, key: &CacheKey) -> bool {
        self.entries.contains_key(key)
    }
}

impl<V: Clone> Default for ResponseCache<V> {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_TTL)
    }
}
