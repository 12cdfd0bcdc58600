//! Core types shared across the pipeline.

/// CacheKey: BLAKE3 hash of a request URL
pub type CacheKey = [u8; 32];

/// Compute the cache key for a request URL.
pub fn cache_key(url: &str) -> CacheKey {
    *blake3::hash(url.as_bytes()).as_bytes()
}
