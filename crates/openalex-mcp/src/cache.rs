//! Bounded in-memory response cache with TTL expiry.
//!
//! Eviction is FIFO: when the cache is full, the oldest-inserted entry is
//! dropped, regardless of how recently it was read. Expiry is lazy: stale
//! entries are removed on the `get` that observes them, never swept in the
//! background. Entries time out against `tokio::time::Instant` so expiry is
//! deterministic under paused test time.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

use tokio::time::Instant;

/// A cached payload plus its insertion instant.
struct CacheEntry {
    payload: serde_json::Value,
    inserted_at: Instant,
}

struct CacheInner {
    entries: HashMap<String, CacheEntry>,
    // Keys in insertion order; front is the eviction candidate.
    insertion_order: VecDeque<String>,
}

/// Bounded TTL cache keyed by normalized request shape.
pub struct ResponseCache {
    inner: Mutex<CacheInner>,
    ttl: Duration,
    max_size: usize,
}

impl ResponseCache {
    /// Create a cache holding at most `max_size` entries for `ttl` each.
    #[must_use]
    pub fn new(max_size: usize, ttl: Duration) -> Self {
        Self {
            inner: Mutex::new(CacheInner {
                entries: HashMap::new(),
                insertion_order: VecDeque::new(),
            }),
            ttl,
            max_size,
        }
    }

    /// Look up a payload, treating anything older than the TTL as absent.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<serde_json::Value> {
        let mut inner = self.inner.lock().expect("cache mutex poisoned");

        let expired = match inner.entries.get(key) {
            Some(entry) => entry.inserted_at.elapsed() > self.ttl,
            None => return None,
        };

        if expired {
            inner.entries.remove(key);
            inner.insertion_order.retain(|k| k != key);
            return None;
        }

        inner.entries.get(key).map(|entry| entry.payload.clone())
    }

    /// Insert a payload, evicting the oldest entry if the cache is full.
    pub fn insert(&self, key: String, payload: serde_json::Value) {
        if self.max_size == 0 {
            return;
        }

        let mut inner = self.inner.lock().expect("cache mutex poisoned");

        if !inner.entries.contains_key(&key) {
            if inner.entries.len() >= self.max_size {
                if let Some(oldest) = inner.insertion_order.pop_front() {
                    inner.entries.remove(&oldest);
                }
            }
            inner.insertion_order.push_back(key.clone());
        }

        inner.entries.insert(key, CacheEntry { payload, inserted_at: Instant::now() });
    }

    /// Drop every entry.
    pub fn clear(&self) {
        let mut inner = self.inner.lock().expect("cache mutex poisoned");
        inner.entries.clear();
        inner.insertion_order.clear();
    }

    /// Number of entries currently stored (expired entries count until read).
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lock().expect("cache mutex poisoned").entries.len()
    }

    /// Check if the cache is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for ResponseCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseCache")
            .field("len", &self.len())
            .field("max_size", &self.max_size)
            .field("ttl", &self.ttl)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn cache_with(max_size: usize, ttl_secs: u64) -> ResponseCache {
        ResponseCache::new(max_size, Duration::from_secs(ttl_secs))
    }

    #[tokio::test]
    async fn test_get_returns_inserted_payload() {
        let cache = cache_with(10, 300);
        cache.insert("k1".to_string(), json!({"count": 7}));

        assert_eq!(cache.get("k1"), Some(json!({"count": 7})));
        assert_eq!(cache.get("k2"), None);
    }

    #[tokio::test]
    async fn test_eviction_removes_oldest_inserted() {
        let cache = cache_with(3, 300);
        cache.insert("a".to_string(), json!(1));
        cache.insert("b".to_string(), json!(2));
        cache.insert("c".to_string(), json!(3));

        // Reading "a" must not protect it; eviction is FIFO, not LRU.
        assert!(cache.get("a").is_some());

        cache.insert("d".to_string(), json!(4));

        assert_eq!(cache.len(), 3);
        assert_eq!(cache.get("a"), None);
        assert!(cache.get("b").is_some());
        assert!(cache.get("c").is_some());
        assert!(cache.get("d").is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_entries_expire_after_ttl() {
        let cache = cache_with(10, 60);
        cache.insert("k".to_string(), json!("v"));

        tokio::time::advance(Duration::from_secs(59)).await;
        assert!(cache.get("k").is_some());

        tokio::time::advance(Duration::from_secs(2)).await;
        assert_eq!(cache.get("k"), None);
        // Lazy expiry removed the entry on read.
        assert_eq!(cache.len(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reinsert_refreshes_timestamp() {
        let cache = cache_with(10, 60);
        cache.insert("k".to_string(), json!(1));

        tokio::time::advance(Duration::from_secs(45)).await;
        cache.insert("k".to_string(), json!(2));

        tokio::time::advance(Duration::from_secs(30)).await;
        assert_eq!(cache.get("k"), Some(json!(2)));
    }

    #[tokio::test]
    async fn test_clear_and_len() {
        let cache = cache_with(10, 300);
        cache.insert("a".to_string(), json!(1));
        cache.insert("b".to_string(), json!(2));
        assert_eq!(cache.len(), 2);

        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.get("a"), None);
    }

    #[tokio::test]
    async fn test_zero_capacity_stores_nothing() {
        let cache = cache_with(0, 300);
        cache.insert("a".to_string(), json!(1));
        assert!(cache.is_empty());
    }
}
