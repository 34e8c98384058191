//! Size-bounded, time-to-live cache.
//!
//! Entries expire a fixed TTL after insertion, independent of access.
//! When more than `capacity` distinct keys are stored, the least recently
//! used key is evicted.

use lru::LruCache;
use std::future::Future;
use std::hash::Hash;
use std::num::NonZeroUsize;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;
use tokio::time::Instant;

/// A stored value together with its insertion time.
#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    inserted_at: Instant,
}

impl<V> CacheEntry<V> {
    fn is_fresh(&self, ttl: Duration, now: Instant) -> bool {
        now.saturating_duration_since(self.inserted_at) < ttl
    }
}

/// A thread-safe TTL cache with LRU eviction.
///
/// The lock is never held across an `.await`; value and timestamp are
/// always read and written together.
pub struct TtlCache<K, V> {
    name: &'static str,
    ttl: Duration,
    entries: Mutex<LruCache<K, CacheEntry<V>>>,
}

impl<K, V> TtlCache<K, V>
where
    K: Hash + Eq,
    V: Clone,
{
    /// Create an empty cache. A zero capacity is treated as one.
    pub fn new(name: &'static str, capacity: usize, ttl: Duration) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            name,
            ttl,
            entries: Mutex::new(LruCache::new(capacity)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, LruCache<K, CacheEntry<V>>> {
        // Entries are replaced whole, so a poisoned lock still holds valid data.
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Fresh value for `key`, if any. Stale entries are dropped.
    pub fn get(&self, key: &K) -> Option<V> {
        let now = Instant::now();
        let mut entries = self.lock();

        if !entries.peek(key)?.is_fresh(self.ttl, now) {
            entries.pop(key);
            return None;
        }
        entries.get(key).map(|entry| entry.value.clone())
    }

    /// Store `value` under `key`, replacing any previous entry for it and
    /// evicting the least recently used key beyond capacity.
    pub fn insert(&self, key: K, value: V) {
        let entry = CacheEntry {
            value,
            inserted_at: Instant::now(),
        };
        self.lock().put(key, entry);
    }

    /// Number of entries currently stored, fresh or not.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Return the fresh value for `key`, or run `fetch`, store its result and
    /// return it. Errors are returned without touching the cache.
    pub async fn get_or_try_insert_with<F, Fut, E>(&self, key: K, fetch: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(value) = self.get(&key) {
            metrics::counter!("hub_cache_lookups_total", "cache" => self.name, "result" => "hit").increment(1);
            tracing::trace!(cache = self.name, "Cache hit");
            return Ok(value);
        }

        metrics::counter!("hub_cache_lookups_total", "cache" => self.name, "result" => "miss").increment(1);
        tracing::debug!(cache = self.name, "Cache miss, fetching");

        let value = fetch().await?;
        self.insert(key, value.clone());
        Ok(value)
    }
}

impl<K: Hash + Eq, V: Clone> std::fmt::Debug for TtlCache<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TtlCache")
            .field("name", &self.name)
            .field("capacity", &self.lock().cap())
            .field("ttl", &self.ttl)
            .finish()
    }
}
