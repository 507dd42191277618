//! Core cache implementation

use std::collections::{HashMap, VecDeque};
use std::hash::Hash;
use std::sync::Arc;
use std::time::Instant;

use parking_lot::Mutex;

use super::config::CacheConfig;
use super::stats::{CacheStats, MetricsCollector};

/// Entry stored in the cache with metadata for expiration
#[derive(Debug, Clone)]
struct Slot<V> {
    value: V,
    inserted_at: Instant,
}

/// Internal storage for cache entries
#[derive(Debug)]
struct Storage<K, V> {
    entries: HashMap<K, Slot<V>>,
    /// Front = next eviction candidate
    order: VecDeque<K>,
}

impl<K, V> Storage<K, V>
where
    K: Eq + Hash + Clone,
{
    fn new() -> Self {
        Self { entries: HashMap::new(), order: VecDeque::new() }
    }

    fn touch(&mut self, key: &K) {
        if let Some(pos) = self.order.iter().position(|k| k == key) {
            self.order.remove(pos);
        }
        self.order.push_back(key.clone());
    }

    fn forget(&mut self, key: &K) {
        if let Some(pos) = self.order.iter().position(|k| k == key) {
            self.order.remove(pos);
        }
        self.entries.remove(key);
    }
}

/// Generic thread-safe cache with LRU eviction and TTL expiration
///
/// Clones share the same storage and metrics.
///
/// # Example
/// ```
/// use campline_common::cache::{Cache, CacheConfig};
///
/// let cache: Cache<String, i32> = Cache::new(CacheConfig::lru(2));
/// cache.insert("a".to_string(), 1);
/// cache.insert("b".to_string(), 2);
/// cache.insert("c".to_string(), 3);
/// assert_eq!(cache.get(&"a".to_string()), None);
/// assert_eq!(cache.len(), 2);
/// ```
pub struct Cache<K, V> {
    storage: Arc<Mutex<Storage<K, V>>>,
    config: CacheConfig,
    metrics: MetricsCollector,
}

impl<K, V> Cache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Create a new cache with the given configuration
    #[must_use]
    pub fn new(config: CacheConfig) -> Self {
        Self { storage: Arc::new(Mutex::new(Storage::new())), config, metrics: MetricsCollector::new() }
    }

    /// Insert a value into the cache, replacing any previous value for `key`
    ///
    /// If the cache is at capacity, the least recently used entry is
    /// evicted first. A zero-capacity cache stores nothing.
    pub fn insert(&self, key: K, value: V) {
        let mut storage = self.storage.lock();

        if let Some(max_size) = self.config.max_size {
            if !storage.entries.contains_key(&key) && storage.entries.len() >= max_size {
                if max_size == 0 {
                    return;
                }
                if let Some(victim) = storage.order.pop_front() {
                    storage.entries.remove(&victim);
                    if self.config.track_metrics {
                        self.metrics.record_eviction();
                    }
                }
            }
        }

        storage.entries.insert(key.clone(), Slot { value, inserted_at: Instant::now() });
        storage.touch(&key);

        if self.config.track_metrics {
            self.metrics.record_insert();
        }
    }

    /// Get a value from the cache
    ///
    /// Returns `None` if the key doesn't exist or the entry has expired.
    pub fn get(&self, key: &K) -> Option<V> {
        let mut storage = self.storage.lock();

        let expired = match (storage.entries.get(key), self.config.ttl) {
            (None, _) => {
                self.record_miss();
                return None;
            }
            (Some(slot), Some(ttl)) => slot.inserted_at.elapsed() >= ttl,
            (Some(_), None) => false,
        };

        if expired {
            storage.forget(key);
            self.record_miss();
            if self.config.track_metrics {
                self.metrics.record_expiration();
            }
            return None;
        }

        storage.touch(key);
        if self.config.track_metrics {
            self.metrics.record_hit();
        }
        storage.entries.get(key).map(|slot| slot.value.clone())
    }

    /// Current number of entries (including not-yet-collected expired ones)
    #[must_use]
    pub fn len(&self) -> usize {
        self.storage.lock().entries.len()
    }

    /// Check if the cache is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of cache statistics
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        self.metrics.snapshot(self.len(), self.config.max_size)
    }

    fn record_miss(&self) {
        if self.config.track_metrics {
            self.metrics.record_miss();
        }
    }
}

impl<K, V> Clone for Cache<K, V> {
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
            config: self.config.clone(),
            metrics: self.metrics.clone(),
        }
    }
}

impl<K, V> std::fmt::Debug for Cache<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cache").field("config", &self.config).finish_non_exhaustive()
    }
}
