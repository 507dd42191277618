//! Bounded in-process response cache

use std::time::Duration;

use campline_common::{Cache, CacheConfig, CacheStats};
use campline_core::api::{CacheError, ResponseCache};
use campline_domain::{CacheEntry, CacheSettings};

/// [`ResponseCache`] over the shared LRU [`Cache`].
///
/// Each client owns its own instance; nothing is process-global. Entries
/// do not survive a restart.
#[derive(Debug, Clone)]
pub struct InMemoryResponseCache {
    entries: Cache<String, CacheEntry>,
}

impl InMemoryResponseCache {
    #[must_use]
    pub fn new(settings: &CacheSettings) -> Self {
        let config = match settings.ttl_secs {
            Some(secs) => CacheConfig::ttl_lru(Duration::from_secs(secs), settings.max_entries),
            None => CacheConfig::lru(settings.max_entries),
        };
        Self { entries: Cache::new(config.with_metrics()) }
    }

    #[must_use]
    pub fn stats(&self) -> CacheStats {
        self.entries.stats()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for InMemoryResponseCache {
    fn default() -> Self {
        Self::new(&CacheSettings::default())
    }
}

impl ResponseCache for InMemoryResponseCache {
    fn get(&self, key: &str) -> Result<Option<CacheEntry>, CacheError> {
        Ok(self.entries.get(&key.to_string()))
    }

    fn set(&self, key: &str, entry: CacheEntry) -> Result<(), CacheError> {
        self.entries.insert(key.to_string(), entry);
        Ok(())
    }
}
