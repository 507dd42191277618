//! Cache statistics

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Point-in-time statistics for a [`Cache`](super::Cache)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Current number of entries
    pub size: usize,
    /// Maximum allowed entries (None = unlimited)
    pub max_size: Option<usize>,
    /// Lookups that returned a value
    pub hits: u64,
    /// Lookups that found nothing or an expired entry
    pub misses: u64,
    /// Insert operations
    pub inserts: u64,
    /// Entries removed to make room
    pub evictions: u64,
    /// Entries dropped because their TTL elapsed
    pub expirations: u64,
}

/// Lock-free counters shared between cache clones
#[derive(Debug, Clone, Default)]
pub(crate) struct MetricsCollector {
    counters: Arc<[AtomicU64; 5]>,
}

const HITS: usize = 0;
const MISSES: usize = 1;
const INSERTS: usize = 2;
const EVICTIONS: usize = 3;
const EXPIRATIONS: usize = 4;

impl MetricsCollector {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn bump(&self, idx: usize) {
        self.counters[idx].fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_hit(&self) {
        self.bump(HITS);
    }

    pub(crate) fn record_miss(&self) {
        self.bump(MISSES);
    }

    pub(crate) fn record_insert(&self) {
        self.bump(INSERTS);
    }

    pub(crate) fn record_eviction(&self) {
        self.bump(EVICTIONS);
    }

    pub(crate) fn record_expiration(&self) {
        self.bump(EXPIRATIONS);
    }

    pub(crate) fn snapshot(&self, size: usize, max_size: Option<usize>) -> CacheStats {
        let load = |idx: usize| self.counters[idx].load(Ordering::Relaxed);
        CacheStats {
            size,
            max_size,
            hits: load(HITS),
            misses: load(MISSES),
            inserts: load(INSERTS),
            evictions: load(EVICTIONS),
            expirations: load(EXPIRATIONS),
        }
    }
}
