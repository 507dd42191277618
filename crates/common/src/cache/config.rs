//! Cache configuration types

use std::time::Duration;

/// Configuration for cache behavior
///
/// A full cache evicts its least recently used entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum number of entries (None = unlimited)
    pub max_size: Option<usize>,

    /// Time-to-live for entries (None = no expiration)
    pub ttl: Option<Duration>,

    /// Whether to collect hit/miss metrics
    pub track_metrics: bool,
}

impl CacheConfig {
    /// Quick preset for LRU cache
    ///
    /// # Example
    /// ```
    /// use campline_common::cache::CacheConfig;
    ///
    /// let config = CacheConfig::lru(1000);
    /// assert_eq!(config.max_size, Some(1000));
    /// ```
    #[must_use]
    pub fn lru(max_size: usize) -> Self {
        Self { max_size: Some(max_size), ..Self::default() }
    }

    /// Combined TTL + LRU cache
    #[must_use]
    pub fn ttl_lru(ttl: Duration, max_size: usize) -> Self {
        Self { max_size: Some(max_size), ttl: Some(ttl), ..Self::default() }
    }

    /// Enable hit/miss tracking
    #[must_use]
    pub fn with_metrics(mut self) -> Self {
        self.track_metrics = true;
        self
    }
}
