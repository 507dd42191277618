//! Generic in-memory cache with configurable eviction
//!
//! Backs the default response-cache provider. Entries are bounded by an
//! optional maximum size (evicted LRU) and an optional time-to-live.
//! Lookups never fail: a missing or expired entry is simply a miss.
//!
//! # Examples
//!
//! ## Simple LRU Cache
//! ```
//! use campline_common::cache::{Cache, CacheConfig};
//!
//! let cache: Cache<String, i32> = Cache::new(CacheConfig::lru(100));
//! cache.insert("key".to_string(), 42);
//! assert_eq!(cache.get(&"key".to_string()), Some(42));
//! ```
//!
//! ## Combined TTL + LRU
//! ```
//! use std::time::Duration;
//!
//! use campline_common::cache::{Cache, CacheConfig};
//!
//! let cache: Cache<String, Vec<u8>> =
//!     Cache::new(CacheConfig::ttl_lru(Duration::from_secs(300), 1000));
//! # cache.insert("k".to_string(), vec![1]);
//! ```
//!
//! # Thread Safety
//!
//! Clones share storage, so a cache can be handed to several owners (or
//! wrapped in `Arc`) and used from multiple threads.

mod config;
mod core;
mod stats;

pub use self::config::CacheConfig;
pub use self::core::Cache;
pub use self::stats::CacheStats;
