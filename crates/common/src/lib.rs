//! Cross-cutting utilities shared across Campline crates.
//!
//! # Modules
//!
//! - [`error`]: error classification trait and severity scale implemented by
//!   every Campline error type
//! - [`cache`]: generic, thread-safe in-memory cache with LRU eviction,
//!   TTL expiration and hit/miss statistics

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

pub mod cache;
pub mod error;

// Re-export commonly used types and traits for convenience
pub use cache::{Cache, CacheConfig, CacheStats};
pub use error::{ErrorClassification, ErrorSeverity};
