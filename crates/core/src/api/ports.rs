//! Port interfaces for the request pipeline
//!
//! Adapters live in `campline-infra`; this module only defines the seams and
//! a couple of trivial implementations that need no I/O.

use std::collections::HashMap;

use campline_domain::constants::DEFAULT_CONTENT_TYPE;
use campline_domain::{CacheEntry, HttpRequest, HttpResponse, TransportError};
use thiserror::Error;

/// Sends one fully-formed request and buffers the response.
///
/// Implementations own timeouts and connection policy. A non-2xx status is
/// a successful send; only failures to obtain a response are errors.
pub trait HttpTransport: Send + Sync {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Failure inside a cache provider
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cache provider failure: {0}")]
pub struct CacheError(pub String);

/// Key/value store for revalidatable response bodies.
///
/// The executor treats every error from this trait as a miss (on `get`) or
/// a no-op (on `set`), so providers are free to fail.
pub trait ResponseCache: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<CacheEntry>, CacheError>;
    fn set(&self, key: &str, entry: CacheEntry) -> Result<(), CacheError>;
}

/// Maps a file name to the content type used in its multipart part
pub trait ContentTypeResolver: Send + Sync {
    /// Never fails; unknown names resolve to `application/octet-stream`.
    fn content_type_for(&self, file_name: &str) -> String;
}

/// Cache that stores nothing; every lookup is a miss
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopResponseCache;

impl ResponseCache for NoopResponseCache {
    fn get(&self, _key: &str) -> Result<Option<CacheEntry>, CacheError> {
        Ok(None)
    }

    fn set(&self, _key: &str, _entry: CacheEntry) -> Result<(), CacheError> {
        Ok(())
    }
}

/// Extension table resolver with an explicit mapping
///
/// ```
/// use campline_core::api::{ContentTypeResolver, StaticContentTypes};
///
/// let types = StaticContentTypes::new().with("png", "image/png");
/// assert_eq!(types.content_type_for("Logo.PNG"), "image/png");
/// assert_eq!(types.content_type_for("notes"), "application/octet-stream");
/// ```
#[derive(Debug, Clone, Default)]
pub struct StaticContentTypes {
    by_extension: HashMap<String, String>,
}

impl StaticContentTypes {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `content_type` for an extension (without the dot).
    #[must_use]
    pub fn with(mut self, extension: &str, content_type: impl Into<String>) -> Self {
        self.by_extension.insert(extension.trim_start_matches('.').to_ascii_lowercase(), content_type.into());
        self
    }
}

impl ContentTypeResolver for StaticContentTypes {
    fn content_type_for(&self, file_name: &str) -> String {
        file_name
            .rsplit_once('.')
            .and_then(|(_, ext)| self.by_extension.get(&ext.to_ascii_lowercase()))
            .cloned()
            .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string())
    }
}
