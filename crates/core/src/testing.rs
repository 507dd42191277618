//! Test doubles for the pipeline's ports
//!
//! Compiled for this crate's own tests and, behind the `test-utils`
//! feature, for downstream test suites.

#![allow(clippy::missing_panics_doc)]

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use campline_domain::{CacheEntry, HttpMethod, HttpRequest, HttpResponse, TransportError};
use parking_lot::Mutex;

use crate::api::{CacheError, HttpTransport, ResponseCache};

type Route = (HttpMethod, String);
type Reply = Result<HttpResponse, TransportError>;

#[derive(Debug, Default)]
struct Script {
    fixed: HashMap<Route, Reply>,
    sequences: HashMap<Route, VecDeque<Reply>>,
    requests: Vec<HttpRequest>,
}

/// Scripted [`HttpTransport`] that records every request
///
/// Replies are matched on method and exact URL. A queued sequence is
/// consumed first; once exhausted the fixed reply (if any) is used.
/// Unmatched requests fail with a [`TransportError`].
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    script: Arc<Mutex<Script>>,
}

impl MockTransport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reply with `response` to every matching request.
    pub fn respond(&self, method: HttpMethod, url: &str, response: HttpResponse) {
        self.script.lock().fixed.insert((method, url.to_string()), Ok(response));
    }

    /// Fail every matching request with `error`.
    pub fn fail(&self, method: HttpMethod, url: &str, error: TransportError) {
        self.script.lock().fixed.insert((method, url.to_string()), Err(error));
    }

    /// Reply with each of `responses` in turn.
    pub fn respond_sequence(&self, method: HttpMethod, url: &str, responses: Vec<HttpResponse>) {
        self.script
            .lock()
            .sequences
            .entry((method, url.to_string()))
            .or_default()
            .extend(responses.into_iter().map(Ok));
    }

    #[must_use]
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.script.lock().requests.clone()
    }

    #[must_use]
    pub fn request_count(&self) -> usize {
        self.script.lock().requests.len()
    }

    /// Number of requests sent with `method` to `url`.
    #[must_use]
    pub fn requests_for(&self, method: HttpMethod, url: &str) -> usize {
        self.script.lock().requests.iter().filter(|r| r.method == method && r.url == url).count()
    }

    #[must_use]
    pub fn last_request(&self) -> Option<HttpRequest> {
        self.script.lock().requests.last().cloned()
    }

    #[must_use]
    pub fn was_called(&self, url: &str) -> bool {
        self.script.lock().requests.iter().any(|r| r.url == url)
    }
}

impl HttpTransport for MockTransport {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut script = self.script.lock();
        let route = (request.method, request.url.clone());
        script.requests.push(request);

        if let Some(reply) = script.sequences.get_mut(&route).and_then(VecDeque::pop_front) {
            return reply;
        }
        script.fixed.get(&route).cloned().unwrap_or_else(|| {
            Err(TransportError::new(format!("No response configured for {} {}", route.0, route.1)))
        })
    }
}

/// Unbounded map-backed [`ResponseCache`]
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl MemoryCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl ResponseCache for MemoryCache {
    fn get(&self, key: &str) -> Result<Option<CacheEntry>, CacheError> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn set(&self, key: &str, entry: CacheEntry) -> Result<(), CacheError> {
        self.entries.lock().insert(key.to_string(), entry);
        Ok(())
    }
}

/// [`ResponseCache`] whose every operation fails
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingCache;

impl ResponseCache for FailingCache {
    fn get(&self, _key: &str) -> Result<Option<CacheEntry>, CacheError> {
        Err(CacheError("cache offline".into()))
    }

    fn set(&self, _key: &str, _entry: CacheEntry) -> Result<(), CacheError> {
        Err(CacheError("cache offline".into()))
    }
}
