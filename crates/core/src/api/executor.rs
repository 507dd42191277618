//! Request execution pipeline
//!
//! Every exchange follows the same shape: validate the endpoint, sign with
//! the stored bearer token, send through the transport port, classify the
//! status, and decode the body. GETs additionally consult the response
//! cache and revalidate with a conditional probe before fetching in full.

use std::sync::Arc;

use campline_domain::constants::{
    HEADER_ACCEPT, HEADER_AUTHORIZATION, HEADER_CONTENT_TYPE, HEADER_IF_MODIFIED_SINCE,
    HEADER_IF_NONE_MATCH, HEADER_LOCATION, HEADER_USER_AGENT, JSON_CONTENT_TYPE,
};
use campline_domain::{
    validate_endpoint, ApiError, ApiResponse, CacheEntry, HttpMethod, HttpRequest, HttpResponse,
    JsonPayload, RequestBody, Result,
};
use campline_common::ErrorClassification;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use super::classifier::classify;
use super::fingerprint::fingerprint;
use super::ports::{HttpTransport, ResponseCache};
use crate::auth::TokenStore;

/// Executes authenticated GET and POST exchanges
///
/// Holds no mutable state of its own: the credential lives in the shared
/// [`TokenStore`] and cached bodies in the injected [`ResponseCache`].
pub struct RequestExecutor {
    transport: Arc<dyn HttpTransport>,
    cache: Arc<dyn ResponseCache>,
    tokens: Arc<TokenStore>,
    user_agent: String,
}

impl RequestExecutor {
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        cache: Arc<dyn ResponseCache>,
        tokens: Arc<TokenStore>,
        user_agent: impl Into<String>,
    ) -> Self {
        Self { transport, cache, tokens, user_agent: user_agent.into() }
    }

    #[must_use]
    pub fn tokens(&self) -> &Arc<TokenStore> {
        &self.tokens
    }

    /// Fetch a JSON resource, revalidating a cached copy when one exists.
    ///
    /// Returns [`ApiResponse::NotModified`] with the cached body when the
    /// server confirms it is current, otherwise [`ApiResponse::Success`].
    /// A 2xx response carrying `ETag` or `Last-Modified` is cached.
    ///
    /// # Errors
    /// - [`ApiError::InvalidEndpoint`] before any I/O if `url` is not a
    ///   `.json` resource
    /// - [`ApiError::NotAuthenticated`] before any I/O if no access token
    ///   is held
    /// - the classified failure for a non-2xx status
    /// - [`ApiError::TransportFailure`] if no response was received
    /// - [`ApiError::Decode`] if the body is not JSON
    #[instrument(skip(self), fields(method = "GET"))]
    pub fn get(&self, url: &str) -> Result<ApiResponse> {
        validate_endpoint(url)?;
        let token = self.bearer()?;
        let key = fingerprint(&token, url);

        if let Some(entry) = self.lookup(&key) {
            if let Some(body) = self.revalidate(url, &token, &entry) {
                debug!("Cached representation is current");
                return Ok(ApiResponse::NotModified { body });
            }
        }

        let response = self.send(self.signed(HttpMethod::Get, url, &token))?;
        check_status(&response, url)?;
        let body = decode_body(&response.body)?;

        if let Some(entry) = CacheEntry::from_response(&response) {
            self.store(&key, entry);
        }

        debug!(status = response.status, "GET request successful");
        Ok(ApiResponse::success(body))
    }

    /// Create a resource from a JSON payload.
    ///
    /// A 201 reports the `Location` header (if any) alongside the decoded
    /// body; a 204 reports a null body and no location. POST responses are
    /// never cached.
    ///
    /// # Errors
    /// Same as [`get`](Self::get), plus [`ApiError::Decode`] if the payload
    /// cannot be serialized.
    #[instrument(skip(self, payload), fields(method = "POST"))]
    pub fn post(&self, url: &str, payload: impl Into<JsonPayload>) -> Result<ApiResponse> {
        let body = payload.into().into_body()?;
        self.post_body(url, RequestBody::Bytes(body))
    }

    /// POST a prepared body. Byte bodies are labelled JSON; multipart
    /// bodies get their `Content-Type` from the transport.
    pub(crate) fn post_body(&self, url: &str, body: RequestBody) -> Result<ApiResponse> {
        validate_endpoint(url)?;
        let token = self.bearer()?;

        let mut request = self.signed(HttpMethod::Post, url, &token);
        if matches!(body, RequestBody::Bytes(_)) {
            request = request.header(HEADER_CONTENT_TYPE, JSON_CONTENT_TYPE);
        }
        request.body = Some(body);
        let response = self.send(request)?;
        check_status(&response, url)?;

        let outcome = match response.status {
            204 => ApiResponse::Success { body: Value::Null, location: None },
            201 => ApiResponse::Success {
                body: decode_body(&response.body)?,
                location: response.header(HEADER_LOCATION).map(str::to_string),
            },
            _ => ApiResponse::success(decode_body(&response.body)?),
        };

        debug!(status = response.status, location = ?outcome.location(), "POST request successful");
        Ok(outcome)
    }

    fn bearer(&self) -> Result<String> {
        self.tokens.access_token().ok_or(ApiError::NotAuthenticated)
    }

    fn signed(&self, method: HttpMethod, url: &str, token: &str) -> HttpRequest {
        HttpRequest::new(method, url)
            .header(HEADER_AUTHORIZATION, format!("Bearer {token}"))
            .header(HEADER_USER_AGENT, &self.user_agent)
            .header(HEADER_ACCEPT, JSON_CONTENT_TYPE)
    }

    fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let method = request.method;
        self.transport.send(request).map_err(|err| {
            warn!(%method, error = %err, timeout = err.is_timeout, "Transport failure");
            ApiError::from(err)
        })
    }

    fn lookup(&self, key: &str) -> Option<CacheEntry> {
        match self.cache.get(key) {
            Ok(entry) => entry,
            Err(err) => {
                warn!(error = %err, "Cache lookup failed, treating as miss");
                None
            }
        }
    }

    fn store(&self, key: &str, entry: CacheEntry) {
        if let Err(err) = self.cache.set(key, entry) {
            warn!(error = %err, "Cache write failed, response not cached");
        }
    }

    /// Conditional HEAD probe. `Some(body)` only on a 304 whose cached body
    /// still decodes; every other outcome falls through to a full fetch.
    fn revalidate(&self, url: &str, token: &str, entry: &CacheEntry) -> Option<Value> {
        let mut probe = self.signed(HttpMethod::Head, url, token);
        if let Some(last_modified) = &entry.last_modified {
            probe = probe.header(HEADER_IF_MODIFIED_SINCE, last_modified);
        }
        if let Some(etag) = &entry.etag {
            probe = probe.header(HEADER_IF_NONE_MATCH, etag);
        }

        match self.transport.send(probe) {
            Ok(response) if response.status == 304 => match decode_body(entry.body.as_bytes()) {
                Ok(body) => Some(body),
                Err(err) => {
                    warn!(error = %err, "Cached body no longer decodes, refetching");
                    None
                }
            },
            Ok(response) => {
                debug!(status = response.status, "Probe did not confirm cached copy");
                None
            }
            Err(err) => {
                debug!(error = %err, "Probe failed, refetching");
                None
            }
        }
    }
}

impl std::fmt::Debug for RequestExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestExecutor")
            .field("user_agent", &self.user_agent)
            .field("authenticated", &self.tokens.is_authenticated())
            .finish_non_exhaustive()
    }
}

fn check_status(response: &HttpResponse, url: &str) -> Result<()> {
    classify(response.status, &response.headers, url).inspect_err(|err| {
        warn!(
            status = response.status,
            error_type = err.label(),
            retryable = err.is_retryable(),
            severity = %err.severity(),
            "Request failed"
        );
    })
}

/// Empty (or whitespace-only) bodies decode to `null`.
fn decode_body(bytes: &[u8]) -> Result<Value> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    serde_json::from_slice(bytes).map_err(ApiError::decode)
}
