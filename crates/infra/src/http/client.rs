use std::time::Duration;

use campline_core::api::HttpTransport;
use campline_domain::{
    Headers, HttpMethod, HttpRequest, HttpResponse, MultipartFile, RequestBody, TransportError,
};
use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::Client as ReqwestClient;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Method;
use tracing::debug;

use crate::errors::{transport_error, InfraError};

/// Blocking [`HttpTransport`] backed by `reqwest`.
///
/// Sends exactly once; retries and backoff are the caller's decision.
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    client: ReqwestClient,
}

impl ReqwestTransport {
    /// Start building a new transport.
    pub fn builder() -> ReqwestTransportBuilder {
        ReqwestTransportBuilder::default()
    }

    /// Convenience constructor with default configuration (no timeout).
    pub fn new() -> Result<Self, InfraError> {
        Self::builder().build()
    }
}

impl HttpTransport for ReqwestTransport {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let method = match request.method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Head => Method::HEAD,
            HttpMethod::Post => Method::POST,
        };
        debug!(%method, url = %request.url, "sending HTTP request");

        let mut builder = self.client.request(method.clone(), &request.url);
        for (name, value) in request.headers.iter() {
            builder = builder.header(name, value);
        }
        builder = match request.body {
            Some(RequestBody::Bytes(bytes)) => builder.body(bytes),
            Some(RequestBody::Multipart(file)) => builder.multipart(file_form(file)?),
            None => builder,
        };

        let response = builder.send().map_err(transport_error)?;
        let status = response.status().as_u16();
        debug!(%method, url = %request.url, status, "received HTTP response");

        let headers: Headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| match value.to_str() {
                Ok(value) => Some((name.as_str(), value)),
                Err(_) => {
                    debug!(header = %name, "dropping non-UTF-8 response header value");
                    None
                }
            })
            .collect();
        let body = response.bytes().map_err(transport_error)?.to_vec();

        Ok(HttpResponse { status, headers, body })
    }
}

/// One-part form for an upload. `reqwest` writes the boundary and the
/// request `Content-Type`.
fn file_form(file: MultipartFile) -> Result<Form, TransportError> {
    let mut part = Part::text(file.content)
        .file_name(file.file_name)
        .mime_str(&file.content_type)
        .map_err(|err| TransportError::new(format!("invalid part content type: {err}")))?;

    if let Some(encoding) = file.transfer_encoding {
        let value = HeaderValue::from_str(&encoding)
            .map_err(|err| TransportError::new(format!("invalid transfer encoding: {err}")))?;
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TRANSFER_ENCODING, value);
        part = part.headers(headers);
    }

    Ok(Form::new().part(file.field, part))
}

const CONTENT_TRANSFER_ENCODING: HeaderName = HeaderName::from_static("content-transfer-encoding");

/// Builder for [`ReqwestTransport`].
#[derive(Debug, Default)]
pub struct ReqwestTransportBuilder {
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    proxy: Option<String>,
    accept_invalid_certs: bool,
}

impl ReqwestTransportBuilder {
    /// Total time allowed per exchange. Unset means no timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Same as [`timeout`](Self::timeout) for an optional value.
    pub fn timeout_opt(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Route every request through `proxy_url`. Without one, system proxy
    /// settings are ignored.
    pub fn proxy(mut self, proxy_url: impl Into<String>) -> Self {
        self.proxy = Some(proxy_url.into());
        self
    }

    /// Test-only helper to allow insecure TLS (e.g., self-signed certs).
    #[cfg(test)]
    pub fn accept_invalid_certs(mut self, enabled: bool) -> Self {
        self.accept_invalid_certs = enabled;
        self
    }

    pub fn build(self) -> Result<ReqwestTransport, InfraError> {
        let mut builder = ReqwestClient::builder().timeout(self.timeout);

        if let Some(timeout) = self.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }

        builder = match self.proxy {
            Some(url) => builder.proxy(reqwest::Proxy::all(url)?),
            None => builder.no_proxy(),
        };

        if self.accept_invalid_certs {
            builder = builder.danger_accept_invalid_certs(true);
        }

        Ok(ReqwestTransport { client: builder.build()? })
    }
}
