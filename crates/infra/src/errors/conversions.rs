//! Conversions from external infrastructure errors into domain errors.

use campline_domain::TransportError;
use reqwest::Error as HttpError;

use super::InfraError;

/* -------------------------------------------------------------------------- */
/* reqwest::Error → TransportError */
/* -------------------------------------------------------------------------- */

/// Categorize a reqwest failure. Only failures without an HTTP response
/// reach here; statuses are classified by the executor.
pub(crate) fn transport_error(err: HttpError) -> TransportError {
    let detail = err.to_string();

    if err.is_timeout() {
        return TransportError::timeout(format!("HTTP request timed out: {detail}"));
    }

    if err.is_connect() {
        return TransportError::connect(format!("HTTP connection failure: {detail}"));
    }

    if err.is_builder() {
        return TransportError::new(format!("invalid HTTP request: {detail}"));
    }

    TransportError::new(format!("HTTP request failed: {detail}"))
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        Self::HttpClient(value.to_string())
    }
}
