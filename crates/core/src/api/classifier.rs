//! Maps an HTTP status and headers to a typed outcome

use campline_domain::constants::{HEADER_RETRY_AFTER, HEADER_WWW_AUTHENTICATE, TOKEN_EXPIRED_MARKER};
use campline_domain::{ApiError, Headers};
use tracing::warn;

/// `Ok(())` for any 2xx status, otherwise the matching [`ApiError`].
///
/// - 429: [`ApiError::RateLimited`] with the `Retry-After` seconds
/// - 401: [`ApiError::TokenExpired`] if `WWW-Authenticate` carries the
///   expiry marker, [`ApiError::Unauthorized`] otherwise
/// - 403: [`ApiError::Forbidden`]
/// - anything else: [`ApiError::GeneralFailure`] naming the status and URL
///
/// # Errors
/// Returns the classified failure for every non-2xx status.
pub fn classify(status: u16, headers: &Headers, url: &str) -> Result<(), ApiError> {
    match status {
        200..=299 => Ok(()),
        429 => Err(ApiError::RateLimited { retry_after: retry_after_secs(headers) }),
        401 if is_token_expired(headers) => Err(ApiError::TokenExpired),
        401 => Err(ApiError::Unauthorized),
        403 => Err(ApiError::Forbidden),
        _ => Err(ApiError::general_failure(status, url)),
    }
}

/// Integer seconds from `Retry-After`. HTTP-date values and missing headers
/// report 0.
fn retry_after_secs(headers: &Headers) -> u64 {
    match headers.get(HEADER_RETRY_AFTER) {
        Some(value) => value.trim().parse().unwrap_or_else(|_| {
            warn!(retry_after = value, "Retry-After is not an integer number of seconds");
            0
        }),
        None => {
            warn!("429 response without Retry-After");
            0
        }
    }
}

fn is_token_expired(headers: &Headers) -> bool {
    headers
        .get(HEADER_WWW_AUTHENTICATE)
        .is_some_and(|challenge| challenge.to_ascii_lowercase().contains(TOKEN_EXPIRED_MARKER))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const URL: &str = "https://api.example.com/1/projects.json";

    #[test]
    fn test_success_range() {
        for status in [200, 201, 204, 299] {
            assert_eq!(classify(status, &Headers::new(), URL), Ok(()));
        }
    }

    /// Validates `classify` behavior for the rate limit scenario.
    ///
    /// Assertions:
    /// - `Retry-After: 30` is surfaced verbatim as 30 seconds
    /// - surrounding whitespace is tolerated
    #[test]
    fn test_rate_limited_surfaces_retry_after() {
        let headers = Headers::new().with("Retry-After", "30");
        assert_eq!(classify(429, &headers, URL), Err(ApiError::RateLimited { retry_after: 30 }));

        let headers = Headers::new().with("retry-after", " 5 ");
        assert_eq!(classify(429, &headers, URL), Err(ApiError::RateLimited { retry_after: 5 }));
    }

    #[test]
    fn test_rate_limited_without_usable_header_reports_zero() {
        assert_eq!(classify(429, &Headers::new(), URL), Err(ApiError::RateLimited { retry_after: 0 }));

        let headers = Headers::new().with("Retry-After", "Wed, 21 Oct 2026 07:28:00 GMT");
        assert_eq!(classify(429, &headers, URL), Err(ApiError::RateLimited { retry_after: 0 }));
    }

    /// Validates `classify` behavior for the 401 challenge scenario.
    ///
    /// Assertions:
    /// - the expiry marker yields `TokenExpired`, matched case-insensitively
    /// - any other challenge (or none) yields `Unauthorized`
    #[test]
    fn test_unauthorized_distinguishes_expired_token() {
        let expired = Headers::new()
            .with("WWW-Authenticate", r#"Bearer realm="api", error="EXPIRED_TOKEN""#);
        assert_eq!(classify(401, &expired, URL), Err(ApiError::TokenExpired));

        let invalid = Headers::new().with("WWW-Authenticate", r#"Bearer error="invalid_token""#);
        assert_eq!(classify(401, &invalid, URL), Err(ApiError::Unauthorized));
        assert_eq!(classify(401, &Headers::new(), URL), Err(ApiError::Unauthorized));
    }

    #[test]
    fn test_forbidden_and_general_failure() {
        assert_eq!(classify(403, &Headers::new(), URL), Err(ApiError::Forbidden));

        let err = classify(500, &Headers::new(), URL).unwrap_err();
        assert_eq!(err.status_code(), Some(500));
        assert!(err.to_string().contains("500"));

        let err = classify(304, &Headers::new(), URL).unwrap_err();
        assert!(matches!(err, ApiError::GeneralFailure { status: 304, .. }));
    }
}
