//! Error types used throughout the request pipeline
//!
//! [`ApiError`] is the flat, non-overlapping taxonomy every exchange resolves
//! to when it does not succeed. Callers branch on the variant, never on the
//! message text.

use std::time::Duration;

use campline_common::error::{ErrorClassification, ErrorSeverity};
use thiserror::Error;

/// Result type alias for request pipeline operations
pub type Result<T> = std::result::Result<T, ApiError>;

/// Typed failure of a single API exchange
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Malformed resource URL; raised before any network I/O
    #[error("Invalid endpoint '{url}': resource URLs must end in .json, optionally followed by a query string")]
    InvalidEndpoint { url: String },

    /// No credential has been acquired yet; raised before any network I/O
    #[error("Not authenticated: acquire an access token first")]
    NotAuthenticated,

    /// Credential rejected outright; re-run the authorization flow
    #[error("Unauthorized: the access token was rejected")]
    Unauthorized,

    /// Credential is stale; refresh it and retry the same request once
    #[error("Access token expired")]
    TokenExpired,

    /// Wait at least `retry_after` seconds before retrying
    #[error("Rate limited: retry after {retry_after} seconds")]
    RateLimited { retry_after: u64 },

    /// Authenticated but denied by policy or account limits
    #[error("Forbidden: the request was denied")]
    Forbidden,

    /// Any other non-success status
    #[error("{message}")]
    GeneralFailure { status: u16, message: String },

    /// The exchange could not complete at the connection level
    #[error("Transport failure: {message}")]
    TransportFailure { message: String },

    /// A success response whose body is not the expected JSON
    #[error("Failed to decode response: {message}")]
    Decode { message: String },
}

impl ApiError {
    /// Build a [`ApiError::GeneralFailure`] whose message names the status.
    #[must_use]
    pub fn general_failure(status: u16, url: &str) -> Self {
        Self::GeneralFailure { status, message: format!("Request to {url} failed with HTTP {status}") }
    }

    /// Build a [`ApiError::Decode`] from any displayable cause.
    pub fn decode(cause: impl std::fmt::Display) -> Self {
        Self::Decode { message: cause.to_string() }
    }

    /// HTTP status associated with this failure, when there is one.
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Unauthorized | Self::TokenExpired => Some(401),
            Self::Forbidden => Some(403),
            Self::RateLimited { .. } => Some(429),
            Self::GeneralFailure { status, .. } => Some(*status),
            Self::InvalidEndpoint { .. }
            | Self::NotAuthenticated
            | Self::TransportFailure { .. }
            | Self::Decode { .. } => None,
        }
    }

    /// Stable label suitable for structured logging.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::InvalidEndpoint { .. } => "invalid_endpoint",
            Self::NotAuthenticated => "not_authenticated",
            Self::Unauthorized => "unauthorized",
            Self::TokenExpired => "token_expired",
            Self::RateLimited { .. } => "rate_limited",
            Self::Forbidden => "forbidden",
            Self::GeneralFailure { .. } => "general_failure",
            Self::TransportFailure { .. } => "transport_failure",
            Self::Decode { .. } => "decode",
        }
    }
}

impl ErrorClassification for ApiError {
    fn is_retryable(&self) -> bool {
        match self {
            Self::TokenExpired | Self::RateLimited { .. } | Self::TransportFailure { .. } => true,
            Self::GeneralFailure { status, .. } => *status >= 500,
            Self::InvalidEndpoint { .. }
            | Self::NotAuthenticated
            | Self::Unauthorized
            | Self::Forbidden
            | Self::Decode { .. } => false,
        }
    }

    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::TokenExpired | Self::RateLimited { .. } | Self::TransportFailure { .. } => {
                ErrorSeverity::Warning
            }
            Self::NotAuthenticated
            | Self::Unauthorized
            | Self::Forbidden
            | Self::GeneralFailure { .. }
            | Self::Decode { .. } => ErrorSeverity::Error,
            Self::InvalidEndpoint { .. } => ErrorSeverity::Critical,
        }
    }

    fn is_critical(&self) -> bool {
        matches!(self, Self::InvalidEndpoint { .. })
    }

    fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::RateLimited { retry_after } => Some(Duration::from_secs(*retry_after)),
            _ => None,
        }
    }
}

/// Failure reported by a transport adapter when no HTTP response was received
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct TransportError {
    pub message: String,
    pub is_timeout: bool,
    pub is_connect: bool,
}

impl TransportError {
    /// Generic transport failure with no further categorization
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into(), is_timeout: false, is_connect: false }
    }

    /// The request did not complete within the transport's timeout
    pub fn timeout(message: impl Into<String>) -> Self {
        Self { message: message.into(), is_timeout: true, is_connect: false }
    }

    /// The connection could not be established
    pub fn connect(message: impl Into<String>) -> Self {
        Self { message: message.into(), is_timeout: false, is_connect: true }
    }
}

impl From<TransportError> for ApiError {
    fn from(err: TransportError) -> Self {
        let message = if err.is_timeout {
            format!("timed out: {}", err.message)
        } else if err.is_connect {
            format!("connection failed: {}", err.message)
        } else {
            err.message
        };
        Self::TransportFailure { message }
    }
}

impl ErrorClassification for TransportError {
    fn is_retryable(&self) -> bool {
        true
    }

    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Warning
    }

    fn is_critical(&self) -> bool {
        false
    }

    fn retry_after(&self) -> Option<Duration> {
        None
    }
}

/// A JSON value did not have the shape the caller asked for
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Expected {expected} at '{path}', found {found}")]
pub struct JsonShapeError {
    pub path: String,
    pub expected: &'static str,
    pub found: &'static str,
}

impl ErrorClassification for JsonShapeError {
    fn is_retryable(&self) -> bool {
        false
    }

    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Error
    }

    fn is_critical(&self) -> bool {
        false
    }

    fn retry_after(&self) -> Option<Duration> {
        None
    }
}

impl From<JsonShapeError> for ApiError {
    fn from(err: JsonShapeError) -> Self {
        Self::decode(err)
    }
}

/// Configuration loading and validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    #[error("Invalid value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    #[error("Config file not found: {0}")]
    NotFound(String),

    #[error("Failed to read config file '{path}': {message}")]
    Io { path: String, message: String },

    #[error("Invalid {format} format: {message}")]
    Parse { format: &'static str, message: String },

    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),
}

impl ErrorClassification for ConfigError {
    fn is_retryable(&self) -> bool {
        false
    }

    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Critical
    }

    fn is_critical(&self) -> bool {
        true
    }

    fn retry_after(&self) -> Option<Duration> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiError::TokenExpired.status_code(), Some(401));
        assert_eq!(ApiError::Unauthorized.status_code(), Some(401));
        assert_eq!(ApiError::Forbidden.status_code(), Some(403));
        assert_eq!(ApiError::RateLimited { retry_after: 3 }.status_code(), Some(429));
        assert_eq!(ApiError::general_failure(502, "https://x/y.json").status_code(), Some(502));
        assert_eq!(ApiError::TransportFailure { message: "reset".into() }.status_code(), None);
    }

    #[test]
    fn test_general_failure_message_names_status() {
        let err = ApiError::general_failure(418, "https://example.com/a.json");
        assert!(err.to_string().contains("418"));
        assert!(err.to_string().contains("https://example.com/a.json"));
    }

    /// Validates `ErrorClassification` for `ApiError`.
    ///
    /// Assertions:
    /// - Rate limits, expired tokens, transport failures and 5xx retry.
    /// - Rejected credentials, policy denials and caller bugs do not.
    /// - Only `RateLimited` carries a retry delay.
    #[test]
    fn test_classification() {
        assert!(ApiError::RateLimited { retry_after: 30 }.is_retryable());
        assert!(ApiError::TokenExpired.is_retryable());
        assert!(ApiError::TransportFailure { message: String::new() }.is_retryable());
        assert!(ApiError::general_failure(503, "u").is_retryable());
        assert!(!ApiError::general_failure(404, "u").is_retryable());
        assert!(!ApiError::Unauthorized.is_retryable());
        assert!(!ApiError::Forbidden.is_retryable());
        assert!(!ApiError::InvalidEndpoint { url: "u".into() }.is_retryable());

        assert_eq!(
            ApiError::RateLimited { retry_after: 30 }.retry_after(),
            Some(Duration::from_secs(30))
        );
        assert_eq!(ApiError::TokenExpired.retry_after(), None);
        assert!(ApiError::InvalidEndpoint { url: "u".into() }.is_critical());
        assert_eq!(ApiError::Forbidden.severity(), ErrorSeverity::Error);
    }

    #[test]
    fn test_transport_error_conversion_keeps_category() {
        let err: ApiError = TransportError::timeout("30s elapsed").into();
        assert_eq!(err, ApiError::TransportFailure { message: "timed out: 30s elapsed".into() });

        assert!(TransportError::new("reset").is_retryable());
        assert!(ConfigError::MissingVar("X".into()).is_critical());

        let err: ApiError = TransportError::connect("refused").into();
        assert_eq!(err, ApiError::TransportFailure { message: "connection failed: refused".into() });
    }
}
