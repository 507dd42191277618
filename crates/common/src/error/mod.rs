//! Error classification shared by every Campline error type
//!
//! Each crate defines its own `thiserror` enum for the failures it can
//! produce. What they have in common is the way callers *react* to them:
//! whether to retry, how loudly to log, and how long to wait first. That
//! behaviour is captured once here by [`ErrorClassification`] so callers can
//! write a single retry/backoff policy against any Campline error.
//!
//! ## ErrorSeverity Levels
//!
//! | Level | Use Case | Examples |
//! |-------|----------|----------|
//! | **Info** | Expected conditions | Resource not modified, empty results |
//! | **Warning** | Degraded but recoverable | Rate limiting, expired token, timeouts |
//! | **Error** | Failure requiring attention | Rejected credential, policy denial |
//! | **Critical** | Caller bug or broken invariant | Malformed endpoint |
//!
//! ## Example
//!
//! ```rust
//! use std::time::Duration;
//!
//! use campline_common::error::{ErrorClassification, ErrorSeverity};
//!
//! #[derive(Debug)]
//! enum FetchError {
//!     Throttled(u64),
//!     Denied,
//! }
//!
//! impl ErrorClassification for FetchError {
//!     fn is_retryable(&self) -> bool {
//!         matches!(self, Self::Throttled(_))
//!     }
//!
//!     fn severity(&self) -> ErrorSeverity {
//!         match self {
//!             Self::Throttled(_) => ErrorSeverity::Warning,
//!             Self::Denied => ErrorSeverity::Error,
//!         }
//!     }
//!
//!     fn is_critical(&self) -> bool {
//!         false
//!     }
//!
//!     fn retry_after(&self) -> Option<Duration> {
//!         match self {
//!             Self::Throttled(secs) => Some(Duration::from_secs(*secs)),
//!             Self::Denied => None,
//!         }
//!     }
//! }
//!
//! let err = FetchError::Throttled(30);
//! assert!(err.is_retryable());
//! assert_eq!(err.retry_after(), Some(Duration::from_secs(30)));
//! assert!(!FetchError::Denied.is_retryable());
//! ```

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Trait for classifying errors by their characteristics
pub trait ErrorClassification {
    /// Check if this error is retryable
    ///
    /// Retryable errors are transient conditions that may succeed if the
    /// identical operation is attempted again, such as:
    /// - Rate limiting
    /// - Stale credentials that can be refreshed
    /// - Connection failures and timeouts
    /// - Server-side (5xx) failures
    fn is_retryable(&self) -> bool;

    /// Get the error severity level
    ///
    /// Used for logging and alerting decisions.
    fn severity(&self) -> ErrorSeverity;

    /// Check if this is a critical error requiring immediate attention
    fn is_critical(&self) -> bool;

    /// Get the suggested retry delay if applicable
    ///
    /// Returns `Some(Duration)` when the remote side told us how long to
    /// wait (e.g., from a `Retry-After` header), or `None` if no specific
    /// delay is known.
    fn retry_after(&self) -> Option<Duration>;
}

/// Error severity levels for monitoring and alerting
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorSeverity {
    /// Informational, typically for debugging
    Info,
    /// Warning, should be monitored but not critical
    Warning,
    /// Error, requires attention and action
    Error,
    /// Critical, immediate action required
    Critical,
}

impl ErrorSeverity {
    /// Stable lowercase label suitable for structured log fields.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "INFO"),
            Self::Warning => write!(f, "WARN"),
            Self::Error => write!(f, "ERROR"),
            Self::Critical => write!(f, "CRITICAL"),
        }
    }
}
