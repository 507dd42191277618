//! Cached response body plus the validators needed to revalidate it

use serde::{Deserialize, Serialize};

use crate::constants::{HEADER_ETAG, HEADER_LAST_MODIFIED};
use crate::types::http::HttpResponse;

/// A previously fetched body and its `ETag` / `Last-Modified` validators
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub body: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<String>,
}

impl CacheEntry {
    /// Capture a success response for later revalidation.
    ///
    /// Returns `None` when the response carries neither validator: such an
    /// entry could never be revalidated and must not be stored.
    #[must_use]
    pub fn from_response(response: &HttpResponse) -> Option<Self> {
        let etag = response.header(HEADER_ETAG).map(str::to_string);
        let last_modified = response.header(HEADER_LAST_MODIFIED).map(str::to_string);
        if etag.is_none() && last_modified.is_none() {
            return None;
        }
        Some(Self { body: response.text(), etag, last_modified })
    }

    #[must_use]
    pub const fn has_validators(&self) -> bool {
        self.etag.is_some() || self.last_modified.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_response_without_validators_is_none() {
        let response = HttpResponse::new(200).with_body("{}");
        assert_eq!(CacheEntry::from_response(&response), None);
    }

    #[test]
    fn test_from_response_captures_present_validators() {
        let response = HttpResponse::new(200)
            .with_header("etag", "\"abc\"")
            .with_body(r#"{"id":1}"#);

        let entry = CacheEntry::from_response(&response).unwrap();
        assert_eq!(entry.body, r#"{"id":1}"#);
        assert_eq!(entry.etag.as_deref(), Some("\"abc\""));
        assert_eq!(entry.last_modified, None);
        assert!(entry.has_validators());
    }
}
