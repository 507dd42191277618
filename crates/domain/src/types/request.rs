//! Request-side inputs: endpoint validation and JSON payloads

use serde::Serialize;
use serde_json::Value;

use crate::constants::JSON_RESOURCE_SUFFIX;
use crate::errors::ApiError;

/// Check that `url` is an absolute resource URL ending in `.json`
/// (case-insensitive), optionally followed by a query string.
///
/// # Errors
/// Returns [`ApiError::InvalidEndpoint`] naming the offending URL.
///
/// # Example
/// ```
/// use campline_domain::validate_endpoint;
///
/// assert!(validate_endpoint("https://example.com/999/projects.json").is_ok());
/// assert!(validate_endpoint("https://example.com/999/Projects.JSON?page=2").is_ok());
/// assert!(validate_endpoint("https://example.com/999/projects").is_err());
/// ```
pub fn validate_endpoint(url: &str) -> Result<(), ApiError> {
    let invalid = || ApiError::InvalidEndpoint { url: url.to_string() };

    let parsed = url::Url::parse(url).map_err(|_| invalid())?;
    if !matches!(parsed.scheme(), "http" | "https") || parsed.fragment().is_some() {
        return Err(invalid());
    }

    let path = url.split_once('?').map_or(url, |(path, _)| path);
    if path.to_ascii_lowercase().ends_with(JSON_RESOURCE_SUFFIX) {
        Ok(())
    } else {
        Err(invalid())
    }
}

/// JSON body for a POST: either a value to serialize or a pre-serialized
/// string sent verbatim
#[derive(Debug, Clone, PartialEq)]
pub enum JsonPayload {
    Value(Value),
    Raw(String),
}

impl JsonPayload {
    /// Serialize any `Serialize` type into a payload.
    ///
    /// # Errors
    /// Returns [`ApiError::Decode`] if the value cannot be represented as
    /// JSON (e.g. a map with non-string keys).
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Result<Self, ApiError> {
        serde_json::to_value(value).map(Self::Value).map_err(ApiError::decode)
    }

    /// Wire bytes of the payload.
    ///
    /// # Errors
    /// Returns [`ApiError::Decode`] if serialization fails.
    pub fn into_body(self) -> Result<Vec<u8>, ApiError> {
        match self {
            Self::Raw(text) => Ok(text.into_bytes()),
            Self::Value(value) => serde_json::to_vec(&value).map_err(ApiError::decode),
        }
    }
}

impl From<Value> for JsonPayload {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<String> for JsonPayload {
    fn from(text: String) -> Self {
        Self::Raw(text)
    }
}

impl From<&str> for JsonPayload {
    fn from(text: &str) -> Self {
        Self::Raw(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_validate_endpoint_accepts_json_resources() {
        for url in [
            "https://example.com/1/projects.json",
            "https://example.com/1/projects/5/todolists.JSON",
            "http://localhost:8080/people/me.json?fields=name&x=1",
        ] {
            assert!(validate_endpoint(url).is_ok(), "{url} should be accepted");
        }
    }

    #[test]
    fn test_validate_endpoint_rejects_and_names_url() {
        for url in [
            "https://example.com/1/projects",
            "https://example.com/1/projects.xml?format=.json",
            "https://example.com/1/projects.json#top",
            "/1/projects.json",
            "ftp://example.com/projects.json",
            "",
        ] {
            let err = validate_endpoint(url).unwrap_err();
            assert_eq!(err, ApiError::InvalidEndpoint { url: url.to_string() });
        }
    }

    #[test]
    fn test_raw_payload_is_sent_verbatim() {
        let body = JsonPayload::from(r#"{"name": "keep spacing"}"#).into_body().unwrap();
        assert_eq!(body, br#"{"name": "keep spacing"}"#.to_vec());
    }

    #[test]
    fn test_value_payload_is_serialized() {
        #[derive(Serialize)]
        struct NewProject<'a> {
            name: &'a str,
        }

        let payload = JsonPayload::from_serialize(&NewProject { name: "Launch" }).unwrap();
        assert_eq!(payload, JsonPayload::Value(json!({ "name": "Launch" })));
        assert_eq!(payload.into_body().unwrap(), br#"{"name":"Launch"}"#.to_vec());
    }
}
