//! Successful outcome of an exchange

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::errors::ApiError;

/// What a GET or POST resolved to when it did not fail
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse {
    /// Fresh body from the server; `location` is set from a 201's
    /// `Location` header. An empty body (e.g. 204) is `Value::Null`.
    Success { body: Value, location: Option<String> },

    /// The server confirmed the cached representation is current
    NotModified { body: Value },
}

impl ApiResponse {
    #[must_use]
    pub const fn success(body: Value) -> Self {
        Self::Success { body, location: None }
    }

    #[must_use]
    pub const fn body(&self) -> &Value {
        match self {
            Self::Success { body, .. } | Self::NotModified { body } => body,
        }
    }

    #[must_use]
    pub fn into_body(self) -> Value {
        match self {
            Self::Success { body, .. } | Self::NotModified { body } => body,
        }
    }

    #[must_use]
    pub fn location(&self) -> Option<&str> {
        match self {
            Self::Success { location, .. } => location.as_deref(),
            Self::NotModified { .. } => None,
        }
    }

    #[must_use]
    pub const fn is_not_modified(&self) -> bool {
        matches!(self, Self::NotModified { .. })
    }

    /// Deserialize the body into a concrete type.
    ///
    /// # Errors
    /// Returns [`ApiError::Decode`] if the body does not match `T`.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        T::deserialize(self.body()).map_err(ApiError::decode)
    }
}
