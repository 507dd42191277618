//! Typed accessors over decoded JSON
//!
//! API payloads are `serde_json::Value`, a tagged union of
//! null/bool/number/string/array/object. [`JsonExt`] adds accessors that fail
//! with a [`JsonShapeError`] naming the offending field instead of quietly
//! producing `null`.

use serde_json::{Map, Value};

use crate::errors::JsonShapeError;

/// Name of a JSON value's variant, for error messages.
#[must_use]
pub const fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Shape-checked field access on JSON values
///
/// # Example
/// ```
/// use campline_domain::JsonExt;
/// use serde_json::json;
///
/// let body = json!({ "token": "abc", "size": 12 });
/// assert_eq!(body.require_str("token").unwrap(), "abc");
/// assert_eq!(body.require_u64("size").unwrap(), 12);
/// assert!(body.require_str("size").is_err());
/// ```
pub trait JsonExt {
    /// Look up `key` on an object; `Ok(None)` if the key is absent.
    ///
    /// # Errors
    /// Returns [`JsonShapeError`] if `self` is not an object.
    fn field(&self, key: &str) -> Result<Option<&Value>, JsonShapeError>;

    /// Require `key` to be present and a string.
    ///
    /// # Errors
    /// Returns [`JsonShapeError`] if `self` is not an object, the key is
    /// missing, or the value is not a string.
    fn require_str(&self, key: &str) -> Result<&str, JsonShapeError>;

    /// Require `key` to be present and a non-negative integer.
    ///
    /// # Errors
    /// Returns [`JsonShapeError`] on any shape mismatch.
    fn require_u64(&self, key: &str) -> Result<u64, JsonShapeError>;

    /// Require `key` to be present and an array.
    ///
    /// # Errors
    /// Returns [`JsonShapeError`] on any shape mismatch.
    fn require_array(&self, key: &str) -> Result<&Vec<Value>, JsonShapeError>;

    /// Require `self` to be an object.
    ///
    /// # Errors
    /// Returns [`JsonShapeError`] if `self` is any other variant.
    fn require_object(&self) -> Result<&Map<String, Value>, JsonShapeError>;
}

fn require<'a>(value: &'a Value, key: &str, expected: &'static str) -> Result<&'a Value, JsonShapeError> {
    value.field(key)?.ok_or_else(|| JsonShapeError { path: key.to_string(), expected, found: "nothing" })
}

fn mismatch(key: &str, expected: &'static str, found: &Value) -> JsonShapeError {
    JsonShapeError { path: key.to_string(), expected, found: kind_of(found) }
}

impl JsonExt for Value {
    fn field(&self, key: &str) -> Result<Option<&Value>, JsonShapeError> {
        Ok(self.require_object().map_err(|e| JsonShapeError { path: key.to_string(), ..e })?.get(key))
    }

    fn require_str(&self, key: &str) -> Result<&str, JsonShapeError> {
        let value = require(self, key, "string")?;
        value.as_str().ok_or_else(|| mismatch(key, "string", value))
    }

    fn require_u64(&self, key: &str) -> Result<u64, JsonShapeError> {
        let value = require(self, key, "unsigned integer")?;
        value.as_u64().ok_or_else(|| mismatch(key, "unsigned integer", value))
    }

    fn require_array(&self, key: &str) -> Result<&Vec<Value>, JsonShapeError> {
        let value = require(self, key, "array")?;
        value.as_array().ok_or_else(|| mismatch(key, "array", value))
    }

    fn require_object(&self) -> Result<&Map<String, Value>, JsonShapeError> {
        self.as_object().ok_or_else(|| mismatch("$", "object", self))
    }
}
