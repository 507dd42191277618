//! Bearer credential issued by the authorization server

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::JsonShapeError;
use crate::json::JsonExt;

/// Access and refresh tokens plus the raw token-response fields
///
/// A credential is replaced wholesale on refresh or re-acquisition; it is
/// never edited in place.
#[derive(Clone, Serialize, Deserialize, PartialEq)]
pub struct Credential {
    /// Token presented as `Authorization: Bearer <access_token>`
    pub access_token: String,

    /// Token used to obtain a new access token; may be empty
    #[serde(default)]
    pub refresh_token: String,

    /// Access token lifetime in seconds, when the server reported one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<i64>,

    /// Absolute expiration computed from `expires_in` at issue time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,

    /// Every field of the token response, verbatim
    #[serde(default)]
    pub raw: Map<String, Value>,
}

impl Credential {
    /// Build a credential, computing `expires_at` from `expires_in`.
    pub fn new(
        access_token: impl Into<String>,
        refresh_token: impl Into<String>,
        expires_in: Option<i64>,
    ) -> Self {
        let expires_at = expires_in.filter(|secs| *secs > 0).and_then(from_now);
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
            expires_in,
            expires_at,
            raw: Map::new(),
        }
    }

    /// Parse a token-endpoint JSON response.
    ///
    /// `access_token` is required; `refresh_token` and `expires_in` are
    /// optional. All fields are kept in [`raw`](Self::raw).
    ///
    /// # Errors
    /// Returns [`JsonShapeError`] if the body is not an object or has no
    /// string `access_token`.
    pub fn from_token_response(body: &Value) -> Result<Self, JsonShapeError> {
        let access_token = body.require_str("access_token")?;
        let refresh_token = match body.field("refresh_token")? {
            Some(Value::String(token)) => token.clone(),
            _ => String::new(),
        };
        let expires_in = body.field("expires_in")?.and_then(Value::as_i64);

        let mut credential = Self::new(access_token, refresh_token, expires_in);
        credential.raw = body.require_object()?.clone();
        Ok(credential)
    }

    /// A credential authenticates requests iff its access token is non-empty.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        !self.access_token.is_empty()
    }

    #[must_use]
    pub fn has_refresh_token(&self) -> bool {
        !self.refresh_token.is_empty()
    }

    /// `true` if the token has expired or will within `threshold_seconds`.
    /// Credentials without a known expiry are never considered expired; a
    /// threshold past the representable range counts as expired.
    #[must_use]
    pub fn is_expired(&self, threshold_seconds: i64) -> bool {
        self.expires_at
            .is_some_and(|at| from_now(threshold_seconds).map_or(true, |deadline| deadline >= at))
    }

    #[must_use]
    pub fn seconds_until_expiry(&self) -> Option<i64> {
        self.expires_at.map(|at| (at - Utc::now()).num_seconds())
    }
}

/// `now + secs`, or `None` when that is not a representable instant.
fn from_now(secs: i64) -> Option<DateTime<Utc>> {
    TimeDelta::try_seconds(secs).and_then(|delta| Utc::now().checked_add_signed(delta))
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("access_token", &"<redacted>")
            .field("refresh_token", &"<redacted>")
            .field("expires_in", &self.expires_in)
            .field("expires_at", &self.expires_at)
            .finish_non_exhaustive()
    }
}
