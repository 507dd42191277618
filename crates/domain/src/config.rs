//! Client configuration structures
//!
//! Loaded by `campline_infra::config` from environment variables or a
//! JSON/TOML file. Nothing here has defaults for endpoints or identity: the
//! service rejects requests without a caller-supplied `User-Agent`, so it
//! must be configured explicitly.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::errors::ConfigError;

/// Top-level client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Account API root, e.g. `https://api.example.com/999999999/api/v1`
    pub base_url: String,

    /// Identification header value, e.g. `MyApp (ops@example.com)`
    pub user_agent: String,

    /// Per-exchange transport timeout; `None` leaves the transport default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    pub oauth: OAuthSettings,

    #[serde(default)]
    pub cache: CacheSettings,
}

impl ClientConfig {
    /// Check the fields the pipeline depends on.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidValue`] for an empty `user_agent`, a
    /// non-http(s) `base_url`, or malformed OAuth URLs.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.user_agent.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "user_agent".into(),
                message: "an identification header value is required".into(),
            });
        }
        parse_http_url("base_url", &self.base_url)?;
        parse_http_url("oauth.authorize_url", &self.oauth.authorize_url)?;
        parse_http_url("oauth.token_url", &self.oauth.token_url)?;
        Ok(())
    }

    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Absolute URL for a resource path relative to `base_url`.
    ///
    /// ```
    /// # use campline_domain::{ClientConfig, OAuthSettings};
    /// # let config = ClientConfig {
    /// #     base_url: "https://api.example.com/1/api/v1/".into(),
    /// #     user_agent: "Test".into(),
    /// #     timeout_secs: None,
    /// #     oauth: OAuthSettings::default(),
    /// #     cache: Default::default(),
    /// # };
    /// assert_eq!(
    ///     config.resource_url("/projects.json"),
    ///     "https://api.example.com/1/api/v1/projects.json"
    /// );
    /// ```
    #[must_use]
    pub fn resource_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path.trim_start_matches('/'))
    }
}

/// OAuth 2 web-server flow settings
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OAuthSettings {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub authorize_url: String,
    pub token_url: String,
}

impl OAuthSettings {
    /// URL the user is sent to in order to grant access.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidValue`] if `authorize_url` is not a
    /// valid absolute URL.
    ///
    /// ```
    /// # use campline_domain::OAuthSettings;
    /// let oauth = OAuthSettings {
    ///     client_id: "abc".into(),
    ///     redirect_uri: "https://app.example.com/callback".into(),
    ///     authorize_url: "https://auth.example.com/authorization/new".into(),
    ///     ..Default::default()
    /// };
    /// let url = oauth.authorization_url(Some("xyz")).unwrap();
    /// assert!(url.starts_with("https://auth.example.com/authorization/new?type=web_server"));
    /// assert!(url.contains("redirect_uri=https%3A%2F%2Fapp.example.com%2Fcallback"));
    /// assert!(url.ends_with("state=xyz"));
    /// ```
    pub fn authorization_url(&self, state: Option<&str>) -> Result<String, ConfigError> {
        let mut url = parse_http_url("oauth.authorize_url", &self.authorize_url)?;
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("type", "web_server")
                .append_pair("client_id", &self.client_id)
                .append_pair("redirect_uri", &self.redirect_uri);
            if let Some(state) = state {
                query.append_pair("state", state);
            }
        }
        Ok(url.into())
    }
}

impl std::fmt::Debug for OAuthSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuthSettings")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("redirect_uri", &self.redirect_uri)
            .field("authorize_url", &self.authorize_url)
            .field("token_url", &self.token_url)
            .finish()
    }
}

/// Bounds for the default in-memory response cache
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheSettings {
    /// `false` disables conditional GETs entirely
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl_secs: Option<u64>,
}

const fn default_enabled() -> bool {
    true
}

const fn default_max_entries() -> usize {
    1024
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self { enabled: default_enabled(), max_entries: default_max_entries(), ttl_secs: None }
    }
}

fn parse_http_url(key: &str, value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidValue { key: key.into(), message: format!("'{value}': {e}") })?;
    if matches!(url.scheme(), "http" | "https") {
        Ok(url)
    } else {
        Err(ConfigError::InvalidValue { key: key.into(), message: format!("'{value}' is not an http(s) URL") })
    }
}
