//! Authorization-code and refresh-token exchanges
//!
//! Both exchanges are a form-encoded POST to the configured token endpoint.
//! Whatever goes wrong (bad code, network failure, malformed response) the
//! caller sees [`ApiError::Unauthorized`]; the underlying cause is logged.

use std::sync::Arc;

use campline_domain::constants::{
    FORM_CONTENT_TYPE, HEADER_ACCEPT, HEADER_CONTENT_TYPE, HEADER_USER_AGENT, JSON_CONTENT_TYPE,
};
use campline_domain::{ApiError, Credential, HttpMethod, HttpRequest, OAuthSettings, Result};
use serde_json::Value;
use tracing::{info, instrument, warn};
use url::form_urlencoded;

use super::token_store::TokenStore;
use crate::api::HttpTransport;

/// Drives the credential lifecycle held in a [`TokenStore`]
pub struct TokenManager {
    transport: Arc<dyn HttpTransport>,
    tokens: Arc<TokenStore>,
    oauth: OAuthSettings,
    user_agent: String,
}

impl TokenManager {
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        tokens: Arc<TokenStore>,
        oauth: OAuthSettings,
        user_agent: impl Into<String>,
    ) -> Self {
        Self { transport, tokens, oauth, user_agent: user_agent.into() }
    }

    #[must_use]
    pub fn tokens(&self) -> &Arc<TokenStore> {
        &self.tokens
    }

    /// Exchange an authorization code for a credential and store it.
    ///
    /// # Errors
    /// Returns [`ApiError::Unauthorized`] on any failure. The stored
    /// credential is left untouched in that case.
    #[instrument(skip_all)]
    pub fn acquire(&self, code: &str) -> Result<Credential> {
        let credential = self
            .exchange(&[
                ("type", "web_server"),
                ("client_id", self.oauth.client_id.as_str()),
                ("redirect_uri", self.oauth.redirect_uri.as_str()),
                ("client_secret", self.oauth.client_secret.as_str()),
                ("code", code),
            ])
            .map_err(|err| {
                warn!(error = %err, error_type = err.label(), "Token acquisition failed");
                ApiError::Unauthorized
            })?;

        info!(expires_in = ?credential.expires_in, "Access token acquired");
        self.tokens.replace(credential.clone());
        Ok(credential)
    }

    /// Trade the stored refresh token for a new credential.
    ///
    /// A response without a `refresh_token` keeps the previous one so the
    /// next refresh remains possible.
    ///
    /// # Errors
    /// Returns [`ApiError::Unauthorized`] when no refresh token is held or
    /// the exchange fails for any reason.
    #[instrument(skip_all)]
    pub fn refresh(&self) -> Result<Credential> {
        let Some(refresh_token) = self.tokens.refresh_token() else {
            warn!("Refresh requested without a stored refresh token");
            return Err(ApiError::Unauthorized);
        };

        let mut credential = self
            .exchange(&[
                ("type", "refresh"),
                ("client_id", self.oauth.client_id.as_str()),
                ("redirect_uri", self.oauth.redirect_uri.as_str()),
                ("client_secret", self.oauth.client_secret.as_str()),
                ("refresh_token", refresh_token.as_str()),
            ])
            .map_err(|err| {
                warn!(error = %err, error_type = err.label(), "Token refresh failed");
                ApiError::Unauthorized
            })?;

        if !credential.has_refresh_token() {
            credential.refresh_token = refresh_token;
        }

        info!(expires_in = ?credential.expires_in, "Access token refreshed");
        self.tokens.replace(credential.clone());
        Ok(credential)
    }

    fn exchange(&self, params: &[(&str, &str)]) -> Result<Credential> {
        let form = form_urlencoded::Serializer::new(String::new()).extend_pairs(params).finish();
        let request = HttpRequest::new(HttpMethod::Post, &self.oauth.token_url)
            .header(HEADER_USER_AGENT, &self.user_agent)
            .header(HEADER_CONTENT_TYPE, FORM_CONTENT_TYPE)
            .header(HEADER_ACCEPT, JSON_CONTENT_TYPE)
            .body(form);

        let response = self.transport.send(request)?;
        if !response.is_success() {
            return Err(ApiError::general_failure(response.status, &self.oauth.token_url));
        }

        let body: Value = serde_json::from_slice(&response.body).map_err(ApiError::decode)?;
        Ok(Credential::from_token_response(&body)?)
    }
}

impl std::fmt::Debug for TokenManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenManager")
            .field("oauth", &self.oauth)
            .field("user_agent", &self.user_agent)
            .field("authenticated", &self.tokens.is_authenticated())
            .finish_non_exhaustive()
    }
}
