//! Client facade wiring the pipeline to real adapters
//!
//! [`CamplineClient`] owns one executor, one token manager and one
//! uploader, all sharing a single [`TokenStore`]. The per-resource
//! accessors only build URLs and delegate to [`CamplineClient::get`] /
//! [`CamplineClient::post`].

use std::collections::BTreeMap;
use std::sync::Arc;

use campline_core::api::{
    ContentTypeResolver, HttpTransport, MultipartUploader, NoopResponseCache, RequestExecutor,
    ResponseCache,
};
use campline_core::auth::{TokenManager, TokenStore};
use campline_domain::{ApiResponse, ClientConfig, ConfigError, Credential, JsonPayload, Result, UploadFile};
use tracing::{debug, info};

use crate::cache::InMemoryResponseCache;
use crate::errors::InfraError;
use crate::http::ReqwestTransport;
use crate::mime::MimeGuessResolver;

const ATTACHMENTS_PATH: &str = "attachments.json";

/// Authenticated client for the project-management API
pub struct CamplineClient {
    config: ClientConfig,
    executor: Arc<RequestExecutor>,
    token_manager: TokenManager,
    uploader: MultipartUploader,
}

impl CamplineClient {
    /// Build a client with the reqwest transport, an in-memory response
    /// cache (unless disabled) and `mime_guess` content types.
    ///
    /// # Errors
    /// Returns [`InfraError::Config`] if `config` fails validation and
    /// [`InfraError::HttpClient`] if the HTTP client cannot be built.
    pub fn from_config(config: ClientConfig) -> std::result::Result<Self, InfraError> {
        config.validate()?;

        let transport = ReqwestTransport::builder().timeout_opt(config.timeout()).build()?;
        let cache: Arc<dyn ResponseCache> = if config.cache.enabled {
            Arc::new(InMemoryResponseCache::new(&config.cache))
        } else {
            Arc::new(NoopResponseCache)
        };

        info!(base_url = %config.base_url, cache_enabled = config.cache.enabled, "Client initialized");
        Ok(Self::with_parts(config, Arc::new(transport), cache, Arc::new(MimeGuessResolver)))
    }

    /// Build a client around caller-supplied adapters.
    pub fn with_parts(
        config: ClientConfig,
        transport: Arc<dyn HttpTransport>,
        cache: Arc<dyn ResponseCache>,
        content_types: Arc<dyn ContentTypeResolver>,
    ) -> Self {
        let tokens = Arc::new(TokenStore::new());
        let executor = Arc::new(RequestExecutor::new(
            Arc::clone(&transport),
            cache,
            Arc::clone(&tokens),
            config.user_agent.clone(),
        ));
        let token_manager =
            TokenManager::new(transport, tokens, config.oauth.clone(), config.user_agent.clone());
        let uploader = MultipartUploader::new(Arc::clone(&executor), content_types);

        Self { config, executor, token_manager, uploader }
    }

    /// Seed the client with a credential obtained in an earlier session.
    #[must_use]
    pub fn with_credential(self, credential: Credential) -> Self {
        self.token_manager.tokens().replace(credential);
        self
    }

    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// URL to send the user to for granting access.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidValue`] if the authorize URL is invalid.
    pub fn authorization_url(&self, state: Option<&str>) -> std::result::Result<String, ConfigError> {
        self.config.oauth.authorization_url(state)
    }

    /// Exchange the authorization code from the redirect for a credential.
    ///
    /// # Errors
    /// Returns [`campline_domain::ApiError::Unauthorized`] on any failure.
    pub fn acquire_token(&self, code: &str) -> Result<Credential> {
        self.token_manager.acquire(code)
    }

    /// Replace the credential using the stored refresh token. Call after a
    /// [`campline_domain::ApiError::TokenExpired`], then retry the request.
    ///
    /// # Errors
    /// Returns [`campline_domain::ApiError::Unauthorized`] on any failure.
    pub fn refresh_token(&self) -> Result<Credential> {
        self.token_manager.refresh()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token_manager.tokens().is_authenticated()
    }

    #[must_use]
    pub fn credential(&self) -> Option<Credential> {
        self.token_manager.tokens().credential()
    }

    /// GET a resource by path relative to `base_url`, or by absolute URL.
    ///
    /// # Errors
    /// See [`RequestExecutor::get`].
    pub fn get(&self, path: &str) -> Result<ApiResponse> {
        self.executor.get(&self.resolve(path))
    }

    /// POST a JSON payload to a resource path or absolute URL.
    ///
    /// # Errors
    /// See [`RequestExecutor::post`].
    pub fn post(&self, path: &str, payload: impl Into<JsonPayload>) -> Result<ApiResponse> {
        self.executor.post(&self.resolve(path), payload)
    }

    /// Upload files to `path`, one exchange per file, all-or-nothing.
    ///
    /// # Errors
    /// See [`MultipartUploader::upload`].
    pub fn upload(&self, path: &str, files: &[UploadFile]) -> Result<BTreeMap<String, String>> {
        self.uploader.upload(&self.resolve(path), files)
    }

    fn resolve(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            let url = self.config.resource_url(path);
            debug!(%path, %url, "Resolved resource path");
            url
        }
    }

    // Resource accessors

    /// # Errors
    /// See [`RequestExecutor::get`].
    pub fn projects(&self) -> Result<ApiResponse> {
        self.get("projects.json")
    }

    /// # Errors
    /// See [`RequestExecutor::get`].
    pub fn project(&self, project_id: u64) -> Result<ApiResponse> {
        self.get(&format!("projects/{project_id}.json"))
    }

    /// # Errors
    /// See [`RequestExecutor::post`].
    pub fn create_project(&self, project: impl Into<JsonPayload>) -> Result<ApiResponse> {
        self.post("projects.json", project)
    }

    /// # Errors
    /// See [`RequestExecutor::get`].
    pub fn people(&self) -> Result<ApiResponse> {
        self.get("people.json")
    }

    /// The person the current credential belongs to.
    ///
    /// # Errors
    /// See [`RequestExecutor::get`].
    pub fn me(&self) -> Result<ApiResponse> {
        self.get("people/me.json")
    }

    /// # Errors
    /// See [`RequestExecutor::get`].
    pub fn todolists(&self, project_id: u64) -> Result<ApiResponse> {
        self.get(&format!("projects/{project_id}/todolists.json"))
    }

    /// # Errors
    /// See [`RequestExecutor::post`].
    pub fn create_todo(&self, project_id: u64, todolist_id: u64, todo: impl Into<JsonPayload>) -> Result<ApiResponse> {
        self.post(&format!("projects/{project_id}/todolists/{todolist_id}/todos.json"), todo)
    }

    /// Upload attachments; the returned tokens are referenced when creating
    /// messages or comments.
    ///
    /// # Errors
    /// See [`MultipartUploader::upload`].
    pub fn upload_attachments(&self, files: &[UploadFile]) -> Result<BTreeMap<String, String>> {
        self.upload(ATTACHMENTS_PATH, files)
    }
}

impl std::fmt::Debug for CamplineClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CamplineClient")
            .field("base_url", &self.config.base_url)
            .field("authenticated", &self.is_authenticated())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use campline_core::api::StaticContentTypes;
    use campline_core::testing::{MemoryCache, MockTransport};
    use campline_domain::{ApiError, CacheSettings, HttpMethod, HttpResponse, OAuthSettings};
    use serde_json::json;

    use super::*;

    const BASE: &str = "https://api.example.com/42/api/v1";

    fn config() -> ClientConfig {
        ClientConfig {
            base_url: format!("{BASE}/"),
            user_agent: "Campline Tests (qa@example.com)".into(),
            timeout_secs: None,
            oauth: OAuthSettings {
                client_id: "client".into(),
                client_secret: "secret".into(),
                redirect_uri: "https://app.example.com/cb".into(),
                authorize_url: "https://auth.example.com/authorization/new".into(),
                token_url: "https://auth.example.com/authorization/token".into(),
            },
            cache: CacheSettings::default(),
        }
    }

    fn client(transport: &MockTransport) -> CamplineClient {
        CamplineClient::with_parts(
            config(),
            Arc::new(transport.clone()),
            Arc::new(MemoryCache::new()),
            Arc::new(StaticContentTypes::new()),
        )
        .with_credential(Credential::new("token", "refresh", None))
    }

    #[test]
    fn accessors_resolve_against_base_url() {
        let transport = MockTransport::new();
        for path in ["projects.json", "projects/7.json", "people/me.json", "projects/7/todolists.json"] {
            transport.respond(HttpMethod::Get, &format!("{BASE}/{path}"), HttpResponse::new(200).with_body("{}"));
        }
        let client = client(&transport);

        client.projects().unwrap();
        client.project(7).unwrap();
        client.me().unwrap();
        client.todolists(7).unwrap();

        assert_eq!(transport.request_count(), 4);
        assert!(transport.was_called(&format!("{BASE}/projects/7/todolists.json")));
    }

    #[test]
    fn create_todo_posts_to_list() {
        let transport = MockTransport::new();
        let url = format!("{BASE}/projects/1/todolists/2/todos.json");
        transport.respond(
            HttpMethod::Post,
            &url,
            HttpResponse::new(201).with_header("Location", format!("{BASE}/projects/1/todos/3.json")).with_body("{}"),
        );

        let response = client(&transport).create_todo(1, 2, json!({ "content": "Ship it" })).unwrap();
        assert_eq!(response.location(), Some(format!("{BASE}/projects/1/todos/3.json").as_str()));
    }

    #[test]
    fn absolute_urls_bypass_base() {
        let transport = MockTransport::new();
        let url = "https://other.example.com/1/projects.json";
        transport.respond(HttpMethod::Get, url, HttpResponse::new(200).with_body("[]"));

        assert_eq!(client(&transport).get(url).unwrap().into_body(), json!([]));
    }

    #[test]
    fn unauthenticated_client_fails_fast() {
        let transport = MockTransport::new();
        let client = CamplineClient::with_parts(
            config(),
            Arc::new(transport.clone()),
            Arc::new(NoopResponseCache),
            Arc::new(MimeGuessResolver),
        );

        assert!(!client.is_authenticated());
        assert_eq!(client.people(), Err(ApiError::NotAuthenticated));
        assert_eq!(transport.request_count(), 0);
    }

    #[test]
    fn from_config_rejects_invalid_config() {
        let result = CamplineClient::from_config(ClientConfig { user_agent: String::new(), ..config() });
        assert!(matches!(result, Err(InfraError::Config(_))));
    }
}
