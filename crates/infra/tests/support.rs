//! Shared fixtures for wiremock-backed integration tests
//!
//! The client under test is blocking, so the mock server runs on its own
//! multi-threaded runtime and the test body stays on the plain test thread.

use campline_domain::{CacheSettings, ClientConfig, Credential, OAuthSettings};
use campline_infra::CamplineClient;
use tokio::runtime::Runtime;
use wiremock::{Mock, MockServer};

pub const USER_AGENT: &str = "Campline Integration (qa@example.com)";
pub const ACCOUNT_PATH: &str = "/999/api/v1";

/// A running mock API plus the runtime that drives it.
pub struct MockApi {
    pub server: MockServer,
    runtime: Runtime,
}

impl MockApi {
    pub fn start() -> Self {
        let runtime = Runtime::new().expect("tokio runtime should start");
        let server = runtime.block_on(MockServer::start());
        Self { server, runtime }
    }

    pub fn mount(&self, mock: Mock) {
        self.runtime.block_on(mock.mount(&self.server));
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.server.uri())
    }

    /// Absolute URL of an account resource, e.g. `resource("projects.json")`.
    pub fn resource(&self, path: &str) -> String {
        self.url(&format!("{ACCOUNT_PATH}/{path}"))
    }

    pub fn received(&self) -> Vec<wiremock::Request> {
        self.runtime.block_on(self.server.received_requests()).unwrap_or_default()
    }

    pub fn config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.url(ACCOUNT_PATH),
            user_agent: USER_AGENT.into(),
            timeout_secs: Some(5),
            oauth: OAuthSettings {
                client_id: "client-id".into(),
                client_secret: "client-secret".into(),
                redirect_uri: "https://app.example.com/callback".into(),
                authorize_url: self.url("/authorization/new"),
                token_url: self.url("/authorization/token"),
            },
            cache: CacheSettings::default(),
        }
    }

    pub fn client(&self) -> CamplineClient {
        CamplineClient::from_config(self.config()).expect("client should build")
    }

    pub fn authenticated_client(&self, access_token: &str) -> CamplineClient {
        self.client().with_credential(Credential::new(access_token, "refresh-1", Some(3600)))
    }
}
