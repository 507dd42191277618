//! Integration tests for the request pipeline over real HTTP
//!
//! **Coverage:**
//! - Conditional GET: ETag captured, HEAD probe answered 304, cached body returned
//! - Changed resource: probe answered 200, full GET issued
//! - Status mapping: 429 / 401 expired / 401 / 403 / 5xx
//! - POST 201 Location and 204
//! - Token acquisition and refresh-then-retry
//! - Multipart upload, including a mid-batch failure
//!
//! **Infrastructure:**
//! - WireMock HTTP server on a dedicated runtime
//! - `CamplineClient` with the reqwest transport and in-memory cache

#[path = "support.rs"]
mod support;

use campline_domain::{ApiError, ApiResponse, UploadFile};
use pretty_assertions::assert_eq;
use serde_json::json;
use support::{MockApi, ACCOUNT_PATH, USER_AGENT};
use wiremock::matchers::{body_string_contains, header, header_exists, method, path};
use wiremock::{Mock, ResponseTemplate};

fn account(resource: &str) -> String {
    format!("{ACCOUNT_PATH}/{resource}")
}

// ============================================================================
// GET path
// ============================================================================

/// Validates `CamplineClient::get` behavior for the conditional request scenario.
///
/// Assertions:
/// - the first GET is a full fetch carrying bearer and identification headers
/// - the second call probes with `If-None-Match` and gets `NotModified`
/// - exactly one full GET reaches the server
#[test]
fn conditional_get_serves_cached_body_on_304() {
    let api = MockApi::start();
    api.mount(
        Mock::given(method("GET"))
            .and(path(account("projects.json")))
            .and(header("authorization", "Bearer token-1"))
            .and(header("user-agent", USER_AGENT))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("ETag", "\"abc123\"")
                    .set_body_string(r#"[{"id":1,"name":"Launch"}]"#),
            )
            .expect(1),
    );
    api.mount(
        Mock::given(method("HEAD"))
            .and(path(account("projects.json")))
            .and(header("if-none-match", "\"abc123\""))
            .respond_with(ResponseTemplate::new(304))
            .expect(1),
    );

    let client = api.authenticated_client("token-1");
    let first = client.projects().unwrap();
    let second = client.projects().unwrap();

    assert_eq!(first, ApiResponse::success(json!([{ "id": 1, "name": "Launch" }])));
    assert_eq!(second, ApiResponse::NotModified { body: first.body().clone() });
}

#[test]
fn changed_resource_is_refetched() {
    let api = MockApi::start();
    api.mount(
        Mock::given(method("GET"))
            .and(path(account("people.json")))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("Last-Modified", "Tue, 13 Oct 2026 10:00:00 GMT")
                    .set_body_string("[]"),
            )
            .expect(2),
    );
    api.mount(
        Mock::given(method("HEAD"))
            .and(path(account("people.json")))
            .and(header_exists("if-modified-since"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1),
    );

    let client = api.authenticated_client("token-1");
    client.people().unwrap();
    let second = client.people().unwrap();

    assert!(!second.is_not_modified());
}

#[test]
fn response_without_validators_is_never_probed() {
    let api = MockApi::start();
    api.mount(
        Mock::given(method("GET"))
            .and(path(account("people/me.json")))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"id":5}"#))
            .expect(2),
    );

    let client = api.authenticated_client("token-1");
    client.me().unwrap();
    client.me().unwrap();

    assert!(api.received().iter().all(|request| request.method.as_str() == "GET"));
}

#[test]
fn failure_statuses_map_to_typed_errors() {
    let api = MockApi::start();
    let cases = [
        ("projects/1.json", ResponseTemplate::new(429).insert_header("Retry-After", "30").set_body_string("{}")),
        (
            "projects/2.json",
            ResponseTemplate::new(401).insert_header("WWW-Authenticate", r#"Bearer error="expired_token""#),
        ),
        ("projects/3.json", ResponseTemplate::new(401)),
        ("projects/4.json", ResponseTemplate::new(403)),
        ("projects/5.json", ResponseTemplate::new(503)),
    ];
    for (resource, template) in cases {
        api.mount(Mock::given(method("GET")).and(path(account(resource))).respond_with(template));
    }

    let client = api.authenticated_client("token-1");
    assert_eq!(client.project(1), Err(ApiError::RateLimited { retry_after: 30 }));
    assert_eq!(client.project(2), Err(ApiError::TokenExpired));
    assert_eq!(client.project(3), Err(ApiError::Unauthorized));
    assert_eq!(client.project(4), Err(ApiError::Forbidden));

    let err = client.project(5).unwrap_err();
    assert_eq!(err.status_code(), Some(503));
    assert!(err.to_string().contains("503"));
}

#[test]
fn non_json_endpoint_is_rejected_without_network() {
    let api = MockApi::start();
    let client = api.authenticated_client("token-1");

    let url = api.resource("projects");
    assert_eq!(client.get(&url), Err(ApiError::InvalidEndpoint { url: url.clone() }));
    assert!(api.received().is_empty());
}

#[test]
fn unreachable_server_is_a_transport_failure() {
    let api = MockApi::start();
    let mut config = api.config();
    config.base_url = "http://127.0.0.1:9/999/api/v1".into();
    let client = campline_infra::CamplineClient::from_config(config)
        .unwrap()
        .with_credential(campline_domain::Credential::new("token-1", "", None));

    assert!(matches!(client.projects(), Err(ApiError::TransportFailure { .. })));
}

// ============================================================================
// POST path
// ============================================================================

#[test]
fn post_created_reports_location() {
    let api = MockApi::start();
    let location = api.resource("projects/77.json");
    api.mount(
        Mock::given(method("POST"))
            .and(path(account("projects.json")))
            .and(header("content-type", "application/json"))
            .and(body_string_contains(r#""name":"Launch""#))
            .respond_with(
                ResponseTemplate::new(201)
                    .insert_header("Location", location.as_str())
                    .set_body_string(r#"{"id":77,"name":"Launch"}"#),
            )
            .expect(1),
    );

    let response = api.authenticated_client("token-1").create_project(json!({ "name": "Launch" })).unwrap();

    assert_eq!(response.location(), Some(location.as_str()));
    assert_eq!(response.body()["id"], json!(77));
}

#[test]
fn post_no_content_yields_empty_success() {
    let api = MockApi::start();
    api.mount(
        Mock::given(method("POST"))
            .and(path(account("projects/1/todolists/2/todos.json")))
            .respond_with(ResponseTemplate::new(204))
            .expect(1),
    );

    let response = api.authenticated_client("token-1").create_todo(1, 2, r#"{"content":"Ship"}"#).unwrap();

    assert_eq!(response, ApiResponse::Success { body: serde_json::Value::Null, location: None });
}

// ============================================================================
// Token lifecycle
// ============================================================================

#[test]
fn acquire_token_then_call_api() {
    let api = MockApi::start();
    api.mount(
        Mock::given(method("POST"))
            .and(path("/authorization/token"))
            .and(header("user-agent", USER_AGENT))
            .and(body_string_contains("type=web_server"))
            .and(body_string_contains("code=abc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "fresh-token",
                "refresh_token": "fresh-refresh",
                "expires_in": 1_209_600
            }))),
    );
    api.mount(
        Mock::given(method("GET"))
            .and(path(account("projects.json")))
            .and(header("authorization", "Bearer fresh-token"))
            .respond_with(ResponseTemplate::new(200).set_body_string("[]")),
    );

    let client = api.client();
    assert!(!client.is_authenticated());

    let credential = client.acquire_token("abc").unwrap();
    assert_eq!(credential.refresh_token, "fresh-refresh");
    assert!(client.is_authenticated());
    assert_eq!(client.projects().unwrap().into_body(), json!([]));
}

#[test]
fn rejected_code_reports_unauthorized() {
    let api = MockApi::start();
    api.mount(
        Mock::given(method("POST"))
            .and(path("/authorization/token"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({ "error": "invalid_grant" }))),
    );

    let client = api.client();
    assert_eq!(client.acquire_token("bad"), Err(ApiError::Unauthorized));
    assert!(!client.is_authenticated());
}

/// Validates `CamplineClient::refresh_token` behavior for the expired token scenario.
///
/// Assertions:
/// - the stale token yields `TokenExpired`
/// - refresh swaps in the new access token
/// - re-issuing the same call succeeds with the new token
#[test]
fn refresh_after_expiry_then_retry() {
    let api = MockApi::start();
    api.mount(
        Mock::given(method("GET"))
            .and(path(account("projects.json")))
            .and(header("authorization", "Bearer stale"))
            .respond_with(
                ResponseTemplate::new(401)
                    .insert_header("WWW-Authenticate", r#"Bearer realm="api", error="expired_token""#),
            ),
    );
    api.mount(
        Mock::given(method("POST"))
            .and(path("/authorization/token"))
            .and(body_string_contains("type=refresh"))
            .and(body_string_contains("refresh_token=refresh-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "access_token": "renewed" }))),
    );
    api.mount(
        Mock::given(method("GET"))
            .and(path(account("projects.json")))
            .and(header("authorization", "Bearer renewed"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"[{"id":1}]"#)),
    );

    let client = api.authenticated_client("stale");
    assert_eq!(client.projects(), Err(ApiError::TokenExpired));

    let credential = client.refresh_token().unwrap();
    assert_eq!(credential.access_token, "renewed");
    assert_eq!(credential.refresh_token, "refresh-1");

    assert_eq!(client.projects().unwrap().into_body(), json!([{ "id": 1 }]));
}

// ============================================================================
// Uploads
// ============================================================================

#[test]
fn upload_returns_token_per_file() {
    let api = MockApi::start();
    api.mount(
        Mock::given(method("POST"))
            .and(path(account("attachments.json")))
            .and(header_exists("content-type"))
            .and(body_string_contains(r#"filename="logo.png""#))
            .and(body_string_contains("Content-Type: image/png"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": "tok-logo" }))),
    );
    api.mount(
        Mock::given(method("POST"))
            .and(path(account("attachments.json")))
            .and(body_string_contains(r#"filename="notes.txt""#))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": "tok-notes" }))),
    );

    let tokens = api
        .authenticated_client("token-1")
        .upload_attachments(&[UploadFile::new("logo.png", vec![0x89, 0x50]), UploadFile::new("notes.txt", "hello")])
        .unwrap();

    assert_eq!(tokens.get("logo.png").map(String::as_str), Some("tok-logo"));
    assert_eq!(tokens.get("notes.txt").map(String::as_str), Some("tok-notes"));

    let content_type = api.received()[0].headers.get("content-type").and_then(|v| v.to_str().ok()).map(str::to_string);
    assert!(content_type.is_some_and(|value| value.starts_with("multipart/form-data; boundary=")));
}

#[test]
fn upload_failure_discards_earlier_tokens() {
    let api = MockApi::start();
    api.mount(
        Mock::given(method("POST"))
            .and(path(account("attachments.json")))
            .and(body_string_contains(r#"filename="first.txt""#))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": "tok-1" }))),
    );
    api.mount(
        Mock::given(method("POST"))
            .and(path(account("attachments.json")))
            .and(body_string_contains(r#"filename="second.txt""#))
            .respond_with(ResponseTemplate::new(403)),
    );
    api.mount(
        Mock::given(method("POST"))
            .and(path(account("attachments.json")))
            .and(body_string_contains(r#"filename="third.txt""#))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": "tok-3" })))
            .expect(0),
    );

    let result = api.authenticated_client("token-1").upload_attachments(&[
        UploadFile::new("first.txt", "1"),
        UploadFile::new("second.txt", "2"),
        UploadFile::new("third.txt", "3"),
    ]);

    assert_eq!(result, Err(ApiError::Forbidden));
    assert_eq!(api.received().len(), 2);
}
