//! Integration tests using a mock tenant
//!
//! Tests the full flow the suites run: healthcheck → login → search URL →
//! paginated fetch, against a wiremock server playing the tenant API.

use aegis_client::api::{Endpoint, MonitoredService, Policy, Searchable};
use aegis_client::query::SearchOptions;
use aegis_client::{ApiSession, SessionConfig, UNLIMITED_PAGES};
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mock_tenant() -> MockServer {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/healthcheck/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/v1/core/user/login/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "csrf": "csrf-token",
            "session": {"id": "session-id"},
        })))
        .mount(&mock_server)
        .await;

    mock_server
}

// ============================================================================
// End-to-End Flow
// ============================================================================

#[tokio::test]
async fn test_healthcheck_login_search_and_paginate() {
    aegis_client::logging::init();

    let mock_server = mock_tenant().await;
    let base = mock_server.uri();

    // two pages of policies; the search carries the merged query parameters
    Mock::given(method("GET"))
        .and(path("/api/v1/core/policy/"))
        .and(query_param("limit", "25"))
        .and(query_param("offset", "0"))
        .and(query_param("search", "comprehensive"))
        .and(header("x-csrftoken", "csrf-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{"id": 1, "name": "comprehensive-a"}],
            "next": format!("{base}/api/v1/core/policy/page2/"),
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/core/policy/page2/"))
        .and(header("Authorization", "session session-id"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{"id": 2, "name": "comprehensive-b"}],
            "next": null,
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut session = ApiSession::new(&base).unwrap();
    session.healthcheck().await.unwrap();

    let login = session.login("suite@aegisops.com", "hunter2").await.unwrap();
    assert!(login.is_success());

    let url = Policy
        .search_url(
            &SearchOptions::new()
                .query_params(json!({"limit": 25, "search": "comprehensive"})),
        )
        .unwrap();
    let policies = session.fetch_all_results(&url, UNLIMITED_PAGES).await.unwrap();

    assert_eq!(policies.len(), 2);
    assert_eq!(policies[0]["name"], "comprehensive-a");
    assert_eq!(policies[1]["name"], "comprehensive-b");
}

#[tokio::test]
async fn test_monitored_service_search_carries_endpoint_defaults() {
    let mock_server = mock_tenant().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/core/monitoredservice/"))
        .and(query_param("include_decommissioned", "false"))
        .and(query_param("limit", "100"))
        .and(query_param("offset", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{"id": 11, "service_type": "salesforce"}],
            "next": null,
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut session = ApiSession::new(mock_server.uri()).unwrap();
    let login = session.login("suite@aegisops.com", "hunter2").await.unwrap();
    assert!(login.is_success());

    let url = MonitoredService.search_url(&SearchOptions::new()).unwrap();
    let services = session.fetch_all_results(&url, UNLIMITED_PAGES).await.unwrap();

    assert_eq!(services.len(), 1);
    assert_eq!(services[0]["service_type"], "salesforce");
}

#[tokio::test]
async fn test_policy_lifecycle_calls() {
    let mock_server = mock_tenant().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/core/policy/"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 7,
            "name": "e2e-policy",
            "is_runnable": true,
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/core/policy/7/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 7,
            "is_runnable": true,
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/api/v1/core/policy/7/"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&mock_server)
        .await;

    let mut session = ApiSession::new(mock_server.uri()).unwrap();
    session.login("suite@aegisops.com", "hunter2").await.unwrap();

    let created = session
        .post(
            Policy.base_path(),
            &json!({
                "name": "e2e-policy",
                "mode": "blacklist",
                "role": "monitored_service_config",
                "issue_handling": "notify",
                "policy_type": "salesforce",
            }),
        )
        .await
        .unwrap();
    assert_eq!(created.status(), 201);
    let policy_id = created.json::<serde_json::Value>().await.unwrap()["id"]
        .as_u64()
        .unwrap();

    let fetched = session.get(&Policy.item_url(policy_id)).await.unwrap();
    assert_eq!(fetched.status(), 200);
    let body: serde_json::Value = fetched.json().await.unwrap();
    assert_eq!(body["is_runnable"], true);

    let deleted = session.delete(&Policy.item_url(policy_id)).await.unwrap();
    assert_eq!(deleted.status(), 204);
}

#[tokio::test]
async fn test_login_failure_leaves_session_unauthenticated() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/core/user/login/"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"detail": "nope"})))
        .mount(&mock_server)
        .await;

    let config = SessionConfig::builder(mock_server.uri())
        .user_agent("aegis-suite/0.1")
        .build();
    let mut session = ApiSession::with_config(config).unwrap();
    let login = session.login("suite@aegisops.com", "wrong").await.unwrap();

    assert!(!login.is_success());
    assert!(!session.is_authenticated());
}
