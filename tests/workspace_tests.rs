//! Workspace REST client tests against a mock server

mod common;

use common::run_blocking;
use compute_lister::core::{PolicyLookup, Workspace, WorkspaceClient, WorkspaceConfig};
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

const LIST_PATH: &str = "/api/2.1/clusters/list";
const POLICY_PATH: &str = "/api/2.0/policies/clusters/get";
const TOKEN: &str = "dapi-test";

/// Build a client for the mock server; call from inside `run_blocking`
fn mock_client(uri: &str) -> WorkspaceClient {
    let config = WorkspaceConfig::new(uri, TOKEN).unwrap();
    WorkspaceClient::new(&config).unwrap()
}

// ============================================================================
// Cluster listing
// ============================================================================

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_list_follows_page_tokens() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(LIST_PATH))
        .and(header("authorization", "Bearer dapi-test"))
        .and(query_param("page_size", "100"))
        .and(query_param_is_missing("page_token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "clusters": [{"cluster_id": "a", "cluster_name": "A"}],
            "next_page_token": "t2"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(LIST_PATH))
        .and(query_param("page_size", "100"))
        .and(query_param("page_token", "t2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "clusters": [{"cluster_id": "b", "cluster_name": "B", "state": "RUNNING"}],
            "next_page_token": ""
        })))
        .expect(1)
        .mount(&server)
        .await;

    let uri = server.uri();
    let (clusters, pages, loaded, listing) = run_blocking(move || {
        let client = mock_client(&uri);
        let progress = client.progress();
        let clusters = client.list_clusters().unwrap();
        (clusters, progress.pages(), progress.clusters(), progress.is_listing())
    })
    .await;

    let ids: Vec<_> = clusters
        .iter()
        .map(|c| c.cluster_id.as_deref().unwrap())
        .collect();
    assert_eq!(ids, vec!["a", "b"]);
    assert_eq!(clusters[1].state.as_deref(), Some("RUNNING"));
    assert_eq!((pages, loaded, listing), (2, 2, false));

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].url.query(), Some("page_size=100"));
    assert_eq!(requests[1].url.query(), Some("page_size=100&page_token=t2"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_list_stops_without_page_token() {
    let server = MockServer::start().await;

    // An empty workspace omits both fields
    Mock::given(method("GET"))
        .and(path(LIST_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let uri = server.uri();
    let clusters = run_blocking(move || mock_client(&uri).list_clusters().unwrap())
    .await;

    assert!(clusters.is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_list_rejected_token_maps_to_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(LIST_PATH))
        .respond_with(ResponseTemplate::new(401).set_body_string("Invalid access token"))
        .expect(1)
        .mount(&server)
        .await;

    let uri = server.uri();
    let (kind, message, listing) = run_blocking(move || {
        let client = mock_client(&uri);
        let err = client.list_clusters().unwrap_err();
        (err.kind(), err.to_string(), client.progress().is_listing())
    })
    .await;

    assert_eq!(kind, "unauthenticated");
    assert!(message.contains("401"));
    assert!(message.contains("Invalid access token"));
    assert!(!listing);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_list_malformed_body_is_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(LIST_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
        .mount(&server)
        .await;

    let uri = server.uri();
    let kind = run_blocking(move || {
        let client = mock_client(&uri);
        client.list_clusters().unwrap_err().kind()
    })
    .await;

    assert_eq!(kind, "decode");
}

// ============================================================================
// Policy lookup
// ============================================================================

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_policy_name_lookup() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(POLICY_PATH))
        .and(query_param("policy_id", "P1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "policy_id": "P1",
            "name": "Shared Compute"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(POLICY_PATH))
        .and(query_param("policy_id", "P2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "policy_id": "P2",
            "name": ""
        })))
        .expect(1)
        .mount(&server)
        .await;

    let uri = server.uri();
    let (named, unnamed) = run_blocking(move || {
        let client = mock_client(&uri);
        (
            client.policy_name("P1").unwrap(),
            client.policy_name("P2").unwrap(),
        )
    })
    .await;

    assert_eq!(named.as_deref(), Some("Shared Compute"));
    assert_eq!(unnamed, None);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_policy_forbidden_maps_to_permission_denied() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(POLICY_PATH))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "error_code": "PERMISSION_DENIED",
            "message": "User is not authorized"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let uri = server.uri();
    let kind = run_blocking(move || {
        mock_client(&uri).policy_name("P-secret").unwrap_err().kind()
    })
    .await;

    assert_eq!(kind, "permission_denied");
}

#[test]
fn test_client_builds_outside_runtime() {
    let config = WorkspaceConfig::new("https://example.cloud.databricks.com", TOKEN).unwrap();
    let client = WorkspaceClient::new(&config).unwrap();
    assert!(!client.progress().is_listing());
}
