//! Integration tests for continuation-driven paging.
//!
//! These tests run the pager against a mock server and verify page
//! draining, bounded fetches, empty and error responses, and query requests.

use std::time::Duration;

use cosmos_rest::clients::{RequestOptions, SqlQuery};
use cosmos_rest::feed::{self, FeedRequest};
use cosmos_rest::{
    AccountEndpoint, AuthToken, CosmosClient, CosmosConfig, CosmosError, ErrorKind, HttpError,
    ProtocolError, ResourceKind,
};
use serde::Deserialize;
use serde_json::json;
use wiremock::matchers::{body_json, header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const DOCS_PATH: &str = "/dbs/D1/colls/C1/docs";
const COLL_PATH: &str = "/dbs/D1/colls/C1";

#[derive(Debug, Deserialize, PartialEq)]
struct Doc {
    id: String,
}

/// Creates a client pointed at the mock server.
fn create_test_client(server: &MockServer) -> CosmosClient {
    let config = CosmosConfig::builder()
        .endpoint(AccountEndpoint::new(server.uri()).unwrap())
        .auth_token(AuthToken::new("a2V5").unwrap())
        .build()
        .unwrap();
    CosmosClient::new(config)
}

/// Builds a documents envelope with the given ids.
fn docs_page(ids: &[&str]) -> serde_json::Value {
    let docs: Vec<_> = ids.iter().map(|id| json!({ "id": id })).collect();
    json!({ "_rid": "r1", "Documents": docs, "_count": docs.len() })
}

fn page_response(ids: &[&str], continuation: Option<&str>) -> ResponseTemplate {
    let mut template = ResponseTemplate::new(200)
        .set_body_json(docs_page(ids))
        .insert_header("x-ms-request-charge", "1.5")
        .insert_header("x-ms-session-token", "0:7");
    if let Some(token) = continuation {
        template = template.insert_header("x-ms-continuation", token);
    }
    template
}

/// Mounts three pages of two documents, chained by continuation tokens.
async fn mount_three_pages(server: &MockServer, first_page_calls: u64) {
    // Mocks mounted first take precedence, so continuation matches go first
    Mock::given(method("GET"))
        .and(path(DOCS_PATH))
        .and(header("x-ms-continuation", "c2"))
        .respond_with(page_response(&["5", "6"], None))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(DOCS_PATH))
        .and(header("x-ms-continuation", "c1"))
        .respond_with(page_response(&["3", "4"], Some("c2")))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(DOCS_PATH))
        .respond_with(page_response(&["1", "2"], Some("c1")))
        .expect(first_page_calls)
        .mount(server)
        .await;
}

fn ids(docs: &[Doc]) -> Vec<&str> {
    docs.iter().map(|doc| doc.id.as_str()).collect()
}

// ============================================================================
// Draining and Bounded Fetches
// ============================================================================

#[tokio::test]
async fn test_unbounded_stream_drains_all_pages_in_order() {
    let server = MockServer::start().await;
    mount_three_pages(&server, 1).await;
    let client = create_test_client(&server);

    let request = FeedRequest::list(ResourceKind::Documents, COLL_PATH);
    let docs = feed::stream::<Doc>(&client, &request, None).await.unwrap();

    assert_eq!(ids(&docs), vec!["1", "2", "3", "4", "5", "6"]);
    assert_eq!(docs.pages(), 3);
    assert!(docs.continuation().is_none());
    assert!((docs.request_charge() - 4.5).abs() < f64::EPSILON);
    assert_eq!(docs.session_token(), Some("0:7"));
}

#[tokio::test]
async fn test_bounded_fetch_returns_first_page_and_cursor() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(DOCS_PATH))
        .and(header("x-ms-max-item-count", "2"))
        .respond_with(page_response(&["1", "2"], Some("c1")))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_test_client(&server);
    let request = FeedRequest::list(ResourceKind::Documents, COLL_PATH);

    let page = feed::fetch_page::<Doc>(&client, &request, Some(2), None)
        .await
        .unwrap();
    assert_eq!(ids(&page.items), vec!["1", "2"]);
    assert_eq!(page.continuation.as_deref(), Some("c1"));
}

#[tokio::test]
async fn test_bounded_stream_stops_after_one_page() {
    let server = MockServer::start().await;
    mount_three_pages(&server, 1).await;
    let client = create_test_client(&server);

    let request = FeedRequest::list(ResourceKind::Documents, COLL_PATH);
    let docs = feed::stream::<Doc>(&client, &request, Some(2)).await.unwrap();

    assert_eq!(ids(&docs), vec!["1", "2"]);
    assert_eq!(docs.pages(), 1);
    assert_eq!(docs.continuation(), Some("c1"));

    let received = server.received_requests().await.unwrap();
    assert_eq!(received.len(), 1);
}

#[tokio::test]
async fn test_fetch_page_resumes_from_cursor() {
    let server = MockServer::start().await;
    mount_three_pages(&server, 0).await;
    let client = create_test_client(&server);

    let request = FeedRequest::list(ResourceKind::Documents, COLL_PATH);
    let page = feed::fetch_page::<Doc>(&client, &request, Some(2), Some("c1"))
        .await
        .unwrap();

    assert_eq!(ids(&page.items), vec!["3", "4"]);
    assert_eq!(page.continuation.as_deref(), Some("c2"));
}

#[tokio::test]
async fn test_pager_walks_pages_until_exhausted() {
    let server = MockServer::start().await;
    mount_three_pages(&server, 1).await;
    let client = create_test_client(&server);

    let request = FeedRequest::list(ResourceKind::Documents, COLL_PATH);
    let mut pager = client.pager::<Doc>(request, Some(2));

    let mut seen = Vec::new();
    while let Some(page) = pager.next_page().await {
        let page = page.unwrap();
        seen.push(page.items.len());
    }

    assert_eq!(seen, vec![2, 2, 2]);
    assert!(pager.is_finished());
    assert!(pager.next_page().await.is_none());
}

#[tokio::test]
async fn test_client_list_drains_all_pages() {
    let server = MockServer::start().await;
    mount_three_pages(&server, 1).await;
    let client = create_test_client(&server);

    let docs: Vec<Doc> = client
        .list_documents("D1", "C1", &RequestOptions::default())
        .await
        .unwrap()
        .into_inner();

    assert_eq!(docs.len(), 6);
    assert_eq!(docs[5].id, "6");
}

// ============================================================================
// Empty, Error, and Malformed Responses
// ============================================================================

#[tokio::test]
async fn test_no_content_yields_empty_result() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(DOCS_PATH))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_test_client(&server);
    let request = FeedRequest::list(ResourceKind::Documents, COLL_PATH);
    let docs = feed::stream::<Doc>(&client, &request, None).await.unwrap();

    assert!(docs.is_empty());
    assert_eq!(docs.pages(), 1);
}

#[tokio::test]
async fn test_not_found_yields_api_error_with_service_message() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(DOCS_PATH))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "not found"})))
        .mount(&server)
        .await;

    let client = create_test_client(&server);
    let request = FeedRequest::list(ResourceKind::Documents, COLL_PATH);
    let error = feed::stream::<Doc>(&client, &request, None)
        .await
        .unwrap_err();

    assert_eq!(error.kind(), ErrorKind::Api);
    assert_eq!(error.status_code(), Some(404));
    match error {
        CosmosError::Http(HttpError::Api(api_error)) => {
            assert_eq!(api_error.code, 404);
            assert_eq!(api_error.message, "not found");
        }
        other => panic!("expected ApiError, got {other:?}"),
    }
}

#[tokio::test]
async fn test_missing_envelope_field_is_protocol_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/dbs/D1/colls"))
        .respond_with(ResponseTemplate::new(200).set_body_json(docs_page(&["1"])))
        .mount(&server)
        .await;

    let client = create_test_client(&server);
    let request = FeedRequest::list(ResourceKind::Collections, "/dbs/D1");
    let error = feed::stream::<serde_json::Value>(&client, &request, None)
        .await
        .unwrap_err();

    assert!(matches!(
        error,
        CosmosError::Protocol(ProtocolError::MissingEnvelopeField {
            field: "DocumentCollections"
        })
    ));
}

#[tokio::test]
async fn test_failure_mid_chain_discards_accumulated_items() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(DOCS_PATH))
        .and(header("x-ms-continuation", "c1"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({
            "code": "ServiceUnavailable",
            "message": "busy"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(DOCS_PATH))
        .respond_with(page_response(&["1", "2"], Some("c1")))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_test_client(&server);
    let request = FeedRequest::list(ResourceKind::Documents, COLL_PATH);
    let error = feed::stream::<Doc>(&client, &request, None)
        .await
        .unwrap_err();

    assert_eq!(error.status_code(), Some(503));
    assert_eq!(error.to_string(), "busy");
}

#[tokio::test]
async fn test_transport_timeout_aborts_chain() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(DOCS_PATH))
        .respond_with(page_response(&["1"], None).set_delay(Duration::from_millis(500)))
        .mount(&server)
        .await;

    let config = CosmosConfig::builder()
        .endpoint(AccountEndpoint::new(server.uri()).unwrap())
        .auth_token(AuthToken::new("a2V5").unwrap())
        .timeout(Duration::from_millis(50))
        .build()
        .unwrap();
    let client = CosmosClient::new(config);

    let request = FeedRequest::list(ResourceKind::Documents, COLL_PATH);
    let error = feed::stream::<Doc>(&client, &request, None)
        .await
        .unwrap_err();

    assert_eq!(error.kind(), ErrorKind::Transport);
    assert_eq!(error.status_code(), None);
}

// ============================================================================
// Query Requests
// ============================================================================

#[tokio::test]
async fn test_query_is_posted_with_query_headers_and_body() {
    let server = MockServer::start().await;

    let query = SqlQuery::new("SELECT * FROM c WHERE c.kind = @kind").param("@kind", "order");

    Mock::given(method("POST"))
        .and(path(DOCS_PATH))
        .and(header("x-ms-documentdb-isquery", "true"))
        .and(header("content-type", "application/query+json"))
        .and(header("x-ms-documentdb-query-enablecrosspartition", "true"))
        .and(body_json(json!({
            "query": "SELECT * FROM c WHERE c.kind = @kind",
            "parameters": [{"name": "@kind", "value": "order"}]
        })))
        .respond_with(page_response(&["o-1"], None))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_test_client(&server);
    let options = RequestOptions::new().enable_cross_partition();
    let docs = client
        .query_documents::<Doc>("D1", "C1", query, &options)
        .await
        .unwrap();

    assert_eq!(ids(&docs), vec!["o-1"]);
}

#[tokio::test]
async fn test_every_page_request_is_signed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/dbs"))
        .and(header_exists("authorization"))
        .and(header_exists("x-ms-date"))
        .and(header("x-ms-version", "2018-12-31"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"Databases": [{"id": "D1"}]})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = create_test_client(&server);
    let databases = client
        .list_databases(&RequestOptions::default())
        .await
        .unwrap();

    assert_eq!(databases.len(), 1);
    assert_eq!(databases[0]["id"], "D1");
}
