mod stub;

use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use common::{CompanyCount, SearchQuery};
use serde_json::json;
use tracker::{ErrorKind, QueryClient, SearchError, TrackerConfig};

use stub::{ENGINEER_REMOTE, StubServer, closed_base_url};

fn client_for(base_url: &str) -> QueryClient {
    QueryClient::new(&TrackerConfig::new(base_url)).unwrap()
}

#[tokio::test]
async fn test_search_returns_body_as_received() {
    let server = StubServer::fixed(StatusCode::OK, ENGINEER_REMOTE).await;
    let client = client_for(&server.base_url);

    let result = client
        .search(&SearchQuery::new("engineer", "remote"))
        .await
        .unwrap();

    assert_eq!(result.jobs.len(), 1);
    assert_eq!(result.jobs[0].title, "Backend Engineer");
    assert_eq!(result.jobs[0].company, "Acme");
    assert_eq!(result.jobs[0].location, "Remote");
    assert_eq!(
        result.analysis.unwrap().top_companies,
        vec![CompanyCount::new("Acme", 1)]
    );
}

#[tokio::test]
async fn test_one_request_per_search() {
    let server = StubServer::fixed(StatusCode::OK, ENGINEER_REMOTE).await;
    let client = client_for(&server.base_url);
    let query = SearchQuery::new("engineer", "remote");

    client.search(&query).await.unwrap();
    assert_eq!(server.hits(), 1);

    client.search(&query).await.unwrap();
    assert_eq!(server.hits(), 2);
    assert_eq!(server.bodies()[0], server.bodies()[1]);
}

#[tokio::test]
async fn test_empty_fields_are_forwarded() {
    let server = StubServer::fixed(StatusCode::OK, r#"{"jobs": [], "analysis": null}"#).await;
    let client = client_for(&server.base_url);

    let result = client.search(&SearchQuery::new("", "")).await.unwrap();

    assert!(result.jobs.is_empty());
    assert!(result.analysis.is_none());
    assert_eq!(server.bodies(), vec![json!({"query": "", "location": ""})]);
}

#[tokio::test]
async fn test_top_companies_order_is_not_touched() {
    let body = r#"{"jobs": [], "analysis": {"top_companies": [["Small", 1], ["Big", 8], ["Mid", 3]]}}"#;
    let server = StubServer::fixed(StatusCode::OK, body).await;
    let client = client_for(&server.base_url);

    let result = client.search(&SearchQuery::new("dev", "")).await.unwrap();
    let counts: Vec<u64> = result
        .analysis
        .unwrap()
        .top_companies
        .iter()
        .map(CompanyCount::count)
        .collect();

    assert_eq!(counts, [1, 8, 3]);
}

#[tokio::test]
async fn test_server_error_carries_service_message() {
    let body = r#"{"error": "An error occurred while searching for jobs", "jobs": []}"#;
    let server = StubServer::fixed(StatusCode::INTERNAL_SERVER_ERROR, body).await;
    let client = client_for(&server.base_url);

    let err = client
        .search(&SearchQuery::new("engineer", "remote"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Server);
    match err {
        SearchError::Status { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "An error occurred while searching for jobs");
        }
        other => panic!("expected status error, got {other:?}"),
    }
    assert_eq!(server.hits(), 1);
}

#[tokio::test]
async fn test_malformed_body_is_a_server_error() {
    let server = StubServer::fixed(StatusCode::OK, "<html>oops</html>").await;
    let client = client_for(&server.base_url);

    let err = client
        .search(&SearchQuery::new("engineer", "remote"))
        .await
        .unwrap_err();

    assert!(matches!(err, SearchError::Malformed(_)));
    assert_eq!(err.kind(), ErrorKind::Server);
}

#[tokio::test]
async fn test_missing_jobs_is_malformed() {
    let server = StubServer::fixed(StatusCode::OK, r#"{"analysis": null}"#).await;
    let client = client_for(&server.base_url);

    let err = client.search(&SearchQuery::default()).await.unwrap_err();
    assert!(matches!(err, SearchError::Malformed(_)));
}

#[tokio::test]
async fn test_connection_refused_is_a_network_error() {
    let client = client_for(&closed_base_url().await);

    let err = client
        .search(&SearchQuery::new("engineer", "remote"))
        .await
        .unwrap_err();

    assert!(matches!(err, SearchError::Network(_)));
    assert_eq!(err.kind(), ErrorKind::Network);
}

#[tokio::test]
async fn test_slow_server_times_out() {
    let server = StubServer::start(Arc::new(|_: &serde_json::Value| {
        (StatusCode::OK, ENGINEER_REMOTE.to_string(), Duration::from_secs(5))
    }))
    .await;
    let config = TrackerConfig::new(&server.base_url).with_timeout(Duration::from_millis(200));
    let client = QueryClient::new(&config).unwrap();

    let err = client
        .search(&SearchQuery::new("engineer", "remote"))
        .await
        .unwrap_err();

    match err {
        SearchError::Network(e) => assert!(e.is_timeout()),
        other => panic!("expected timeout, got {other:?}"),
    }
}

#[tokio::test]
async fn test_validation_blocks_request() {
    let server = StubServer::fixed(StatusCode::OK, ENGINEER_REMOTE).await;
    let config = TrackerConfig::new(&server.base_url).with_validation(true);
    let client = QueryClient::new(&config).unwrap();

    let err = client.search(&SearchQuery::new("", "remote")).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Input);
    assert_eq!(server.hits(), 0);

    client
        .search(&SearchQuery::new("engineer", "remote"))
        .await
        .unwrap();
    assert_eq!(server.hits(), 1);
}

#[tokio::test]
async fn test_truncated_error_body_is_still_a_server_error() {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    // Promises 100 bytes of body, sends 5, then closes its write half.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = [0u8; 4096];
        let _ = socket.read(&mut buf).await;
        socket
            .write_all(
                b"HTTP/1.1 500 Internal Server Error\r\n\
                  content-type: text/plain\r\n\
                  content-length: 100\r\n\r\nshort",
            )
            .await
            .unwrap();
        socket.shutdown().await.unwrap();
        let _ = socket.read_to_end(&mut Vec::new()).await;
    });
    let client = client_for(&format!("http://{}", addr));

    let err = client
        .search(&SearchQuery::new("engineer", "remote"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Server);
    assert!(matches!(err, SearchError::Status { status: 500, .. }));
}
