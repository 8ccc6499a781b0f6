use docsynth_core::{SearchTool, ToolError};
use docsynth_tools::{TavilySearch, UnavailableSearch};
use httpmock::prelude::*;
use serde_json::json;

fn client(server: &MockServer) -> TavilySearch {
    TavilySearch::new("tvly-key")
        .expect("client")
        .with_base_url(server.base_url())
}

#[tokio::test]
async fn returns_first_result_content() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/search")
            .header("authorization", "Bearer tvly-key")
            .json_body(json!({"query": "SAP background", "max_results": 1}));
        then.status(200).json_body(json!({
            "query": "SAP background",
            "results": [
                {"title": "SAP", "url": "https://example.com", "content": "SAP SE is a German software company.", "score": 0.9}
            ]
        }));
    });

    let content = client(&server).search("SAP background").await.unwrap();

    assert_eq!(content, "SAP SE is a German software company.");
    mock.assert();
}

#[tokio::test]
async fn empty_results_is_no_results_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/search");
        then.status(200).json_body(json!({"results": []}));
    });

    let err = client(&server).search("nothing").await.unwrap_err();
    assert!(matches!(err, ToolError::NoResults(q) if q == "nothing"));
}

#[tokio::test]
async fn http_error_is_execution_failure() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/search");
        then.status(401).body("unauthorized");
    });

    let err = client(&server).search("q").await.unwrap_err();
    assert!(matches!(err, ToolError::ExecutionFailed(msg) if msg.contains("401")));
}

#[tokio::test]
async fn blank_query_is_rejected_locally() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/search");
        then.status(200);
    });

    let err = client(&server).search("  ").await.unwrap_err();
    assert!(matches!(err, ToolError::InvalidInput(_)));
    mock.assert_hits(0);
}

#[tokio::test]
async fn unavailable_search_always_fails() {
    let err = UnavailableSearch.search("q").await.unwrap_err();
    assert!(matches!(err, ToolError::ExecutionFailed(_)));
}

#[test]
fn blank_key_is_config_error() {
    assert!(TavilySearch::new("").is_err());
}
