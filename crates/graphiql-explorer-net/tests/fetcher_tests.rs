//! Integration tests for the query fetcher.

use std::time::Duration;

use graphiql_explorer_core::Parameters;
use graphiql_explorer_net::graphql::{
    AsyncFetcher, FetchResult, FetchStatus, GraphQLFetcher, GraphQLRequest,
};
use graphiql_explorer_net::http::HttpClient;
use graphiql_explorer_net::NetworkError;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fetcher_for(server: &MockServer) -> GraphQLFetcher {
    GraphQLFetcher::builder(server.uri())
        .path("/graphql")
        .build()
        .expect("Failed to build fetcher")
}

#[tokio::test]
async fn test_posts_json_with_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(header("accept", "application/json"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"query": "{ a }", "operationName": "Q"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"a": 1}})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let fetcher = fetcher_for(&mock_server);
    let request = GraphQLRequest::new("{ a }").operation_name("Q");
    let result = fetcher.fetch(&request).await.expect("Fetch failed");

    assert_eq!(result, FetchResult::Json(json!({"data": {"a": 1}})));
}

#[tokio::test]
async fn test_body_is_forwarded_unchanged() {
    let mock_server = MockServer::start().await;
    let params = json!({"query": "{ a }", "variables": {"x": 1}, "extra": [true]});

    Mock::given(method("POST"))
        .and(body_json(params.clone()))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let fetcher = fetcher_for(&mock_server);
    let result = fetcher.fetch(&params).await.expect("Fetch failed");
    assert_eq!(result, FetchResult::Json(json!({})));
}

#[tokio::test]
async fn test_request_from_url_parameters() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_json(json!({"query": "{ a }", "variables": {"x": 1}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": null})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let params = Parameters::parse("?query=%7B%20a%20%7D&variables=%7B%22x%22%3A1%7D");
    let fetcher = fetcher_for(&mock_server);
    let result = fetcher
        .fetch(&GraphQLRequest::from_parameters(&params))
        .await
        .expect("Fetch failed");

    assert!(result.is_json());
}

#[tokio::test]
async fn test_plain_text_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("oops"))
        .mount(&mock_server)
        .await;

    let fetcher = fetcher_for(&mock_server);
    let result = fetcher
        .fetch(&GraphQLRequest::new("{ a }"))
        .await
        .expect("Fetch failed");

    assert_eq!(result, FetchResult::Text("oops".to_string()));
}

#[tokio::test]
async fn test_error_status_is_not_a_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&mock_server)
        .await;

    let fetcher = fetcher_for(&mock_server);
    let result = fetcher
        .fetch(&GraphQLRequest::new("{ a }"))
        .await
        .expect("Fetch failed");

    assert_eq!(result.as_text(), Some("Bad Gateway"));
}

#[tokio::test]
async fn test_graphql_errors_come_back_as_json() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "errors": [{"message": "Syntax Error", "locations": [{"line": 1, "column": 3}]}]
        })))
        .mount(&mock_server)
        .await;

    let fetcher = fetcher_for(&mock_server);
    let result = fetcher
        .fetch(&GraphQLRequest::new("{ a"))
        .await
        .expect("Fetch failed");

    let body = result.as_json().expect("Body is not JSON");
    assert_eq!(body["errors"][0]["message"], "Syntax Error");
    assert_eq!(body["errors"][0]["locations"][0]["column"], 3);
}

#[tokio::test]
async fn test_cookies_are_sent_back() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(header("cookie", "session=abc"))
        .respond_with(ResponseTemplate::new(200).set_body_string("authenticated"))
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", "session=abc; Path=/")
                .set_body_string("anonymous"),
        )
        .mount(&mock_server)
        .await;

    let fetcher = fetcher_for(&mock_server);
    let request = GraphQLRequest::new("{ me }");

    let first = fetcher.fetch(&request).await.expect("Fetch failed");
    assert_eq!(first.as_text(), Some("anonymous"));

    let second = fetcher.fetch(&request).await.expect("Fetch failed");
    assert_eq!(second.as_text(), Some("authenticated"));
}

#[tokio::test]
async fn test_configured_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&mock_server)
        .await;

    let client = HttpClient::builder()
        .timeout(Duration::from_millis(100))
        .build()
        .expect("Failed to build client");
    let fetcher = GraphQLFetcher::builder(mock_server.uri())
        .http_client(client)
        .build()
        .expect("Failed to build fetcher");

    let result = fetcher.fetch(&GraphQLRequest::new("{ a }")).await;
    assert!(matches!(result, Err(NetworkError::Timeout)));
}

#[tokio::test]
async fn test_connection_refused() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind");
    let port = listener.local_addr().expect("No local address").port();
    drop(listener);

    let fetcher = GraphQLFetcher::builder(format!("http://127.0.0.1:{port}"))
        .build()
        .expect("Failed to build fetcher");

    let result = fetcher.fetch(&GraphQLRequest::new("{ a }")).await;
    assert!(matches!(result, Err(NetworkError::Connection(_))));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_async_fetcher_emits_result() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("oops"))
        .mount(&mock_server)
        .await;

    let fetcher = AsyncFetcher::with_handle(
        fetcher_for(&mock_server),
        tokio::runtime::Handle::current(),
    );

    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    fetcher.fetch_finished.connect(move |status: &FetchStatus| {
        let _ = tx.send(status.clone());
    });

    let id = fetcher.fetch_async(&GraphQLRequest::new("{ a }"));

    let status = tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("Timed out waiting for fetch")
        .expect("Channel closed");

    assert_eq!(status.id(), id);
    match status {
        FetchStatus::Completed { result, .. } => {
            assert_eq!(result, FetchResult::Text("oops".to_string()));
        }
        FetchStatus::Failed { error, .. } => panic!("Unexpected failure: {error}"),
    }
}
