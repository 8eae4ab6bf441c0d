//! Integration tests for the shared HTTP client using wiremock.

use std::collections::HashMap;
use std::time::Duration;

use synapse_client::RemoteClient;
use wiremock::matchers::{body_json, body_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn get_json_returns_body_and_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/info"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"status": "up"}))
                .insert_header("x-engine", "node"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = RemoteClient::new();
    let reply = client
        .get_json(&format!("{}/info", mock_server.uri()))
        .await
        .unwrap();

    assert!(reply.is_success());
    assert_eq!(reply.json().unwrap()["status"], "up");
    assert_eq!(reply.headers["x-engine"], "node");
}

#[tokio::test]
async fn non_success_statuses_are_replies_not_errors() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/info"))
        .respond_with(ResponseTemplate::new(500).set_body_string("runtime exploded"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = RemoteClient::new();
    let reply = client
        .get_json(&format!("{}/info", mock_server.uri()))
        .await
        .unwrap();

    assert_eq!(reply.status.as_u16(), 500);
    assert_eq!(reply.body, "runtime exploded");
}

#[tokio::test]
async fn post_json_sends_json_content_type_by_default() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/endpoints"))
        .and(header("content-type", "application/json"))
        .and(body_json(serde_json::json!({"engine": "node"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = RemoteClient::new();
    let reply = client
        .post_json(
            &format!("{}/endpoints", mock_server.uri()),
            &serde_json::json!({"engine": "node"}),
            &HashMap::new(),
        )
        .await
        .unwrap();

    assert!(reply.is_success());
}

#[tokio::test]
async fn post_json_forwards_caller_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/endpoints"))
        .and(header("x-request-id", "42"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut headers = HashMap::new();
    headers.insert("x-request-id".to_owned(), "42".to_owned());

    let client = RemoteClient::new();
    let reply = client
        .post_json(
            &format!("{}/endpoints", mock_server.uri()),
            &serde_json::json!({}),
            &headers,
        )
        .await
        .unwrap();

    assert!(reply.is_success());
}

#[tokio::test]
async fn post_json_lets_caller_headers_override_content_type() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/endpoints"))
        .and(header("content-type", "application/vnd.synapse+json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut headers = HashMap::new();
    headers.insert(
        "content-type".to_owned(),
        "application/vnd.synapse+json".to_owned(),
    );

    let client = RemoteClient::new();
    let reply = client
        .post_json(
            &format!("{}/endpoints", mock_server.uri()),
            &serde_json::json!({}),
            &headers,
        )
        .await
        .unwrap();

    assert!(reply.is_success());
}

#[tokio::test]
async fn post_text_sends_raw_body_under_explicit_content_type() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/abc/welcome"))
        .and(header("content-type", "text/plain"))
        .and(body_string("hello there"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = RemoteClient::new();
    let reply = client
        .post_text(
            &format!("{}/abc/welcome", mock_server.uri()),
            "hello there".to_owned(),
            "text/plain",
            &HashMap::new(),
        )
        .await
        .unwrap();

    assert_eq!(reply.body, "ok");
}

#[tokio::test]
async fn slow_responses_time_out_as_transport_errors() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/info"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("{}")
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&mock_server)
        .await;

    let client = RemoteClient::new().with_timeout(Duration::from_millis(100));
    let err = client
        .get_json(&format!("{}/info", mock_server.uri()))
        .await
        .unwrap_err();

    assert!(err.is_timeout(), "expected timeout, got: {err}");
}

#[tokio::test]
async fn refused_connections_are_transport_errors() {
    // Bind and immediately drop a listener so the port is known-dead.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let client = RemoteClient::new().with_timeout(Duration::from_secs(1));
    let err = client
        .get_json(&format!("http://127.0.0.1:{port}/info"))
        .await
        .unwrap_err();

    assert!(!err.is_timeout(), "expected a connect failure, got timeout");
}
