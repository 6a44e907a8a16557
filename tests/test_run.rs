//! Running stored requests against a mock server

mod common;

use common::{ExitStatus, TestEnv};
use serde_json::json;
use wiremock::matchers::{body_string, body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test(flavor = "multi_thread")]
async fn test_get_with_query_params() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/users"))
        .and(query_param("id", "7"))
        .respond_with(ResponseTemplate::new(200).set_body_string("user seven"))
        .expect(1)
        .mount(&server)
        .await;

    let env = TestEnv::new();
    env.add_simple("users", "get", "GET", &server.uri(), "/v1/users", json!({ "query_params": { "id": "7" } }));

    let r = env.run(&["run", "-c", "users", "-r", "get"]);
    assert_eq!(r.exit_status, ExitStatus::Success, "stderr: {}", r.stderr);
    assert!(r.contains("Status:"));
    assert!(r.contains("200"));
    assert!(r.contains("Response:"));
    assert!(r.contains("user seven"));
    assert!(r.contains("Time taken:"));
    assert!(r.stderr.contains("Request started..."));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_custom_headers_are_sent() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/items/3"))
        .and(header("x-api-key", "secret"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let env = TestEnv::new();
    env.add_simple("items", "delete", "DELETE", &server.uri(), "/items/3", json!({ "headers": { "X-Api-Key": "secret" } }));

    let r = env.run(&["r", "-c", "items", "-r", "delete"]);
    assert_eq!(r.exit_status, ExitStatus::Success, "stderr: {}", r.stderr);
    assert!(r.contains("204"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_form_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string("a=1&b=2"))
        .respond_with(ResponseTemplate::new(200).set_body_string("welcome"))
        .expect(1)
        .mount(&server)
        .await;

    let env = TestEnv::new();
    env.add_simple(
        "auth",
        "login",
        "POST",
        &server.uri(),
        "/login",
        json!({
            "content_type": "application/x-www-form-urlencoded",
            "body": { "form_url_encoded": { "b": "2", "a": "1" } }
        }),
    );

    let r = env.run(&["run", "-c", "auth", "-r", "login"]);
    assert_eq!(r.exit_status, ExitStatus::Success, "stderr: {}", r.stderr);
    assert!(r.contains("welcome"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_raw_body_wins_over_form_fields() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/echo"))
        .and(header("content-type", "application/json"))
        .and(body_string("{\"x\":1}"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let env = TestEnv::new();
    env.add_simple(
        "echo",
        "post",
        "POST",
        &server.uri(),
        "/echo",
        json!({
            "content_type": "application/json",
            "body": { "raw_body": "{\"x\":1}", "form_url_encoded": { "a": "1" } }
        }),
    );

    let r = env.run(&["run", "-c", "echo", "-r", "post"]);
    assert_eq!(r.exit_status, ExitStatus::Success, "stderr: {}", r.stderr);
    assert!(r.contains("201"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_binary_file_body() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/upload"))
        .and(header("content-type", "application/octet-stream"))
        .and(body_string("file contents"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let env = TestEnv::new();
    let file = env.path().join("payload.bin");
    std::fs::write(&file, "file contents").unwrap();
    env.add_simple(
        "files",
        "upload",
        "PUT",
        &server.uri(),
        "/upload",
        json!({
            "content_type": "application/octet-stream",
            "body": { "binary_file_body": file }
        }),
    );

    let r = env.run(&["run", "-c", "files", "-r", "upload"]);
    assert_eq!(r.exit_status, ExitStatus::Success, "stderr: {}", r.stderr);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_missing_binary_file_is_not_sent() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let env = TestEnv::new();
    env.add_simple(
        "files",
        "upload",
        "PUT",
        &server.uri(),
        "/upload",
        json!({
            "content_type": "application/octet-stream",
            "body": { "binary_file_body": "/definitely/missing.bin" }
        }),
    );

    let r = env.run(&["run", "-c", "files", "-r", "upload"]);
    assert_eq!(r.exit_status, ExitStatus::Error);
    assert!(r.stderr.contains("File not found"), "stderr: {}", r.stderr);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_multipart_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/form"))
        .and(body_string_contains("name=\"title\""))
        .and(body_string_contains("hello"))
        .and(body_string_contains("filename=\"notes.txt\""))
        .and(body_string_contains("attached text"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let env = TestEnv::new();
    let file = env.path().join("notes.txt");
    std::fs::write(&file, "attached text").unwrap();
    env.add_simple(
        "forms",
        "upload",
        "POST",
        &server.uri(),
        "/form",
        json!({
            "content_type": "multipart/form-data",
            "body": { "multipart_body": [
                { "key": "title", "plain_text_value": "hello" },
                { "key": "notes", "binary_file_path_value": file }
            ] }
        }),
    );

    let r = env.run(&["run", "-c", "forms", "-r", "upload"]);
    assert_eq!(r.exit_status, ExitStatus::Success, "stderr: {}", r.stderr);

    let received = server.received_requests().await.unwrap();
    let content_type = received[0].headers.get("content-type").unwrap().to_str().unwrap();
    assert!(content_type.starts_with("multipart/form-data; boundary="));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_print_curl_then_send() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ping"))
        .respond_with(ResponseTemplate::new(200).set_body_string("pong"))
        .expect(1)
        .mount(&server)
        .await;

    let env = TestEnv::new();
    env.add_simple("health", "ping", "GET", &server.uri(), "/ping", json!({}));

    let r = env.run(&["run", "-c", "health", "-r", "ping", "-p"]);
    assert_eq!(r.exit_status, ExitStatus::Success, "stderr: {}", r.stderr);

    let curl_at = r.stdout.find("cURL equivalent:").unwrap();
    let status_at = r.stdout.find("Status:").unwrap();
    assert!(curl_at < status_at);
    assert!(r.contains(&format!("curl -X GET '{}/ping'", server.uri())));
    assert!(r.contains("pong"));
}

#[test]
fn test_connection_refused() {
    let env = TestEnv::new();
    env.add_simple("down", "get", "GET", "http://127.0.0.1:1", "/", json!({}));

    let r = env.run(&["run", "-c", "down", "-r", "get"]);
    assert_eq!(r.exit_status, ExitStatus::Error);
    assert!(r.stderr.contains("Error: "));
}
