use std::time::Duration;

use natter::core::validate::{ValidText, validate};
use natter::reply::{API_APOLOGY, CHAT_SERVER_APOLOGY, RemoteResponder, Responder};
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, method, path},
};

// ============================================================================
// Helper Functions
// ============================================================================

const TIMEOUT: Duration = Duration::from_secs(5);

fn text(s: &str) -> ValidText {
    validate(s).unwrap()
}

/// Mounts a single POST handler at `route` answering with `template`.
async fn server_with(route: &str, template: ResponseTemplate) -> MockServer {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(route))
        .respond_with(template)
        .mount(&mock_server)
        .await;
    mock_server
}

// ============================================================================
// /api/chat
// ============================================================================

#[tokio::test]
async fn test_api_returns_response_field() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(body_json(json!({ "message": "hello" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "response": "hi there" })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let responder = RemoteResponder::api(&mock_server.uri(), TIMEOUT);
    assert_eq!(responder.respond(&text("hello")).await, "hi there");
}

#[tokio::test]
async fn test_api_trailing_slash_in_base_url() {
    let mock_server = server_with(
        "/api/chat",
        ResponseTemplate::new(200).set_body_json(json!({ "response": "ok" })),
    )
    .await;

    let base = format!("{}/", mock_server.uri());
    let responder = RemoteResponder::api(&base, TIMEOUT);
    assert_eq!(responder.respond(&text("ping")).await, "ok");
}

#[tokio::test]
async fn test_api_server_error_yields_apology() {
    let mock_server = server_with("/api/chat", ResponseTemplate::new(500)).await;

    let responder = RemoteResponder::api(&mock_server.uri(), TIMEOUT);
    assert_eq!(responder.respond(&text("hello")).await, API_APOLOGY);
}

#[tokio::test]
async fn test_api_malformed_json_yields_apology() {
    let mock_server = server_with(
        "/api/chat",
        ResponseTemplate::new(200).set_body_string("{not json"),
    )
    .await;

    let responder = RemoteResponder::api(&mock_server.uri(), TIMEOUT);
    assert_eq!(responder.respond(&text("hello")).await, API_APOLOGY);
}

#[tokio::test]
async fn test_api_rejects_reply_shaped_body() {
    // A chat-server style body is not a valid /api/chat answer
    let mock_server = server_with(
        "/api/chat",
        ResponseTemplate::new(200).set_body_json(json!({ "reply": "wrong field" })),
    )
    .await;

    let responder = RemoteResponder::api(&mock_server.uri(), TIMEOUT);
    assert_eq!(responder.respond(&text("hello")).await, API_APOLOGY);
}

#[tokio::test]
async fn test_api_timeout_yields_apology() {
    let mock_server = server_with(
        "/api/chat",
        ResponseTemplate::new(200)
            .set_body_json(json!({ "response": "too late" }))
            .set_delay(Duration::from_secs(2)),
    )
    .await;

    let responder = RemoteResponder::api(&mock_server.uri(), Duration::from_millis(200));
    assert_eq!(responder.respond(&text("hello")).await, API_APOLOGY);
}

#[tokio::test]
async fn test_api_unreachable_yields_apology() {
    // Nothing listens on port 9 (discard) in the test environment
    let responder = RemoteResponder::api("http://127.0.0.1:9", TIMEOUT);
    assert_eq!(responder.respond(&text("hello")).await, API_APOLOGY);
}

// ============================================================================
// /api/chat, verbose failures
// ============================================================================

#[tokio::test]
async fn test_api_verbose_spells_out_status() {
    let mock_server = server_with("/api/chat", ResponseTemplate::new(500)).await;

    let responder = RemoteResponder::api_verbose(&mock_server.uri(), TIMEOUT);
    assert_eq!(
        responder.respond(&text("hello")).await,
        "Error: request failed with status 500"
    );
}

#[tokio::test]
async fn test_api_verbose_spells_out_timeout() {
    let mock_server = server_with(
        "/api/chat",
        ResponseTemplate::new(200)
            .set_body_json(json!({ "response": "too late" }))
            .set_delay(Duration::from_secs(2)),
    )
    .await;

    let responder = RemoteResponder::api_verbose(&mock_server.uri(), Duration::from_millis(200));
    assert_eq!(
        responder.respond(&text("hello")).await,
        "Error: request timed out"
    );
}

#[tokio::test]
async fn test_api_verbose_success_is_plain_reply() {
    let mock_server = server_with(
        "/api/chat",
        ResponseTemplate::new(200).set_body_json(json!({ "response": "fine" })),
    )
    .await;

    let responder = RemoteResponder::api_verbose(&mock_server.uri(), TIMEOUT);
    assert_eq!(responder.respond(&text("hello")).await, "fine");
}

// ============================================================================
// Chat server
// ============================================================================

#[tokio::test]
async fn test_chat_server_returns_reply_field() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .and(body_json(json!({ "message": "你好" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "reply": "hello back" })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let url = format!("{}/chat", mock_server.uri());
    let responder = RemoteResponder::chat_server(&url, TIMEOUT);
    assert_eq!(responder.respond(&text("你好")).await, "hello back");
}

#[tokio::test]
async fn test_chat_server_rejects_response_shaped_body() {
    let mock_server = server_with(
        "/chat",
        ResponseTemplate::new(200).set_body_json(json!({ "response": "wrong field" })),
    )
    .await;

    let url = format!("{}/chat", mock_server.uri());
    let responder = RemoteResponder::chat_server(&url, TIMEOUT);
    assert_eq!(responder.respond(&text("hello")).await, CHAT_SERVER_APOLOGY);
}

#[tokio::test]
async fn test_chat_server_error_yields_its_own_apology() {
    let mock_server = server_with("/chat", ResponseTemplate::new(503)).await;

    let url = format!("{}/chat", mock_server.uri());
    let responder = RemoteResponder::chat_server(&url, TIMEOUT);
    assert_eq!(responder.respond(&text("hello")).await, CHAT_SERVER_APOLOGY);
}
