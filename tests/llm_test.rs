// ABOUTME: Integration tests for the Groq completion client against a local mock server
// ABOUTME: Covers request shape, zero-choice responses and upstream error mapping
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dapur Recipe Service

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use dapur_server::config::LlmConfig;
use dapur_server::errors::ErrorCode;
use dapur_server::llm::{ChatMessage, ChatRequest, GroqProvider, LlmProvider};
use serde_json::{json, Value};
use tokio::net::TcpListener;

#[derive(Clone)]
struct MockUpstream {
    status: StatusCode,
    body: String,
    seen: Arc<Mutex<Vec<(Option<String>, Value)>>>,
}

async fn chat_completions(
    State(mock): State<MockUpstream>,
    headers: HeaderMap,
    Json(payload): Json<Value>,
) -> (StatusCode, String) {
    let auth = headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    mock.seen.lock().unwrap().push((auth, payload));
    (mock.status, mock.body.clone())
}

/// Start a mock completion service, returning its base URL and the captured requests
async fn spawn_upstream(
    status: StatusCode,
    body: impl Into<String>,
) -> (String, Arc<Mutex<Vec<(Option<String>, Value)>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let mock = MockUpstream {
        status,
        body: body.into(),
        seen: seen.clone(),
    };
    let app = Router::new()
        .route("/v1/chat/completions", post(chat_completions))
        .with_state(mock);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}/v1"), seen)
}

fn provider(base_url: &str, api_key: Option<&str>) -> GroqProvider {
    GroqProvider::from_config(&LlmConfig {
        api_key: api_key.map(str::to_owned),
        base_url: base_url.to_owned(),
        model: "openai/gpt-oss-20b".to_owned(),
        timeout_secs: 5,
    })
    .unwrap()
}

fn single_message() -> ChatRequest {
    ChatRequest::new(vec![ChatMessage::user("Buatkan resep sayur asem")])
}

#[tokio::test]
async fn test_completion_returns_first_choice_text() {
    let body = json!({
        "model": "openai/gpt-oss-20b",
        "choices": [
            {"message": {"role": "assistant", "content": "Resep: Sayur Asem"}, "finish_reason": "stop"},
            {"message": {"role": "assistant", "content": "second"}, "finish_reason": "stop"}
        ],
        "usage": {"prompt_tokens": 12, "completion_tokens": 30, "total_tokens": 42}
    });
    let (base_url, seen) = spawn_upstream(StatusCode::OK, body.to_string()).await;

    let response = provider(&base_url, Some("gsk_test"))
        .complete(&single_message())
        .await
        .unwrap();

    assert_eq!(response.first_text(), "Resep: Sayur Asem");
    assert_eq!(response.usage.unwrap().total_tokens, 42);

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    let (auth, payload) = &seen[0];
    assert_eq!(auth.as_deref(), Some("Bearer gsk_test"));
    assert_eq!(payload["model"], "openai/gpt-oss-20b");
    assert_eq!(payload["stream"], false);
    assert_eq!(payload["messages"].as_array().unwrap().len(), 1);
    assert_eq!(payload["messages"][0]["role"], "user");
    assert_eq!(payload["messages"][0]["content"], "Buatkan resep sayur asem");

    let mut keys: Vec<&str> = payload
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    keys.sort_unstable();
    assert_eq!(keys, ["messages", "model", "stream"]);
}

#[tokio::test]
async fn test_request_model_overrides_default() {
    let body = json!({"choices": [{"message": {"content": "ok"}}]});
    let (base_url, seen) = spawn_upstream(StatusCode::OK, body.to_string()).await;

    let request = single_message().with_model("llama-3.1-8b-instant");
    let response = provider(&base_url, Some("gsk_test"))
        .complete(&request)
        .await
        .unwrap();

    assert_eq!(response.model, "llama-3.1-8b-instant");
    assert_eq!(seen.lock().unwrap()[0].1["model"], "llama-3.1-8b-instant");
}

#[tokio::test]
async fn test_zero_choices_yield_empty_text() {
    let (base_url, _) = spawn_upstream(StatusCode::OK, r#"{"choices": []}"#).await;

    let response = provider(&base_url, Some("gsk_test"))
        .complete(&single_message())
        .await
        .unwrap();

    assert!(response.choices.is_empty());
    assert_eq!(response.into_first_text(), "");
}

#[tokio::test]
async fn test_unauthorized_maps_to_external_auth_failure() {
    let body = json!({"error": {"message": "Invalid API Key", "type": "invalid_request_error"}});
    let (base_url, _) = spawn_upstream(StatusCode::UNAUTHORIZED, body.to_string()).await;

    let error = provider(&base_url, Some("gsk_wrong"))
        .complete(&single_message())
        .await
        .unwrap_err();

    assert_eq!(error.code, ErrorCode::ExternalAuthFailed);
    assert!(error.message.contains("Invalid API Key"));
}

#[tokio::test]
async fn test_rate_limit_maps_to_rate_limited() {
    let body = json!({"error": {"message": "Rate limit reached", "type": "tokens"}});
    let (base_url, _) = spawn_upstream(StatusCode::TOO_MANY_REQUESTS, body.to_string()).await;

    let error = provider(&base_url, Some("gsk_test"))
        .complete(&single_message())
        .await
        .unwrap_err();

    assert_eq!(error.code, ErrorCode::ExternalRateLimited);
    assert_eq!(error.http_status(), 503);
}

#[tokio::test]
async fn test_non_json_error_body_is_external_service_error() {
    let (base_url, _) = spawn_upstream(StatusCode::BAD_GATEWAY, "<html>upstream down</html>").await;

    let error = provider(&base_url, Some("gsk_test"))
        .complete(&single_message())
        .await
        .unwrap_err();

    assert_eq!(error.code, ErrorCode::ExternalServiceError);
    assert!(error.message.contains("upstream down"));
}

#[tokio::test]
async fn test_malformed_success_body_is_external_service_error() {
    let (base_url, _) = spawn_upstream(StatusCode::OK, "not json").await;

    let error = provider(&base_url, Some("gsk_test"))
        .complete(&single_message())
        .await
        .unwrap_err();

    assert_eq!(error.code, ErrorCode::ExternalServiceError);
}

#[tokio::test]
async fn test_missing_api_key_fails_before_sending() {
    let (base_url, seen) = spawn_upstream(StatusCode::OK, r#"{"choices": []}"#).await;

    let error = provider(&base_url, None)
        .complete(&single_message())
        .await
        .unwrap_err();

    assert_eq!(error.code, ErrorCode::ConfigError);
    assert!(error.message.contains("GROQ_API_KEY"));
    assert!(seen.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_unreachable_service_is_external_service_error() {
    let error = provider("http://127.0.0.1:9/v1", Some("gsk_test"))
        .complete(&single_message())
        .await
        .unwrap_err();

    assert_eq!(error.code, ErrorCode::ExternalServiceError);
}
