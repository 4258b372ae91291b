//! # Cohere Provider Tests
//!
//! Verifies the request and response handling of the `CohereProvider`
//! against a mock HTTP server: bearer authentication, schema selection, the
//! double-parse of the string-encoded payload, and the error mapping for
//! upstream failures.

use serde_json::json;
use std::time::Duration;
use studygen::providers::ai::cohere::CohereProvider;
use studygen::providers::ai::CompletionProvider;
use studygen::types::ContentKind;
use studygen::CompletionError;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn provider_for(server: &MockServer) -> CohereProvider {
    CohereProvider::new(
        format!("{}/v1/chat", server.uri()),
        "test-api-key".to_string(),
        "command-test".to_string(),
        Duration::from_secs(5),
    )
    .expect("provider should build")
}

#[tokio::test]
async fn test_complete_normalizes_the_string_encoded_payload() {
    // --- Arrange ---
    let server = MockServer::start().await;
    let payload = json!({
        "flashcards": [
            { "question": "What is a cell?", "answer": "The basic unit of life." }
        ]
    });
    Mock::given(method("POST"))
        .and(path("/v1/chat"))
        .and(header("authorization", "Bearer test-api-key"))
        .and(body_partial_json(json!({
            "model": "command-test",
            "response_format": { "type": "json_object" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "text": payload.to_string(),
            "generation_id": "gen-1"
        })))
        .expect(1)
        .mount(&server)
        .await;

    // --- Act ---
    let provider = provider_for(&server);
    let raw = provider
        .complete(ContentKind::Flashcards, "Create educational flashcards")
        .await
        .expect("completion call should succeed");

    // --- Assert ---
    let normalized: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(normalized, payload);
}

#[tokio::test]
async fn test_request_carries_the_schema_for_the_requested_kind() {
    // --- Arrange ---
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat"))
        .and(body_partial_json(json!({
            "response_format": { "schema": { "required": ["quiz"] } }
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "text": "{\"quiz\":[]}" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    // --- Act & Assert ---
    let provider = provider_for(&server);
    provider
        .complete(ContentKind::Quiz, "Generate a quiz")
        .await
        .expect("completion call should succeed");
}

#[tokio::test]
async fn test_upstream_error_carries_status_and_body() {
    // --- Arrange ---
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .mount(&server)
        .await;

    // --- Act ---
    let provider = provider_for(&server);
    let err = provider
        .complete(ContentKind::Flashcards, "prompt")
        .await
        .unwrap_err();

    // --- Assert ---
    match err {
        CompletionError::Api { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "upstream exploded");
        }
        other => panic!("Expected an Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_inner_payload_is_a_payload_error() {
    // --- Arrange ---
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "text": "this is not json" })),
        )
        .mount(&server)
        .await;

    // --- Act & Assert ---
    let provider = provider_for(&server);
    let err = provider
        .complete(ContentKind::Flashcards, "prompt")
        .await
        .unwrap_err();
    assert!(matches!(err, CompletionError::Payload(_)));
}

#[tokio::test]
async fn test_malformed_envelope_is_an_envelope_error() {
    // --- Arrange ---
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_string("plain text, no envelope"))
        .mount(&server)
        .await;

    // --- Act & Assert ---
    let provider = provider_for(&server);
    let err = provider
        .complete(ContentKind::Flashcards, "prompt")
        .await
        .unwrap_err();
    assert!(matches!(err, CompletionError::Envelope(_)));
}

#[tokio::test]
async fn test_slow_upstream_maps_to_a_timeout_error() {
    // --- Arrange ---
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_secs(5))
                .set_body_json(json!({ "text": "{}" })),
        )
        .mount(&server)
        .await;

    // --- Act ---
    let provider = CohereProvider::new(
        format!("{}/v1/chat", server.uri()),
        "test-api-key".to_string(),
        "command-test".to_string(),
        Duration::from_millis(250),
    )
    .unwrap();
    let err = provider
        .complete(ContentKind::Flashcards, "prompt")
        .await
        .unwrap_err();

    // --- Assert ---
    assert!(matches!(err, CompletionError::Timeout));
}

#[test]
fn test_blank_api_key_is_rejected_at_construction() {
    let result = CohereProvider::new(
        "http://localhost/v1/chat".to_string(),
        "   ".to_string(),
        "command-test".to_string(),
        Duration::from_secs(1),
    );
    assert!(matches!(result, Err(CompletionError::MissingApiKey)));
}
