//! GeminiSynthesizer against a wiremock backend.

use domain_retrieval::*;
use serde_json::{Value, json};
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GENERATE_PATH: &str = "/models/gemini-2.0-flash:generateContent";

fn synthesizer(server: &MockServer) -> GeminiSynthesizer {
    GeminiSynthesizer::new(GeminiConfig::default().with_base_url(server.uri())).unwrap()
}

fn records(n: usize) -> Vec<SanitizedRecord> {
    (0..n)
        .map(|i| SanitizedRecord {
            title: format!("Article {i}"),
            content: format!("Content {i}"),
        })
        .collect()
}

fn answer(text: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": text}]},
            "finishReason": "STOP"
        }]
    }))
}

async fn sent_prompt(server: &MockServer) -> String {
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    body["contents"][0]["parts"][0]["text"]
        .as_str()
        .unwrap()
        .to_string()
}

#[tokio::test]
async fn test_returns_generated_text_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(header("x-goog-api-key", "gemini-key"))
        .respond_with(answer("You have the right to remain silent."))
        .expect(1)
        .mount(&server)
        .await;

    let text = synthesizer(&server)
        .synthesize("What are my rights?", &records(2), "gemini-key")
        .await
        .unwrap();

    assert_eq!(text, "You have the right to remain silent.");
}

#[tokio::test]
async fn test_prompt_never_contains_more_than_five_records() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(answer("ok"))
        .mount(&server)
        .await;

    synthesizer(&server)
        .synthesize("bail", &records(20), "gemini-key")
        .await
        .unwrap();

    let prompt = sent_prompt(&server).await;
    assert_eq!(prompt.matches("Title: ").count(), MAX_CONTEXT_RECORDS);
    assert!(prompt.contains("Article 4"));
    assert!(!prompt.contains("Article 5"));
    assert!(prompt.contains("User Query: bail"));
}

#[tokio::test]
async fn test_request_carries_safety_settings() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(answer("ok"))
        .mount(&server)
        .await;

    synthesizer(&server)
        .synthesize("q", &records(1), "gemini-key")
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    let settings = body["safetySettings"].as_array().unwrap();
    assert_eq!(settings.len(), 4);
    assert!(
        settings
            .iter()
            .all(|s| s["threshold"] == "BLOCK_MEDIUM_AND_ABOVE")
    );
}

#[tokio::test]
async fn test_credential_is_not_sent_in_url() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(answer("ok"))
        .mount(&server)
        .await;

    synthesizer(&server)
        .synthesize("q", &records(1), "gemini-key")
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert!(!requests[0].url.as_str().contains("gemini-key"));
}

#[tokio::test]
async fn test_empty_records_do_not_call_the_model() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(answer("should not be used"))
        .expect(0)
        .mount(&server)
        .await;

    let text = synthesizer(&server)
        .synthesize("q", &[], "gemini-key")
        .await
        .unwrap();

    assert_eq!(text, NO_RESULTS_SENTINEL);
}

#[tokio::test]
async fn test_api_error_is_synthesis_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": {"code": 400, "message": "API key not valid.", "status": "INVALID_ARGUMENT"}
        })))
        .mount(&server)
        .await;

    let err = synthesizer(&server)
        .synthesize("q", &records(1), "wrong")
        .await
        .unwrap_err();

    assert!(matches!(err, RetrievalError::SynthesisUnavailable(_)));
    assert!(err.to_string().contains("API key not valid."));
}

#[tokio::test]
async fn test_blocked_prompt_is_synthesis_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "promptFeedback": {"blockReason": "SAFETY"}
        })))
        .mount(&server)
        .await;

    let err = synthesizer(&server)
        .synthesize("q", &records(1), "gemini-key")
        .await
        .unwrap_err();

    assert!(matches!(err, RetrievalError::SynthesisUnavailable(_)));
    assert!(err.to_string().contains("SAFETY"));
}

#[tokio::test]
async fn test_slow_model_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(answer("late").set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;

    let config = GeminiConfig::default()
        .with_base_url(server.uri())
        .with_timeout(Duration::from_millis(200));
    let err = GeminiSynthesizer::new(config)
        .unwrap()
        .synthesize("q", &records(1), "gemini-key")
        .await
        .unwrap_err();

    assert!(matches!(err, RetrievalError::SynthesisUnavailable(_)));
    assert!(err.to_string().contains("timed out"));
}

#[tokio::test]
async fn test_credential_with_line_break_is_rejected_before_sending() {
    let server = MockServer::start().await;

    let err = synthesizer(&server)
        .synthesize("q", &records(1), "gemini\nkey")
        .await
        .unwrap_err();

    assert!(matches!(err, RetrievalError::InvalidCredential(_)));
    assert!(server.received_requests().await.unwrap().is_empty());
}
