//! ZillizSearchClient against a wiremock backend, plus end-to-end handler
//! runs through the real HTTP client.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use test_utils::{RecordingSynthesizer, StaticEmbedder};
use domain_retrieval::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SEARCH_PATH: &str = "/v2/vectordb/entities/search";

fn client(server: &MockServer) -> ZillizSearchClient {
    let config = ZillizConfig::default().with_search_url(format!("{}{}", server.uri(), SEARCH_PATH));
    ZillizSearchClient::new(config).unwrap()
}

#[tokio::test]
async fn test_search_sends_expected_request_and_parses_records() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(SEARCH_PATH))
        .and(header("authorization", "Bearer zilliz-key"))
        .and(body_partial_json(json!({
            "collectionName": "my_articles",
            "limit": 3,
            "outputFields": ["title", "content"],
            "data": [[0.25, 0.5]]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 0,
            "data": [
                {"id": 1, "distance": 0.91, "title": "Arrest", "content": "Grounds must be given."},
                {"id": 2, "distance": 0.87, "title": "Bail"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let records = client(&server)
        .search(&[0.25, 0.5], "zilliz-key", 3)
        .await
        .unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].title.as_deref(), Some("Arrest"));
    assert_eq!(records[0].extra["id"], 1);
    assert!(records[1].content.is_none());
}

#[tokio::test]
async fn test_empty_data_is_not_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"code": 0, "data": []})))
        .mount(&server)
        .await;

    let records = client(&server).search(&[0.1], "k", 10).await.unwrap();
    assert!(records.is_empty());
}

#[tokio::test]
async fn test_missing_data_is_empty() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let records = client(&server).search(&[0.1], "k", 10).await.unwrap();
    assert!(records.is_empty());
}

#[tokio::test]
async fn test_non_string_fields_do_not_drop_the_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 0,
            "data": [
                {"title": 1950, "content": "Constitution adopted."},
                {"title": "Bail", "content": "ok"},
                {"title": null, "content": {"text": "nested"}}
            ]
        })))
        .mount(&server)
        .await;

    let records = client(&server).search(&[0.1], "k", 10).await.unwrap();
    assert_eq!(records.len(), 3);

    let clean = sanitize(records);
    assert_eq!(clean[0].title, "1950");
    assert_eq!(clean[0].content, "Constitution adopted.");
    assert_eq!(clean[1].title, "Bail");
    assert_eq!(clean[1].content, "ok");
    assert_eq!(clean[2].title, "");
    assert_eq!(clean[2].content, r#"{"text":"nested"}"#);
}

#[tokio::test]
async fn test_credential_that_is_not_a_header_value_is_rejected() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .expect(0)
        .mount(&server)
        .await;

    let err = client(&server)
        .search(&[0.1], "bad\nkey", 5)
        .await
        .unwrap_err();

    assert!(matches!(err, RetrievalError::InvalidCredential(_)));
    let app: axum_helpers::AppError = err.into();
    assert_eq!(app.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_non_2xx_is_search_unavailable() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream overloaded"))
        .mount(&server)
        .await;

    let err = client(&server).search(&[0.1], "k", 10).await.unwrap_err();
    assert!(matches!(err, RetrievalError::SearchUnavailable(_)));
    assert!(err.to_string().contains("503"));
}

#[tokio::test]
async fn test_application_error_code_is_search_unavailable() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 1800,
            "message": "user hasn't authenticated"
        })))
        .mount(&server)
        .await;

    let err = client(&server).search(&[0.1], "bad", 10).await.unwrap_err();
    assert!(matches!(err, RetrievalError::SearchUnavailable(_)));
    assert!(err.to_string().contains("1800"));
}

#[tokio::test]
async fn test_slow_backend_times_out() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(SEARCH_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"data": []}))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let config = ZillizConfig::default()
        .with_search_url(format!("{}{}", server.uri(), SEARCH_PATH))
        .with_timeout(Duration::from_millis(200));
    let err = ZillizSearchClient::new(config)
        .unwrap()
        .search(&[0.1], "k", 10)
        .await
        .unwrap_err();

    assert!(matches!(err, RetrievalError::SearchUnavailable(_)));
    assert!(err.to_string().contains("timed out"));
}

async fn run_pipeline(server: &MockServer) -> (StatusCode, Value, Arc<RecordingSynthesizer>) {
    let synthesizer = Arc::new(RecordingSynthesizer::new("answer"));
    let service = RetrievalService::new(
        Arc::new(StaticEmbedder::new(384)),
        Arc::new(client(server)),
        synthesizer.clone(),
        RetrievalConfig::default(),
    );

    let request = Request::builder()
        .method("POST")
        .uri("/search")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({"query": "q", "zilliz_api_key": "k", "gemini_api_key": "g"}).to_string(),
        ))
        .unwrap();

    let response = handlers::router(service).oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap(), synthesizer)
}

#[tokio::test]
async fn test_backend_503_surfaces_as_500_with_search_detail() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let (status, body, synthesizer) = run_pipeline(&server).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["detail"].as_str().unwrap().contains("Vector search failed"));
    assert!(body.get("zilliz_results").is_none());
    assert_eq!(synthesizer.calls(), 0);
}

#[tokio::test]
async fn test_backend_empty_data_surfaces_as_404() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .mount(&server)
        .await;

    let (status, body, synthesizer) = run_pipeline(&server).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["detail"].as_str().unwrap().contains("No relevant results"));
    assert_eq!(synthesizer.calls(), 0);
}
