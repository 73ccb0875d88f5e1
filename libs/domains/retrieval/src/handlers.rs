//! HTTP handlers for the retrieval pipeline

use axum::{Json, Router, extract::State, routing::post};
use axum_helpers::{
    ErrorResponse, JsonBody,
    errors::responses::{BadRequestResponse, InternalServerErrorResponse, NotFoundResponse},
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::RetrievalResult;
use crate::models::{ResponsePayload, SanitizedRecord, SearchRequest, SearchResults};
use crate::service::RetrievalService;

pub const TAG: &str = "retrieval";

/// OpenAPI documentation for the retrieval API
#[derive(OpenApi)]
#[openapi(
    paths(search, query),
    components(
        schemas(SearchRequest, ResponsePayload, SearchResults, SanitizedRecord, ErrorResponse),
        responses(BadRequestResponse, NotFoundResponse, InternalServerErrorResponse)
    ),
    tags(
        (name = TAG, description = "Legal-aid question answering over the article index")
    )
)]
pub struct RetrievalApiDoc;

/// Create the retrieval router (`POST /search`, `POST /query`)
pub fn router(service: RetrievalService) -> Router {
    Router::new()
        .route("/search", post(search))
        .route("/query", post(query))
        .with_state(Arc::new(service))
}

/// Search the article index and optionally synthesize an answer
#[utoipa::path(
    post,
    path = "/search",
    tag = TAG,
    request_body = SearchRequest,
    responses(
        (status = 200, description = "Matching articles and optional answer", body = ResponsePayload),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn search(
    State(service): State<Arc<RetrievalService>>,
    JsonBody(request): JsonBody<SearchRequest>,
) -> RetrievalResult<Json<ResponsePayload>> {
    let payload = service.search(request).await?;
    Ok(Json(payload))
}

/// Alias of `/search` kept for older clients
#[utoipa::path(
    post,
    path = "/query",
    tag = TAG,
    request_body = SearchRequest,
    responses(
        (status = 200, description = "Matching articles and optional answer", body = ResponsePayload),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn query(
    state: State<Arc<RetrievalService>>,
    body: JsonBody<SearchRequest>,
) -> RetrievalResult<Json<ResponsePayload>> {
    search(state, body).await
}
