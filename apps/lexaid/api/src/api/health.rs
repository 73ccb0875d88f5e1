//! Readiness handler backed by the embedding model's own probe.

use crate::state::AppState;
use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use axum_helpers::server::{HealthCheckFuture, run_health_checks};

/// Readiness check: 200 once the embedder can encode, 503 otherwise.
///
/// The vector search and synthesis backends are authenticated per request
/// with caller credentials, so they cannot be probed here.
pub async fn ready_handler(State(state): State<AppState>) -> Response {
    let embedder = state.retrieval.embedder().clone();
    let embedder_check: HealthCheckFuture<'_> = Box::pin(async move {
        embedder
            .ready()
            .await
            .map_err(|e| format!("Embedder not ready: {}", e))
    });

    run_health_checks(vec![("embedder", embedder_check)])
        .await
        .into_response()
}
