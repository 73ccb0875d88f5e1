use axum::{Router, middleware, routing::get};
use axum_helpers::server::health_router;
use observability::{metrics_handler, metrics_middleware};

use crate::state::AppState;

pub mod health;

/// Creates the API routes without the `/api` prefix.
/// The `/api` prefix will be added by the `create_router` helper.
pub fn routes(state: &AppState) -> Router {
    domain_retrieval::handlers::router(state.retrieval.clone())
        .layer(middleware::from_fn(metrics_middleware))
}

/// Routes served at the root: liveness, readiness, metrics, and the
/// unprefixed `/search` and `/query` used by existing clients.
pub fn root_routes(state: &AppState) -> Router {
    Router::new()
        .merge(routes(state))
        .merge(health_router(state.config.app))
        .merge(ready_router(state.clone()))
        .route("/metrics", get(metrics_handler))
}

/// Creates a router with the /ready endpoint.
pub fn ready_router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}
