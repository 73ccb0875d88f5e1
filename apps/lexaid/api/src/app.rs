use axum::Router;
use axum_helpers::{cors_layer, create_router};

use crate::{api, openapi::ApiDoc, state::AppState};

/// Assembles the full HTTP surface: `/api/*`, root aliases, health, metrics, docs.
pub fn build_router(state: &AppState) -> eyre::Result<Router> {
    let cors = cors_layer(&state.config.server, &state.config.environment)?;
    Ok(create_router::<ApiDoc>(
        api::routes(state),
        api::root_routes(state),
        cors,
    ))
}
