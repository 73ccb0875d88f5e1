use axum::http::{HeaderValue, Method, header};
use core_config::{ConfigError, Environment, server::ServerConfig};
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::{info, warn};

/// Builds the CORS layer from `CORS_ALLOWED_ORIGIN`.
///
/// - Origins configured: only those origins, `GET`/`POST`/`OPTIONS`,
///   `Content-Type`/`Accept` headers, 1 hour max age.
/// - Unset in development: permissive, so a local frontend on any port works.
/// - Unset in production: configuration error.
pub fn cors_layer(
    server: &ServerConfig,
    environment: &Environment,
) -> Result<CorsLayer, ConfigError> {
    let Some(origins) = server.cors_allowed_origins.as_ref() else {
        if environment.is_production() {
            return Err(ConfigError::MissingEnvVar("CORS_ALLOWED_ORIGIN".to_string()));
        }
        warn!("CORS_ALLOWED_ORIGIN not set, allowing any origin (development only)");
        return Ok(CorsLayer::permissive());
    };

    let allowed_origins = origins
        .iter()
        .map(|origin| origin.parse::<HeaderValue>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| ConfigError::InvalidValue {
            key: "CORS_ALLOWED_ORIGIN".to_string(),
            details: e.to_string(),
        })?;

    if allowed_origins.is_empty() {
        return Err(ConfigError::InvalidValue {
            key: "CORS_ALLOWED_ORIGIN".to_string(),
            details: "no origins listed".to_string(),
        });
    }

    info!("CORS configured with allowed origins: {}", origins.join(","));

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed_origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(Duration::from_secs(3600)))
}
