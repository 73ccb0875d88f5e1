//! Server infrastructure module.
//!
//! This module provides:
//! - Router assembly with OpenAPI documentation and the common layer stack
//! - Health and readiness endpoints
//! - Graceful shutdown coordination
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::server::{create_router, health_router, serve_with_shutdown};
//!
//! let root = health_router(core_config::app_info!());
//! let router = create_router::<ApiDoc>(api_routes, root, cors);
//!
//! serve_with_shutdown(router, &server_config, Duration::from_secs(10), async {}).await?;
//! ```

pub mod app;
pub mod health;
pub mod shutdown;

pub use app::{create_router, serve_with_shutdown};
pub use health::{
    HealthCheckFuture, HealthResponse, ReadyResponse, health_handler, health_router,
    run_health_checks,
};
pub use shutdown::{ShutdownCoordinator, shutdown_signal};
