//! Observability utilities for the retrieval service.
//!
//! This crate provides:
//! - Prometheus metrics recording and export
//! - Pipeline-stage metrics for the embed → search → synthesize flow
//! - Axum middleware for automatic request metrics
//!
//! # Example
//!
//! ```rust,ignore
//! use observability::{init_metrics, metrics_handler, RetrievalMetrics, Stage};
//!
//! init_metrics()?;
//! RetrievalMetrics::record_stage(Stage::Search, true, 0.120);
//!
//! let app = Router::new()
//!     .route("/metrics", get(metrics_handler));
//! ```

pub mod middleware;
pub mod retrieval;

pub use middleware::metrics_middleware;
pub use retrieval::{RetrievalMetrics, Stage, StageTimer};

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;
use tracing::info;

static METRICS_HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

/// Initialize the Prometheus metrics recorder.
///
/// Call once at application startup; repeated calls return the same handle.
pub fn init_metrics() -> Result<&'static PrometheusHandle, BuildError> {
    METRICS_HANDLE.get_or_try_init(|| {
        let handle = PrometheusBuilder::new().install_recorder()?;
        info!("Prometheus metrics recorder initialized");
        register_metric_descriptions();
        Ok(handle)
    })
}

/// Get the metrics handle (must call init_metrics first)
pub fn get_metrics_handle() -> Option<&'static PrometheusHandle> {
    METRICS_HANDLE.get()
}

/// Axum handler for /metrics endpoint
pub async fn metrics_handler() -> String {
    match get_metrics_handle() {
        Some(handle) => handle.render(),
        None => "# Metrics not initialized\n".to_string(),
    }
}

fn register_metric_descriptions() {
    use metrics::{describe_counter, describe_histogram};

    describe_counter!("http_requests_total", "Total number of HTTP requests");
    describe_histogram!(
        "http_request_duration_seconds",
        "HTTP request duration in seconds"
    );
    describe_counter!(
        "http_requests_errors_total",
        "Total number of HTTP request errors"
    );

    describe_counter!(
        "retrieval_requests_total",
        "Retrieval pipeline runs by outcome"
    );
    describe_histogram!(
        "retrieval_stage_duration_seconds",
        "Duration of each retrieval pipeline stage"
    );
    describe_counter!(
        "retrieval_stage_total",
        "Retrieval pipeline stage executions by stage and status"
    );
    describe_histogram!(
        "retrieval_records_returned",
        "Number of records returned by the vector search backend"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_metrics_handler_before_and_after_init() {
        if get_metrics_handle().is_none() {
            assert!(metrics_handler().await.starts_with("# Metrics not initialized"));
        }

        let first = init_metrics().unwrap() as *const PrometheusHandle;
        let second = init_metrics().unwrap() as *const PrometheusHandle;
        assert_eq!(first, second);

        RetrievalMetrics::record_outcome("ok");
        assert!(metrics_handler().await.contains("retrieval_requests_total"));
    }
}
