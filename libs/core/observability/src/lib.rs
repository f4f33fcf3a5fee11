//! Observability utilities for the HTTP services.
//!
//! This crate provides:
//! - `X-Request-Id` assignment and propagation
//! - One structured log line per request
//! - Prometheus metrics recording and export
//!
//! # Example
//!
//! ```rust,ignore
//! use observability::{init_metrics, metrics_handler, with_request_tracking};
//!
//! init_metrics()?;
//!
//! let app = Router::new()
//!     .merge(api_routes.route_layer(middleware::from_fn(metrics_middleware)))
//!     .route("/metrics", get(metrics_handler));
//! let app = with_request_tracking(app);
//! ```

pub mod http_metrics;
pub mod request_id;
pub mod request_logging;

pub use http_metrics::metrics_middleware;
pub use request_id::{REQUEST_ID_HEADER, with_request_tracking};
pub use request_logging::request_logging_middleware;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;
use tracing::info;

static METRICS_HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

/// Initialize the Prometheus metrics recorder.
///
/// Safe to call more than once; the recorder is installed on the first call
/// and the same handle is returned afterwards.
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

    describe_counter!(
        http_metrics::REQUESTS_TOTAL,
        "Requests served, by method, route and status"
    );
    describe_histogram!(
        http_metrics::REQUEST_DURATION_SECONDS,
        "Request latency in seconds, by method and route"
    );
    describe_counter!(
        http_metrics::REQUEST_ERRORS_TOTAL,
        "4xx and 5xx responses, by method, route and class"
    );
}
