//! Metrics collection and exposition.
//!
//! # Responsibilities
//! - Define frontend metrics (backend calls, latency, rendered pages)
//! - Expose Prometheus-compatible metrics endpoint
//!
//! # Metrics
//! - `frontend_backend_requests_total` (counter): outbound calls by method, status
//! - `frontend_backend_request_duration_seconds` (histogram): outbound latency
//! - `frontend_pages_total` (counter): handled pages by page, status
//!
//! # Design Decisions
//! - Recording is a no-op until an exporter is installed, so tests need no setup
//! - Unreachable backends are labelled `status="unreachable"`

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus exporter with its own HTTP listener.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record one outbound call to the backend API.
pub fn record_backend_call(method: &'static str, status: Option<u16>, start: Instant) {
    let status = status.map_or_else(|| "unreachable".to_string(), |s| s.to_string());
    let elapsed = start.elapsed().as_secs_f64();

    metrics::counter!("frontend_backend_requests_total", "method" => method, "status" => status)
        .increment(1);
    metrics::histogram!("frontend_backend_request_duration_seconds", "method" => method)
        .record(elapsed);
}

/// Record one handled page.
pub fn record_page(page: &'static str, status: u16) {
    metrics::counter!("frontend_pages_total", "page" => page, "status" => status.to_string())
        .increment(1);
}
