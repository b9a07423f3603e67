//! Metrics collection and exposition.
//!
//! # Metrics
//! - `rpc_requests_total` (counter): requests by method, status, binding
//! - `rpc_request_duration_seconds` (histogram): latency by method, binding
//!
//! # Design Decisions
//! - Recording is a no-op until a recorder is installed
//! - Unmatched requests are labelled with binding `none`

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Start the Prometheus scrape endpoint on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint started"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to start metrics endpoint"),
    }
}

/// Record one finished request.
pub fn record_request(method: &str, status: u16, binding: &str, start: Instant) {
    metrics::counter!(
        "rpc_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string(),
        "binding" => binding.to_string()
    )
    .increment(1);

    metrics::histogram!(
        "rpc_request_duration_seconds",
        "method" => method.to_string(),
        "binding" => binding.to_string()
    )
    .record(start.elapsed().as_secs_f64());
}
