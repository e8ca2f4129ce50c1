//! Metrics collection and exposition.
//!
//! # Metrics
//! - `relay_requests_total` (counter): relays by outcome (`success` or error kind)
//! - `relay_pipeline_duration_seconds` (histogram): end-to-end pipeline latency
//! - `relay_gateway_errors_total` (counter): failed gateway reads by operation
//!
//! Without an installed recorder the macros are no-ops, so the pipeline can
//! record unconditionally.

use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::Instant;

/// Start the Prometheus exporter on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one pipeline run.
pub fn record_relay(outcome: &'static str, start: Instant) {
    metrics::counter!("relay_requests_total", "outcome" => outcome).increment(1);
    metrics::histogram!("relay_pipeline_duration_seconds").record(start.elapsed().as_secs_f64());
}

/// Record a failed gateway read.
pub fn record_gateway_error(op: &'static str) {
    metrics::counter!("relay_gateway_errors_total", "op" => op).increment(1);
}
