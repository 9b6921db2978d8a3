//! Metrics collection and exposition.
//!
//! # Metrics
//! - `pubsub_push_requests_total` (counter): push requests by outcome
//! - `pubsub_push_duration_seconds` (histogram): handler latency by outcome
//!
//! Outcomes: `ok`, `bad_http_request`, `bad_envelope`, `bad_message`.
//! Without an installed recorder every call here is a no-op.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its scrape endpoint.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one handled push request.
pub fn record_push(outcome: &'static str, start_time: Instant) {
    ::metrics::counter!("pubsub_push_requests_total", "outcome" => outcome).increment(1);
    ::metrics::histogram!("pubsub_push_duration_seconds", "outcome" => outcome)
        .record(start_time.elapsed().as_secs_f64());
}
