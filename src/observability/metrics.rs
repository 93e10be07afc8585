//! Metrics collection and exposition.
//!
//! # Metrics
//! - `portal_upstream_requests_total` (counter): upstream calls by method, outcome
//! - `portal_upstream_duration_seconds` (histogram): upstream latency
//! - `portal_forward_requests_total` (counter): page forwards by status
//! - `portal_forward_duration_seconds` (histogram): page forward latency
//! - `portal_activity_events_total` (counter): activity events by event, sink
//!
//! # Design Decisions
//! - Calls are no-ops until a recorder is installed
//! - Labels stay low-cardinality (no paths, no user data)

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its scrape listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_upstream(method: &str, outcome: &'static str, start: Instant) {
    counter!(
        "portal_upstream_requests_total",
        "method" => method.to_string(),
        "outcome" => outcome
    )
    .increment(1);
    histogram!("portal_upstream_duration_seconds", "outcome" => outcome)
        .record(start.elapsed().as_secs_f64());
}

pub fn record_forward(status: u16, start: Instant) {
    counter!("portal_forward_requests_total", "status" => status.to_string()).increment(1);
    histogram!("portal_forward_duration_seconds").record(start.elapsed().as_secs_f64());
}

pub fn record_activity(event: &str, sink: &'static str) {
    counter!(
        "portal_activity_events_total",
        "event" => event.to_string(),
        "sink" => sink
    )
    .increment(1);
}
