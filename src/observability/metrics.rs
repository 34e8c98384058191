//! Metrics collection and exposition.
//!
//! # Metrics
//! - `hub_cache_lookups_total` (counter): cache lookups by cache, result (hit/miss)
//! - `hub_upstream_requests_total` (counter): upstream calls by route, outcome
//! - `hub_upstream_retries_total` (counter): backoff retries by route
//! - `hub_http_requests_total` (counter): responses by status code
//!
//! Counters are recorded where the events happen; this module only installs
//! the Prometheus exporter.

use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;

/// Install the Prometheus recorder and serve it on `addr`.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}
