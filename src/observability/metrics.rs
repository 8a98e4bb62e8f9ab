//! Metrics collection and exposition.
//!
//! # Metrics
//! - `mesh_probes_total` (counter): probes by peer and outcome
//! - `mesh_probe_duration_seconds` (histogram): probe latency by peer
//! - `mesh_health_requests_total` (counter): `/health` requests served
//!
//! Recording is a no-op until a recorder is installed with `init_metrics`.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

use crate::health::ProbeOutcome;

/// Install the Prometheus recorder and its HTTP listener.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

pub fn record_probe(peer: &str, outcome: ProbeOutcome, start: Instant) {
    ::metrics::counter!(
        "mesh_probes_total",
        "peer" => peer.to_string(),
        "outcome" => outcome.as_str()
    )
    .increment(1);
    ::metrics::histogram!("mesh_probe_duration_seconds", "peer" => peer.to_string())
        .record(start.elapsed().as_secs_f64());
}

pub fn record_health_request() {
    ::metrics::counter!("mesh_health_requests_total").increment(1);
}
