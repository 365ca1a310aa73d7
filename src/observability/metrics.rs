//! Metrics collection and exposition.
//!
//! # Metrics
//! - `alb_bridge_invocations_total` (counter): invocations by mode, status
//! - `alb_bridge_decode_errors_total` (counter): undecodable events by kind
//! - `alb_bridge_invocation_duration_seconds` (histogram): decode → encode latency
//!
//! Recording is a no-op until a recorder is installed with [`init_metrics`].

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

use crate::http::headers::HeaderMode;

/// Install the Prometheus exporter on `addr`. Must run inside a tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

pub fn record_invocation(mode: HeaderMode, status: u16, start: Instant) {
    metrics::counter!(
        "alb_bridge_invocations_total",
        "mode" => mode.as_str(),
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!("alb_bridge_invocation_duration_seconds", "mode" => mode.as_str())
        .record(start.elapsed().as_secs_f64());
}

pub fn record_decode_error(kind: &'static str) {
    metrics::counter!("alb_bridge_decode_errors_total", "kind" => kind).increment(1);
}
