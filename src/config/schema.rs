//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from TOML files, and
//! every field has a default so an empty file is a valid configuration.

use serde::{Deserialize, Serialize};

use crate::http::headers::HeaderMode;

/// Root configuration for the bridge.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct BridgeConfig {
    /// Event translation settings.
    pub adapter: AdapterConfig,

    /// Local invocation runtime settings.
    pub runtime: RuntimeConfig,

    /// Logging and metrics settings.
    pub observability: ObservabilityConfig,
}

/// Event translation settings.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct AdapterConfig {
    /// Mirrors the target group's "multi value headers" attribute.
    pub multi_value_headers: bool,
}

impl AdapterConfig {
    pub fn header_mode(&self) -> HeaderMode {
        HeaderMode::from_multi_value(self.multi_value_headers)
    }
}

/// Local invocation runtime settings.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Bind address (e.g., "127.0.0.1:9000").
    pub bind_address: String,

    /// Largest accepted request body, event JSON or emulated HTTP body.
    pub max_event_bytes: usize,

    /// Per-request timeout enforced by the runtime, not the adapter.
    pub request_timeout_secs: u64,

    /// `x-forwarded-proto` value the load balancer emulation reports.
    pub forwarded_proto: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:9000".to_string(),
            max_event_bytes: 1024 * 1024,
            request_timeout_secs: 30,
            forwarded_proto: "http".to_string(),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability settings.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// `EnvFilter` directives, overridden by `RUST_LOG`.
    pub log_filter: String,

    pub log_format: LogFormat,

    /// Install the Prometheus exporter.
    pub metrics_enabled: bool,

    /// Prometheus scrape address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_filter: "alb_bridge=info,tower_http=info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}
