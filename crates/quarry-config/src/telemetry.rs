use std::collections::HashMap;

use serde::Deserialize;
use url::Url;

/// `[telemetry]`: resource metadata and the optional OTLP exporter
///
/// Without an `[telemetry.exporter]` table only local logging is active.
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TelemetryConfig {
    /// `service.name` resource attribute
    pub service_name: String,
    /// Extra resource attributes attached to every span and metric
    pub resource_attributes: HashMap<String, String>,
    /// Collector receiving both traces and metrics
    pub exporter: Option<ExporterConfig>,
    /// Trace sampling
    pub tracing: TracingConfig,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "quarry".to_owned(),
            resource_attributes: HashMap::new(),
            exporter: None,
            tracing: TracingConfig::default(),
        }
    }
}

/// OTLP collector endpoint
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExporterConfig {
    pub endpoint: Url,
    #[serde(default)]
    pub protocol: ExportProtocol,
    /// Seconds between metric pushes
    #[serde(default = "default_export_interval")]
    pub export_interval: u64,
}

/// Wire protocol spoken to the collector
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportProtocol {
    #[default]
    Grpc,
    HttpProto,
}

/// Trace sampling settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TracingConfig {
    /// Fraction of root traces kept, within `0.0..=1.0`
    pub sampling_rate: f64,
    /// Follow the caller's sampling decision when a parent span exists
    pub parent_based: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            sampling_rate: 1.0,
            parent_based: true,
        }
    }
}

const fn default_export_interval() -> u64 {
    30
}
