#![allow(clippy::must_use_candidate)]

pub mod admin;
pub mod cors;
mod env;
pub mod health;
mod loader;
pub mod providers;
pub mod server;
pub mod store;
pub mod telemetry;

use indexmap::IndexMap;
use serde::Deserialize;

pub use admin::*;
pub use cors::*;
pub use health::*;
pub use providers::*;
pub use server::*;
pub use store::*;
pub use telemetry::{ExportProtocol, ExporterConfig, TelemetryConfig, TracingConfig};

/// Top-level Quarry configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Admin credentials guarding selection changes
    #[serde(default)]
    pub admin: AdminConfig,
    /// Selection store backend
    #[serde(default)]
    pub store: StoreConfig,
    /// Per-provider overrides keyed by provider id
    #[serde(default)]
    pub providers: IndexMap<String, ProviderConfig>,
    /// Telemetry configuration
    #[serde(default)]
    pub telemetry: Option<TelemetryConfig>,
}
