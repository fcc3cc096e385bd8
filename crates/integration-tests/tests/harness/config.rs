//! Programmatic configuration builder for integration tests

use std::net::SocketAddr;

use quarry_config::{AdminConfig, Config, CorsConfig, HealthConfig, ProviderConfig, ServerConfig};
use secrecy::SecretString;

use super::mock_vendor::MockVendor;

/// Admin password used by [`ConfigBuilder::with_admin_password`] callers
pub const ADMIN_PASSWORD: &str = "correct-horse";

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder with minimal defaults
    pub fn new() -> Self {
        Self {
            config: Config {
                server: ServerConfig {
                    listen_address: Some(SocketAddr::from(([127, 0, 0, 1], 0))),
                    health: HealthConfig {
                        enabled: true,
                        ..HealthConfig::default()
                    },
                    ..ServerConfig::default()
                },
                ..Config::default()
            },
        }
    }

    /// Point every provider at the mock vendor
    pub fn with_vendor(mut self, vendor: &MockVendor) -> Self {
        for (id, base_url) in [
            ("anthropic", vendor.anthropic_base_url()),
            ("google", vendor.google_base_url()),
            ("openai", vendor.openai_base_url()),
        ] {
            self.config.providers.insert(
                id.to_owned(),
                ProviderConfig {
                    base_url: Some(base_url.parse().expect("valid URL")),
                },
            );
        }
        self
    }

    /// Point every provider at an address nothing listens on
    pub fn with_unreachable_vendor(mut self) -> Self {
        for id in ["anthropic", "google", "openai"] {
            self.config.providers.insert(
                id.to_owned(),
                ProviderConfig {
                    base_url: Some("http://127.0.0.1:1/v1".parse().expect("valid URL")),
                },
            );
        }
        self
    }

    /// Require [`ADMIN_PASSWORD`] for selection changes
    pub fn with_admin_password(mut self) -> Self {
        self.config.admin = AdminConfig {
            password: Some(SecretString::from(ADMIN_PASSWORD)),
        };
        self
    }

    /// Set CORS configuration
    pub fn with_cors(mut self, config: CorsConfig) -> Self {
        self.config.server.cors = config;
        self
    }

    /// Disable health endpoint
    pub fn without_health(mut self) -> Self {
        self.config.server.health.enabled = false;
        self
    }

    /// Build the final config
    pub fn build(self) -> Config {
        self.config
    }
}
