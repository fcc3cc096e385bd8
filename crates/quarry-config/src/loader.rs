use std::path::Path;

use crate::{AnyOrArray, Config};

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, environment variable
    /// expansion fails, TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        Self::parse(&raw)
    }

    /// Parse and validate configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns an error if expansion, parsing or validation fails
    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        let expanded =
            crate::env::expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// Provider override keys are checked against the provider registry when
    /// the dispatcher is built, since this crate does not know the registry.
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid setting
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_store()?;
        self.validate_cors()?;
        self.validate_telemetry()?;
        Ok(())
    }

    fn validate_store(&self) -> anyhow::Result<()> {
        if let Some(url) = self.store.url() {
            url::Url::parse(url).map_err(|e| anyhow::anyhow!("invalid store.url '{url}': {e}"))?;
        }

        if self.store.key_prefix.is_empty() {
            anyhow::bail!("store.key_prefix must not be empty");
        }

        Ok(())
    }

    /// Credentialed CORS cannot be combined with wildcards
    fn validate_cors(&self) -> anyhow::Result<()> {
        let cors = &self.server.cors;
        if !cors.enabled || !cors.credentials {
            return Ok(());
        }

        let wildcard = [
            ("origins", &cors.origins),
            ("methods", &cors.methods),
            ("headers", &cors.headers),
        ]
        .into_iter()
        .find(|(_, value)| matches!(value, AnyOrArray::Any));

        if let Some((field, _)) = wildcard {
            anyhow::bail!("server.cors.{field} must be an explicit list when credentials are allowed");
        }

        if let AnyOrArray::List(methods) = &cors.methods {
            for method in methods {
                http::Method::from_bytes(method.as_bytes())
                    .map_err(|e| anyhow::anyhow!("invalid CORS method '{method}': {e}"))?;
            }
        }

        Ok(())
    }

    fn validate_telemetry(&self) -> anyhow::Result<()> {
        let Some(ref telemetry) = self.telemetry else {
            return Ok(());
        };

        let rate = telemetry.tracing.sampling_rate;
        if !(0.0..=1.0).contains(&rate) {
            anyhow::bail!("telemetry.tracing.sampling_rate must be between 0.0 and 1.0, got {rate}");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use secrecy::ExposeSecret;

    use crate::{Config, ExportProtocol};

    #[test]
    fn empty_file_yields_defaults() {
        let config = Config::parse("").unwrap();

        assert!(config.server.listen_address.is_none());
        assert!(config.server.health.enabled);
        assert_eq!(config.server.health.path, "/health");
        assert!(config.server.cors.enabled);
        assert!(config.admin.password().is_none());
        assert!(config.store.url().is_none());
        assert_eq!(config.store.key_prefix, "quarry");
        assert!(config.providers.is_empty());
        assert!(config.telemetry.is_none());
    }

    #[test]
    fn full_config_round_trips_through_env() {
        let vars = [
            ("QUARRY_TEST_ADMIN", Some("s3cret")),
            ("QUARRY_TEST_KV", Some("redis://127.0.0.1:6379")),
        ];

        temp_env::with_vars(vars, || {
            let config = Config::parse(
                r#"
                [server]
                listen_address = "127.0.0.1:8080"

                [server.health]
                path = "/healthz"

                [server.cors]
                origins = ["https://app.example"]
                methods = ["GET", "POST"]
                headers = ["content-type"]
                credentials = true
                max_age = 600

                [admin]
                password = "{{ env.QUARRY_TEST_ADMIN }}"

                [store]
                url = "{{ env.QUARRY_TEST_KV }}"
                key_prefix = "estimates"

                [providers.openai]
                base_url = "http://localhost:9999/v1"

                [telemetry]
                service_name = "quarry-test"

                [telemetry.exporter]
                endpoint = "http://localhost:4318"
                protocol = "http_proto"

                [telemetry.tracing]
                sampling_rate = 0.25
                "#,
            )
            .unwrap();

            assert_eq!(config.server.listen_address, Some("127.0.0.1:8080".parse().unwrap()));
            assert_eq!(config.server.health.path, "/healthz");
            assert_eq!(config.server.cors.max_age_duration(), Some(std::time::Duration::from_secs(600)));
            assert_eq!(config.admin.password().unwrap().expose_secret(), "s3cret");
            assert_eq!(config.store.url(), Some("redis://127.0.0.1:6379"));
            assert_eq!(config.store.key_prefix, "estimates");
            assert_eq!(
                config.providers["openai"].base_url.as_ref().unwrap().as_str(),
                "http://localhost:9999/v1"
            );

            let telemetry = config.telemetry.unwrap();
            assert_eq!(telemetry.service_name, "quarry-test");
            assert_eq!(telemetry.exporter.unwrap().protocol, ExportProtocol::HttpProto);
            assert!((telemetry.tracing.sampling_rate - 0.25).abs() < f64::EPSILON);
        });
    }

    #[test]
    fn empty_env_defaults_disable_optional_settings() {
        temp_env::with_vars_unset(["QUARRY_UNSET_ADMIN", "QUARRY_UNSET_KV"], || {
            let config = Config::parse(
                r#"
                [admin]
                password = "{{ env.QUARRY_UNSET_ADMIN | default("") }}"

                [store]
                url = "{{ env.QUARRY_UNSET_KV | default("") }}"
                "#,
            )
            .unwrap();

            assert!(config.admin.password().is_none());
            assert!(config.store.url().is_none());
        });
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = Config::parse("[server]\nport = 3000").unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("failed to parse config"));
        assert!(message.contains("unknown field `port`"));
    }

    #[test]
    fn invalid_store_url_is_rejected() {
        let err = Config::parse("[store]\nurl = \"not a url\"").unwrap_err();
        assert!(err.to_string().contains("invalid store.url"));
    }

    #[test]
    fn credentials_with_wildcard_origin_is_rejected() {
        let err = Config::parse("[server.cors]\ncredentials = true").unwrap_err();
        assert_eq!(
            err.to_string(),
            "server.cors.origins must be an explicit list when credentials are allowed"
        );
    }

    #[test]
    fn sampling_rate_out_of_range_is_rejected() {
        let err = Config::parse("[telemetry.tracing]\nsampling_rate = 1.5").unwrap_err();
        assert!(err.to_string().contains("sampling_rate"));
    }

    #[test]
    fn load_reads_file_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[providers.google]\nbase_url = \"http://127.0.0.1:1/v1beta\"").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert!(config.providers.contains_key("google"));
    }

    #[test]
    fn load_reports_missing_file() {
        let err = Config::load(std::path::Path::new("/nonexistent/quarry.toml")).unwrap_err();
        assert!(err.to_string().starts_with("failed to read config file /nonexistent/quarry.toml"));
    }
}
