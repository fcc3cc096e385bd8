//! Route a call to the adapter registered for a provider id

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use indexmap::IndexMap;
use opentelemetry::KeyValue;
use opentelemetry::metrics::{Counter, Histogram};
use quarry_config::ProviderConfig;
use quarry_telemetry::metrics::{LLM_REQUEST_COUNT, LLM_REQUEST_DURATION, meter, record_duration};
use reqwest::Client;
use secrecy::SecretString;

use crate::error::LlmError;
use crate::provider::Provider;
use crate::provider::anthropic::AnthropicProvider;
use crate::provider::google::GoogleProvider;
use crate::provider::openai::OpenAiProvider;
use crate::registry::{self, PROVIDERS};
use crate::types::{ContentBlock, NormalizedResult};

/// Maps provider ids to adapters
#[derive(Clone)]
pub struct Dispatcher {
    providers: Arc<HashMap<&'static str, Arc<dyn Provider>>>,
    metrics: DispatchMetrics,
}

#[derive(Clone)]
struct DispatchMetrics {
    duration: Histogram<f64>,
    count: Counter<u64>,
}

impl DispatchMetrics {
    fn new() -> Self {
        let meter = meter();
        Self {
            duration: meter
                .f64_histogram(LLM_REQUEST_DURATION)
                .with_unit("s")
                .with_description("Duration of vendor calls")
                .build(),
            count: meter
                .u64_counter(LLM_REQUEST_COUNT)
                .with_description("Number of vendor calls")
                .build(),
        }
    }
}

impl Dispatcher {
    /// Build one adapter per registry entry, applying configured overrides
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::UnknownProvider`] if an override names a provider
    /// that is not in the registry.
    pub fn from_config(overrides: &IndexMap<String, ProviderConfig>) -> Result<Self, LlmError> {
        if let Some(unknown) = overrides.keys().find(|id| registry::lookup(id).is_none()) {
            return Err(LlmError::UnknownProvider {
                provider: unknown.clone(),
            });
        }

        let client = Client::new();
        let default_config = ProviderConfig::default();
        let config_for = |id: &str| overrides.get(id).unwrap_or(&default_config);

        let providers: Vec<Arc<dyn Provider>> = vec![
            Arc::new(AnthropicProvider::new(client.clone(), config_for(AnthropicProvider::ID))),
            Arc::new(GoogleProvider::new(client.clone(), config_for(GoogleProvider::ID))),
            Arc::new(OpenAiProvider::new(client, config_for(OpenAiProvider::ID))),
        ];

        debug_assert!(PROVIDERS.iter().all(|p| providers.iter().any(|a| a.id() == p.id)));

        Ok(Self::from_providers(providers))
    }

    /// Build from explicit adapters; later adapters replace earlier ones with the same id
    pub fn from_providers(providers: impl IntoIterator<Item = Arc<dyn Provider>>) -> Self {
        let providers = providers.into_iter().map(|p| (p.id(), p)).collect();

        Self {
            providers: Arc::new(providers),
            metrics: DispatchMetrics::new(),
        }
    }

    /// Whether an adapter is registered for `provider_id`
    pub fn supports(&self, provider_id: &str) -> bool {
        self.providers.contains_key(provider_id)
    }

    /// Send `content` to the adapter for `provider_id`
    ///
    /// Fails with [`LlmError::UnknownProvider`] before any network traffic
    /// when no adapter is registered.
    pub async fn dispatch(
        &self,
        provider_id: &str,
        credential: &SecretString,
        model: &str,
        content: &[ContentBlock],
    ) -> Result<NormalizedResult, LlmError> {
        let provider = self
            .providers
            .get(provider_id)
            .ok_or_else(|| LlmError::UnknownProvider {
                provider: provider_id.to_owned(),
            })?;

        tracing::debug!(provider = provider_id, model, blocks = content.len(), "dispatching to provider");

        let start = Instant::now();
        let result = provider.call(credential, model, content).await;

        let outcome = match &result {
            Ok(_) => "success",
            Err(LlmError::Vendor { .. }) => "vendor_error",
            Err(_) => "error",
        };
        let attributes = [
            KeyValue::new("provider", provider.id()),
            KeyValue::new("model", model.to_owned()),
            KeyValue::new("outcome", outcome),
        ];
        record_duration(&self.metrics.duration, start, &attributes);
        self.metrics.count.add(1, &attributes);

        match &result {
            Ok(normalized) => tracing::info!(
                provider = provider_id,
                model = %normalized.model,
                elapsed_ms = start.elapsed().as_millis(),
                "provider call succeeded"
            ),
            Err(e) => tracing::warn!(provider = provider_id, model, error = %e, "provider call failed"),
        }

        result
    }
}
