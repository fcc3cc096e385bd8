//! Anthropic Messages API provider implementation

use async_trait::async_trait;
use quarry_config::ProviderConfig;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use url::Url;

use super::{Provider, send_json};
use crate::convert::anthropic::{build_request, normalize_response};
use crate::error::LlmError;
use crate::types::{ContentBlock, NormalizedResult};

/// Default Anthropic API base URL
const DEFAULT_BASE_URL: &str = "https://api.anthropic.com/v1";

/// Anthropic API version header value
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Anthropic Messages API provider
pub struct AnthropicProvider {
    client: Client,
    base_url: Url,
}

impl AnthropicProvider {
    pub const ID: &'static str = "anthropic";

    /// Create from provider configuration
    ///
    /// # Panics
    ///
    /// Panics if the hardcoded default base URL is invalid (should never happen).
    pub fn new(client: Client, config: &ProviderConfig) -> Self {
        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| Url::parse(DEFAULT_BASE_URL).expect("valid default URL"));

        Self { client, base_url }
    }

    fn messages_url(&self) -> String {
        let base = self.base_url.as_str().trim_end_matches('/');
        format!("{base}/messages")
    }
}

#[async_trait]
impl Provider for AnthropicProvider {
    fn id(&self) -> &'static str {
        Self::ID
    }

    async fn call(
        &self,
        credential: &SecretString,
        model: &str,
        content: &[ContentBlock],
    ) -> Result<NormalizedResult, LlmError> {
        let wire_request = build_request(model, content);

        let builder = self
            .client
            .post(self.messages_url())
            .header("x-api-key", credential.expose_secret())
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&wire_request);

        let raw = send_json(Self::ID, builder).await?;

        Ok(normalize_response(raw, model))
    }
}
