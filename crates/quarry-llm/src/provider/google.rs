//! Google Generative Language API provider implementation

use async_trait::async_trait;
use quarry_config::ProviderConfig;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use url::Url;

use super::{Provider, send_json};
use crate::convert::google::{build_request, normalize_response};
use crate::error::LlmError;
use crate::types::{ContentBlock, NormalizedResult};

/// Default Google Generative Language API base URL
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Google Gemini provider
pub struct GoogleProvider {
    client: Client,
    base_url: Url,
}

impl GoogleProvider {
    pub const ID: &'static str = "google";

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

    /// Model-specific generate endpoint; the key travels as a query parameter
    fn generate_url(&self, model: &str) -> String {
        let base = self.base_url.as_str().trim_end_matches('/');
        format!("{base}/models/{model}:generateContent")
    }
}

#[async_trait]
impl Provider for GoogleProvider {
    fn id(&self) -> &'static str {
        Self::ID
    }

    async fn call(
        &self,
        credential: &SecretString,
        model: &str,
        content: &[ContentBlock],
    ) -> Result<NormalizedResult, LlmError> {
        let wire_request = build_request(content);

        let builder = self
            .client
            .post(self.generate_url(model))
            .query(&[("key", credential.expose_secret())])
            .json(&wire_request);

        let raw = send_json(Self::ID, builder).await?;

        Ok(normalize_response(raw, model))
    }
}
