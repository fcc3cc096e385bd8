//! `OpenAI` chat completion provider implementation

use async_trait::async_trait;
use quarry_config::ProviderConfig;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use url::Url;

use super::{Provider, send_json};
use crate::convert::openai::{build_request, normalize_response};
use crate::error::LlmError;
use crate::types::{ContentBlock, NormalizedResult};

/// Default `OpenAI` API base URL
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// `OpenAI` chat completion provider
pub struct OpenAiProvider {
    client: Client,
    base_url: Url,
}

impl OpenAiProvider {
    pub const ID: &'static str = "openai";

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

    fn completions_url(&self) -> String {
        let base = self.base_url.as_str().trim_end_matches('/');
        format!("{base}/chat/completions")
    }
}

#[async_trait]
impl Provider for OpenAiProvider {
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
            .post(self.completions_url())
            .bearer_auth(credential.expose_secret())
            .json(&wire_request);

        let raw = send_json(Self::ID, builder).await?;

        Ok(normalize_response(raw, model))
    }
}
