//! Provider trait and the per-vendor adapters

pub mod anthropic;
pub mod google;
pub mod openai;

use async_trait::async_trait;
use reqwest::RequestBuilder;
use secrecy::SecretString;
use serde_json::Value;

use crate::error::LlmError;
use crate::types::{ContentBlock, NormalizedResult};

/// One vendor adapter: translate, send exactly one request, normalize
#[async_trait]
pub trait Provider: Send + Sync {
    /// Registry id this adapter serves
    fn id(&self) -> &'static str;

    /// Call the vendor with the given credential and model
    async fn call(
        &self,
        credential: &SecretString,
        model: &str,
        content: &[ContentBlock],
    ) -> Result<NormalizedResult, LlmError>;
}

/// Send a prepared request and read the body as JSON
///
/// A non-success status becomes [`LlmError::Vendor`] carrying the vendor body,
/// parsed as JSON when possible and as a JSON string otherwise.
pub(crate) async fn send_json(provider: &'static str, builder: RequestBuilder) -> Result<Value, LlmError> {
    let response = builder.send().await.map_err(|source| {
        tracing::error!(provider, error = %source, "upstream request failed");
        LlmError::Transport { provider, source }
    })?;

    let status = response.status();

    let body = response
        .text()
        .await
        .map_err(|source| LlmError::Transport { provider, source })?;

    if !status.is_success() {
        tracing::warn!(provider, status = %status, "upstream returned error");

        let payload = serde_json::from_str(&body).unwrap_or(Value::String(body));
        return Err(LlmError::Vendor { status, payload });
    }

    serde_json::from_str(&body).map_err(|e| LlmError::InvalidResponse {
        provider,
        message: format!("failed to parse response: {e}"),
    })
}
