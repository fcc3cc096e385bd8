//! `POST /api/extract`: run one extraction against the selected provider

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use quarry_llm::{ContentBlock, registry};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub(super) struct ExtractRequest {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Serialize)]
pub(super) struct ExtractResponse {
    content: [TextContent; 1],
    model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    usage: Option<Value>,
    provider: String,
}

#[derive(Debug, Serialize)]
struct TextContent {
    #[serde(rename = "type")]
    kind: &'static str,
    text: String,
}

/// Handle `POST /api/extract`
pub(super) async fn extract(
    State(state): State<AppState>,
    request: Result<Json<ExtractRequest>, JsonRejection>,
) -> Result<Json<ExtractResponse>, ApiError> {
    let content = match request {
        Ok(Json(ExtractRequest { content })) if !content.is_empty() => content,
        _ => return Err(ApiError::MalformedRequest("content array required".to_owned())),
    };

    let selection = state.store.get().await;

    let descriptor = registry::lookup(&selection.provider).ok_or_else(|| ApiError::UnknownSelectedProvider {
        provider: selection.provider.clone(),
    })?;

    let credential = state
        .credentials
        .resolve(descriptor)
        .ok_or(ApiError::MissingCredential {
            name: descriptor.display_name,
            env_var: descriptor.credential_env_var,
        })?;

    tracing::debug!(
        provider = descriptor.id,
        model = %selection.model,
        kinds = ?content.iter().map(ContentBlock::kind).collect::<Vec<_>>(),
        "extracting"
    );

    let result = state
        .dispatcher
        .dispatch(descriptor.id, &credential, &selection.model, &content)
        .await?;

    Ok(Json(ExtractResponse {
        content: [TextContent {
            kind: "text",
            text: result.text,
        }],
        model: result.model,
        usage: result.usage,
        provider: descriptor.id.to_owned(),
    }))
}
