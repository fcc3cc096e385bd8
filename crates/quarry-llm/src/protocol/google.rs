//! Request body of `POST /models/{model}:generateContent`

use serde::Serialize;

/// Top-level `generateContent` body; keys are camelCase on this API
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleRequest {
    pub contents: Vec<GoogleContent>,
    pub generation_config: GoogleGenerationConfig,
}

#[derive(Debug, Clone, Serialize)]
pub struct GoogleContent {
    pub parts: Vec<GooglePart>,
}

/// A part is an object with exactly one key: `text` or `inline_data`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GooglePart {
    Text(String),
    InlineData(GoogleInlineData),
}

/// Base64 payload sent inline with its MIME type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GoogleInlineData {
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleGenerationConfig {
    pub max_output_tokens: u32,
}
