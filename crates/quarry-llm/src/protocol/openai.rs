//! Request body of `POST /v1/chat/completions`

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct OpenAiRequest {
    pub model: String,
    pub max_tokens: u32,
    pub messages: Vec<OpenAiMessage>,
}

/// One chat turn with multi-part content
#[derive(Debug, Clone, Serialize)]
pub struct OpenAiMessage {
    pub role: String,
    pub content: Vec<OpenAiContentPart>,
}

/// Vision-capable content part, tagged by `type`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OpenAiContentPart {
    Text { text: String },
    ImageUrl { image_url: OpenAiImageUrl },
}

/// Image reference; Quarry always sends a `data:` URI
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OpenAiImageUrl {
    pub url: String,
}
