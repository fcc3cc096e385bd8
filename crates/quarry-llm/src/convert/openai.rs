//! Conversion between internal types and the `OpenAI` chat completion wire format

use serde_json::Value;

use crate::protocol::MAX_OUTPUT_TOKENS;
use crate::protocol::openai::{OpenAiContentPart, OpenAiImageUrl, OpenAiMessage, OpenAiRequest};
use crate::types::{ContentBlock, NormalizedResult};

/// Stand-in text for PDF documents, which the chat completions vision input
/// cannot ingest
pub const PDF_PLACEHOLDER: &str = "[PDF document attached - content extracted]";

/// Build the chat completion body as a single user message
pub fn build_request(model: &str, content: &[ContentBlock]) -> OpenAiRequest {
    OpenAiRequest {
        model: model.to_owned(),
        max_tokens: MAX_OUTPUT_TOKENS,
        messages: vec![OpenAiMessage {
            role: "user".to_owned(),
            content: content.iter().map(to_part).collect(),
        }],
    }
}

/// Convert one block into an `OpenAI` content part
pub fn to_part(block: &ContentBlock) -> OpenAiContentPart {
    match block {
        ContentBlock::Text { text, .. } => OpenAiContentPart::Text { text: text.clone() },
        ContentBlock::Image { source, .. } => OpenAiContentPart::ImageUrl {
            image_url: OpenAiImageUrl {
                url: source.data_uri(),
            },
        },
        ContentBlock::Document { .. } => OpenAiContentPart::Text {
            text: PDF_PLACEHOLDER.to_owned(),
        },
        ContentBlock::Unrecognized(_) => OpenAiContentPart::Text {
            text: block.to_json_string(),
        },
    }
}

/// Normalize a success payload: text from `choices[0].message.content`
pub fn normalize_response(raw: Value, requested_model: &str) -> NormalizedResult {
    NormalizedResult::from_raw(raw, "/choices/0/message/content", "usage", requested_model)
}
