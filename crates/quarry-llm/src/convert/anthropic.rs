//! Conversion between internal types and the Anthropic Messages wire format

use serde_json::Value;

use crate::protocol::MAX_OUTPUT_TOKENS;
use crate::protocol::anthropic::{AnthropicMessage, AnthropicRequest};
use crate::types::{ContentBlock, NormalizedResult};

/// Build the request body; content blocks are already Anthropic-shaped
pub fn build_request(model: &str, content: &[ContentBlock]) -> AnthropicRequest {
    AnthropicRequest {
        model: model.to_owned(),
        max_tokens: MAX_OUTPUT_TOKENS,
        messages: vec![AnthropicMessage {
            role: "user".to_owned(),
            content: content.to_vec(),
        }],
    }
}

/// Normalize a success payload: text from `content[0].text`
pub fn normalize_response(raw: Value, requested_model: &str) -> NormalizedResult {
    NormalizedResult::from_raw(raw, "/content/0/text", "usage", requested_model)
}
