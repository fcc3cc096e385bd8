//! Conversion between internal types and the Google Generative Language wire format

use serde_json::Value;

use crate::protocol::MAX_OUTPUT_TOKENS;
use crate::protocol::google::{GoogleContent, GoogleGenerationConfig, GoogleInlineData, GooglePart, GoogleRequest};
use crate::types::{ContentBlock, MediaSource, NormalizedResult};

/// Build the `generateContent` body as a single content with one part per block
pub fn build_request(content: &[ContentBlock]) -> GoogleRequest {
    GoogleRequest {
        contents: vec![GoogleContent {
            parts: content.iter().map(to_part).collect(),
        }],
        generation_config: GoogleGenerationConfig {
            max_output_tokens: MAX_OUTPUT_TOKENS,
        },
    }
}

/// Convert one block; anything Gemini cannot ingest inline becomes JSON text
pub fn to_part(block: &ContentBlock) -> GooglePart {
    match block {
        ContentBlock::Text { text, .. } => GooglePart::Text(text.clone()),
        ContentBlock::Image { source, .. } => inline(source),
        ContentBlock::Document { source, .. } if source.media_type == ContentBlock::PDF_MEDIA_TYPE => inline(source),
        ContentBlock::Document { .. } | ContentBlock::Unrecognized(_) => GooglePart::Text(block.to_json_string()),
    }
}

fn inline(source: &MediaSource) -> GooglePart {
    GooglePart::InlineData(GoogleInlineData {
        mime_type: source.media_type.clone(),
        data: source.data.clone(),
    })
}

/// Normalize a success payload: text from `candidates[0].content.parts[0].text`
///
/// Google does not echo the model, so the requested model is reported.
pub fn normalize_response(raw: Value, requested_model: &str) -> NormalizedResult {
    let mut result = NormalizedResult::from_raw(
        raw,
        "/candidates/0/content/parts/0/text",
        "usageMetadata",
        requested_model,
    );
    requested_model.clone_into(&mut result.model);
    result
}
