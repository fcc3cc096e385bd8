//! Request body of `POST /v1/messages`

use serde::Serialize;

use crate::types::ContentBlock;

#[derive(Debug, Clone, Serialize)]
pub struct AnthropicRequest {
    pub model: String,
    /// Mandatory on this API; there is no server-side default
    pub max_tokens: u32,
    pub messages: Vec<AnthropicMessage>,
}

/// One conversation turn
///
/// Content blocks are serialized as-is: the internal block shape already is
/// the Messages API shape.
#[derive(Debug, Clone, Serialize)]
pub struct AnthropicMessage {
    pub role: String,
    pub content: Vec<ContentBlock>,
}
