use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Value, json};

/// One unit of a multi-modal extraction request
///
/// Every variant keeps the JSON value it was parsed from, in the Anthropic
/// content-block shape, and serializes back to exactly that value. Keys the
/// typed fields do not model (`cache_control`, `title`, `citations`, ...)
/// survive untouched. Any value that is not a well-formed text, image or
/// document block becomes [`ContentBlock::Unrecognized`] so each adapter can
/// decide how to degrade it.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentBlock {
    /// Plain text
    Text {
        /// The text string
        text: String,
        /// The block as received
        raw: Value,
    },
    /// Base64-encoded image
    Image {
        source: MediaSource,
        /// The block as received
        raw: Value,
    },
    /// Base64-encoded document (PDF)
    Document {
        source: MediaSource,
        /// The block as received
        raw: Value,
    },
    /// Anything else, preserved as received
    Unrecognized(Value),
}

/// Inline binary payload of an image or document block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaSource {
    /// Source encoding, always `base64` for inline data
    #[serde(rename = "type", default = "default_source_type")]
    pub kind: String,
    /// MIME type, e.g. `image/png` or `application/pdf`
    pub media_type: String,
    /// Base64-encoded bytes
    pub data: String,
}

impl MediaSource {
    pub fn base64(media_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            kind: default_source_type(),
            media_type: media_type.into(),
            data: data.into(),
        }
    }

    /// Render as a `data:` URI
    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.media_type, self.data)
    }
}

impl ContentBlock {
    /// MIME type of PDF documents
    pub const PDF_MEDIA_TYPE: &'static str = "application/pdf";

    pub fn text(text: impl Into<String>) -> Self {
        let text = text.into();
        let raw = json!({"type": "text", "text": text});
        Self::Text { text, raw }
    }

    pub fn image(media_type: impl Into<String>, data: impl Into<String>) -> Self {
        let source = MediaSource::base64(media_type, data);
        let raw = json!({"type": "image", "source": source});
        Self::Image { source, raw }
    }

    pub fn document(media_type: impl Into<String>, data: impl Into<String>) -> Self {
        let source = MediaSource::base64(media_type, data);
        let raw = json!({"type": "document", "source": source});
        Self::Document { source, raw }
    }

    pub fn pdf(data: impl Into<String>) -> Self {
        Self::document(Self::PDF_MEDIA_TYPE, data)
    }

    /// Classify a received JSON value, keeping it alongside the typed fields
    pub fn from_value(raw: Value) -> Self {
        match KnownBlock::deserialize(&raw) {
            Ok(KnownBlock::Text { text }) => Self::Text { text, raw },
            Ok(KnownBlock::Image { source }) => Self::Image { source, raw },
            Ok(KnownBlock::Document { source }) => Self::Document { source, raw },
            Err(_) => Self::Unrecognized(raw),
        }
    }

    /// The block exactly as received
    pub const fn raw(&self) -> &Value {
        match self {
            Self::Text { raw, .. } | Self::Image { raw, .. } | Self::Document { raw, .. } | Self::Unrecognized(raw) => {
                raw
            }
        }
    }

    /// Short name of the block variant, for logging
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Text { .. } => "text",
            Self::Image { .. } => "image",
            Self::Document { .. } => "document",
            Self::Unrecognized(_) => "unrecognized",
        }
    }

    /// The received block serialized as a JSON string
    pub fn to_json_string(&self) -> String {
        self.raw().to_string()
    }
}

impl Serialize for ContentBlock {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.raw().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ContentBlock {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Self::from_value)
    }
}

fn default_source_type() -> String {
    "base64".to_owned()
}

/// Typed view used only for classification; unknown keys are ignored here
#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum KnownBlock {
    Text { text: String },
    Image { source: MediaSource },
    Document { source: MediaSource },
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn parses_known_blocks_in_order() {
        let blocks: Vec<ContentBlock> = serde_json::from_value(json!([
            {"type": "text", "text": "Extract the line items"},
            {"type": "image", "source": {"type": "base64", "media_type": "image/png", "data": "iVBORw0"}},
            {"type": "document", "source": {"type": "base64", "media_type": "application/pdf", "data": "JVBERi0"}}
        ]))
        .unwrap();

        assert_eq!(
            blocks,
            vec![
                ContentBlock::text("Extract the line items"),
                ContentBlock::image("image/png", "iVBORw0"),
                ContentBlock::pdf("JVBERi0"),
            ]
        );
    }

    #[test]
    fn source_type_defaults_to_base64() {
        let block: ContentBlock =
            serde_json::from_value(json!({"type": "image", "source": {"media_type": "image/jpeg", "data": "abc"}}))
                .unwrap();

        let ContentBlock::Image { source, .. } = block else {
            panic!("expected image block");
        };
        assert_eq!(source.kind, "base64");
    }

    #[test]
    fn unknown_type_is_preserved_verbatim() {
        let raw = json!({"type": "tool_result", "tool_use_id": "t1", "content": "ok"});
        let block: ContentBlock = serde_json::from_value(raw.clone()).unwrap();

        assert_eq!(block, ContentBlock::Unrecognized(raw.clone()));
        assert_eq!(serde_json::to_value(&block).unwrap(), raw);
    }

    #[test]
    fn malformed_known_type_degrades_to_unrecognized() {
        let raw = json!({"type": "image", "source": {"type": "url", "url": "https://example.com/a.png"}});
        let block: ContentBlock = serde_json::from_value(raw.clone()).unwrap();

        assert_eq!(block.kind(), "unrecognized");
        assert_eq!(serde_json::to_value(&block).unwrap(), raw);
    }

    #[test]
    fn non_object_values_are_accepted() {
        let block: ContentBlock = serde_json::from_value(json!("just a string")).unwrap();
        assert_eq!(block, ContentBlock::Unrecognized(json!("just a string")));
    }

    #[test]
    fn serializes_in_anthropic_shape() {
        let value = serde_json::to_value(ContentBlock::pdf("JVBERi0")).unwrap();
        assert_eq!(
            value,
            json!({"type": "document", "source": {"type": "base64", "media_type": "application/pdf", "data": "JVBERi0"}})
        );
    }

    #[test]
    fn data_uri_combines_media_type_and_payload() {
        assert_eq!(MediaSource::base64("image/webp", "UklGR").data_uri(), "data:image/webp;base64,UklGR");
    }

    #[test]
    fn json_string_keeps_field_order() {
        let raw = json!({"type": "audio", "source": {"data": "AAA", "format": "wav"}});
        let block: ContentBlock = serde_json::from_value(raw).unwrap();
        assert_eq!(block.to_json_string(), r#"{"type":"audio","source":{"data":"AAA","format":"wav"}}"#);
    }

    #[test]
    fn extra_keys_survive_a_round_trip() {
        let raw = json!({"type": "text", "text": "hi", "cache_control": {"type": "ephemeral"}});
        let block: ContentBlock = serde_json::from_value(raw.clone()).unwrap();

        assert_eq!(block.kind(), "text");
        assert_eq!(serde_json::to_value(&block).unwrap(), raw);
    }

    #[test]
    fn source_type_default_is_not_written_back() {
        let raw = json!({"type": "document", "source": {"media_type": "text/csv", "data": "YSxi"}});
        let block: ContentBlock = serde_json::from_value(raw.clone()).unwrap();

        let ContentBlock::Document { source, .. } = &block else {
            panic!("expected document block");
        };
        assert_eq!(source.kind, "base64");
        assert_eq!(block.to_json_string(), r#"{"type":"document","source":{"media_type":"text/csv","data":"YSxi"}}"#);
    }
}
