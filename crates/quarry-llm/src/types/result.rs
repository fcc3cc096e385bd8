use serde::Serialize;
use serde_json::Value;

/// Vendor response normalized into a common shape
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedResult {
    /// Display text, empty when the vendor payload carried none
    pub text: String,
    /// Vendor usage object, passed through untouched
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<Value>,
    /// Vendor-reported model, or the requested one when the vendor omits it
    pub model: String,
    /// Full vendor payload
    pub raw: Value,
}

impl NormalizedResult {
    /// Build a result from a raw payload using JSON pointers into it
    ///
    /// Missing or non-string text resolves to an empty string rather than an
    /// error, so callers always receive something to display.
    pub(crate) fn from_raw(raw: Value, text_pointer: &str, usage_key: &str, requested_model: &str) -> Self {
        let text = raw
            .pointer(text_pointer)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_owned();

        let usage = raw.get(usage_key).cloned();

        let model = raw
            .get("model")
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
            .unwrap_or(requested_model)
            .to_owned();

        Self { text, usage, model, raw }
    }
}
