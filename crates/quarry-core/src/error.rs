use http::StatusCode;

/// Trait for domain errors that can be converted to HTTP responses
///
/// Implemented by each feature crate's error type. The server layer
/// converts these into actual HTTP responses, keeping domain errors
/// decoupled from axum.
pub trait HttpError: std::error::Error {
    /// HTTP status code for this error
    fn status_code(&self) -> StatusCode;

    /// Machine-readable error type (e.g. `invalid_request_error`)
    fn error_type(&self) -> &str;

    /// Message safe to expose to API consumers
    fn client_message(&self) -> String;

    /// Extra diagnostic detail attached to the `details` field, if any
    fn details(&self) -> Option<String> {
        None
    }
}

/// Render an error as the `{error, details?}` JSON body used by every endpoint
pub fn error_body<E: HttpError + ?Sized>(error: &E) -> serde_json::Value {
    let mut body = serde_json::json!({ "error": error.client_message() });
    if let Some(details) = error.details() {
        body["details"] = serde_json::Value::String(details);
    }
    body
}
