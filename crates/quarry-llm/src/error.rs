use http::StatusCode;
use quarry_core::HttpError;
use serde_json::Value;
use thiserror::Error;

/// Errors that can occur while selecting, dispatching or calling a provider
#[derive(Debug, Error)]
pub enum LlmError {
    /// Provider id is not in the registry or has no adapter
    #[error("Unknown provider: {provider}")]
    UnknownProvider { provider: String },

    /// Model is not offered by the provider
    #[error("Unknown model: {model} for provider {provider}")]
    UnknownModel { provider: String, model: String },

    /// Vendor answered with a non-success status
    #[error("provider returned {status}")]
    Vendor {
        /// Vendor HTTP status
        status: StatusCode,
        /// Vendor error body, JSON when parseable, otherwise the raw text
        payload: Value,
    },

    /// The request never produced a response
    #[error("request to {provider} failed: {source}")]
    Transport {
        provider: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// A success response whose body could not be read as JSON
    #[error("invalid response from {provider}: {message}")]
    InvalidResponse { provider: &'static str, message: String },
}

impl HttpError for LlmError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::UnknownProvider { .. } | Self::UnknownModel { .. } => StatusCode::BAD_REQUEST,
            Self::Vendor { status, .. } => *status,
            Self::Transport { .. } | Self::InvalidResponse { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_type(&self) -> &str {
        match self {
            Self::UnknownProvider { .. } | Self::UnknownModel { .. } => "invalid_request_error",
            Self::Vendor { .. } => "upstream_error",
            Self::Transport { .. } | Self::InvalidResponse { .. } => "internal_error",
        }
    }

    fn client_message(&self) -> String {
        match self {
            Self::Transport { .. } | Self::InvalidResponse { .. } => "Internal server error".to_owned(),
            other => other.to_string(),
        }
    }

    fn details(&self) -> Option<String> {
        match self {
            Self::Transport { .. } | Self::InvalidResponse { .. } => Some(self.to_string()),
            _ => None,
        }
    }
}
