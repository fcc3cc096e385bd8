use axum::Json;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use quarry_core::{HttpError, error_body};
use quarry_llm::LlmError;
use serde_json::Value;
use thiserror::Error;

/// Failures surfaced by the API endpoints
#[derive(Debug, Error)]
pub enum ApiError {
    /// Body could not be read as the expected request
    #[error("Invalid request: {0}")]
    MalformedRequest(String),

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Admin password not configured. Set ADMIN_PASSWORD env var.")]
    AdminPasswordNotConfigured,

    #[error("Invalid password")]
    Unauthorized,

    /// Requested selection is not in the registry
    #[error(transparent)]
    InvalidSelection(LlmError),

    /// The stored selection names a provider the registry no longer has
    #[error("Unknown provider: {provider}")]
    UnknownSelectedProvider { provider: String },

    #[error("API key not configured for {name}. Set {env_var} in environment.")]
    MissingCredential { name: &'static str, env_var: &'static str },

    /// Vendor failure, relayed with the vendor's status and body
    #[error("provider returned {status}")]
    Vendor { status: StatusCode, payload: Value },

    /// Anything else that went wrong while serving the request
    #[error("{0}")]
    Internal(String),
}

impl From<LlmError> for ApiError {
    fn from(error: LlmError) -> Self {
        match error {
            LlmError::Vendor { status, payload } => Self::Vendor { status, payload },
            other => Self::Internal(other.to_string()),
        }
    }
}

impl HttpError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::MalformedRequest(_) | Self::InvalidSelection(_) => StatusCode::BAD_REQUEST,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Vendor { status, .. } => *status,
            Self::AdminPasswordNotConfigured
            | Self::UnknownSelectedProvider { .. }
            | Self::MissingCredential { .. }
            | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_type(&self) -> &str {
        match self {
            Self::MalformedRequest(_) | Self::InvalidSelection(_) | Self::MethodNotAllowed => "invalid_request_error",
            Self::Unauthorized => "authentication_error",
            Self::Vendor { .. } => "upstream_error",
            Self::AdminPasswordNotConfigured | Self::UnknownSelectedProvider { .. } | Self::MissingCredential { .. } => {
                "configuration_error"
            }
            Self::Internal(_) => "internal_error",
        }
    }

    fn client_message(&self) -> String {
        match self {
            Self::Internal(_) => "Internal server error".to_owned(),
            other => other.to_string(),
        }
    }

    fn details(&self) -> Option<String> {
        match self {
            Self::Internal(details) => Some(details.clone()),
            _ => None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error = %self, error_type = self.error_type(), "request failed");
        } else {
            tracing::debug!(error = %self, error_type = self.error_type(), "request rejected");
        }

        match self {
            Self::Vendor { status, payload } => (status, Json(payload)).into_response(),
            other => (status, Json(error_body(&other))).into_response(),
        }
    }
}
