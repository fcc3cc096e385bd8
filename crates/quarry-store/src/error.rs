use thiserror::Error;

/// Key/value backend failures
#[derive(Debug, Error)]
pub enum StoreError {
    /// Connection or command error
    #[error("store backend: {0}")]
    Backend(#[from] redis::RedisError),
    /// Stored value is not a valid selection
    #[error("serialization: {0}")]
    Serialization(#[from] serde_json::Error),
    /// Backend did not answer in time
    #[error("store backend timed out after {0:?}")]
    Timeout(std::time::Duration),
}
