//! Error types for the miniomock core.

/// Core error type for miniomock infrastructure.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The connection endpoint is empty or not a valid hostname / URL.
    #[error("base_url {endpoint} is not valid: {reason}")]
    InvalidEndpoint {
        /// The rejected endpoint string.
        endpoint: String,
        /// Why it was rejected.
        reason: String,
    },
}

/// Convenience result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;
