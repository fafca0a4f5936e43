//! Client error types.

use miniomock_core::CoreError;
use miniomock_model::{S3Error, S3ErrorCode};

/// Error returned by [`crate::Minio`] operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The endpoint given at construction is empty or malformed.
    #[error("base_url {endpoint} is not valid: {reason}")]
    InvalidEndpoint {
        /// The rejected endpoint string.
        endpoint: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The emulated server answered with an error.
    #[error(transparent)]
    S3(#[from] S3Error),

    /// Reading or writing a local file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A client-side argument was rejected before reaching the server.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl ClientError {
    /// The server error code, if this is a server error.
    #[must_use]
    pub fn s3_code(&self) -> Option<S3ErrorCode> {
        match self {
            Self::S3(err) => Some(err.code),
            _ => None,
        }
    }

    /// The server error, if this is a server error.
    #[must_use]
    pub fn as_s3(&self) -> Option<&S3Error> {
        match self {
            Self::S3(err) => Some(err),
            _ => None,
        }
    }
}

impl From<CoreError> for ClientError {
    fn from(err: CoreError) -> Self {
        let CoreError::InvalidEndpoint { endpoint, reason } = err;
        Self::InvalidEndpoint { endpoint, reason }
    }
}

/// Convenience result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;
