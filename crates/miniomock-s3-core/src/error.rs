//! Emulator error types.
//!
//! Defines [`S3ServiceError`], the domain error produced by the emulator's
//! state and operations. Each variant maps to a [`S3ErrorCode`] through the
//! [`From`] implementation, which also attaches the bucket / object the
//! failure relates to and a request id.
//!
//! # Usage
//!
//! ```
//! use miniomock_model::{S3Error, S3ErrorCode};
//! use miniomock_s3_core::error::S3ServiceError;
//!
//! let err = S3ServiceError::NoSuchBucket {
//!     bucket: "my-bucket".to_owned(),
//! };
//! let s3_err: S3Error = err.into();
//! assert_eq!(s3_err.code, S3ErrorCode::NoSuchBucket);
//! assert_eq!(s3_err.resource.as_deref(), Some("/my-bucket"));
//! ```

use miniomock_model::{S3Error, S3ErrorCode};

use crate::utils::generate_request_id;

/// Emulator error type.
#[derive(Debug, thiserror::Error)]
pub enum S3ServiceError {
    // -----------------------------------------------------------------------
    // Bucket errors
    // -----------------------------------------------------------------------
    /// The specified bucket does not exist.
    #[error("bucket does not exist")]
    NoSuchBucket {
        /// The bucket name that was not found.
        bucket: String,
    },

    /// The bucket already exists at this endpoint.
    #[error(
        "Your previous request to create the named bucket succeeded and you already own it."
    )]
    BucketAlreadyOwnedByYou {
        /// The bucket name that already exists.
        bucket: String,
    },

    /// The bucket still holds versions or delete markers.
    #[error("The bucket you tried to delete is not empty")]
    BucketNotEmpty {
        /// The bucket name that is not empty.
        bucket: String,
    },

    // -----------------------------------------------------------------------
    // Object / key errors
    // -----------------------------------------------------------------------
    /// The key does not exist, or its current version is a delete marker.
    #[error("The specified key does not exist.")]
    NoSuchKey {
        /// The bucket that was searched.
        bucket: String,
        /// The key that was not found.
        key: String,
    },

    /// The specified version does not exist.
    #[error("The specified version does not exist")]
    NoSuchVersion {
        /// The bucket that was searched.
        bucket: String,
        /// The key for the version.
        key: String,
        /// The version ID that was not found.
        version_id: String,
    },

    /// The addressed version is a delete marker.
    #[error("The specified method is not allowed against this resource.")]
    MethodNotAllowed {
        /// The bucket holding the delete marker.
        bucket: String,
        /// The key of the delete marker.
        key: String,
    },

    /// The object exceeds the configured maximum size.
    #[error("Your proposed upload exceeds the maximum allowed object size: {size} > {max}")]
    EntityTooLarge {
        /// Size of the rejected object.
        size: u64,
        /// Configured maximum.
        max: u64,
    },

    // -----------------------------------------------------------------------
    // Validation errors
    // -----------------------------------------------------------------------
    /// The specified bucket name is not valid.
    #[error("Invalid bucket name: {name}: {reason}")]
    InvalidBucketName {
        /// The invalid bucket name.
        name: String,
        /// The reason for the error.
        reason: String,
    },

    /// An argument provided is invalid.
    #[error("{message}")]
    InvalidArgument {
        /// Description of the invalid argument.
        message: String,
    },

    /// The requested range is not satisfiable.
    #[error("The requested range is not satisfiable")]
    InvalidRange,

    /// A tag key or value is invalid.
    #[error("Invalid tag: {message}")]
    InvalidTag {
        /// Description of the tag error.
        message: String,
    },

    /// The key is too long.
    #[error("Your key is too long")]
    KeyTooLong,

    /// User metadata exceeds the size limit.
    #[error("Your metadata headers exceed the maximum allowed metadata size: {size} bytes")]
    MetadataTooLarge {
        /// Total size of the rejected metadata.
        size: usize,
    },

    // -----------------------------------------------------------------------
    // Internal / catch-all
    // -----------------------------------------------------------------------
    /// Internal error with context.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl S3ServiceError {
    /// Shorthand for an [`S3ServiceError::InvalidArgument`].
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Convert this error into an [`S3Error`].
    #[must_use]
    pub fn into_s3_error(self) -> S3Error {
        S3Error::from(self)
    }

    /// The error code this error maps to.
    #[must_use]
    pub fn code(&self) -> S3ErrorCode {
        match self {
            Self::NoSuchBucket { .. } => S3ErrorCode::NoSuchBucket,
            Self::BucketAlreadyOwnedByYou { .. } => S3ErrorCode::BucketAlreadyOwnedByYou,
            Self::BucketNotEmpty { .. } => S3ErrorCode::BucketNotEmpty,
            Self::NoSuchKey { .. } => S3ErrorCode::NoSuchKey,
            Self::NoSuchVersion { .. } => S3ErrorCode::NoSuchVersion,
            Self::MethodNotAllowed { .. } => S3ErrorCode::MethodNotAllowed,
            Self::EntityTooLarge { .. } => S3ErrorCode::EntityTooLarge,
            Self::InvalidBucketName { .. } => S3ErrorCode::InvalidBucketName,
            Self::InvalidArgument { .. } => S3ErrorCode::InvalidArgument,
            Self::InvalidRange => S3ErrorCode::InvalidRange,
            Self::InvalidTag { .. } => S3ErrorCode::InvalidTag,
            Self::KeyTooLong => S3ErrorCode::KeyTooLongError,
            Self::MetadataTooLarge { .. } => S3ErrorCode::MetadataTooLarge,
            Self::Internal(_) => S3ErrorCode::InternalError,
        }
    }
}

impl From<S3ServiceError> for S3Error {
    fn from(err: S3ServiceError) -> Self {
        let error = S3Error::with_message(err.code(), err.to_string())
            .with_request_id(generate_request_id());

        match err {
            S3ServiceError::NoSuchBucket { bucket }
            | S3ServiceError::BucketAlreadyOwnedByYou { bucket }
            | S3ServiceError::BucketNotEmpty { bucket } => error.with_bucket(bucket),
            S3ServiceError::InvalidBucketName { name, .. } => error.with_bucket(name),
            S3ServiceError::NoSuchKey { bucket, key }
            | S3ServiceError::NoSuchVersion { bucket, key, .. }
            | S3ServiceError::MethodNotAllowed { bucket, key } => error.with_object(bucket, key),
            S3ServiceError::Internal(source) => error.with_source(InternalSource(source)),
            _ => error,
        }
    }
}

/// Adapter keeping the `anyhow` chain reachable through `Error::source`.
#[derive(Debug)]
struct InternalSource(anyhow::Error);

impl std::fmt::Display for InternalSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#}", self.0)
    }
}

impl std::error::Error for InternalSource {}

/// Convenience result type for emulator operations.
pub type S3ServiceResult<T> = Result<T, S3ServiceError>;
