//! Structured errors returned by the emulator.
//!
//! [`S3Error`] mirrors the error object raised by a real object-storage client:
//! a named [`S3ErrorCode`], a message, the HTTP status the service would have
//! answered with, and the bucket / object the failure relates to.

use std::fmt;

/// Well-known S3 error codes produced by the emulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[non_exhaustive]
pub enum S3ErrorCode {
    /// The bucket already exists and belongs to the caller.
    BucketAlreadyOwnedByYou,
    /// The bucket still holds object versions or delete markers.
    BucketNotEmpty,
    /// The object exceeds the configured maximum size.
    EntityTooLarge,
    /// Unexpected internal failure.
    #[default]
    InternalError,
    /// An argument (version id, expiry, versioning transition, ...) is invalid.
    InvalidArgument,
    /// The bucket name breaks the naming rules.
    InvalidBucketName,
    /// The requested byte range cannot be satisfied.
    InvalidRange,
    /// A tag key or value is invalid, or there are too many tags.
    InvalidTag,
    /// The object key exceeds 1024 bytes.
    KeyTooLongError,
    /// User metadata exceeds 2 KiB.
    MetadataTooLarge,
    /// The operation is not allowed against the resource (e.g. reading a
    /// delete marker).
    MethodNotAllowed,
    /// The bucket does not exist.
    NoSuchBucket,
    /// The key does not exist.
    NoSuchKey,
    /// The version does not exist.
    NoSuchVersion,
}

impl S3ErrorCode {
    /// Returns the error code as a string.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BucketAlreadyOwnedByYou => "BucketAlreadyOwnedByYou",
            Self::BucketNotEmpty => "BucketNotEmpty",
            Self::EntityTooLarge => "EntityTooLarge",
            Self::InternalError => "InternalError",
            Self::InvalidArgument => "InvalidArgument",
            Self::InvalidBucketName => "InvalidBucketName",
            Self::InvalidRange => "InvalidRange",
            Self::InvalidTag => "InvalidTag",
            Self::KeyTooLongError => "KeyTooLongError",
            Self::MetadataTooLarge => "MetadataTooLarge",
            Self::MethodNotAllowed => "MethodNotAllowed",
            Self::NoSuchBucket => "NoSuchBucket",
            Self::NoSuchKey => "NoSuchKey",
            Self::NoSuchVersion => "NoSuchVersion",
        }
    }

    /// Returns the HTTP status code the real service answers with.
    #[must_use]
    pub fn default_status_code(&self) -> http::StatusCode {
        match self {
            Self::EntityTooLarge
            | Self::InvalidArgument
            | Self::InvalidBucketName
            | Self::InvalidTag
            | Self::KeyTooLongError
            | Self::MetadataTooLarge => http::StatusCode::BAD_REQUEST,
            Self::NoSuchBucket | Self::NoSuchKey | Self::NoSuchVersion => {
                http::StatusCode::NOT_FOUND
            }
            Self::MethodNotAllowed => http::StatusCode::METHOD_NOT_ALLOWED,
            Self::BucketAlreadyOwnedByYou | Self::BucketNotEmpty => http::StatusCode::CONFLICT,
            Self::InvalidRange => http::StatusCode::RANGE_NOT_SATISFIABLE,
            Self::InternalError => http::StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the default message for this error.
    #[must_use]
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::BucketAlreadyOwnedByYou => {
                "Your previous request to create the named bucket succeeded and you already own it."
            }
            Self::BucketNotEmpty => "The bucket you tried to delete is not empty",
            Self::EntityTooLarge => "Your proposed upload exceeds the maximum allowed object size.",
            Self::InternalError => "We encountered an internal error, please try again.",
            Self::InvalidArgument => "Invalid Argument",
            Self::InvalidBucketName => "The specified bucket is not valid.",
            Self::InvalidRange => "The requested range is not satisfiable",
            Self::InvalidTag => "The TagValue you have provided is invalid",
            Self::KeyTooLongError => "Your key is too long",
            Self::MetadataTooLarge => {
                "Your metadata headers exceed the maximum allowed metadata size."
            }
            Self::MethodNotAllowed => "The specified method is not allowed against this resource.",
            Self::NoSuchBucket => "bucket does not exist",
            Self::NoSuchKey => "The specified key does not exist.",
            Self::NoSuchVersion => "The specified version does not exist",
        }
    }
}

impl fmt::Display for S3ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An S3 error, as raised by the emulator.
#[derive(Debug)]
pub struct S3Error {
    /// The error code.
    pub code: S3ErrorCode,
    /// A human-readable error message.
    pub message: String,
    /// The resource that caused the error (`/bucket` or `/bucket/key`).
    pub resource: Option<String>,
    /// The bucket the failing request addressed.
    pub bucket_name: Option<String>,
    /// The object the failing request addressed.
    pub object_name: Option<String>,
    /// The request ID.
    pub request_id: Option<String>,
    /// The HTTP status code.
    pub status_code: http::StatusCode,
    /// The underlying source error, if any.
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl fmt::Display for S3Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S3 operation failed; code: {}, message: {}", self.code, self.message)?;
        if let Some(resource) = &self.resource {
            write!(f, ", resource: {resource}")?;
        }
        Ok(())
    }
}

impl std::error::Error for S3Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

impl S3Error {
    /// Create a new S3Error from an error code.
    #[must_use]
    pub fn new(code: S3ErrorCode) -> Self {
        Self::with_message(code, code.default_message())
    }

    /// Create a new S3Error with a custom message.
    #[must_use]
    pub fn with_message(code: S3ErrorCode, message: impl Into<String>) -> Self {
        Self {
            status_code: code.default_status_code(),
            message: message.into(),
            code,
            resource: None,
            bucket_name: None,
            object_name: None,
            request_id: None,
            source: None,
        }
    }

    /// Attach the bucket (and derive the `/bucket` resource).
    #[must_use]
    pub fn with_bucket(mut self, bucket_name: impl Into<String>) -> Self {
        let bucket_name = bucket_name.into();
        self.resource = Some(format!("/{bucket_name}"));
        self.bucket_name = Some(bucket_name);
        self
    }

    /// Attach the bucket and object (and derive the `/bucket/key` resource).
    #[must_use]
    pub fn with_object(
        mut self,
        bucket_name: impl Into<String>,
        object_name: impl Into<String>,
    ) -> Self {
        let bucket_name = bucket_name.into();
        let object_name = object_name.into();
        self.resource = Some(format!("/{bucket_name}/{object_name}"));
        self.bucket_name = Some(bucket_name);
        self.object_name = Some(object_name);
        self
    }

    /// Set the request ID.
    #[must_use]
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    /// Set the source error.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// The error code as a string (`"NoSuchKey"`, ...).
    #[must_use]
    pub fn code_str(&self) -> &'static str {
        self.code.as_str()
    }

    /// Create a NoSuchBucket error.
    #[must_use]
    pub fn no_such_bucket(bucket_name: impl Into<String>) -> Self {
        Self::new(S3ErrorCode::NoSuchBucket).with_bucket(bucket_name)
    }

    /// Create a NoSuchKey error.
    #[must_use]
    pub fn no_such_key(bucket_name: impl Into<String>, object_name: impl Into<String>) -> Self {
        Self::new(S3ErrorCode::NoSuchKey).with_object(bucket_name, object_name)
    }

    /// Create a InvalidArgument error.
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::with_message(S3ErrorCode::InvalidArgument, message)
    }

    /// Create a MethodNotAllowed error.
    #[must_use]
    pub fn method_not_allowed(
        bucket_name: impl Into<String>,
        object_name: impl Into<String>,
    ) -> Self {
        Self::new(S3ErrorCode::MethodNotAllowed).with_object(bucket_name, object_name)
    }
}

/// Create an S3Error from an error code.
///
/// # Examples
///
/// ```
/// use miniomock_model::s3_error;
/// use miniomock_model::error::S3ErrorCode;
///
/// let err = s3_error!(NoSuchBucket);
/// assert_eq!(err.code, S3ErrorCode::NoSuchBucket);
///
/// let err = s3_error!(NoSuchKey, "The key does not exist");
/// assert_eq!(err.message, "The key does not exist");
/// ```
#[macro_export]
macro_rules! s3_error {
    ($code:ident) => {
        $crate::error::S3Error::new($crate::error::S3ErrorCode::$code)
    };
    ($code:ident, $msg:expr) => {
        $crate::error::S3Error::with_message($crate::error::S3ErrorCode::$code, $msg)
    };
}
