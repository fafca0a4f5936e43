//! Shared value types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The `"null"` version id carried by objects written while versioning is off
/// or suspended.
pub const NULL_VERSION_ID: &str = "null";

// ---------------------------------------------------------------------------
// Versioning
// ---------------------------------------------------------------------------

/// Bucket versioning status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VersioningStatus {
    /// Versioning has never been enabled on this bucket.
    #[default]
    Off,
    /// Versioning is currently enabled.
    Enabled,
    /// Versioning was enabled and is now suspended.
    Suspended,
}

impl VersioningStatus {
    /// Returns the status as the service spells it.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Off => "Off",
            Self::Enabled => "Enabled",
            Self::Suspended => "Suspended",
        }
    }
}

impl fmt::Display for VersioningStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing a [`VersioningStatus`] from a string fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseVersioningStatusError(pub String);

impl fmt::Display for ParseVersioningStatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown versioning status: {}", self.0)
    }
}

impl std::error::Error for ParseVersioningStatusError {}

impl FromStr for VersioningStatus {
    type Err = ParseVersioningStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Off" => Ok(Self::Off),
            "Enabled" => Ok(Self::Enabled),
            "Suspended" => Ok(Self::Suspended),
            _ => Err(ParseVersioningStatusError(s.to_owned())),
        }
    }
}

/// Bucket versioning configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersioningConfig {
    /// The versioning status.
    pub status: VersioningStatus,
}

impl VersioningConfig {
    /// Create a configuration with the given status.
    #[must_use]
    pub fn new(status: VersioningStatus) -> Self {
        Self { status }
    }

    /// `Enabled` configuration.
    #[must_use]
    pub fn enabled() -> Self {
        Self::new(VersioningStatus::Enabled)
    }

    /// `Suspended` configuration.
    #[must_use]
    pub fn suspended() -> Self {
        Self::new(VersioningStatus::Suspended)
    }
}

// ---------------------------------------------------------------------------
// Object references
// ---------------------------------------------------------------------------

/// Source object of a copy operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopySource {
    /// Source bucket.
    pub bucket_name: String,
    /// Source key.
    pub object_name: String,
    /// Source version; the current version when `None`.
    pub version_id: Option<String>,
}

impl CopySource {
    /// Reference the current version of `bucket_name/object_name`.
    #[must_use]
    pub fn new(bucket_name: impl Into<String>, object_name: impl Into<String>) -> Self {
        Self {
            bucket_name: bucket_name.into(),
            object_name: object_name.into(),
            version_id: None,
        }
    }

    /// Reference a specific version.
    #[must_use]
    pub fn with_version_id(mut self, version_id: impl Into<String>) -> Self {
        self.version_id = Some(version_id.into());
        self
    }
}

/// One part of a compose operation, optionally restricted to a byte range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposeSource {
    /// Source bucket.
    pub bucket_name: String,
    /// Source key.
    pub object_name: String,
    /// Source version; the current version when `None`.
    pub version_id: Option<String>,
    /// Start offset within the source.
    pub offset: Option<u64>,
    /// Number of bytes to take from the source.
    pub length: Option<u64>,
}

impl ComposeSource {
    /// Reference the whole current version of `bucket_name/object_name`.
    #[must_use]
    pub fn new(bucket_name: impl Into<String>, object_name: impl Into<String>) -> Self {
        Self {
            bucket_name: bucket_name.into(),
            object_name: object_name.into(),
            version_id: None,
            offset: None,
            length: None,
        }
    }

    /// Reference a specific version.
    #[must_use]
    pub fn with_version_id(mut self, version_id: impl Into<String>) -> Self {
        self.version_id = Some(version_id.into());
        self
    }

    /// Restrict the part to `length` bytes starting at `offset`.
    #[must_use]
    pub fn with_range(mut self, offset: u64, length: u64) -> Self {
        self.offset = Some(offset);
        self.length = Some(length);
        self
    }
}

/// An entry of a batch delete request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteObject {
    /// Object key.
    pub name: String,
    /// Version to delete; the current version when `None`.
    pub version_id: Option<String>,
}

impl DeleteObject {
    /// Delete the current version of `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version_id: None,
        }
    }

    /// Delete a specific version of `name`.
    #[must_use]
    pub fn with_version_id(name: impl Into<String>, version_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version_id: Some(version_id.into()),
        }
    }
}

// ---------------------------------------------------------------------------
// Presigned URLs
// ---------------------------------------------------------------------------

/// HTTP method a presigned URL is generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// `GET`
    Get,
    /// `PUT`
    Put,
    /// `POST`
    Post,
    /// `HEAD`
    Head,
    /// `DELETE`
    Delete,
    /// `PATCH`
    Patch,
    /// `OPTIONS`
    Options,
    /// `CONNECT`
    Connect,
    /// `TRACE`
    Trace,
}

impl HttpMethod {
    /// Returns the method name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Put => "PUT",
            Self::Post => "POST",
            Self::Head => "HEAD",
            Self::Delete => "DELETE",
            Self::Patch => "PATCH",
            Self::Options => "OPTIONS",
            Self::Connect => "CONNECT",
            Self::Trace => "TRACE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for http::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => Self::GET,
            HttpMethod::Put => Self::PUT,
            HttpMethod::Post => Self::POST,
            HttpMethod::Head => Self::HEAD,
            HttpMethod::Delete => Self::DELETE,
            HttpMethod::Patch => Self::PATCH,
            HttpMethod::Options => Self::OPTIONS,
            HttpMethod::Connect => Self::CONNECT,
            HttpMethod::Trace => Self::TRACE,
        }
    }
}
