//! Results of emulator operations.

use std::collections::HashMap;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::S3ErrorCode;

/// A bucket as returned by `list_buckets`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketInfo {
    /// Bucket name.
    pub name: String,
    /// When the bucket was created.
    pub creation_date: DateTime<Utc>,
    /// Region the bucket was created in.
    pub region: String,
}

/// An entry of an object listing: an object version, a delete marker, or a
/// "directory" common prefix of a non-recursive listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListedObject {
    /// Bucket name.
    pub bucket_name: String,
    /// Object key, or the `prefix/` of a directory entry.
    pub object_name: String,
    /// Whether this entry is a directory (common prefix).
    pub is_dir: bool,
    /// Size in bytes (zero for directories and delete markers).
    pub size: u64,
    /// Quoted hex MD5 entity tag.
    pub etag: Option<String>,
    /// Last-modified time.
    pub last_modified: Option<DateTime<Utc>>,
    /// Version id; `None` for the `"null"` version and for directories.
    pub version_id: Option<String>,
    /// Whether this entry is the key's current version.
    pub is_latest: bool,
    /// Whether this entry is a delete marker.
    pub is_delete_marker: bool,
    /// Content type.
    pub content_type: Option<String>,
    /// User-defined metadata.
    pub metadata: HashMap<String, String>,
}

impl ListedObject {
    /// A directory entry of a non-recursive listing.
    #[must_use]
    pub fn dir(bucket_name: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            bucket_name: bucket_name.into(),
            object_name: prefix.into(),
            is_dir: true,
            size: 0,
            etag: None,
            last_modified: None,
            version_id: None,
            is_latest: false,
            is_delete_marker: false,
            content_type: None,
            metadata: HashMap::new(),
        }
    }
}

/// Object information returned by `stat_object`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectStat {
    /// Bucket name.
    pub bucket_name: String,
    /// Object key.
    pub object_name: String,
    /// Version id; `None` for the `"null"` version.
    pub version_id: Option<String>,
    /// Quoted hex MD5 entity tag.
    pub etag: String,
    /// Size in bytes.
    pub size: u64,
    /// Last-modified time.
    pub last_modified: DateTime<Utc>,
    /// Content type.
    pub content_type: String,
    /// User-defined metadata.
    pub metadata: HashMap<String, String>,
}

/// Object content returned by `get_object`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectContent {
    /// Object information.
    pub stat: ObjectStat,
    /// The requested bytes.
    pub data: Bytes,
}

impl ObjectContent {
    /// The requested bytes.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consume the response, returning the bytes.
    #[must_use]
    pub fn into_bytes(self) -> Bytes {
        self.data
    }
}

/// Result of a write (`put_object`, `copy_object`, `compose_object`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectWriteResult {
    /// Bucket name.
    pub bucket_name: String,
    /// Object key.
    pub object_name: String,
    /// Version id; `None` when the `"null"` version was written.
    pub version_id: Option<String>,
    /// Quoted hex MD5 entity tag.
    pub etag: String,
    /// Last-modified time of the new version.
    pub last_modified: DateTime<Utc>,
}

/// A successfully processed deletion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedObject {
    /// Object key.
    pub name: String,
    /// The version that was removed, when a version was requested.
    pub version_id: Option<String>,
    /// Whether a delete marker was created.
    pub delete_marker: bool,
    /// Version id of the created delete marker.
    pub delete_marker_version_id: Option<String>,
}

/// A deletion that failed inside a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteError {
    /// Error code.
    #[serde(serialize_with = "serialize_code")]
    pub code: S3ErrorCode,
    /// Error message.
    pub message: String,
    /// Object key.
    pub name: String,
    /// Requested version.
    pub version_id: Option<String>,
}

/// Result of a batch delete.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResult {
    /// Entries that were deleted.
    pub object_list: Vec<DeletedObject>,
    /// Entries that failed.
    pub error_list: Vec<DeleteError>,
}

fn serialize_code<S: serde::Serializer>(code: &S3ErrorCode, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(code.as_str())
}
