//! Stored object versions and delete markers.

use std::collections::HashMap;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use miniomock_model::types::NULL_VERSION_ID;

use crate::utils::compute_etag;

// ---------------------------------------------------------------------------
// S3Object
// ---------------------------------------------------------------------------

/// One stored version of an object.
#[derive(Debug, Clone)]
pub struct S3Object {
    /// Object key.
    pub key: String,
    /// Version ID (`"null"` for un-versioned writes).
    pub version_id: String,
    /// Object content. Cloning is a reference-count bump.
    pub data: Bytes,
    /// Quoted hex MD5 of `data`.
    pub etag: String,
    /// Content length in bytes.
    pub size: u64,
    /// When this version was written.
    pub last_modified: DateTime<Utc>,
    /// MIME type.
    pub content_type: String,
    /// User-defined metadata.
    pub metadata: HashMap<String, String>,
    /// Object tags, in insertion order.
    pub tags: Vec<(String, String)>,
}

impl S3Object {
    /// Create a version from its content, computing size and ETag.
    #[must_use]
    pub fn new(
        key: impl Into<String>,
        version_id: impl Into<String>,
        data: Bytes,
        content_type: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            version_id: version_id.into(),
            etag: compute_etag(&data),
            size: data.len() as u64,
            data,
            last_modified: Utc::now(),
            content_type: content_type.into(),
            metadata: HashMap::new(),
            tags: Vec::new(),
        }
    }

    /// Attach user metadata.
    #[must_use]
    pub fn with_metadata(mut self, metadata: HashMap<String, String>) -> Self {
        self.metadata = metadata;
        self
    }

    /// Attach tags.
    #[must_use]
    pub fn with_tags(mut self, tags: Vec<(String, String)>) -> Self {
        self.tags = tags;
        self
    }

    /// Whether this is the `"null"` version.
    #[must_use]
    pub fn is_null_version(&self) -> bool {
        self.version_id == NULL_VERSION_ID
    }
}

// ---------------------------------------------------------------------------
// S3DeleteMarker
// ---------------------------------------------------------------------------

/// A delete marker: a content-less version hiding its key.
#[derive(Debug, Clone)]
pub struct S3DeleteMarker {
    /// Object key.
    pub key: String,
    /// Version ID of the marker.
    pub version_id: String,
    /// When the marker was created.
    pub last_modified: DateTime<Utc>,
}

impl S3DeleteMarker {
    /// Create a marker for `key` stamped with the current time.
    #[must_use]
    pub fn new(key: impl Into<String>, version_id: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            version_id: version_id.into(),
            last_modified: Utc::now(),
        }
    }
}

// ---------------------------------------------------------------------------
// ObjectVersion
// ---------------------------------------------------------------------------

/// An entry of a key's version list.
#[derive(Debug, Clone)]
pub enum ObjectVersion {
    /// A version carrying content.
    Object(Box<S3Object>),
    /// A delete marker.
    DeleteMarker(S3DeleteMarker),
}

impl ObjectVersion {
    /// The key this version belongs to.
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::Object(obj) => &obj.key,
            Self::DeleteMarker(dm) => &dm.key,
        }
    }

    /// The version ID.
    #[must_use]
    pub fn version_id(&self) -> &str {
        match self {
            Self::Object(obj) => &obj.version_id,
            Self::DeleteMarker(dm) => &dm.version_id,
        }
    }

    /// When this version was written.
    #[must_use]
    pub fn last_modified(&self) -> DateTime<Utc> {
        match self {
            Self::Object(obj) => obj.last_modified,
            Self::DeleteMarker(dm) => dm.last_modified,
        }
    }

    /// Whether this version is a delete marker.
    #[must_use]
    pub fn is_delete_marker(&self) -> bool {
        matches!(self, Self::DeleteMarker(_))
    }

    /// The object, unless this is a delete marker.
    #[must_use]
    pub fn as_object(&self) -> Option<&S3Object> {
        match self {
            Self::Object(obj) => Some(obj),
            Self::DeleteMarker(_) => None,
        }
    }

    /// Mutable access to the object, unless this is a delete marker.
    pub fn as_object_mut(&mut self) -> Option<&mut S3Object> {
        match self {
            Self::Object(obj) => Some(obj),
            Self::DeleteMarker(_) => None,
        }
    }
}
