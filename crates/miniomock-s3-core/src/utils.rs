//! Shared utilities for the emulator.
//!
//! Provides ID generation, ETag computation and byte-range resolution.

use md5::{Digest, Md5};
use miniomock_model::types::NULL_VERSION_ID;
use uuid::Uuid;

use crate::error::S3ServiceError;

// ---------------------------------------------------------------------------
// ID generation
// ---------------------------------------------------------------------------

/// Generate a version ID for a versioned object or delete marker.
///
/// # Examples
///
/// ```
/// use miniomock_s3_core::utils::generate_version_id;
///
/// let id = generate_version_id();
/// assert_eq!(id.len(), 36);
/// assert!(uuid::Uuid::parse_str(&id).is_ok());
/// ```
#[must_use]
pub fn generate_version_id() -> String {
    Uuid::new_v4().to_string()
}

/// Generate a unique request ID (UUID v4 without dashes).
///
/// # Examples
///
/// ```
/// use miniomock_s3_core::utils::generate_request_id;
///
/// let id = generate_request_id();
/// assert_eq!(id.len(), 32);
/// assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
/// ```
#[must_use]
pub fn generate_request_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// The version id as reported to callers: `None` for the `"null"` version.
///
/// # Examples
///
/// ```
/// use miniomock_s3_core::utils::visible_version_id;
///
/// assert_eq!(visible_version_id("null"), None);
/// assert_eq!(visible_version_id("abc").as_deref(), Some("abc"));
/// ```
#[must_use]
pub fn visible_version_id(version_id: &str) -> Option<String> {
    if version_id == NULL_VERSION_ID {
        None
    } else {
        Some(version_id.to_owned())
    }
}

// ---------------------------------------------------------------------------
// ETags
// ---------------------------------------------------------------------------

/// Compute the hex-encoded MD5 digest of `data`.
///
/// # Examples
///
/// ```
/// use miniomock_s3_core::utils::compute_md5;
///
/// assert_eq!(compute_md5(b"hello"), "5d41402abc4b2a76b9719d911017c592");
/// ```
#[must_use]
pub fn compute_md5(data: &[u8]) -> String {
    hex::encode(Md5::digest(data))
}

/// Compute the quoted MD5 ETag of `data`.
///
/// # Examples
///
/// ```
/// use miniomock_s3_core::utils::compute_etag;
///
/// assert_eq!(compute_etag(b""), "\"d41d8cd98f00b204e9800998ecf8427e\"");
/// ```
#[must_use]
pub fn compute_etag(data: &[u8]) -> String {
    format!("\"{}\"", compute_md5(data))
}

// ---------------------------------------------------------------------------
// Byte ranges
// ---------------------------------------------------------------------------

/// Resolve an `offset` / `length` request against content of `content_length`
/// bytes, returning the half-open `(start, end)` slice bounds.
///
/// A `length` running past the end is clamped. Empty content yields `(0, 0)`
/// for any request.
///
/// # Errors
///
/// Returns [`S3ServiceError::InvalidRange`] if `offset` lies at or beyond the
/// end of non-empty content.
///
/// # Examples
///
/// ```
/// use miniomock_s3_core::utils::resolve_range;
///
/// assert_eq!(resolve_range(10, 2, Some(3)).unwrap(), (2, 5));
/// assert_eq!(resolve_range(10, 8, Some(100)).unwrap(), (8, 10));
/// assert_eq!(resolve_range(10, 0, None).unwrap(), (0, 10));
/// assert!(resolve_range(10, 10, None).is_err());
/// ```
pub fn resolve_range(
    content_length: usize,
    offset: u64,
    length: Option<u64>,
) -> Result<(usize, usize), S3ServiceError> {
    if content_length == 0 {
        return Ok((0, 0));
    }

    let start = usize::try_from(offset).map_err(|_| S3ServiceError::InvalidRange)?;
    if start >= content_length {
        return Err(S3ServiceError::InvalidRange);
    }

    let end = match length {
        Some(len) => {
            let len = usize::try_from(len).unwrap_or(usize::MAX);
            start.saturating_add(len).min(content_length)
        }
        None => content_length,
    };

    Ok((start, end))
}
