//! Presigned URL generation.
//!
//! The emulator does not sign anything: a presigned URL is the object's
//! path-style URL, with the requested version as query parameter. Expiry is
//! still checked against the limits of the real service.

use std::time::Duration;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::error::{ClientError, ClientResult};

/// Longest accepted expiry: seven days.
pub const MAX_PRESIGNED_EXPIRY: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// Characters of an object key that are percent-encoded.
///
/// Unreserved characters (`A-Z`, `a-z`, `0-9`, `-`, `_`, `.`, `~`) and the
/// `/` separator are kept.
const KEY_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'/');

/// Check a presigned URL expiry: between one second and seven days.
///
/// # Errors
///
/// Returns [`ClientError::InvalidArgument`] when out of range.
pub fn validate_expiry(expires: Duration) -> ClientResult<()> {
    if expires < Duration::from_secs(1) || expires > MAX_PRESIGNED_EXPIRY {
        return Err(ClientError::InvalidArgument(format!(
            "expires must be between 1 second and 7 days, got {}s",
            expires.as_secs()
        )));
    }
    Ok(())
}

/// Build `{base_url}/{bucket}/{key}[?versionId={version_id}]`.
///
/// # Examples
///
/// ```
/// use miniomock::presign::object_url;
///
/// assert_eq!(
///     object_url("http://localhost:9000", "b", "dir/a file.txt", None),
///     "http://localhost:9000/b/dir/a%20file.txt",
/// );
/// assert_eq!(
///     object_url("http://localhost:9000", "b", "k", Some("v1")),
///     "http://localhost:9000/b/k?versionId=v1",
/// );
/// ```
#[must_use]
pub fn object_url(base_url: &str, bucket_name: &str, key: &str, version_id: Option<&str>) -> String {
    let key = utf8_percent_encode(key, KEY_ENCODE_SET);
    match version_id {
        Some(version_id) => format!(
            "{base_url}/{bucket_name}/{key}?versionId={}",
            utf8_percent_encode(version_id, KEY_ENCODE_SET)
        ),
        None => format!("{base_url}/{bucket_name}/{key}"),
    }
}
