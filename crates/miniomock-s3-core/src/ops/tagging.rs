//! Object tagging handlers.

use miniomock_model::S3Error;
use tracing::debug;

use crate::error::S3ServiceError;
use crate::ops::object::lookup;
use crate::provider::MockServer;
use crate::state::S3Bucket;
use crate::validation::validate_tags;

/// Replace the tag set of the addressed object version.
fn replace_tags(
    bucket: &S3Bucket,
    key: &str,
    version_id: Option<&str>,
    tags: Vec<(String, String)>,
) -> Result<(), S3ServiceError> {
    let mut store = bucket.objects.write();
    let resolved = lookup(&store, &bucket.name, key, version_id)?
        .version_id
        .clone();
    let obj = store
        .get_version_mut(key, &resolved)
        .ok_or_else(|| {
            anyhow::anyhow!("version {resolved} of {key} resolved but not writable")
        })?;
    obj.tags = tags;
    Ok(())
}

#[allow(clippy::result_large_err)]
impl MockServer {
    /// Get the tags of an object version.
    pub fn handle_get_object_tags(
        &self,
        bucket_name: &str,
        key: &str,
        version_id: Option<&str>,
    ) -> Result<Vec<(String, String)>, S3Error> {
        let bucket = self
            .state
            .get_bucket(bucket_name)
            .map_err(S3ServiceError::into_s3_error)?;

        let store = bucket.objects.read();
        let obj = lookup(&store, bucket_name, key, version_id)
            .map_err(S3ServiceError::into_s3_error)?;
        Ok(obj.tags.clone())
    }

    /// Replace the tags of an object version.
    pub fn handle_set_object_tags(
        &self,
        bucket_name: &str,
        key: &str,
        version_id: Option<&str>,
        tags: Vec<(String, String)>,
    ) -> Result<(), S3Error> {
        validate_tags(&tags).map_err(|e| e.into_s3_error().with_object(bucket_name, key))?;

        let bucket = self
            .state
            .get_bucket(bucket_name)
            .map_err(S3ServiceError::into_s3_error)?;

        let count = tags.len();
        replace_tags(&bucket, key, version_id, tags).map_err(S3ServiceError::into_s3_error)?;

        debug!(bucket = %bucket_name, key = %key, count, "set_object_tags completed");
        Ok(())
    }

    /// Remove all tags of an object version.
    pub fn handle_delete_object_tags(
        &self,
        bucket_name: &str,
        key: &str,
        version_id: Option<&str>,
    ) -> Result<(), S3Error> {
        let bucket = self
            .state
            .get_bucket(bucket_name)
            .map_err(S3ServiceError::into_s3_error)?;

        replace_tags(&bucket, key, version_id, Vec::new())
            .map_err(S3ServiceError::into_s3_error)?;

        debug!(bucket = %bucket_name, key = %key, "delete_object_tags completed");
        Ok(())
    }
}
