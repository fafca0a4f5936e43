//! Bucket operation handlers.
//!
//! Implements `make_bucket`, `bucket_exists`, `list_buckets`,
//! `remove_bucket`, and the bucket versioning configuration.

use miniomock_model::S3Error;
use miniomock_model::input::MakeBucketOptions;
use miniomock_model::output::BucketInfo;
use miniomock_model::types::VersioningConfig;
use tracing::debug;

use crate::error::S3ServiceError;
use crate::provider::MockServer;
use crate::validation::validate_bucket_name;

#[allow(clippy::result_large_err)]
impl MockServer {
    /// Create a new bucket.
    pub fn handle_make_bucket(
        &self,
        bucket_name: &str,
        options: &MakeBucketOptions,
    ) -> Result<(), S3Error> {
        if self.config.validate_bucket_names {
            validate_bucket_name(bucket_name).map_err(S3ServiceError::into_s3_error)?;
        }

        let region = options
            .location
            .clone()
            .unwrap_or_else(|| self.config.default_region.clone());

        self.state
            .create_bucket(bucket_name.to_owned(), region, options.object_lock)
            .map_err(S3ServiceError::into_s3_error)?;

        debug!(bucket = %bucket_name, object_lock = options.object_lock, "make_bucket completed");
        Ok(())
    }

    /// Check whether a bucket exists.
    #[must_use]
    pub fn handle_bucket_exists(&self, bucket_name: &str) -> bool {
        self.state.bucket_exists(bucket_name)
    }

    /// List all buckets of this endpoint, sorted by name.
    #[must_use]
    pub fn handle_list_buckets(&self) -> Vec<BucketInfo> {
        self.state.list_buckets()
    }

    /// Remove an empty bucket.
    pub fn handle_remove_bucket(&self, bucket_name: &str) -> Result<(), S3Error> {
        self.state
            .delete_bucket(bucket_name)
            .map_err(S3ServiceError::into_s3_error)?;

        debug!(bucket = %bucket_name, "remove_bucket completed");
        Ok(())
    }

    /// Set the versioning configuration of a bucket.
    pub fn handle_set_bucket_versioning(
        &self,
        bucket_name: &str,
        config: VersioningConfig,
    ) -> Result<(), S3Error> {
        let bucket = self
            .state
            .get_bucket(bucket_name)
            .map_err(S3ServiceError::into_s3_error)?;

        bucket
            .set_versioning(config.status)
            .map_err(|e| e.into_s3_error().with_bucket(bucket_name))?;

        debug!(bucket = %bucket_name, status = %config.status, "set_bucket_versioning completed");
        Ok(())
    }

    /// Get the versioning configuration of a bucket.
    pub fn handle_get_bucket_versioning(
        &self,
        bucket_name: &str,
    ) -> Result<VersioningConfig, S3Error> {
        let bucket = self
            .state
            .get_bucket(bucket_name)
            .map_err(S3ServiceError::into_s3_error)?;

        Ok(VersioningConfig::new(bucket.versioning_status()))
    }
}
