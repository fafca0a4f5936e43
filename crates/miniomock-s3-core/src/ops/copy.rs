//! Server-side copy handlers.
//!
//! Implements `copy_object` and `compose_object`. Both read their sources
//! under the source bucket's read lock, release it, and then write the new
//! version through the regular versioned write path.

use std::collections::HashMap;

use bytes::Bytes;
use miniomock_model::S3Error;
use miniomock_model::input::DEFAULT_CONTENT_TYPE;
use miniomock_model::output::ObjectWriteResult;
use miniomock_model::types::{ComposeSource, CopySource};
use tracing::debug;

use crate::error::S3ServiceError;
use crate::ops::object::{NewVersion, lookup};
use crate::provider::MockServer;
use crate::utils::resolve_range;

#[allow(clippy::result_large_err)]
impl MockServer {
    /// Copy an object version to `bucket_name/key`.
    ///
    /// Content type and tags are copied. The source's metadata is copied
    /// unless `metadata` is given, which replaces it.
    pub fn handle_copy_object(
        &self,
        bucket_name: &str,
        key: &str,
        source: &CopySource,
        metadata: Option<HashMap<String, String>>,
    ) -> Result<ObjectWriteResult, S3Error> {
        let new = {
            let src_bucket = self
                .state
                .get_bucket(&source.bucket_name)
                .map_err(S3ServiceError::into_s3_error)?;
            let store = src_bucket.objects.read();
            let obj = lookup(
                &store,
                &source.bucket_name,
                &source.object_name,
                source.version_id.as_deref(),
            )
            .map_err(S3ServiceError::into_s3_error)?;

            NewVersion {
                data: obj.data.clone(),
                content_type: obj.content_type.clone(),
                metadata: metadata.unwrap_or_else(|| obj.metadata.clone()),
                tags: obj.tags.clone(),
            }
        };

        let bucket = self
            .state
            .get_bucket(bucket_name)
            .map_err(S3ServiceError::into_s3_error)?;
        let result = self
            .write_version(&bucket, key, new)
            .map_err(|e| e.into_s3_error().with_object(bucket_name, key))?;

        debug!(
            bucket = %bucket_name,
            key = %key,
            src_bucket = %source.bucket_name,
            src_key = %source.object_name,
            "copy_object completed"
        );
        Ok(result)
    }

    /// Concatenate the (optionally sliced) sources into `bucket_name/key`.
    ///
    /// The new object's metadata is the sources' metadata merged in order,
    /// later sources winning, overlaid with `metadata` when given.
    pub fn handle_compose_object(
        &self,
        bucket_name: &str,
        key: &str,
        sources: &[ComposeSource],
        metadata: Option<HashMap<String, String>>,
    ) -> Result<ObjectWriteResult, S3Error> {
        if sources.is_empty() {
            return Err(
                S3ServiceError::invalid_argument("compose requires at least one source")
                    .into_s3_error()
                    .with_object(bucket_name, key),
            );
        }

        let mut data = Vec::new();
        let mut merged = HashMap::new();
        for source in sources {
            let src_bucket = self
                .state
                .get_bucket(&source.bucket_name)
                .map_err(S3ServiceError::into_s3_error)?;
            let store = src_bucket.objects.read();
            let obj = lookup(
                &store,
                &source.bucket_name,
                &source.object_name,
                source.version_id.as_deref(),
            )
            .map_err(S3ServiceError::into_s3_error)?;

            let (start, end) =
                resolve_range(obj.data.len(), source.offset.unwrap_or(0), source.length)
                    .map_err(|e| {
                        e.into_s3_error()
                            .with_object(&source.bucket_name, &source.object_name)
                    })?;
            data.extend_from_slice(&obj.data[start..end]);
            merged.extend(obj.metadata.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
        if let Some(metadata) = metadata {
            merged.extend(metadata);
        }

        let bucket = self
            .state
            .get_bucket(bucket_name)
            .map_err(S3ServiceError::into_s3_error)?;
        let new = NewVersion {
            data: Bytes::from(data),
            content_type: DEFAULT_CONTENT_TYPE.to_owned(),
            metadata: merged,
            tags: Vec::new(),
        };
        let result = self
            .write_version(&bucket, key, new)
            .map_err(|e| e.into_s3_error().with_object(bucket_name, key))?;

        debug!(
            bucket = %bucket_name,
            key = %key,
            source_count = sources.len(),
            "compose_object completed"
        );
        Ok(result)
    }
}
