//! Object operation handlers.
//!
//! Implements `put_object`, `get_object`, `stat_object`, `remove_object`
//! and `remove_objects`, plus the version lookup and versioned write shared
//! with the copy and tagging handlers.

use std::collections::HashMap;

use bytes::Bytes;
use miniomock_model::S3Error;
use miniomock_model::input::{GetObjectOptions, PutObjectOptions};
use miniomock_model::output::{
    DeleteError, DeleteResult, DeletedObject, ObjectContent, ObjectStat, ObjectWriteResult,
};
use miniomock_model::types::{DeleteObject, NULL_VERSION_ID, VersioningStatus};
use tracing::debug;

use crate::error::S3ServiceError;
use crate::provider::MockServer;
use crate::state::{ObjectStore, S3Bucket, S3DeleteMarker, S3Object};
use crate::utils::{generate_version_id, resolve_range, visible_version_id};
use crate::validation::{
    validate_metadata, validate_object_key, validate_object_size, validate_tags,
    validate_version_id,
};

/// Resolve the object version a read addresses.
///
/// The version id is ignored while the store has never been versioned.
///
/// # Errors
///
/// - `InvalidArgument` for a malformed version id.
/// - `NoSuchKey` if the key is absent, or has a delete marker as its
///   current version and no version id was given.
/// - `NoSuchVersion` if the key exists but the version does not.
/// - `MethodNotAllowed` if the addressed version is a delete marker.
pub(crate) fn lookup<'a>(
    store: &'a ObjectStore,
    bucket_name: &str,
    key: &str,
    version_id: Option<&str>,
) -> Result<&'a S3Object, S3ServiceError> {
    let no_such_key = || S3ServiceError::NoSuchKey {
        bucket: bucket_name.to_owned(),
        key: key.to_owned(),
    };

    let Some(version_id) = version_id.filter(|_| store.is_versioned()) else {
        return store.get(key).ok_or_else(no_such_key);
    };

    validate_version_id(version_id)?;

    if let Some(obj) = store.get_version(key, version_id) {
        return Ok(obj);
    }
    if store.is_delete_marker(key, version_id) {
        return Err(S3ServiceError::MethodNotAllowed {
            bucket: bucket_name.to_owned(),
            key: key.to_owned(),
        });
    }
    if !store.contains_key(key) {
        return Err(no_such_key());
    }
    Err(S3ServiceError::NoSuchVersion {
        bucket: bucket_name.to_owned(),
        key: key.to_owned(),
        version_id: version_id.to_owned(),
    })
}

/// Build the stat view of a stored version.
pub(crate) fn to_stat(bucket_name: &str, obj: &S3Object) -> ObjectStat {
    ObjectStat {
        bucket_name: bucket_name.to_owned(),
        object_name: obj.key.clone(),
        version_id: visible_version_id(&obj.version_id),
        etag: obj.etag.clone(),
        size: obj.size,
        last_modified: obj.last_modified,
        content_type: obj.content_type.clone(),
        metadata: obj.metadata.clone(),
    }
}

/// Content and attributes of a new object version.
#[derive(Debug)]
pub(crate) struct NewVersion {
    pub(crate) data: Bytes,
    pub(crate) content_type: String,
    pub(crate) metadata: HashMap<String, String>,
    pub(crate) tags: Vec<(String, String)>,
}

impl MockServer {
    /// Validate and store a new version of `key` following the bucket's
    /// versioning status.
    ///
    /// `Enabled` buckets get a fresh version id; otherwise the `"null"`
    /// version is written, replacing any existing `"null"` entry.
    pub(crate) fn write_version(
        &self,
        bucket: &S3Bucket,
        key: &str,
        new: NewVersion,
    ) -> Result<ObjectWriteResult, S3ServiceError> {
        validate_object_key(key)?;
        validate_metadata(&new.metadata)?;
        validate_tags(&new.tags)?;
        validate_object_size(new.data.len() as u64, self.config.max_object_size)?;

        let version_id = if bucket.is_versioning_enabled() {
            generate_version_id()
        } else {
            NULL_VERSION_ID.to_owned()
        };

        let obj = S3Object::new(key, version_id, new.data, new.content_type)
            .with_metadata(new.metadata)
            .with_tags(new.tags);

        let result = ObjectWriteResult {
            bucket_name: bucket.name.clone(),
            object_name: key.to_owned(),
            version_id: visible_version_id(&obj.version_id),
            etag: obj.etag.clone(),
            last_modified: obj.last_modified,
        };

        bucket.objects.write().put(obj);

        debug!(
            bucket = %bucket.name,
            key = %key,
            version_id = ?result.version_id,
            "object version stored"
        );
        Ok(result)
    }
}

/// Remove one object (or one version of it) from `bucket`.
fn remove_version(
    bucket: &S3Bucket,
    key: &str,
    version_id: Option<&str>,
) -> Result<DeletedObject, S3ServiceError> {
    validate_object_key(key)?;

    let status = bucket.versioning_status();
    let mut store = bucket.objects.write();

    let mut deleted = DeletedObject {
        name: key.to_owned(),
        version_id: None,
        delete_marker: false,
        delete_marker_version_id: None,
    };

    if let Some(version_id) = version_id.filter(|_| store.is_versioned()) {
        validate_version_id(version_id)?;
        // Only markers written by this call are reported.
        store.delete_version(key, version_id);
        deleted.version_id = Some(version_id.to_owned());
        return Ok(deleted);
    }

    match status {
        VersioningStatus::Off => {
            store.delete(key);
        }
        VersioningStatus::Enabled => {
            if store.contains_key(key) && !store.is_latest_delete_marker(key) {
                let marker_id = generate_version_id();
                store.put_delete_marker(S3DeleteMarker::new(key, marker_id.clone()));
                deleted.delete_marker = true;
                deleted.delete_marker_version_id = Some(marker_id);
            }
        }
        VersioningStatus::Suspended => {
            if store.contains_key(key) {
                store.put_delete_marker(S3DeleteMarker::new(key, NULL_VERSION_ID));
                deleted.delete_marker = true;
            }
        }
    }
    Ok(deleted)
}

#[allow(clippy::result_large_err)]
impl MockServer {
    /// Upload an object.
    pub fn handle_put_object(
        &self,
        bucket_name: &str,
        key: &str,
        data: Bytes,
        options: &PutObjectOptions,
    ) -> Result<ObjectWriteResult, S3Error> {
        let bucket = self
            .state
            .get_bucket(bucket_name)
            .map_err(S3ServiceError::into_s3_error)?;

        let new = NewVersion {
            data,
            content_type: options.content_type_or_default().to_owned(),
            metadata: options.metadata.clone(),
            tags: options.tags.clone(),
        };
        let result = self
            .write_version(&bucket, key, new)
            .map_err(|e| e.into_s3_error().with_object(bucket_name, key))?;

        debug!(bucket = %bucket_name, key = %key, "put_object completed");
        Ok(result)
    }

    /// Download an object, or a slice of it.
    pub fn handle_get_object(
        &self,
        bucket_name: &str,
        key: &str,
        options: &GetObjectOptions,
    ) -> Result<ObjectContent, S3Error> {
        let bucket = self
            .state
            .get_bucket(bucket_name)
            .map_err(S3ServiceError::into_s3_error)?;

        let store = bucket.objects.read();
        let obj = lookup(&store, bucket_name, key, options.version_id.as_deref())
            .map_err(S3ServiceError::into_s3_error)?;

        let (start, end) = resolve_range(obj.data.len(), options.offset, options.length)
            .map_err(|e| e.into_s3_error().with_object(bucket_name, key))?;

        debug!(bucket = %bucket_name, key = %key, start, end, "get_object completed");

        Ok(ObjectContent {
            stat: to_stat(bucket_name, obj),
            data: obj.data.slice(start..end),
        })
    }

    /// Get an object's attributes without its content.
    pub fn handle_stat_object(
        &self,
        bucket_name: &str,
        key: &str,
        version_id: Option<&str>,
    ) -> Result<ObjectStat, S3Error> {
        let bucket = self
            .state
            .get_bucket(bucket_name)
            .map_err(S3ServiceError::into_s3_error)?;

        let store = bucket.objects.read();
        let obj = lookup(&store, bucket_name, key, version_id)
            .map_err(S3ServiceError::into_s3_error)?;
        Ok(to_stat(bucket_name, obj))
    }

    /// Remove an object, or one version of it.
    ///
    /// Removing an absent key or version is not an error.
    pub fn handle_remove_object(
        &self,
        bucket_name: &str,
        key: &str,
        version_id: Option<&str>,
    ) -> Result<DeletedObject, S3Error> {
        let bucket = self
            .state
            .get_bucket(bucket_name)
            .map_err(S3ServiceError::into_s3_error)?;

        let deleted = remove_version(&bucket, key, version_id)
            .map_err(|e| e.into_s3_error().with_object(bucket_name, key))?;

        debug!(
            bucket = %bucket_name,
            key = %key,
            delete_marker = deleted.delete_marker,
            "remove_object completed"
        );
        Ok(deleted)
    }

    /// Remove several objects. Failing entries are reported in the result
    /// without aborting the batch.
    pub fn handle_remove_objects(
        &self,
        bucket_name: &str,
        objects: Vec<DeleteObject>,
    ) -> Result<DeleteResult, S3Error> {
        let bucket = self
            .state
            .get_bucket(bucket_name)
            .map_err(S3ServiceError::into_s3_error)?;

        let mut result = DeleteResult::default();
        for object in objects {
            match remove_version(&bucket, &object.name, object.version_id.as_deref()) {
                Ok(deleted) => result.object_list.push(deleted),
                Err(err) => result.error_list.push(DeleteError {
                    code: err.code(),
                    message: err.to_string(),
                    name: object.name,
                    version_id: object.version_id,
                }),
            }
        }

        debug!(
            bucket = %bucket_name,
            deleted_count = result.object_list.len(),
            error_count = result.error_list.len(),
            "remove_objects completed"
        );
        Ok(result)
    }
}
