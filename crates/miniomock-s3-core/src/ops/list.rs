//! Listing operation handler.
//!
//! Implements `list_objects` over current objects or, with
//! `include_version`, over every version and delete marker.

use miniomock_model::S3Error;
use miniomock_model::input::ListObjectsArgs;
use miniomock_model::output::ListedObject;
use tracing::debug;

use crate::error::S3ServiceError;
use crate::provider::MockServer;
use crate::state::{ListEntry, ObjectVersion};
use crate::utils::visible_version_id;

/// Delimiter used by non-recursive listings.
const DIRECTORY_DELIMITER: &str = "/";

fn to_listed(bucket_name: &str, entry: ListEntry) -> ListedObject {
    match entry {
        ListEntry::CommonPrefix(prefix) => ListedObject::dir(bucket_name, prefix),
        ListEntry::Version {
            version: ObjectVersion::Object(obj),
            is_latest,
        } => ListedObject {
            bucket_name: bucket_name.to_owned(),
            version_id: visible_version_id(&obj.version_id),
            object_name: obj.key,
            is_dir: false,
            size: obj.size,
            etag: Some(obj.etag),
            last_modified: Some(obj.last_modified),
            is_latest,
            is_delete_marker: false,
            content_type: Some(obj.content_type),
            metadata: obj.metadata,
        },
        ListEntry::Version {
            version: ObjectVersion::DeleteMarker(marker),
            is_latest,
        } => ListedObject {
            bucket_name: bucket_name.to_owned(),
            version_id: visible_version_id(&marker.version_id),
            object_name: marker.key,
            is_dir: false,
            size: 0,
            etag: None,
            last_modified: Some(marker.last_modified),
            is_latest,
            is_delete_marker: true,
            content_type: None,
            metadata: std::collections::HashMap::new(),
        },
    }
}

#[allow(clippy::result_large_err)]
impl MockServer {
    /// List objects of a bucket in key order.
    ///
    /// Non-recursive listings group keys on `/` below the prefix and report
    /// each group once as a directory entry.
    pub fn handle_list_objects(
        &self,
        bucket_name: &str,
        args: &ListObjectsArgs,
    ) -> Result<Vec<ListedObject>, S3Error> {
        let bucket = self
            .state
            .get_bucket(bucket_name)
            .map_err(S3ServiceError::into_s3_error)?;

        let delimiter = if args.recursive {
            ""
        } else {
            DIRECTORY_DELIMITER
        };
        let max_keys = args.max_keys.unwrap_or(usize::MAX);

        let result = {
            let store = bucket.objects.read();
            if args.include_version {
                store.list_object_versions(&args.prefix, delimiter, &args.start_after, max_keys)
            } else {
                store.list_objects(&args.prefix, delimiter, &args.start_after, max_keys)
            }
        };

        debug!(
            bucket = %bucket_name,
            prefix = %args.prefix,
            recursive = args.recursive,
            include_version = args.include_version,
            count = result.entries.len(),
            truncated = result.is_truncated,
            "list_objects completed"
        );

        Ok(result
            .entries
            .into_iter()
            .map(|entry| to_listed(bucket_name, entry))
            .collect())
    }
}
