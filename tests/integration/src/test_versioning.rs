//! Versioning and delete marker tests.

#[cfg(test)]
mod tests {
    use miniomock::model::input::{GetObjectOptions, ListObjectsArgs};
    use miniomock::model::output::ListedObject;
    use miniomock::model::types::{DeleteObject, VersioningConfig};
    use miniomock::{Minio, S3ErrorCode};

    use crate::{create_test_bucket, mock_client, put};

    fn versioned_bucket(client: &Minio) -> String {
        let bucket = create_test_bucket(client, "ver");
        client
            .set_bucket_versioning(&bucket, VersioningConfig::enabled())
            .unwrap_or_else(|e| panic!("enable versioning failed: {e}"));
        bucket
    }

    fn versions(client: &Minio, bucket: &str) -> Vec<ListedObject> {
        let args = ListObjectsArgs::builder()
            .recursive(true)
            .include_version(true)
            .build();
        client
            .list_objects(bucket, &args)
            .unwrap_or_else(|e| panic!("list versions failed: {e}"))
    }

    fn delete_markers(client: &Minio, bucket: &str) -> usize {
        versions(client, bucket)
            .iter()
            .filter(|o| o.is_delete_marker)
            .count()
    }

    #[test]
    fn test_should_keep_every_version() {
        let (_mock, client) = mock_client();
        let bucket = versioned_bucket(&client);

        let first = put(&client, &bucket, "k", b"one");
        let second = put(&client, &bucket, "k", b"two!");
        let first_id = first.version_id.unwrap_or_else(|| panic!("versioned put has an id"));
        assert!(second.version_id.is_some());
        assert_ne!(second.version_id.as_deref(), Some(first_id.as_str()));

        let old = client
            .get_object(
                &bucket,
                "k",
                &GetObjectOptions::builder().version_id(first_id.clone()).build(),
            )
            .unwrap_or_else(|e| panic!("get old version failed: {e}"));
        assert_eq!(old.data(), b"one");
        assert_eq!(old.stat.version_id.as_deref(), Some(first_id.as_str()));

        let listed = versions(&client, &bucket);
        assert_eq!(listed.len(), 2);
        assert_eq!(listed.iter().filter(|o| o.is_latest).count(), 1);
    }

    #[test]
    fn test_should_stack_delete_markers_on_repeated_removal() {
        let (_mock, client) = mock_client();
        let bucket = versioned_bucket(&client);
        put(&client, &bucket, "k", b"data");

        let removed = client
            .remove_object(&bucket, "k", None)
            .unwrap_or_else(|e| panic!("remove failed: {e}"));
        assert!(removed.delete_marker);
        assert!(removed.delete_marker_version_id.is_some());
        assert_eq!(delete_markers(&client, &bucket), 1);

        let err = client.stat_object(&bucket, "k", None).expect_err("hidden");
        assert_eq!(err.s3_code(), Some(S3ErrorCode::NoSuchKey));

        // a second removal finds the marker already on top
        client
            .remove_object(&bucket, "k", None)
            .unwrap_or_else(|e| panic!("remove failed: {e}"));
        assert_eq!(delete_markers(&client, &bucket), 1);

        put(&client, &bucket, "k", b"again");
        client
            .remove_object(&bucket, "k", None)
            .unwrap_or_else(|e| panic!("remove failed: {e}"));
        assert_eq!(delete_markers(&client, &bucket), 2);
    }

    #[test]
    fn test_should_restore_object_by_removing_marker() {
        let (_mock, client) = mock_client();
        let bucket = versioned_bucket(&client);
        put(&client, &bucket, "k", b"data");

        let removed = client
            .remove_object(&bucket, "k", None)
            .unwrap_or_else(|e| panic!("remove failed: {e}"));
        let marker_id = removed
            .delete_marker_version_id
            .unwrap_or_else(|| panic!("marker id missing"));

        let err = client
            .stat_object(&bucket, "k", Some(&marker_id))
            .expect_err("stat of a delete marker");
        assert_eq!(err.s3_code(), Some(S3ErrorCode::MethodNotAllowed));

        let gone = client
            .remove_object(&bucket, "k", Some(&marker_id))
            .unwrap_or_else(|e| panic!("remove marker failed: {e}"));
        assert!(!gone.delete_marker);
        assert_eq!(gone.delete_marker_version_id, None);
        assert_eq!(gone.version_id.as_deref(), Some(marker_id.as_str()));

        let content = client
            .get_object(&bucket, "k", &GetObjectOptions::default())
            .unwrap_or_else(|e| panic!("get restored object failed: {e}"));
        assert_eq!(content.data(), b"data");
    }

    #[test]
    fn test_should_remove_specific_versions_in_batch() {
        let (_mock, client) = mock_client();
        let bucket = versioned_bucket(&client);
        let first = put(&client, &bucket, "k", b"1");
        let second = put(&client, &bucket, "k", b"2");

        let batch = [first, second]
            .into_iter()
            .map(|w| DeleteObject::with_version_id("k", w.version_id.unwrap_or_default()));
        let result = client
            .remove_objects(&bucket, batch)
            .unwrap_or_else(|e| panic!("remove_objects failed: {e}"));
        assert_eq!(result.object_list.len(), 2);
        assert!(result.error_list.is_empty());
        assert!(versions(&client, &bucket).is_empty());
    }

    #[test]
    fn test_should_report_invalid_entries_in_batch() {
        let (_mock, client) = mock_client();
        let bucket = versioned_bucket(&client);
        put(&client, &bucket, "k", b"1");

        let result = client
            .remove_objects(
                &bucket,
                [
                    DeleteObject::with_version_id("k", "not-a-version"),
                    DeleteObject::with_version_id("k", "00000000-0000-4000-8000-000000000000"),
                ],
            )
            .unwrap_or_else(|e| panic!("remove_objects failed: {e}"));

        // removing an unknown version succeeds without touching the object
        assert_eq!(result.object_list.len(), 1);
        assert_eq!(result.error_list.len(), 1);
        assert_eq!(result.error_list[0].code, S3ErrorCode::InvalidArgument);
        assert_eq!(result.error_list[0].version_id.as_deref(), Some("not-a-version"));
        assert_eq!(versions(&client, &bucket).len(), 1);
    }

    #[test]
    fn test_should_keep_pre_versioning_object_as_null_version() {
        let (_mock, client) = mock_client();
        let bucket = create_test_bucket(&client, "null");
        put(&client, &bucket, "k", b"before");
        client
            .set_bucket_versioning(&bucket, VersioningConfig::enabled())
            .unwrap_or_else(|e| panic!("enable versioning failed: {e}"));
        put(&client, &bucket, "k", b"after versioning");

        let stat = client
            .stat_object(&bucket, "k", Some("null"))
            .unwrap_or_else(|e| panic!("stat null version failed: {e}"));
        assert_eq!(stat.size, 6);
        assert_eq!(stat.version_id, None);

        let latest = client
            .stat_object(&bucket, "k", None)
            .unwrap_or_else(|e| panic!("stat latest failed: {e}"));
        assert_eq!(latest.size, 16);
    }

    #[test]
    fn test_should_replace_null_version_when_suspended() {
        let (_mock, client) = mock_client();
        let bucket = create_test_bucket(&client, "susp");
        put(&client, &bucket, "k", b"before");
        client
            .set_bucket_versioning(&bucket, VersioningConfig::enabled())
            .unwrap_or_else(|e| panic!("enable versioning failed: {e}"));
        put(&client, &bucket, "k", b"versioned");
        client
            .set_bucket_versioning(&bucket, VersioningConfig::suspended())
            .unwrap_or_else(|e| panic!("suspend versioning failed: {e}"));

        let removed = client
            .remove_object(&bucket, "k", None)
            .unwrap_or_else(|e| panic!("remove failed: {e}"));
        assert!(removed.delete_marker);
        assert_eq!(removed.delete_marker_version_id, None);

        // the null object is replaced by a null marker, the uuid version stays
        let listed = versions(&client, &bucket);
        assert_eq!(listed.len(), 2);
        assert_eq!(listed.iter().filter(|o| o.is_delete_marker).count(), 1);

        client
            .remove_object(&bucket, "k", Some("null"))
            .unwrap_or_else(|e| panic!("remove null version failed: {e}"));
        let listed = versions(&client, &bucket);
        assert_eq!(listed.len(), 1);
        assert!(!listed[0].is_delete_marker);
    }

    #[test]
    fn test_should_ignore_version_id_on_unversioned_bucket() {
        let (_mock, client) = mock_client();
        let bucket = create_test_bucket(&client, "plain");
        put(&client, &bucket, "k", b"data");

        let stat = client
            .stat_object(&bucket, "k", Some("anything"))
            .unwrap_or_else(|e| panic!("stat failed: {e}"));
        assert_eq!(stat.size, 4);
    }

    #[test]
    fn test_should_presign_with_version_id() {
        let (_mock, client) = mock_client();
        let bucket = versioned_bucket(&client);
        let written = put(&client, &bucket, "k", b"data");
        let version_id = written.version_id.unwrap_or_default();

        let url = client
            .presigned_get_object(&bucket, "k", None, Some(&version_id))
            .unwrap_or_else(|e| panic!("presign failed: {e}"));
        assert!(url.ends_with(&format!("?versionId={version_id}")));
    }
}
