//! Bucket lifecycle tests.

#[cfg(test)]
mod tests {
    use miniomock::S3ErrorCode;
    use miniomock::model::input::MakeBucketOptions;
    use miniomock::model::types::{VersioningConfig, VersioningStatus};

    use crate::{create_test_bucket, mock_client, put, test_bucket_name};

    #[test]
    fn test_should_create_and_list_buckets() {
        let (_mock, client) = mock_client();
        let first = create_test_bucket(&client, "list");
        let second = create_test_bucket(&client, "list");

        let names: Vec<String> = client.list_buckets().into_iter().map(|b| b.name).collect();
        assert!(names.contains(&first));
        assert!(names.contains(&second));
        assert!(client.bucket_exists(&first));
        assert!(!client.bucket_exists("never-created"));
    }

    #[test]
    fn test_should_reject_duplicate_bucket() {
        let (_mock, client) = mock_client();
        let bucket = create_test_bucket(&client, "dup");
        let err = client.make_bucket(&bucket).expect_err("duplicate bucket");
        assert_eq!(err.s3_code(), Some(S3ErrorCode::BucketAlreadyOwnedByYou));
    }

    #[test]
    fn test_should_record_bucket_region() {
        let (_mock, client) = mock_client();
        let bucket = test_bucket_name("region");
        let options = MakeBucketOptions::builder().location("eu-west-1").build();
        client
            .make_bucket_with_options(&bucket, &options)
            .unwrap_or_else(|e| panic!("make_bucket failed: {e}"));

        let info = client
            .list_buckets()
            .into_iter()
            .find(|b| b.name == bucket)
            .unwrap_or_else(|| panic!("bucket {bucket} not listed"));
        assert_eq!(info.region, "eu-west-1");
    }

    #[test]
    fn test_should_enable_versioning_with_object_lock() {
        let (_mock, client) = mock_client();
        let bucket = test_bucket_name("lock");
        let options = MakeBucketOptions::builder().object_lock(true).build();
        client
            .make_bucket_with_options(&bucket, &options)
            .unwrap_or_else(|e| panic!("make_bucket failed: {e}"));

        let config = client
            .get_bucket_versioning(&bucket)
            .unwrap_or_else(|e| panic!("get versioning failed: {e}"));
        assert_eq!(config.status, VersioningStatus::Enabled);
    }

    #[test]
    fn test_should_remove_only_empty_bucket() {
        let (_mock, client) = mock_client();
        let bucket = create_test_bucket(&client, "remove");
        put(&client, &bucket, "k", b"data");

        let err = client.remove_bucket(&bucket).expect_err("bucket not empty");
        assert_eq!(err.s3_code(), Some(S3ErrorCode::BucketNotEmpty));

        client
            .remove_object(&bucket, "k", None)
            .unwrap_or_else(|e| panic!("remove_object failed: {e}"));
        client
            .remove_bucket(&bucket)
            .unwrap_or_else(|e| panic!("remove_bucket failed: {e}"));
        assert!(!client.bucket_exists(&bucket));
    }

    #[test]
    fn test_should_keep_versioned_bucket_with_delete_markers() {
        let (_mock, client) = mock_client();
        let bucket = create_test_bucket(&client, "markers");
        client
            .set_bucket_versioning(&bucket, VersioningConfig::enabled())
            .unwrap_or_else(|e| panic!("enable failed: {e}"));
        put(&client, &bucket, "k", b"data");
        client
            .remove_object(&bucket, "k", None)
            .unwrap_or_else(|e| panic!("remove_object failed: {e}"));

        let err = client.remove_bucket(&bucket).expect_err("versions remain");
        assert_eq!(err.s3_code(), Some(S3ErrorCode::BucketNotEmpty));
    }

    #[test]
    fn test_should_fail_removing_missing_bucket() {
        let (_mock, client) = mock_client();
        let err = client.remove_bucket("missing").expect_err("missing bucket");
        assert_eq!(err.s3_code(), Some(S3ErrorCode::NoSuchBucket));
    }

    #[test]
    fn test_should_toggle_versioning_status() {
        let (_mock, client) = mock_client();
        let bucket = create_test_bucket(&client, "toggle");

        let initial = client
            .get_bucket_versioning(&bucket)
            .unwrap_or_else(|e| panic!("get versioning failed: {e}"));
        assert_eq!(initial.status, VersioningStatus::Off);

        client
            .set_bucket_versioning(&bucket, VersioningConfig::enabled())
            .unwrap_or_else(|e| panic!("enable failed: {e}"));
        client
            .set_bucket_versioning(&bucket, VersioningConfig::suspended())
            .unwrap_or_else(|e| panic!("suspend failed: {e}"));
        let config = client
            .get_bucket_versioning(&bucket)
            .unwrap_or_else(|e| panic!("get versioning failed: {e}"));
        assert_eq!(config.status, VersioningStatus::Suspended);
    }
}
