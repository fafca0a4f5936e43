//! Error reporting tests.

#[cfg(test)]
mod tests {
    use miniomock::model::input::{GetObjectOptions, PutObjectOptions};
    use miniomock::model::types::VersioningConfig;
    use miniomock::{ClientError, Minio, S3ErrorCode};

    use crate::{create_test_bucket, mock_client, put};

    #[test]
    fn test_should_return_no_such_bucket_on_put() {
        let (_mock, client) = mock_client();
        let err = client
            .put_object("missing", "k", b"x".to_vec(), &PutObjectOptions::default())
            .expect_err("bucket does not exist");
        let s3 = err.as_s3().unwrap_or_else(|| panic!("expected an S3 error, got {err}"));
        assert_eq!(s3.code, S3ErrorCode::NoSuchBucket);
        assert_eq!(s3.bucket_name.as_deref(), Some("missing"));
    }

    #[test]
    fn test_should_return_no_such_key_with_object_name() {
        let (_mock, client) = mock_client();
        let bucket = create_test_bucket(&client, "nokey");
        let err = client
            .get_object(&bucket, "absent", &GetObjectOptions::default())
            .expect_err("key does not exist");
        let s3 = err.as_s3().unwrap_or_else(|| panic!("expected an S3 error, got {err}"));
        assert_eq!(s3.code, S3ErrorCode::NoSuchKey);
        assert_eq!(s3.object_name.as_deref(), Some("absent"));
    }

    #[test]
    fn test_should_reject_malformed_version_id() {
        let (_mock, client) = mock_client();
        let bucket = create_test_bucket(&client, "badver");
        client
            .set_bucket_versioning(&bucket, VersioningConfig::enabled())
            .unwrap_or_else(|e| panic!("enable versioning failed: {e}"));
        put(&client, &bucket, "k", b"x");

        let err = client
            .stat_object(&bucket, "k", Some("not-a-version"))
            .expect_err("malformed version id");
        assert_eq!(err.s3_code(), Some(S3ErrorCode::InvalidArgument));
    }

    #[test]
    fn test_should_return_no_such_version() {
        let (_mock, client) = mock_client();
        let bucket = create_test_bucket(&client, "nover");
        client
            .set_bucket_versioning(&bucket, VersioningConfig::enabled())
            .unwrap_or_else(|e| panic!("enable versioning failed: {e}"));
        put(&client, &bucket, "k", b"x");

        let err = client
            .stat_object(&bucket, "k", Some("00000000-0000-4000-8000-000000000000"))
            .expect_err("unknown version");
        assert_eq!(err.s3_code(), Some(S3ErrorCode::NoSuchVersion));
    }

    #[test]
    fn test_should_reject_invalid_bucket_name() {
        let (_mock, client) = mock_client();
        let err = client.make_bucket("Invalid_Bucket").expect_err("invalid name");
        assert_eq!(err.s3_code(), Some(S3ErrorCode::InvalidBucketName));
    }

    #[test]
    fn test_should_reject_empty_object_name() {
        let (_mock, client) = mock_client();
        let bucket = create_test_bucket(&client, "emptykey");
        let err = client
            .put_object(&bucket, "", b"x".to_vec(), &PutObjectOptions::default())
            .expect_err("empty key");
        assert_eq!(err.s3_code(), Some(S3ErrorCode::InvalidArgument));
    }

    #[test]
    fn test_should_reject_invalid_endpoint() {
        let _ = mock_client();
        let err = Minio::new("ftp://local.host:21").expect_err("bad scheme");
        assert!(matches!(err, ClientError::InvalidEndpoint { .. }), "got {err:?}");
    }

    #[test]
    fn test_should_format_error_with_code() {
        let (_mock, client) = mock_client();
        let err = client.remove_bucket("missing").expect_err("missing bucket");
        assert!(err.to_string().contains("NoSuchBucket"), "got {err}");
    }
}
