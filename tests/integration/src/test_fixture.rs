//! Fixture and endpoint sharing tests.

#[cfg(test)]
mod tests {
    use miniomock::model::input::PutObjectOptions;
    use miniomock::{ClientOptions, Minio, S3MockConfig, minio_mock, minio_mock_with_config};

    use crate::{ENDPOINT, mock_client, put};

    #[test]
    fn test_should_share_state_between_clients_of_an_endpoint() {
        let (_mock, client) = mock_client();
        let other = Minio::new(ENDPOINT).unwrap_or_else(|e| panic!("client failed: {e}"));

        client
            .make_bucket("shared")
            .unwrap_or_else(|e| panic!("make_bucket failed: {e}"));
        put(&client, "shared", "k", b"x");

        assert!(other.bucket_exists("shared"));
        assert!(other.stat_object("shared", "k", None).is_ok());
    }

    #[test]
    fn test_should_isolate_endpoints() {
        let (_mock, client) = mock_client();
        let other = Minio::new("http://other.host:9000")
            .unwrap_or_else(|e| panic!("client failed: {e}"));

        client
            .make_bucket("only-here")
            .unwrap_or_else(|e| panic!("make_bucket failed: {e}"));
        assert!(!other.bucket_exists("only-here"));
    }

    #[test]
    fn test_should_start_each_fixture_empty() {
        {
            let (_mock, client) = mock_client();
            client
                .make_bucket("transient")
                .unwrap_or_else(|e| panic!("make_bucket failed: {e}"));
        }
        let (_mock, client) = mock_client();
        assert!(!client.bucket_exists("transient"));
        assert!(client.list_buckets().is_empty());
    }

    #[test]
    fn test_should_reset_all_servers() {
        let (mock, client) = mock_client();
        client
            .make_bucket("gone")
            .unwrap_or_else(|e| panic!("make_bucket failed: {e}"));
        assert_eq!(mock.servers().len(), 1);

        mock.servers().reset();
        assert!(mock.servers().is_empty());

        let fresh = Minio::new(ENDPOINT).unwrap_or_else(|e| panic!("client failed: {e}"));
        assert!(!fresh.bucket_exists("gone"));
    }

    #[test]
    fn test_should_apply_fixture_config() {
        let config = S3MockConfig::builder()
            .default_region("eu-central-1")
            .validate_bucket_names(false)
            .max_object_size(4)
            .build();
        let _mock = minio_mock_with_config(config);
        let client = Minio::new(ENDPOINT).unwrap_or_else(|e| panic!("client failed: {e}"));

        client
            .make_bucket("Loose_Name")
            .unwrap_or_else(|e| panic!("make_bucket failed: {e}"));
        assert_eq!(client.list_buckets()[0].region, "eu-central-1");

        let err = client
            .put_object("Loose_Name", "k", b"too big".to_vec(), &PutObjectOptions::default())
            .expect_err("object over the size limit");
        assert_eq!(err.s3_code(), Some(miniomock::S3ErrorCode::EntityTooLarge));
    }

    #[test]
    fn test_should_derive_url_scheme_from_options() {
        let _mock = minio_mock();
        let insecure = ClientOptions::builder().secure(false).build();
        let client = Minio::with_options("local.host:9000", insecure)
            .unwrap_or_else(|e| panic!("client failed: {e}"));
        assert_eq!(client.base_url(), "http://local.host:9000");

        let secure = Minio::new("local.host:9000").unwrap_or_else(|e| panic!("client failed: {e}"));
        assert_eq!(secure.base_url(), "https://local.host:9000");
    }

    #[test]
    fn test_should_run_fixtures_on_separate_threads() {
        let handles: Vec<_> = (0..4)
            .map(|i| {
                std::thread::spawn(move || {
                    let (_mock, client) = mock_client();
                    let bucket = format!("thread-{i}");
                    client
                        .make_bucket(&bucket)
                        .unwrap_or_else(|e| panic!("make_bucket failed: {e}"));
                    client.list_buckets().len()
                })
            })
            .collect();
        for handle in handles {
            let count = handle.join().unwrap_or_else(|_| panic!("thread panicked"));
            assert_eq!(count, 1);
        }
    }
}
