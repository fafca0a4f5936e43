//! Server-side copy and compose tests.

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use miniomock::S3ErrorCode;
    use miniomock::model::input::{GetObjectOptions, PutObjectOptions};
    use miniomock::model::types::{ComposeSource, CopySource, VersioningConfig};

    use crate::{create_test_bucket, mock_client, put};

    fn meta(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect()
    }

    #[test]
    fn test_should_copy_with_replaced_metadata() {
        let (_mock, client) = mock_client();
        let bucket = create_test_bucket(&client, "copy");
        let options = PutObjectOptions::builder()
            .metadata(meta(&[("a", "A"), ("b", "B")]))
            .build();
        client
            .put_object(&bucket, "src", b"payload".to_vec(), &options)
            .unwrap_or_else(|e| panic!("put failed: {e}"));

        client
            .copy_object(&bucket, "dst", &CopySource::new(&bucket, "src"), Some(meta(&[("a", "C")])))
            .unwrap_or_else(|e| panic!("copy failed: {e}"));

        let stat = client
            .stat_object(&bucket, "dst", None)
            .unwrap_or_else(|e| panic!("stat failed: {e}"));
        assert_eq!(stat.metadata, meta(&[("a", "C")]));
        assert_eq!(stat.size, 7);
    }

    #[test]
    fn test_should_copy_across_buckets_keeping_metadata() {
        let (_mock, client) = mock_client();
        let src = create_test_bucket(&client, "src");
        let dst = create_test_bucket(&client, "dst");
        let options = PutObjectOptions::builder()
            .content_type("application/json")
            .metadata(meta(&[("a", "A")]))
            .build();
        client
            .put_object(&src, "doc.json", b"{}".to_vec(), &options)
            .unwrap_or_else(|e| panic!("put failed: {e}"));

        client
            .copy_object(&dst, "doc.json", &CopySource::new(&src, "doc.json"), None)
            .unwrap_or_else(|e| panic!("copy failed: {e}"));

        let content = client
            .get_object(&dst, "doc.json", &GetObjectOptions::default())
            .unwrap_or_else(|e| panic!("get failed: {e}"));
        assert_eq!(content.data(), b"{}");
        assert_eq!(content.stat.content_type, "application/json");
        assert_eq!(content.stat.metadata, meta(&[("a", "A")]));
    }

    #[test]
    fn test_should_copy_old_version() {
        let (_mock, client) = mock_client();
        let bucket = create_test_bucket(&client, "copyver");
        client
            .set_bucket_versioning(&bucket, VersioningConfig::enabled())
            .unwrap_or_else(|e| panic!("enable versioning failed: {e}"));
        let first = put(&client, &bucket, "k", b"first");
        put(&client, &bucket, "k", b"second");

        let source =
            CopySource::new(&bucket, "k").with_version_id(first.version_id.unwrap_or_default());
        let copied = client
            .copy_object(&bucket, "restored", &source, None)
            .unwrap_or_else(|e| panic!("copy failed: {e}"));
        assert!(copied.version_id.is_some());

        let content = client
            .get_object(&bucket, "restored", &GetObjectOptions::default())
            .unwrap_or_else(|e| panic!("get failed: {e}"));
        assert_eq!(content.data(), b"first");
    }

    #[test]
    fn test_should_compose_with_merged_metadata() {
        let (_mock, client) = mock_client();
        let bucket = create_test_bucket(&client, "compose");
        for (key, body, pairs) in [
            ("part1", &b"abc"[..], &[("a", "A")][..]),
            ("part2", &b"def"[..], &[("b", "B")][..]),
        ] {
            let options = PutObjectOptions::builder().metadata(meta(pairs)).build();
            client
                .put_object(&bucket, key, body.to_vec(), &options)
                .unwrap_or_else(|e| panic!("put {key} failed: {e}"));
        }

        let sources = [
            ComposeSource::new(&bucket, "part1"),
            ComposeSource::new(&bucket, "part2"),
        ];
        client
            .compose_object(&bucket, "whole", &sources, Some(meta(&[("a", "C")])))
            .unwrap_or_else(|e| panic!("compose failed: {e}"));

        let content = client
            .get_object(&bucket, "whole", &GetObjectOptions::default())
            .unwrap_or_else(|e| panic!("get failed: {e}"));
        assert_eq!(content.data(), b"abcdef");
        assert_eq!(content.stat.metadata, meta(&[("a", "C"), ("b", "B")]));
    }

    #[test]
    fn test_should_compose_source_ranges() {
        let (_mock, client) = mock_client();
        let bucket = create_test_bucket(&client, "ranges");
        put(&client, &bucket, "digits", b"0123456789");

        let sources = [
            ComposeSource::new(&bucket, "digits").with_range(7, 3),
            ComposeSource::new(&bucket, "digits").with_range(0, 2),
        ];
        client
            .compose_object(&bucket, "mixed", &sources, None)
            .unwrap_or_else(|e| panic!("compose failed: {e}"));

        let content = client
            .get_object(&bucket, "mixed", &GetObjectOptions::default())
            .unwrap_or_else(|e| panic!("get failed: {e}"));
        assert_eq!(content.data(), b"78901");
    }

    #[test]
    fn test_should_fail_copy_into_missing_bucket() {
        let (_mock, client) = mock_client();
        let bucket = create_test_bucket(&client, "nodst");
        put(&client, &bucket, "k", b"x");

        let err = client
            .copy_object("missing", "k", &CopySource::new(&bucket, "k"), None)
            .expect_err("destination bucket missing");
        assert_eq!(err.s3_code(), Some(S3ErrorCode::NoSuchBucket));
    }
}
