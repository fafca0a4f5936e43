//! Listing tests.

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use miniomock::Minio;
    use miniomock::model::input::ListObjectsArgs;

    use crate::{create_test_bucket, mock_client, put};

    fn seed(client: &Minio) -> String {
        let bucket = create_test_bucket(client, "list");
        put(client, &bucket, "a/b/object1", b"1");
        put(client, &bucket, "a/b/object2", b"22");
        put(client, &bucket, "a/object3", b"333");
        put(client, &bucket, "object4", b"4444");
        bucket
    }

    fn names(client: &Minio, bucket: &str, args: &ListObjectsArgs) -> BTreeSet<String> {
        client
            .list_objects(bucket, args)
            .unwrap_or_else(|e| panic!("list_objects failed: {e}"))
            .into_iter()
            .map(|o| o.object_name)
            .collect()
    }

    #[test]
    fn test_should_group_root_listing_on_slash() {
        let (_mock, client) = mock_client();
        let bucket = seed(&client);

        let listed = client
            .list_objects(&bucket, &ListObjectsArgs::default())
            .unwrap_or_else(|e| panic!("list_objects failed: {e}"));
        let got: BTreeSet<_> = listed.iter().map(|o| o.object_name.clone()).collect();
        assert_eq!(got, BTreeSet::from(["a/".to_owned(), "object4".to_owned()]));

        let dir = listed
            .iter()
            .find(|o| o.object_name == "a/")
            .unwrap_or_else(|| panic!("directory entry missing"));
        assert!(dir.is_dir);
        assert_eq!(dir.size, 0);
    }

    #[test]
    fn test_should_list_one_level_below_prefix() {
        let (_mock, client) = mock_client();
        let bucket = seed(&client);

        let args = ListObjectsArgs::builder().prefix("a/").build();
        assert_eq!(
            names(&client, &bucket, &args),
            BTreeSet::from(["a/b/".to_owned(), "a/object3".to_owned()])
        );
    }

    #[test]
    fn test_should_list_recursively() {
        let (_mock, client) = mock_client();
        let bucket = seed(&client);

        let all = names(&client, &bucket, &ListObjectsArgs::recursive(""));
        assert_eq!(all.len(), 4);

        let under_a = names(&client, &bucket, &ListObjectsArgs::recursive("a/"));
        assert_eq!(
            under_a,
            BTreeSet::from([
                "a/b/object1".to_owned(),
                "a/b/object2".to_owned(),
                "a/object3".to_owned(),
            ])
        );
    }

    #[test]
    fn test_should_honor_start_after_and_max_keys() {
        let (_mock, client) = mock_client();
        let bucket = seed(&client);

        let args = ListObjectsArgs::builder()
            .recursive(true)
            .start_after("a/b/object1")
            .max_keys(2)
            .build();
        let listed: Vec<String> = client
            .list_objects(&bucket, &args)
            .unwrap_or_else(|e| panic!("list_objects failed: {e}"))
            .into_iter()
            .map(|o| o.object_name)
            .collect();
        assert_eq!(listed, vec!["a/b/object2".to_owned(), "a/object3".to_owned()]);
    }

    #[test]
    fn test_should_list_empty_bucket() {
        let (_mock, client) = mock_client();
        let bucket = create_test_bucket(&client, "empty");
        assert!(names(&client, &bucket, &ListObjectsArgs::recursive("")).is_empty());
    }
}
