//! Optional arguments of emulator operations.

use std::collections::HashMap;

use typed_builder::TypedBuilder;

/// Default content type for uploaded objects.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Options for `make_bucket`.
#[derive(Debug, Clone, Default, TypedBuilder)]
pub struct MakeBucketOptions {
    /// Region (location constraint); the configured default when `None`.
    #[builder(default, setter(into, strip_option))]
    pub location: Option<String>,
    /// Create the bucket with object lock, which also enables versioning.
    #[builder(default)]
    pub object_lock: bool,
}

/// Options for `put_object` and friends.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use miniomock_model::input::PutObjectOptions;
///
/// let options = PutObjectOptions::builder()
///     .content_type("text/plain")
///     .metadata(HashMap::from([("owner".to_owned(), "me".to_owned())]))
///     .build();
/// assert_eq!(options.content_type.as_deref(), Some("text/plain"));
/// ```
#[derive(Debug, Clone, Default, TypedBuilder)]
pub struct PutObjectOptions {
    /// MIME type; `application/octet-stream` when `None`.
    #[builder(default, setter(into, strip_option))]
    pub content_type: Option<String>,
    /// User-defined metadata.
    #[builder(default)]
    pub metadata: HashMap<String, String>,
    /// Object tags.
    #[builder(default)]
    pub tags: Vec<(String, String)>,
}

impl PutObjectOptions {
    /// The effective content type.
    #[must_use]
    pub fn content_type_or_default(&self) -> &str {
        self.content_type.as_deref().unwrap_or(DEFAULT_CONTENT_TYPE)
    }
}

/// Options for `get_object`.
#[derive(Debug, Clone, Default, TypedBuilder)]
pub struct GetObjectOptions {
    /// Version to read; the current version when `None`.
    #[builder(default, setter(into, strip_option))]
    pub version_id: Option<String>,
    /// Start offset of the returned data.
    #[builder(default)]
    pub offset: u64,
    /// Number of bytes to return; everything from `offset` when `None`.
    #[builder(default, setter(strip_option))]
    pub length: Option<u64>,
}

/// Arguments of `list_objects`.
///
/// The default lists the whole bucket non-recursively (grouping on `/`).
#[derive(Debug, Clone, Default, TypedBuilder)]
pub struct ListObjectsArgs {
    /// Only keys starting with this prefix.
    #[builder(default, setter(into))]
    pub prefix: String,
    /// List every key instead of grouping on `/`.
    #[builder(default)]
    pub recursive: bool,
    /// Only keys strictly greater than this one.
    #[builder(default, setter(into))]
    pub start_after: String,
    /// Return every version and delete marker instead of current objects.
    #[builder(default)]
    pub include_version: bool,
    /// Upper bound on returned entries.
    ///
    /// Version listings stop at key boundaries: all versions of a key are
    /// returned together, even when they alone exceed the bound.
    #[builder(default, setter(strip_option))]
    pub max_keys: Option<usize>,
}

impl ListObjectsArgs {
    /// Recursive listing of keys starting with `prefix`.
    #[must_use]
    pub fn recursive(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            recursive: true,
            ..Self::default()
        }
    }

    /// Version listing of keys starting with `prefix`.
    #[must_use]
    pub fn versions(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            include_version: true,
            ..Self::default()
        }
    }
}
