//! The `Minio` client handle.
//!
//! [`Minio`] mirrors the call surface of a MinIO client but forwards every
//! call to the in-memory [`MockServer`] of its endpoint.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use miniomock_core::Endpoint;
use miniomock_model::input::{
    GetObjectOptions, ListObjectsArgs, MakeBucketOptions, PutObjectOptions,
};
use miniomock_model::output::{
    BucketInfo, DeleteResult, DeletedObject, ListedObject, ObjectContent, ObjectStat,
    ObjectWriteResult,
};
use miniomock_model::types::{
    ComposeSource, CopySource, DeleteObject, HttpMethod, VersioningConfig,
};
use miniomock_s3_core::MockServer;
use tracing::debug;
use typed_builder::TypedBuilder;

use crate::error::{ClientError, ClientResult};
use crate::fixture::{MockServers, active_servers};
use crate::presign::{MAX_PRESIGNED_EXPIRY, object_url, validate_expiry};

/// Connection options accepted by [`Minio::with_options`].
///
/// Credentials are recorded but never checked.
#[derive(Debug, Clone, TypedBuilder)]
pub struct ClientOptions {
    /// Access key.
    #[builder(default, setter(into, strip_option))]
    pub access_key: Option<String>,
    /// Secret key.
    #[builder(default, setter(into, strip_option))]
    pub secret_key: Option<String>,
    /// Session token.
    #[builder(default, setter(into, strip_option))]
    pub session_token: Option<String>,
    /// Use `https` for endpoints given without a scheme.
    #[builder(default = true)]
    pub secure: bool,
    /// Region.
    #[builder(default, setter(into, strip_option))]
    pub region: Option<String>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            access_key: None,
            secret_key: None,
            session_token: None,
            secure: true,
            region: None,
        }
    }
}

/// A client connected to an emulated endpoint.
///
/// Clients constructed for the same endpoint string share buckets.
///
/// # Examples
///
/// ```
/// use miniomock::{Minio, minio_mock};
/// use miniomock::model::input::{GetObjectOptions, PutObjectOptions};
///
/// let _mock = minio_mock();
/// let client = Minio::new("http://local.host:9000").unwrap();
/// client.make_bucket("test-bucket").unwrap();
/// client
///     .put_object("test-bucket", "hello.txt", b"hi".to_vec(), &PutObjectOptions::default())
///     .unwrap();
/// let content = client
///     .get_object("test-bucket", "hello.txt", &GetObjectOptions::default())
///     .unwrap();
/// assert_eq!(content.data(), b"hi");
/// ```
#[derive(Debug, Clone)]
pub struct Minio {
    endpoint: Endpoint,
    options: ClientOptions,
    server: Arc<MockServer>,
}

impl Minio {
    /// Connect to `endpoint` on the active registry of this thread.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidEndpoint`] if the endpoint is empty or
    /// is neither a host name nor an `http`/`https` URL.
    pub fn new(endpoint: impl Into<String>) -> ClientResult<Self> {
        Self::with_options(endpoint, ClientOptions::default())
    }

    /// Connect to `endpoint` on the active registry with explicit options.
    pub fn with_options(endpoint: impl Into<String>, options: ClientOptions) -> ClientResult<Self> {
        Self::connect(&active_servers(), endpoint, options)
    }

    /// Connect to `endpoint` on the given registry.
    pub fn connect(
        servers: &MockServers,
        endpoint: impl Into<String>,
        options: ClientOptions,
    ) -> ClientResult<Self> {
        let endpoint = Endpoint::new(endpoint)?;
        let server = servers.connect(&endpoint);
        debug!(endpoint = %endpoint, "client connected");
        Ok(Self {
            endpoint,
            options,
            server,
        })
    }

    /// The endpoint this client is connected to.
    #[must_use]
    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// The options this client was created with.
    #[must_use]
    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    /// The base URL object URLs are built on.
    #[must_use]
    pub fn base_url(&self) -> String {
        self.endpoint.base_url(self.options.secure)
    }

    /// The emulated server behind this client.
    #[must_use]
    pub fn server(&self) -> &Arc<MockServer> {
        &self.server
    }

    // -----------------------------------------------------------------------
    // Buckets
    // -----------------------------------------------------------------------

    /// Create a bucket in the default region.
    pub fn make_bucket(&self, bucket_name: &str) -> ClientResult<()> {
        self.make_bucket_with_options(bucket_name, &MakeBucketOptions::default())
    }

    /// Create a bucket with a location and/or object lock.
    pub fn make_bucket_with_options(
        &self,
        bucket_name: &str,
        options: &MakeBucketOptions,
    ) -> ClientResult<()> {
        Ok(self.server.handle_make_bucket(bucket_name, options)?)
    }

    /// Whether the bucket exists.
    #[must_use]
    pub fn bucket_exists(&self, bucket_name: &str) -> bool {
        self.server.handle_bucket_exists(bucket_name)
    }

    /// All buckets of the endpoint, sorted by name.
    #[must_use]
    pub fn list_buckets(&self) -> Vec<BucketInfo> {
        self.server.handle_list_buckets()
    }

    /// Remove an empty bucket.
    pub fn remove_bucket(&self, bucket_name: &str) -> ClientResult<()> {
        Ok(self.server.handle_remove_bucket(bucket_name)?)
    }

    /// Set the bucket's versioning configuration.
    pub fn set_bucket_versioning(
        &self,
        bucket_name: &str,
        config: VersioningConfig,
    ) -> ClientResult<()> {
        Ok(self.server.handle_set_bucket_versioning(bucket_name, config)?)
    }

    /// Get the bucket's versioning configuration.
    pub fn get_bucket_versioning(&self, bucket_name: &str) -> ClientResult<VersioningConfig> {
        Ok(self.server.handle_get_bucket_versioning(bucket_name)?)
    }

    // -----------------------------------------------------------------------
    // Objects
    // -----------------------------------------------------------------------

    /// Upload an object.
    pub fn put_object(
        &self,
        bucket_name: &str,
        object_name: &str,
        data: impl Into<Bytes>,
        options: &PutObjectOptions,
    ) -> ClientResult<ObjectWriteResult> {
        Ok(self
            .server
            .handle_put_object(bucket_name, object_name, data.into(), options)?)
    }

    /// Upload an object read from `reader`.
    ///
    /// With a `length`, exactly that many bytes are read.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidArgument`] if the reader ends before
    /// `length` bytes, and [`ClientError::Io`] if reading fails.
    pub fn put_object_stream(
        &self,
        bucket_name: &str,
        object_name: &str,
        reader: impl Read,
        length: Option<u64>,
        options: &PutObjectOptions,
    ) -> ClientResult<ObjectWriteResult> {
        let mut data = Vec::new();
        match length {
            Some(length) => {
                let read = reader.take(length).read_to_end(&mut data)?;
                if read as u64 != length {
                    return Err(ClientError::InvalidArgument(format!(
                        "stream ended after {read} of {length} bytes"
                    )));
                }
            }
            None => {
                let mut reader = reader;
                reader.read_to_end(&mut data)?;
            }
        }
        self.put_object(bucket_name, object_name, data, options)
    }

    /// Upload the content of a local file.
    pub fn fput_object(
        &self,
        bucket_name: &str,
        object_name: &str,
        file_path: impl AsRef<Path>,
        options: &PutObjectOptions,
    ) -> ClientResult<ObjectWriteResult> {
        let data = std::fs::read(file_path)?;
        self.put_object(bucket_name, object_name, data, options)
    }

    /// Download an object, or a slice of it.
    pub fn get_object(
        &self,
        bucket_name: &str,
        object_name: &str,
        options: &GetObjectOptions,
    ) -> ClientResult<ObjectContent> {
        Ok(self
            .server
            .handle_get_object(bucket_name, object_name, options)?)
    }

    /// Download an object into a local file, returning its attributes.
    pub fn fget_object(
        &self,
        bucket_name: &str,
        object_name: &str,
        file_path: impl AsRef<Path>,
        version_id: Option<&str>,
    ) -> ClientResult<ObjectStat> {
        let options = GetObjectOptions {
            version_id: version_id.map(ToOwned::to_owned),
            ..GetObjectOptions::default()
        };
        let content = self.get_object(bucket_name, object_name, &options)?;
        std::fs::write(file_path, &content.data)?;
        Ok(content.stat)
    }

    /// Get an object's attributes.
    pub fn stat_object(
        &self,
        bucket_name: &str,
        object_name: &str,
        version_id: Option<&str>,
    ) -> ClientResult<ObjectStat> {
        Ok(self
            .server
            .handle_stat_object(bucket_name, object_name, version_id)?)
    }

    /// Remove an object or one of its versions.
    pub fn remove_object(
        &self,
        bucket_name: &str,
        object_name: &str,
        version_id: Option<&str>,
    ) -> ClientResult<DeletedObject> {
        Ok(self
            .server
            .handle_remove_object(bucket_name, object_name, version_id)?)
    }

    /// Remove several objects; per-object failures are reported in the
    /// result.
    pub fn remove_objects(
        &self,
        bucket_name: &str,
        objects: impl IntoIterator<Item = DeleteObject>,
    ) -> ClientResult<DeleteResult> {
        Ok(self
            .server
            .handle_remove_objects(bucket_name, objects.into_iter().collect())?)
    }

    /// List objects (or versions) of a bucket.
    pub fn list_objects(
        &self,
        bucket_name: &str,
        args: &ListObjectsArgs,
    ) -> ClientResult<Vec<ListedObject>> {
        Ok(self.server.handle_list_objects(bucket_name, args)?)
    }

    // -----------------------------------------------------------------------
    // Server-side copy
    // -----------------------------------------------------------------------

    /// Copy an object. `metadata` replaces the source's metadata when given.
    pub fn copy_object(
        &self,
        bucket_name: &str,
        object_name: &str,
        source: &CopySource,
        metadata: Option<HashMap<String, String>>,
    ) -> ClientResult<ObjectWriteResult> {
        Ok(self
            .server
            .handle_copy_object(bucket_name, object_name, source, metadata)?)
    }

    /// Concatenate sources into a new object.
    pub fn compose_object(
        &self,
        bucket_name: &str,
        object_name: &str,
        sources: &[ComposeSource],
        metadata: Option<HashMap<String, String>>,
    ) -> ClientResult<ObjectWriteResult> {
        Ok(self
            .server
            .handle_compose_object(bucket_name, object_name, sources, metadata)?)
    }

    // -----------------------------------------------------------------------
    // Tags
    // -----------------------------------------------------------------------

    /// Tags of an object version.
    pub fn get_object_tags(
        &self,
        bucket_name: &str,
        object_name: &str,
        version_id: Option<&str>,
    ) -> ClientResult<Vec<(String, String)>> {
        Ok(self
            .server
            .handle_get_object_tags(bucket_name, object_name, version_id)?)
    }

    /// Replace the tags of an object version.
    pub fn set_object_tags(
        &self,
        bucket_name: &str,
        object_name: &str,
        version_id: Option<&str>,
        tags: Vec<(String, String)>,
    ) -> ClientResult<()> {
        Ok(self
            .server
            .handle_set_object_tags(bucket_name, object_name, version_id, tags)?)
    }

    /// Remove the tags of an object version.
    pub fn delete_object_tags(
        &self,
        bucket_name: &str,
        object_name: &str,
        version_id: Option<&str>,
    ) -> ClientResult<()> {
        Ok(self
            .server
            .handle_delete_object_tags(bucket_name, object_name, version_id)?)
    }

    // -----------------------------------------------------------------------
    // Presigned URLs
    // -----------------------------------------------------------------------

    /// URL through which `method` could be applied to the object.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidArgument`] if `expires` is not between
    /// one second and seven days.
    pub fn get_presigned_url(
        &self,
        method: HttpMethod,
        bucket_name: &str,
        object_name: &str,
        expires: Duration,
        version_id: Option<&str>,
    ) -> ClientResult<String> {
        validate_expiry(expires)?;
        let url = object_url(&self.base_url(), bucket_name, object_name, version_id);
        debug!(method = %method, bucket = %bucket_name, key = %object_name, "presigned url generated");
        Ok(url)
    }

    /// Presigned `GET` URL of an object.
    pub fn presigned_get_object(
        &self,
        bucket_name: &str,
        object_name: &str,
        expires: Option<Duration>,
        version_id: Option<&str>,
    ) -> ClientResult<String> {
        self.get_presigned_url(
            HttpMethod::Get,
            bucket_name,
            object_name,
            expires.unwrap_or(MAX_PRESIGNED_EXPIRY),
            version_id,
        )
    }

    /// Presigned `PUT` URL of an object.
    pub fn presigned_put_object(
        &self,
        bucket_name: &str,
        object_name: &str,
        expires: Option<Duration>,
    ) -> ClientResult<String> {
        self.get_presigned_url(
            HttpMethod::Put,
            bucket_name,
            object_name,
            expires.unwrap_or(MAX_PRESIGNED_EXPIRY),
            None,
        )
    }
}
