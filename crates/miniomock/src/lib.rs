//! In-memory fake of a MinIO / S3 client for tests.
//!
//! Application code talks to a [`Minio`] handle; instead of a network
//! connection, the handle forwards every call to an emulated server kept in
//! memory and keyed by the endpoint string, so all clients constructed for
//! the same endpoint observe the same buckets and objects.
//!
//! ```
//! use miniomock::{Minio, minio_mock};
//! use miniomock::model::input::ListObjectsArgs;
//! use miniomock::model::input::PutObjectOptions;
//!
//! let _mock = minio_mock();
//! let client = Minio::new("localhost:9000").unwrap();
//! client.make_bucket("photos").unwrap();
//! client
//!     .put_object("photos", "2024/cat.png", vec![1, 2, 3], &PutObjectOptions::default())
//!     .unwrap();
//!
//! let listed = client
//!     .list_objects("photos", &ListObjectsArgs::recursive("2024/"))
//!     .unwrap();
//! assert_eq!(listed.len(), 1);
//! assert_eq!(listed[0].object_name, "2024/cat.png");
//! ```
//!
//! Errors raised by the emulated server carry the same codes as the real
//! service (`NoSuchBucket`, `NoSuchKey`, `BucketNotEmpty`, ...) through
//! [`ClientError::S3`].

pub mod client;
pub mod error;
pub mod fixture;
pub mod presign;

pub use client::{ClientOptions, Minio};
pub use error::{ClientError, ClientResult};
pub use fixture::{MinioMock, MockServers, minio_mock, minio_mock_with_config};
pub use miniomock_model as model;
pub use miniomock_model::{S3Error, S3ErrorCode};
pub use miniomock_s3_core::S3MockConfig;
