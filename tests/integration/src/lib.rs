//! Behavioural tests for the miniomock client fake.
//!
//! Every test installs its own fixture with [`mock_client`], so the suites
//! run in parallel without sharing state.
//!
//! ```text
//! cargo test -p miniomock-integration
//! ```

use std::sync::Once;

use miniomock::model::input::PutObjectOptions;
use miniomock::model::output::ObjectWriteResult;
use miniomock::{Minio, MinioMock, S3MockConfig, minio_mock};

static INIT: Once = Once::new();

/// Endpoint used by most tests.
pub const ENDPOINT: &str = "http://local.host:9000";

/// Initialize tracing (once). `RUST_LOG` wins over `MINIOMOCK_LOG_LEVEL`.
fn init_tracing() {
    INIT.call_once(|| {
        let fallback = S3MockConfig::from_env().log_level;
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback)),
            )
            .with_test_writer()
            .init();
    });
}

/// Install a fresh fixture and connect a client to [`ENDPOINT`].
///
/// Keep the returned guard alive for the duration of the test.
#[must_use]
pub fn mock_client() -> (MinioMock, Minio) {
    init_tracing();
    let mock = minio_mock();
    let client = Minio::new(ENDPOINT).unwrap_or_else(|e| panic!("client should connect: {e}"));
    (mock, client)
}

/// Generate a unique bucket name for a test.
#[must_use]
pub fn test_bucket_name(prefix: &str) -> String {
    let id = uuid::Uuid::new_v4().to_string()[..8].to_owned();
    format!("test-{prefix}-{id}")
}

/// Create a bucket with a unique name.
#[must_use]
pub fn create_test_bucket(client: &Minio, prefix: &str) -> String {
    let bucket = test_bucket_name(prefix);
    client
        .make_bucket(&bucket)
        .unwrap_or_else(|e| panic!("make_bucket {bucket} failed: {e}"));
    bucket
}

/// Upload `data` with default options.
pub fn put(client: &Minio, bucket: &str, key: &str, data: &[u8]) -> ObjectWriteResult {
    client
        .put_object(bucket, key, data.to_vec(), &PutObjectOptions::default())
        .unwrap_or_else(|e| panic!("put {bucket}/{key} failed: {e}"))
}

mod test_bucket;
mod test_copy;
mod test_error;
mod test_fixture;
mod test_list;
mod test_versioning;
