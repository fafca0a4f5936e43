//! Emulator configuration.
//!
//! Provides [`S3MockConfig`], shared by every endpoint server of a
//! `MockServers` registry. Values can be loaded from `MINIOMOCK_*`
//! environment variables.

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

/// Default maximum object size: 5 TiB, the real service's single-object limit.
pub const DEFAULT_MAX_OBJECT_SIZE: u64 = 5 * 1024 * 1024 * 1024 * 1024;

/// Emulator configuration.
///
/// # Examples
///
/// ```
/// use miniomock_s3_core::config::S3MockConfig;
///
/// let config = S3MockConfig::default();
/// assert_eq!(config.default_region, "us-east-1");
/// assert!(config.validate_bucket_names);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct S3MockConfig {
    /// Region recorded on buckets created without a location.
    #[builder(default = String::from("us-east-1"), setter(into))]
    pub default_region: String,

    /// Whether bucket names are checked against the S3 naming rules.
    #[builder(default = true)]
    pub validate_bucket_names: bool,

    /// Largest accepted object, in bytes.
    #[builder(default = DEFAULT_MAX_OBJECT_SIZE)]
    pub max_object_size: u64,

    /// Log filter used by test harnesses when `RUST_LOG` is unset.
    #[builder(default = String::from("warn"), setter(into))]
    pub log_level: String,
}

impl Default for S3MockConfig {
    fn default() -> Self {
        Self {
            default_region: String::from("us-east-1"),
            validate_bucket_names: true,
            max_object_size: DEFAULT_MAX_OBJECT_SIZE,
            log_level: String::from("warn"),
        }
    }
}

impl S3MockConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `MINIOMOCK_DEFAULT_REGION` | `us-east-1` |
    /// | `MINIOMOCK_VALIDATE_BUCKET_NAMES` | `true` |
    /// | `MINIOMOCK_MAX_OBJECT_SIZE` | `5497558138880` |
    /// | `MINIOMOCK_LOG_LEVEL` | `warn` |
    ///
    /// Unparseable numeric values fall back to the default.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(v) = std::env::var("MINIOMOCK_DEFAULT_REGION") {
            config.default_region = v;
        }
        if let Ok(v) = std::env::var("MINIOMOCK_VALIDATE_BUCKET_NAMES") {
            config.validate_bucket_names = parse_bool(&v);
        }
        if let Ok(v) = std::env::var("MINIOMOCK_MAX_OBJECT_SIZE") {
            if let Ok(n) = v.parse::<u64>() {
                config.max_object_size = n;
            }
        }
        if let Ok(v) = std::env::var("MINIOMOCK_LOG_LEVEL") {
            config.log_level = v;
        }

        config
    }
}

/// Parse a string as a boolean, accepting `"1"` and `"true"` (case-insensitive).
fn parse_bool(value: &str) -> bool {
    value == "1" || value.eq_ignore_ascii_case("true")
}
