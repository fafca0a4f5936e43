//! Top-level state of one endpoint server.
//!
//! [`S3ServiceState`] manages the collection of buckets and enforces
//! bucket-name uniqueness. All operations are thread-safe via `DashMap`.

use dashmap::DashMap;
use dashmap::mapref::one::Ref;
use miniomock_model::output::BucketInfo;
use tracing::{debug, info};

use crate::error::S3ServiceError;

use super::bucket::S3Bucket;

/// Service state holding all buckets of an endpoint.
pub struct S3ServiceState {
    /// Bucket name to `S3Bucket` mapping.
    buckets: DashMap<String, S3Bucket>,
}

impl std::fmt::Debug for S3ServiceState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("S3ServiceState")
            .field("bucket_count", &self.buckets.len())
            .finish_non_exhaustive()
    }
}

impl Default for S3ServiceState {
    fn default() -> Self {
        Self::new()
    }
}

impl S3ServiceState {
    /// Create a new, empty service state.
    #[must_use]
    pub fn new() -> Self {
        Self {
            buckets: DashMap::new(),
        }
    }

    /// Create a new bucket.
    ///
    /// # Errors
    ///
    /// Returns [`S3ServiceError::BucketAlreadyOwnedByYou`] if a bucket with
    /// the same name exists.
    pub fn create_bucket(
        &self,
        name: String,
        region: String,
        object_lock_enabled: bool,
    ) -> Result<(), S3ServiceError> {
        match self.buckets.entry(name) {
            dashmap::mapref::entry::Entry::Occupied(entry) => Err(S3ServiceError::BucketAlreadyOwnedByYou {
                bucket: entry.key().clone(),
            }),
            dashmap::mapref::entry::Entry::Vacant(entry) => {
                let name = entry.key().clone();
                entry.insert(S3Bucket::new(name.clone(), region, object_lock_enabled));
                info!(bucket = %name, "bucket created");
                Ok(())
            }
        }
    }

    /// Delete a bucket.
    ///
    /// # Errors
    ///
    /// - [`S3ServiceError::NoSuchBucket`] if the bucket does not exist.
    /// - [`S3ServiceError::BucketNotEmpty`] if any version or delete marker
    ///   remains in it.
    pub fn delete_bucket(&self, name: &str) -> Result<(), S3ServiceError> {
        let removed = self.buckets.remove_if(name, |_, bucket| bucket.is_empty());
        if removed.is_some() {
            info!(bucket = %name, "bucket deleted");
            return Ok(());
        }

        if self.buckets.contains_key(name) {
            Err(S3ServiceError::BucketNotEmpty {
                bucket: name.to_owned(),
            })
        } else {
            Err(S3ServiceError::NoSuchBucket {
                bucket: name.to_owned(),
            })
        }
    }

    /// Get an immutable reference to a bucket.
    ///
    /// # Errors
    ///
    /// Returns [`S3ServiceError::NoSuchBucket`] if the bucket does not exist.
    pub fn get_bucket(&self, name: &str) -> Result<Ref<'_, String, S3Bucket>, S3ServiceError> {
        self.buckets
            .get(name)
            .ok_or_else(|| S3ServiceError::NoSuchBucket {
                bucket: name.to_owned(),
            })
    }

    /// List all buckets sorted by name.
    #[must_use]
    pub fn list_buckets(&self) -> Vec<BucketInfo> {
        let mut buckets: Vec<BucketInfo> = self
            .buckets
            .iter()
            .map(|entry| BucketInfo {
                name: entry.key().clone(),
                creation_date: entry.value().creation_date,
                region: entry.value().region.clone(),
            })
            .collect();
        buckets.sort_by(|a, b| a.name.cmp(&b.name));
        buckets
    }

    /// Check whether a bucket exists.
    #[must_use]
    pub fn bucket_exists(&self, name: &str) -> bool {
        self.buckets.contains_key(name)
    }

    /// Reset all state, removing all buckets.
    pub fn reset(&self) {
        debug!("resetting endpoint state");
        self.buckets.clear();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
