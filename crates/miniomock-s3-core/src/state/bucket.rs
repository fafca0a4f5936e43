//! Bucket state.
//!
//! An [`S3Bucket`] holds all per-bucket state: the object store and the
//! versioning status. Interior mutability is achieved through
//! `parking_lot::RwLock`.

use chrono::{DateTime, Utc};
use miniomock_model::types::VersioningStatus;
use parking_lot::RwLock;
use tracing::debug;

use super::keystore::ObjectStore;
use crate::error::S3ServiceError;

/// A bucket with all its state.
pub struct S3Bucket {
    /// Bucket name.
    pub name: String,
    /// Region (location) the bucket was created in.
    pub region: String,
    /// When the bucket was created.
    pub creation_date: DateTime<Utc>,
    /// Whether the bucket was created with object lock.
    pub object_lock_enabled: bool,
    /// Object key storage (un-versioned or versioned).
    pub objects: RwLock<ObjectStore>,
    /// Bucket versioning status.
    pub versioning: RwLock<VersioningStatus>,
}

impl std::fmt::Debug for S3Bucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("S3Bucket")
            .field("name", &self.name)
            .field("region", &self.region)
            .field("creation_date", &self.creation_date)
            .field("versioning", &*self.versioning.read())
            .finish_non_exhaustive()
    }
}

impl S3Bucket {
    /// Create a new bucket. Object lock implies versioning.
    #[must_use]
    pub fn new(name: String, region: String, object_lock_enabled: bool) -> Self {
        let bucket = Self {
            name,
            region,
            creation_date: Utc::now(),
            object_lock_enabled,
            objects: RwLock::new(ObjectStore::default()),
            versioning: RwLock::new(VersioningStatus::default()),
        };
        if object_lock_enabled {
            bucket.enable_versioning();
        }
        bucket
    }

    /// Whether the bucket holds no version and no delete marker.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.read().is_empty()
    }

    /// The current versioning status.
    #[must_use]
    pub fn versioning_status(&self) -> VersioningStatus {
        *self.versioning.read()
    }

    /// Whether versioning is currently enabled on this bucket.
    #[must_use]
    pub fn is_versioning_enabled(&self) -> bool {
        self.versioning_status() == VersioningStatus::Enabled
    }

    /// Enable versioning on this bucket.
    ///
    /// If the bucket is currently un-versioned, the object store is
    /// transitioned to a [`super::keystore::VersionedKeyStore`].
    pub fn enable_versioning(&self) {
        let mut status = self.versioning.write();
        if *status != VersioningStatus::Enabled {
            debug!(bucket = %self.name, "enabling versioning");
            self.objects.write().transition_to_versioned();
            *status = VersioningStatus::Enabled;
        }
    }

    /// Suspend versioning on this bucket.
    ///
    /// Version history is kept. New writes receive the `"null"` version ID,
    /// replacing any existing `"null"` version.
    pub fn suspend_versioning(&self) {
        let mut status = self.versioning.write();
        if *status != VersioningStatus::Suspended {
            debug!(bucket = %self.name, "suspending versioning");
            self.objects.write().transition_to_versioned();
            *status = VersioningStatus::Suspended;
        }
    }

    /// Apply a requested versioning status.
    ///
    /// # Errors
    ///
    /// Returns [`S3ServiceError::InvalidArgument`] when `Off` is requested on
    /// a bucket that has been versioned; a bucket can only be suspended.
    pub fn set_versioning(&self, status: VersioningStatus) -> Result<(), S3ServiceError> {
        match status {
            VersioningStatus::Enabled => self.enable_versioning(),
            VersioningStatus::Suspended => self.suspend_versioning(),
            VersioningStatus::Off => {
                if self.versioning_status() != VersioningStatus::Off {
                    return Err(S3ServiceError::invalid_argument(
                        "Versioning cannot be turned off once enabled; suspend it instead",
                    ));
                }
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
