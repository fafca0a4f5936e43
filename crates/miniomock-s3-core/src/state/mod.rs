//! Emulator state management.
//!
//! This module provides the in-memory state of one endpoint server:
//!
//! - [`S3ServiceState`] -- owns all buckets of the endpoint
//! - [`S3Bucket`] -- per-bucket state (objects, versioning status)
//! - [`ObjectStore`] / [`KeyStore`] / [`VersionedKeyStore`] -- key-level storage
//! - [`S3Object`] / [`S3DeleteMarker`] / [`ObjectVersion`] -- stored versions
//!
//! # Thread Safety
//!
//! All types are `Send + Sync`. Concurrent access is handled via:
//!
//! - `DashMap` for the bucket table
//! - `parking_lot::RwLock` for the versioning status and the object store

pub(crate) mod bucket;
pub(crate) mod keystore;
pub(crate) mod object;
pub(crate) mod service;

pub use bucket::S3Bucket;
pub use keystore::{KeyStore, ListEntry, ListResult, ObjectStore, VersionedKeyStore};
pub use object::{ObjectVersion, S3DeleteMarker, S3Object};
pub use service::S3ServiceState;
