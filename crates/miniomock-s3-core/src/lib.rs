//! In-memory object-storage emulator for miniomock.
//!
//! This crate holds the state machine that stands in for a MinIO / S3
//! server: buckets, objects, object versions and delete markers, with the
//! validation and error semantics of the real service. One [`MockServer`]
//! exists per endpoint; the `miniomock` crate routes client calls to it.
//!
//! # Architecture
//!
//! ```text
//! Minio client handle (miniomock)
//!        |
//!        v
//! MockServer (handle_* operations)
//!        |
//!        v
//!   S3ServiceState (buckets)
//!        |
//!        v
//!   ObjectStore (un-versioned / versioned key store)
//! ```

pub mod config;
pub mod error;
mod ops;
pub mod provider;
pub mod state;
pub mod utils;
pub mod validation;

pub use config::S3MockConfig;
pub use provider::MockServer;
