//! Core types and state management for miniomock.
//!
//! This crate provides the building blocks shared by the storage emulator and
//! the client surface: validated connection endpoints and an
//! endpoint-partitioned state store so that every client connected to the same
//! endpoint observes the same buckets.

mod error;
mod state;
mod types;

pub use error::{CoreError, CoreResult};
pub use state::EndpointStore;
pub use types::Endpoint;
