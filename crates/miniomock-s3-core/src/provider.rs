//! Per-endpoint emulator server.
//!
//! [`MockServer`] owns the bucket state of one endpoint. Individual
//! operations are implemented in the `ops` submodules as `handle_*` methods
//! on this type.

use std::sync::Arc;

use miniomock_core::Endpoint;

use crate::config::S3MockConfig;
use crate::state::S3ServiceState;

/// The emulated object-storage server behind one endpoint.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use miniomock_core::Endpoint;
/// use miniomock_s3_core::{MockServer, S3MockConfig};
///
/// let endpoint = Endpoint::new("localhost:9000").unwrap();
/// let server = MockServer::new(endpoint, Arc::new(S3MockConfig::default()));
/// assert!(server.state().list_buckets().is_empty());
/// ```
#[derive(Debug)]
pub struct MockServer {
    /// The endpoint this server answers for.
    pub(crate) endpoint: Endpoint,
    /// Bucket and object state.
    pub(crate) state: S3ServiceState,
    /// Emulator configuration, shared with the other servers of a registry.
    pub(crate) config: Arc<S3MockConfig>,
}

impl MockServer {
    /// Create an empty server for `endpoint`.
    #[must_use]
    pub fn new(endpoint: Endpoint, config: Arc<S3MockConfig>) -> Self {
        Self {
            endpoint,
            state: S3ServiceState::new(),
            config,
        }
    }

    /// Returns the endpoint this server answers for.
    #[must_use]
    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Returns a reference to the service state.
    #[must_use]
    pub fn state(&self) -> &S3ServiceState {
        &self.state
    }

    /// Returns a reference to the emulator configuration.
    #[must_use]
    pub fn config(&self) -> &S3MockConfig {
        &self.config
    }

    /// Drop every bucket of this endpoint.
    pub fn reset(&self) {
        self.state.reset();
    }
}
