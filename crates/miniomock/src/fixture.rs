//! Endpoint registry and the test fixture guard.
//!
//! [`MockServers`] maps endpoints to emulated servers. [`minio_mock`]
//! installs a fresh registry for the current thread; while the returned
//! [`MinioMock`] guard is alive, [`Minio::new`] connects to it.
//!
//! ```
//! use miniomock::{Minio, minio_mock};
//!
//! let mock = minio_mock();
//! let a = Minio::new("localhost:9000").unwrap();
//! let b = Minio::new("localhost:9000").unwrap();
//! a.make_bucket("shared").unwrap();
//! assert!(b.bucket_exists("shared"));
//! assert_eq!(mock.servers().len(), 1);
//! ```

use std::cell::RefCell;
use std::marker::PhantomData;
use std::sync::Arc;

use miniomock_core::{Endpoint, EndpointStore};
use miniomock_s3_core::{MockServer, S3MockConfig};
use tracing::debug;

use crate::client::{ClientOptions, Minio};
use crate::error::ClientResult;

thread_local! {
    static ACTIVE: RefCell<Option<Arc<MockServers>>> = const { RefCell::new(None) };
    static DEFAULT: Arc<MockServers> = Arc::new(MockServers::new());
}

/// The registry clients on this thread connect to: the one installed by the
/// innermost live [`MinioMock`], else this thread's default registry.
pub(crate) fn active_servers() -> Arc<MockServers> {
    ACTIVE
        .with(|active| active.borrow().clone())
        .unwrap_or_else(|| DEFAULT.with(Arc::clone))
}

/// Endpoint-keyed collection of emulated servers.
#[derive(Debug)]
pub struct MockServers {
    servers: EndpointStore<MockServer>,
    config: Arc<S3MockConfig>,
}

impl Default for MockServers {
    fn default() -> Self {
        Self::new()
    }
}

impl MockServers {
    /// Create an empty registry with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(S3MockConfig::default())
    }

    /// Create an empty registry whose servers use `config`.
    #[must_use]
    pub fn with_config(config: S3MockConfig) -> Self {
        Self {
            servers: EndpointStore::new(),
            config: Arc::new(config),
        }
    }

    /// The server behind `endpoint`, created on first use.
    #[must_use]
    pub fn connect(&self, endpoint: &Endpoint) -> Arc<MockServer> {
        self.servers.get_or_insert_with(endpoint, || {
            MockServer::new(endpoint.clone(), Arc::clone(&self.config))
        })
    }

    /// The server behind `endpoint`, if a client has connected to it.
    #[must_use]
    pub fn server(&self, endpoint: &Endpoint) -> Option<Arc<MockServer>> {
        self.servers.get(endpoint)
    }

    /// Drop every server and its state.
    pub fn reset(&self) {
        debug!(servers = self.servers.len(), "resetting mock servers");
        self.servers.reset();
    }

    /// Number of endpoints with a server.
    #[must_use]
    pub fn len(&self) -> usize {
        self.servers.len()
    }

    /// Whether no endpoint has a server yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.servers.is_empty()
    }

    /// Endpoints with a server.
    #[must_use]
    pub fn endpoints(&self) -> Vec<Endpoint> {
        self.servers.endpoints()
    }

    /// The configuration shared by this registry's servers.
    #[must_use]
    pub fn config(&self) -> &S3MockConfig {
        &self.config
    }
}

/// Guard returned by [`minio_mock`].
///
/// Dropping it reinstates the registry that was active before it was
/// created. Guards are tied to their thread and should be dropped in
/// reverse creation order.
#[derive(Debug)]
pub struct MinioMock {
    servers: Arc<MockServers>,
    previous: Option<Arc<MockServers>>,
    _not_send: PhantomData<*const ()>,
}

impl MinioMock {
    /// The registry installed by this guard.
    #[must_use]
    pub fn servers(&self) -> &Arc<MockServers> {
        &self.servers
    }

    /// Connect a client to `endpoint` on this guard's registry.
    pub fn client(&self, endpoint: impl Into<String>) -> ClientResult<Minio> {
        Minio::connect(&self.servers, endpoint, ClientOptions::default())
    }
}

impl Drop for MinioMock {
    fn drop(&mut self) {
        let previous = self.previous.take();
        ACTIVE.with(|active| *active.borrow_mut() = previous);
        debug!("minio mock uninstalled");
    }
}

/// Install a fresh registry, configured from `MINIOMOCK_*` environment
/// variables, as the active one of the current thread.
#[must_use = "the mock is uninstalled when the guard is dropped"]
pub fn minio_mock() -> MinioMock {
    minio_mock_with_config(S3MockConfig::from_env())
}

/// Install a fresh registry using `config` as the active one of the
/// current thread.
#[must_use = "the mock is uninstalled when the guard is dropped"]
pub fn minio_mock_with_config(config: S3MockConfig) -> MinioMock {
    let servers = Arc::new(MockServers::with_config(config));
    let previous = ACTIVE.with(|active| active.replace(Some(Arc::clone(&servers))));
    debug!("minio mock installed");
    MinioMock {
        servers,
        previous,
        _not_send: PhantomData,
    }
}
