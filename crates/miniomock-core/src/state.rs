//! Endpoint-scoped state management.
//!
//! Provides [`EndpointStore`], a thread-safe concurrent store that partitions
//! state by connection endpoint. Every client created for the same endpoint
//! receives the same `Arc<T>`, so they observe each other's writes.

use std::sync::Arc;

use dashmap::DashMap;
use tracing::debug;

use crate::types::Endpoint;

/// Thread-safe, endpoint-partitioned state store.
///
/// Each endpoint gets its own isolated state instance of type `T`.
///
/// # Examples
///
/// ```
/// use miniomock_core::{Endpoint, EndpointStore};
///
/// #[derive(Debug, Default)]
/// struct ServerState {
///     counter: std::sync::atomic::AtomicU64,
/// }
///
/// let store = EndpointStore::<ServerState>::new();
/// let endpoint = Endpoint::new("localhost:9000").unwrap();
/// let state = store.get_or_create(&endpoint);
/// state.counter.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
/// ```
#[derive(Debug)]
pub struct EndpointStore<T: Send + Sync> {
    inner: DashMap<Endpoint, Arc<T>>,
}

impl<T: Send + Sync> EndpointStore<T> {
    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: DashMap::new(),
        }
    }

    /// Get the state for the given endpoint, creating it with `init` if it
    /// does not exist yet.
    #[must_use]
    pub fn get_or_insert_with(&self, endpoint: &Endpoint, init: impl FnOnce() -> T) -> Arc<T> {
        self.inner
            .entry(endpoint.clone())
            .or_insert_with(|| {
                debug!(endpoint = %endpoint, "creating endpoint state");
                Arc::new(init())
            })
            .clone()
    }

    /// Get the state for the given endpoint, if it exists.
    #[must_use]
    pub fn get(&self, endpoint: &Endpoint) -> Option<Arc<T>> {
        self.inner.get(endpoint).map(|v| v.clone())
    }

    /// Remove the state for the given endpoint.
    #[must_use]
    pub fn remove(&self, endpoint: &Endpoint) -> Option<Arc<T>> {
        self.inner.remove(endpoint).map(|(_, v)| v)
    }

    /// All endpoints that currently hold state, sorted.
    #[must_use]
    pub fn endpoints(&self) -> Vec<Endpoint> {
        let mut endpoints: Vec<Endpoint> = self.inner.iter().map(|e| e.key().clone()).collect();
        endpoints.sort();
        endpoints
    }

    /// Reset all state in the store.
    pub fn reset(&self) {
        debug!(count = self.inner.len(), "resetting endpoint store");
        self.inner.clear();
    }

    /// Number of endpoints.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl<T: Default + Send + Sync> EndpointStore<T> {
    /// Get or create the default state for the given endpoint.
    #[must_use]
    pub fn get_or_create(&self, endpoint: &Endpoint) -> Arc<T> {
        self.get_or_insert_with(endpoint, T::default)
    }
}

impl<T: Send + Sync> Default for EndpointStore<T> {
    fn default() -> Self {
        Self::new()
    }
}
