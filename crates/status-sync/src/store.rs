//! Store abstraction for status synchronization
//!
//! The updater only needs a versioned get/update pair. The concrete
//! [`KubeStore`](crate::KubeStore) talks to the API server; tests use the
//! in-memory [`MockStore`](crate::MockStore).

use crate::error::StoreError;
use crds::StatusResource;

/// Versioned object store holding resources of kind `K`
///
/// All async methods must be `Send` to work with Tokio's work-stealing runtime.
#[async_trait::async_trait]
pub trait ResourceStore<K: StatusResource>: Send + Sync {
    /// Fetch the persisted resource, `None` when it does not exist
    async fn get(&self, namespace: &str, name: &str) -> Result<Option<K>, StoreError>;

    /// Persist the status of `resource`, based on its resource version
    async fn update_status(&self, resource: &K) -> Result<(), StoreError>;
}
