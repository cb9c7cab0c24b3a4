//! Status synchronization errors

use thiserror::Error;

/// Errors reported by a [`ResourceStore`](crate::ResourceStore)
#[derive(Debug, Error)]
pub enum StoreError {
    /// Kubernetes API error
    #[error("Kubernetes error: {0}")]
    Kube(#[from] kube::Error),

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The write carried a stale resource version
    #[error("Conflict: expected resource version {expected}, found {actual}")]
    Conflict {
        /// Version the write was based on
        expected: String,
        /// Version currently persisted
        actual: String,
    },

    /// The store could not be reached
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Errors returned by [`StatusUpdater::synchronize`](crate::StatusUpdater::synchronize)
#[derive(Debug, Error)]
pub enum SyncError {
    /// The resource no longer exists and absence was not tolerated
    #[error("Resource not found: {namespace}/{name}")]
    NotFound {
        /// Namespace of the resource
        namespace: String,
        /// Name of the resource
        name: String,
    },

    /// Reading the persisted resource failed
    #[error("Failed to fetch resource: {0}")]
    Fetch(#[source] StoreError),

    /// Every write attempt failed
    #[error("Status update failed after {attempts} attempts: {source}")]
    Exhausted {
        /// Number of attempts made
        attempts: u32,
        /// Error of the last attempt
        #[source]
        source: StoreError,
    },

    /// The local resource cannot be addressed
    #[error("Invalid resource: {0}")]
    InvalidResource(String),
}
