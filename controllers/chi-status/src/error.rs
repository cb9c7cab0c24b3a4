//! Controller-specific error types.

use kube::Error as KubeError;
use status_sync::SyncError;
use thiserror::Error;

/// Errors that can occur in the ClickHouseInstallation status controller.
#[derive(Debug, Error)]
pub enum ControllerError {
    /// Kubernetes API error
    #[error("Kubernetes error: {0}")]
    Kube(#[from] KubeError),

    /// Status could not be persisted
    #[error("Status sync error: {0}")]
    Sync(#[from] SyncError),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Resource watch failed
    #[error("Resource watch failed: {0}")]
    Watch(String),
}
