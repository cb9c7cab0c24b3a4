//! ClickHouseInstallation status synchronization
//!
//! Persists the in-memory [`ChiStatus`](crds::ChiStatus) of a resource by
//! fetching the stored copy, merging the selected status groups into it and
//! writing it back, retrying failed writes at a fixed interval.
//!
//! # Example
//!
//! ```no_run
//! use crds::{ClickHouseInstallation, CopyStatusOptions, StatusResource};
//! use status_sync::{KubeStore, StatusUpdater, UpdateStatusOptions};
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn example(mut chi: ClickHouseInstallation) -> Result<(), Box<dyn std::error::Error>> {
//! let client = kube::Client::try_default().await?;
//! let updater = StatusUpdater::new(KubeStore::new(client));
//!
//! chi.ensure_status().push_action("reconcile started");
//! updater
//!     .synchronize(&CancellationToken::new(), &mut chi, UpdateStatusOptions::new(CopyStatusOptions::actions()))
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod kube_store;
#[cfg(any(test, feature = "test-util"))]
pub mod mock;
pub mod options;
pub mod store;
pub mod updater;

pub use error::{StoreError, SyncError};
pub use kube_store::KubeStore;
#[cfg(any(test, feature = "test-util"))]
pub use mock::MockStore;
pub use options::{SyncConfig, UpdateStatusOptions};
pub use store::ResourceStore;
pub use updater::StatusUpdater;

#[cfg(test)]
mod updater_test;
