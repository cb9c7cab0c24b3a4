//! Retrying get-merge-update of resource status

use crate::error::{StoreError, SyncError};
use crate::options::{SyncConfig, UpdateStatusOptions};
use crate::store::ResourceStore;
use crds::{ChiStatus, StatusResource};
use kube::ResourceExt;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Synchronizes local status into the persisted copy of a resource
#[derive(Debug, Clone)]
pub struct StatusUpdater<S> {
    store: S,
    config: SyncConfig,
}

impl<S> StatusUpdater<S> {
    /// Create an updater with the default retry policy (60 attempts, 1s apart)
    pub fn new(store: S) -> Self {
        Self::with_config(store, SyncConfig::default())
    }

    /// Create an updater with an explicit retry policy
    pub fn with_config(store: S, config: SyncConfig) -> Self {
        Self { store, config }
    }

    /// Underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Retry policy
    pub fn config(&self) -> &SyncConfig {
        &self.config
    }
}

/// Namespace and name of a resource, both required to address it
fn address<K: StatusResource>(resource: &K) -> Result<(String, String), SyncError> {
    let name = resource
        .meta()
        .name
        .clone()
        .ok_or_else(|| SyncError::InvalidResource(format!("{} without a name", K::kind(&()))))?;
    let namespace = resource
        .namespace()
        .ok_or_else(|| SyncError::InvalidResource(format!("{} {} without a namespace", K::kind(&()), name)))?;
    Ok((namespace, name))
}

impl<S> StatusUpdater<S> {
    /// Merge the status of `local` into the persisted resource and write it back.
    ///
    /// Fetches the stored copy, folds the groups selected by `opts.copy` into
    /// its status and writes it. Failed writes are retried every
    /// `retry_interval`, up to `max_attempts` times. On success the new
    /// resource version is copied onto `local`.
    ///
    /// Cancellation is checked before every attempt and ends the call with
    /// `Ok(())`. A missing resource is `SyncError::NotFound` unless
    /// `opts.tolerate_absence` is set, in which case fetch failures are
    /// tolerated too.
    pub async fn synchronize<K>(
        &self,
        token: &CancellationToken,
        local: &mut K,
        opts: UpdateStatusOptions,
    ) -> Result<(), SyncError>
    where
        K: StatusResource,
        S: ResourceStore<K>,
    {
        if token.is_cancelled() {
            debug!("Status update cancelled before start");
            return Ok(());
        }

        let (namespace, name) = address(local)?;
        let max_attempts = self.config.max_attempts.max(1);
        let mut last_error: Option<StoreError> = None;

        for attempt in 1..=max_attempts {
            if token.is_cancelled() {
                debug!("Status update of {}/{} cancelled at attempt {}", namespace, name, attempt);
                return Ok(());
            }

            let mut fetched = match self.store.get(&namespace, &name).await {
                Ok(Some(fetched)) => fetched,
                Ok(None) if opts.tolerate_absence => {
                    debug!("{}/{} no longer exists, skipping status update", namespace, name);
                    return Ok(());
                }
                Ok(None) => return Err(SyncError::NotFound { namespace, name }),
                Err(e) if opts.tolerate_absence => {
                    debug!("Could not fetch {}/{} ({}), skipping status update", namespace, name, e);
                    return Ok(());
                }
                Err(e) => return Err(SyncError::Fetch(e)),
            };

            let pre_write_version = fetched.resource_version();
            let local_status: &ChiStatus = local.status().unwrap_or_else(|| ChiStatus::empty());
            fetched.ensure_status().copy_from(local_status, opts.copy);

            match self.store.update_status(&fetched).await {
                Ok(()) => {
                    debug!("Status of {}/{} written at attempt {}", namespace, name, attempt);
                    self.observe_write(&namespace, &name, pre_write_version, local).await;
                    return Ok(());
                }
                Err(e) => {
                    if attempt < max_attempts {
                        warn!(
                            "Status update of {}/{} failed (attempt {}/{}): {}; retrying in {:?}",
                            namespace, name, attempt, max_attempts, e, self.config.retry_interval
                        );
                        last_error = Some(e);
                        tokio::time::sleep(self.config.retry_interval).await;
                    } else {
                        last_error = Some(e);
                    }
                }
            }
        }

        let source = last_error.unwrap_or_else(|| StoreError::Unavailable("no write attempted".to_string()));
        error!(
            "Giving up on status update of {}/{} after {} attempts: {}",
            namespace, name, max_attempts, source
        );
        Err(SyncError::Exhausted {
            attempts: max_attempts,
            source,
        })
    }

    /// Re-read after a successful write and carry the new resource version over to `local`.
    ///
    /// An unchanged version means the write is not visible yet; the write is
    /// still treated as applied.
    async fn observe_write<K>(&self, namespace: &str, name: &str, pre_write_version: Option<String>, local: &mut K)
    where
        K: StatusResource,
        S: ResourceStore<K>,
    {
        match self.store.get(namespace, name).await {
            Ok(Some(current)) => {
                let current_version = current.resource_version();
                if current_version == pre_write_version {
                    info!(
                        "Status write of {}/{} not observed yet, resource version still {:?}",
                        namespace, name, current_version
                    );
                } else {
                    debug!(
                        "{}/{} resource version {:?} -> {:?}",
                        namespace, name, pre_write_version, current_version
                    );
                    local.meta_mut().resource_version = current_version;
                }
            }
            Ok(None) => warn!("{}/{} disappeared right after its status was written", namespace, name),
            Err(e) => warn!(
                "Could not re-read {}/{} after status write: {}; assuming the write landed",
                namespace, name, e
            ),
        }
    }
}
