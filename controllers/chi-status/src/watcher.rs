//! Kubernetes resource watcher.
//!
//! Runs a `kube_runtime::Controller` over ClickHouseInstallation resources,
//! which handles reconnection, retries and backoff.

use crate::error::ControllerError;
use crate::reconciler::Reconciler;
use crds::ClickHouseInstallation;
use futures::StreamExt;
use kube::Api;
use kube_runtime::{Controller, controller::{Action, Config as ControllerConfig}, watcher};
use status_sync::KubeStore;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

/// Watches ClickHouseInstallation resources until `shutdown` is cancelled.
///
/// Status writes by this controller trigger new events; the reconciler
/// skips installations whose completed spec matches the current one.
pub async fn watch_installations(
    api: Api<ClickHouseInstallation>,
    reconciler: Arc<Reconciler<KubeStore>>,
    concurrency: u16,
    shutdown: CancellationToken,
) -> Result<(), ControllerError> {
    info!("Starting ClickHouseInstallation watcher");

    let error_policy = |obj: Arc<ClickHouseInstallation>, error: &ControllerError, _ctx: Arc<Reconciler<KubeStore>>| {
        error!("Reconciliation error for ClickHouseInstallation {:?}: {}", obj.metadata.name, error);
        Action::requeue(Duration::from_secs(60))
    };

    let reconcile = |obj: Arc<ClickHouseInstallation>, ctx: Arc<Reconciler<KubeStore>>| async move {
        debug!("Reconciling ClickHouseInstallation {:?}", obj.metadata.name);
        ctx.reconcile(&obj).await
    };

    // Debounce batches the burst of events caused by our own status writes.
    let controller_config = ControllerConfig::default()
        .debounce(Duration::from_secs(5))
        .concurrency(concurrency);

    Controller::new(api, watcher::Config::default())
        .with_config(controller_config)
        .graceful_shutdown_on(shutdown.cancelled_owned())
        .run(reconcile, error_policy, reconciler)
        .for_each(|res| async move {
            if let Err(e) = res {
                error!("Controller error for ClickHouseInstallation: {}", e);
            }
        })
        .await;

    info!("ClickHouseInstallation watcher stopped");
    Ok(())
}
