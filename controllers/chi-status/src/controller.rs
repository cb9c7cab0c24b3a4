//! Main controller implementation.
//!
//! This module contains the `Controller` struct that wires the Kubernetes
//! client, the status updater and the watcher together.

use crate::config::Config;
use crate::error::ControllerError;
use crate::reconciler::Reconciler;
use crate::watcher::watch_installations;
use crds::ClickHouseInstallation;
use kube::{Api, Client};
use status_sync::{KubeStore, StatusUpdater};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Main controller for ClickHouseInstallation status management.
pub struct Controller {
    installation_watcher: JoinHandle<Result<(), ControllerError>>,
    shutdown: CancellationToken,
}

impl Controller {
    /// Creates a new controller instance and starts its watcher.
    pub async fn new(config: Config) -> Result<Self, ControllerError> {
        info!("Initializing ClickHouseInstallation status controller");

        let kube_client = Client::try_default().await?;

        let api: Api<ClickHouseInstallation> = match config.namespace.as_deref() {
            Some(ns) => Api::namespaced(kube_client.clone(), ns),
            None => Api::all(kube_client.clone()),
        };

        let shutdown = CancellationToken::new();
        let updater = StatusUpdater::with_config(KubeStore::new(kube_client), config.sync.clone());
        let reconciler = Arc::new(Reconciler::new(updater, config.operator_ip.clone(), shutdown.clone()));

        let installation_watcher = {
            let shutdown = shutdown.clone();
            tokio::spawn(async move { watch_installations(api, reconciler, config.concurrency, shutdown).await })
        };

        Ok(Self {
            installation_watcher,
            shutdown,
        })
    }

    /// Runs the controller until the watcher exits or a shutdown signal arrives.
    pub async fn run(mut self) -> Result<(), ControllerError> {
        info!("ClickHouseInstallation status controller running");

        tokio::select! {
            result = &mut self.installation_watcher => {
                result.map_err(|e| ControllerError::Watch(format!("ClickHouseInstallation watcher panicked: {}", e)))??;
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Shutdown signal received, stopping in-flight status updates");
                self.shutdown.cancel();
                (&mut self.installation_watcher)
                    .await
                    .map_err(|e| ControllerError::Watch(format!("ClickHouseInstallation watcher panicked: {}", e)))??;
            }
        }

        Ok(())
    }
}
