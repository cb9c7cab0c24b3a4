//! Status lifecycle of a ClickHouseInstallation.
//!
//! Every reconcile cycle starts a fresh status aggregate that inherits the
//! histories of the previous one, records per-host progress while the hosts
//! are visited concurrently, and persists the status at each milestone.

use crate::error::ControllerError;
use chrono::Utc;
use crds::{ChiStatus, ClickHouseInstallation, CopyStatusOptions, FillStatusParams, Host, StatusResource};
use futures::future::join_all;
use kube::{Resource, ResourceExt};
use kube_runtime::controller::Action;
use status_sync::{ResourceStore, StatusUpdater, UpdateStatusOptions};
use std::collections::HashSet;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};
use uuid::Uuid;

/// Timestamp-prefixed entry for the action and error histories.
///
/// The prefix makes lexical order chronological, which the history merges rely on.
fn timestamped(message: impl std::fmt::Display) -> String {
    format!("{} {}", Utc::now().format("%Y-%m-%dT%H:%M:%S%.6fZ"), message)
}

/// Drives status updates for ClickHouseInstallation resources
pub struct Reconciler<S> {
    updater: StatusUpdater<S>,
    operator_ip: String,
    shutdown: CancellationToken,
}

impl<S: ResourceStore<ClickHouseInstallation>> Reconciler<S> {
    /// Creates a new reconciler writing through `updater`
    pub fn new(updater: StatusUpdater<S>, operator_ip: String, shutdown: CancellationToken) -> Self {
        Self {
            updater,
            operator_ip,
            shutdown,
        }
    }

    /// Reconcile one observed state of an installation
    pub async fn reconcile(&self, chi: &ClickHouseInstallation) -> Result<Action, ControllerError> {
        if chi.meta().deletion_timestamp.is_some() {
            self.reconcile_delete(chi).await?;
        } else {
            self.reconcile_apply(chi).await?;
        }
        Ok(Action::await_change())
    }

    /// True when the last completed cycle already applied the current spec
    fn is_up_to_date(chi: &ClickHouseInstallation) -> bool {
        chi.status()
            .and_then(ChiStatus::normalized_completed)
            .is_some_and(|completed| completed.spec == chi.spec)
    }

    async fn reconcile_apply(&self, chi: &ClickHouseInstallation) -> Result<(), ControllerError> {
        let namespace = chi.namespace_or_default();
        let name = chi.name_any();

        if Self::is_up_to_date(chi) {
            debug!("ClickHouseInstallation {}/{} is up to date", namespace, name);
            return Ok(());
        }

        let mut local = chi.clone();
        let task_id = chi.spec.task_id.clone().unwrap_or_else(|| Uuid::new_v4().to_string());
        info!("Reconciling ClickHouseInstallation {}/{} (task {})", namespace, name, task_id);

        match self.run_cycle(&mut local, task_id).await {
            Ok(()) => {
                info!("✅ Reconciled ClickHouseInstallation {}/{}", namespace, name);
                Ok(())
            }
            Err(e) => {
                error!("Reconcile of ClickHouseInstallation {}/{} failed: {}", namespace, name, e);
                self.abort_cycle(&mut local, &e).await;
                Err(e)
            }
        }
    }

    async fn run_cycle(&self, chi: &mut ClickHouseInstallation, task_id: String) -> Result<(), ControllerError> {
        let previous = chi.status().cloned().unwrap_or_default();
        let hosts: Vec<Host> = chi.walk_hosts().collect();
        let current_fqdns: HashSet<String> = hosts.iter().map(|host| host.fqdn.clone()).collect();
        let previous_fqdns: HashSet<String> = previous.fqdns().into_iter().collect();
        let removed_hosts = previous_fqdns.difference(&current_fqdns).count();

        let mut normalized = chi.clone();
        normalized.status = None;

        let status = ChiStatus::default();
        status.copy_from(&previous, CopyStatusOptions::inheritable());
        status.fill(FillStatusParams {
            chop_ip: self.operator_ip.clone(),
            clusters_count: chi.clusters_count(),
            shards_count: chi.shards_count(),
            replicas_count: chi.replicas_count(),
            hosts_count: chi.hosts_count(),
            task_id,
            pods: chi.pod_names(),
            fqdns: Some(hosts.iter().map(|host| host.fqdn.clone()).collect()),
            endpoint: chi.endpoint(),
            normalized: Some(Arc::new(normalized)),
            ..FillStatusParams::default()
        });
        for template in &chi.spec.use_templates {
            status.push_used_template(template.clone());
        }
        status.reconcile_start(u32::try_from(removed_hosts).unwrap_or(u32::MAX));
        status.push_action(timestamped("reconcile started"));
        chi.replace_status(status);
        self.sync(chi, CopyStatusOptions::main_fields().union(CopyStatusOptions::actions()))
            .await?;

        {
            let status = chi.status_or_empty();
            join_all(hosts.iter().map(|host| Self::visit_host(status, host, &previous_fqdns))).await;
            for _ in 0..removed_hosts {
                status.host_deleted();
            }
        }
        self.sync(chi, CopyStatusOptions::main_fields().union(CopyStatusOptions::actions()))
            .await?;

        let status = chi.status_or_empty();
        status.sync_host_tables_created();
        status.set_normalized_completed_from_current_normalized();
        status.push_action(timestamped("reconcile completed"));
        status.reconcile_complete();
        self.sync(chi, CopyStatusOptions::whole_status().union(CopyStatusOptions::actions()))
            .await
    }

    /// Record the outcome of reconciling one host
    async fn visit_host(status: &ChiStatus, host: &Host, previous_fqdns: &HashSet<String>) {
        if previous_fqdns.contains(&host.fqdn) {
            status.host_updated();
            status.push_action(timestamped(format_args!("updated host {}/{}", host.cluster, host.name)));
        } else {
            status.host_added();
            status.push_action(timestamped(format_args!("added host {}/{}", host.cluster, host.name)));
        }
        status.push_host_tables_created(host.fqdn.clone());
        status.host_completed();
        tokio::task::yield_now().await;
    }

    async fn abort_cycle(&self, chi: &mut ClickHouseInstallation, cause: &ControllerError) {
        let status = chi.ensure_status();
        status.set_and_push_error(timestamped(cause));
        status.reconcile_abort();
        let result = self
            .sync(chi, CopyStatusOptions::errors().union(CopyStatusOptions::main_fields()))
            .await;
        if let Err(e) = result {
            error!("Failed to record aborted reconcile of {}: {}", chi.name_any(), e);
        }
    }

    async fn reconcile_delete(&self, chi: &ClickHouseInstallation) -> Result<(), ControllerError> {
        info!(
            "ClickHouseInstallation {}/{} is being deleted",
            chi.namespace_or_default(),
            chi.name_any()
        );
        let mut local = chi.clone();
        let status = local.ensure_status();
        status.delete_start();
        status.push_action(timestamped("delete started"));

        let opts = UpdateStatusOptions::new(CopyStatusOptions::main_fields()).tolerating_absence();
        self.updater.synchronize(&self.shutdown, &mut local, opts).await?;
        Ok(())
    }

    async fn sync(&self, chi: &mut ClickHouseInstallation, copy: CopyStatusOptions) -> Result<(), ControllerError> {
        self.updater
            .synchronize(&self.shutdown, chi, UpdateStatusOptions::new(copy))
            .await?;
        Ok(())
    }
}
