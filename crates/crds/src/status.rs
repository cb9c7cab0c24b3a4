//! ClickHouseInstallation status
//!
//! [`ChiStatus`] is the status sub-document of a `ClickHouseInstallation`.
//! It is read and written concurrently by the workers of one reconcile cycle,
//! so the document lives behind a single `RwLock` and is only reachable through
//! the methods below. Every method takes the lock exactly once for its whole
//! duration; composite updates such as [`ChiStatus::reconcile_start`] are
//! therefore atomic to observers.

use crate::copy_options::CopyStatusOptions;
use crate::installation::ClickHouseInstallation;
use crate::references::TemplateRef;
use crate::version;
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use schemars::{JsonSchema, Schema, SchemaGenerator};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Cow;
use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::sync::{Arc, LazyLock};

const MAX_ACTIONS: usize = 10;
const MAX_ERRORS: usize = 10;
const MAX_TASK_IDS: usize = 10;

/// Lifecycle phase of the installation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub enum StatusPhase {
    /// A reconcile cycle is running
    InProgress,
    /// The last reconcile cycle finished successfully
    Completed,
    /// The last reconcile cycle was aborted
    Aborted,
    /// The installation is being deleted
    Terminating,
}

impl StatusPhase {
    /// Wire representation of the phase
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusPhase::InProgress => "InProgress",
            StatusPhase::Completed => "Completed",
            StatusPhase::Aborted => "Aborted",
            StatusPhase::Terminating => "Terminating",
        }
    }
}

impl fmt::Display for StatusPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Values written together by [`ChiStatus::fill`]
#[derive(Debug, Clone, Default)]
pub struct FillStatusParams {
    /// IP of the operator pod
    pub chop_ip: String,
    /// Number of clusters
    pub clusters_count: u32,
    /// Number of shards across all clusters
    pub shards_count: u32,
    /// Number of replicas per shard, summed over clusters
    pub replicas_count: u32,
    /// Number of hosts
    pub hosts_count: u32,
    /// Task id of the cycle being started
    pub task_id: String,
    /// Hosts updated so far
    pub hosts_updated_count: u32,
    /// Hosts added so far
    pub hosts_added_count: u32,
    /// Hosts left unchanged so far
    pub hosts_unchanged_count: u32,
    /// Hosts completed so far
    pub hosts_completed_count: u32,
    /// Hosts scheduled for deletion
    pub hosts_delete_count: u32,
    /// Hosts deleted so far
    pub hosts_deleted_count: u32,
    /// Pod names
    pub pods: Vec<String>,
    /// Pod IPs
    pub pod_ips: Vec<String>,
    /// Host FQDNs; `None` means the topology is not known yet
    pub fqdns: Option<Vec<String>>,
    /// Service endpoint
    pub endpoint: String,
    /// Normalized target configuration
    pub normalized: Option<Arc<ClickHouseInstallation>>,
}

fn is_zero(value: &u32) -> bool {
    *value == 0
}

fn preserve_unknown_fields(_: &mut SchemaGenerator) -> Schema {
    schemars::json_schema!({
        "type": "object",
        "x-kubernetes-preserve-unknown-fields": true
    })
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
struct StatusDocument {
    #[serde(rename = "chop-version", default, skip_serializing_if = "String::is_empty")]
    chop_version: String,
    #[serde(rename = "chop-commit", default, skip_serializing_if = "String::is_empty")]
    chop_commit: String,
    #[serde(rename = "chop-date", default, skip_serializing_if = "String::is_empty")]
    chop_date: String,
    #[serde(rename = "chop-ip", default, skip_serializing_if = "String::is_empty")]
    chop_ip: String,
    #[serde(rename = "clusters", default, skip_serializing_if = "is_zero")]
    clusters_count: u32,
    #[serde(rename = "shards", default, skip_serializing_if = "is_zero")]
    shards_count: u32,
    #[serde(rename = "replicas", default, skip_serializing_if = "is_zero")]
    replicas_count: u32,
    #[serde(rename = "hosts", default, skip_serializing_if = "is_zero")]
    hosts_count: u32,
    #[serde(rename = "status", default, skip_serializing_if = "Option::is_none")]
    phase: Option<StatusPhase>,
    #[serde(rename = "taskID", default, skip_serializing_if = "String::is_empty")]
    task_id: String,
    #[serde(rename = "taskIDsStarted", default, skip_serializing_if = "Vec::is_empty")]
    task_ids_started: Vec<String>,
    #[serde(rename = "taskIDsCompleted", default, skip_serializing_if = "Vec::is_empty")]
    task_ids_completed: Vec<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    action: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    actions: Vec<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    error: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    errors: Vec<String>,
    #[serde(rename = "hostsUpdated", default, skip_serializing_if = "is_zero")]
    hosts_updated_count: u32,
    #[serde(rename = "hostsAdded", default, skip_serializing_if = "is_zero")]
    hosts_added_count: u32,
    #[serde(rename = "hostsUnchanged", default, skip_serializing_if = "is_zero")]
    hosts_unchanged_count: u32,
    #[serde(rename = "hostsFailed", default, skip_serializing_if = "is_zero")]
    hosts_failed_count: u32,
    #[serde(rename = "hostsCompleted", default, skip_serializing_if = "is_zero")]
    hosts_completed_count: u32,
    #[serde(rename = "hostsDeleted", default, skip_serializing_if = "is_zero")]
    hosts_deleted_count: u32,
    #[serde(rename = "hostsDelete", default, skip_serializing_if = "is_zero")]
    hosts_delete_count: u32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pods: Vec<String>,
    #[serde(rename = "pod-ips", default, skip_serializing_if = "Vec::is_empty")]
    pod_ips: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    fqdns: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    endpoint: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(schema_with = "preserve_unknown_fields")]
    normalized: Option<Arc<ClickHouseInstallation>>,
    #[serde(rename = "normalizedCompleted", default, skip_serializing_if = "Option::is_none")]
    #[schemars(schema_with = "preserve_unknown_fields")]
    normalized_completed: Option<Arc<ClickHouseInstallation>>,
    #[serde(rename = "hostsWithTablesCreated", default, skip_serializing_if = "Vec::is_empty")]
    hosts_with_tables_created: Vec<String>,
    #[serde(rename = "usedTemplates", default, skip_serializing_if = "Vec::is_empty")]
    used_templates: Vec<TemplateRef>,
}

/// Push `item` onto the front of `list`, dropping the oldest entries beyond `cap`.
fn push_capped(list: &mut Vec<String>, item: String, cap: usize) {
    list.insert(0, item);
    list.truncate(cap);
}

/// Union of both lists with duplicates collapsed, sorted in descending order.
///
/// Entries are timestamp-prefixed, so descending order is newest-first.
fn merge_descending(current: &[String], incoming: &[String]) -> Vec<String> {
    let union: BTreeSet<&String> = current.iter().chain(incoming).collect();
    union.into_iter().rev().cloned().collect()
}

impl StatusDocument {
    fn push_task_id_started(&mut self) {
        let task_id = self.task_id.clone();
        push_capped(&mut self.task_ids_started, task_id, MAX_TASK_IDS);
    }

    fn push_task_id_completed(&mut self) {
        let task_id = self.task_id.clone();
        push_capped(&mut self.task_ids_completed, task_id, MAX_TASK_IDS);
    }

    fn reset_host_counters(&mut self) {
        self.hosts_updated_count = 0;
        self.hosts_added_count = 0;
        self.hosts_unchanged_count = 0;
        self.hosts_failed_count = 0;
        self.hosts_completed_count = 0;
        self.hosts_deleted_count = 0;
    }

    fn merge_actions(&mut self, from: &StatusDocument) {
        self.actions = merge_descending(&self.actions, &from.actions);
        self.actions.truncate(MAX_ACTIONS);
    }

    fn copy_main_fields(&mut self, from: &StatusDocument) {
        self.chop_version.clone_from(&from.chop_version);
        self.chop_commit.clone_from(&from.chop_commit);
        self.chop_date.clone_from(&from.chop_date);
        self.chop_ip.clone_from(&from.chop_ip);
        self.clusters_count = from.clusters_count;
        self.shards_count = from.shards_count;
        self.replicas_count = from.replicas_count;
        self.hosts_count = from.hosts_count;
        self.phase = from.phase;
        self.task_id.clone_from(&from.task_id);
        self.task_ids_started.clone_from(&from.task_ids_started);
        self.task_ids_completed.clone_from(&from.task_ids_completed);
        self.action.clone_from(&from.action);
        self.merge_actions(from);
        self.error.clone_from(&from.error);
        self.errors.clone_from(&from.errors);
        self.hosts_updated_count = from.hosts_updated_count;
        self.hosts_added_count = from.hosts_added_count;
        self.hosts_unchanged_count = from.hosts_unchanged_count;
        self.hosts_failed_count = from.hosts_failed_count;
        self.hosts_completed_count = from.hosts_completed_count;
        self.hosts_deleted_count = from.hosts_deleted_count;
        self.hosts_delete_count = from.hosts_delete_count;
        self.pods.clone_from(&from.pods);
        self.pod_ips.clone_from(&from.pod_ips);
        self.fqdns.clone_from(&from.fqdns);
        self.endpoint.clone_from(&from.endpoint);
        self.normalized.clone_from(&from.normalized);
    }

    fn copy_from(&mut self, from: &StatusDocument, opts: CopyStatusOptions) {
        if opts.inheritable_fields {
            self.task_ids_started.clone_from(&from.task_ids_started);
            self.task_ids_completed.clone_from(&from.task_ids_completed);
            self.actions.clone_from(&from.actions);
            self.errors.clone_from(&from.errors);
            self.hosts_with_tables_created.clone_from(&from.hosts_with_tables_created);
        }

        if opts.actions {
            self.action.clone_from(&from.action);
            self.merge_actions(from);
            self.hosts_with_tables_created.clone_from(&from.hosts_with_tables_created);
            self.used_templates.clone_from(&from.used_templates);
        }

        if opts.errors {
            self.error.clone_from(&from.error);
            // No cap here: the history is only bounded at push time.
            self.errors = merge_descending(&self.errors, &from.errors);
        }

        if opts.main_fields {
            self.copy_main_fields(from);
        }

        if opts.normalized {
            self.normalized.clone_from(&from.normalized);
        }

        if opts.whole_status {
            self.copy_main_fields(from);
            self.normalized_completed.clone_from(&from.normalized_completed);
        }
    }
}

static EMPTY_STATUS: LazyLock<ChiStatus> = LazyLock::new(|| ChiStatus {
    inner: RwLock::new(StatusDocument::default()),
    sealed: true,
});

/// Synchronized status of a ClickHouseInstallation
///
/// All reads take the shared lock and return owned values; all writes take
/// the exclusive lock. The lock is never held across an `.await`.
#[derive(Debug, Default)]
pub struct ChiStatus {
    inner: RwLock<StatusDocument>,
    /// Sealed aggregates ignore every mutation (see [`ChiStatus::empty`]).
    sealed: bool,
}

impl ChiStatus {
    /// Shared, permanently empty status returned for resources without one.
    ///
    /// Accessors yield defaults and mutators are no-ops.
    pub fn empty() -> &'static ChiStatus {
        &EMPTY_STATUS
    }

    fn from_document(document: StatusDocument) -> Self {
        Self {
            inner: RwLock::new(document),
            sealed: false,
        }
    }

    fn read<R>(&self, f: impl FnOnce(&StatusDocument) -> R) -> R {
        f(&self.inner.read())
    }

    fn write(&self, f: impl FnOnce(&mut StatusDocument)) {
        if self.sealed {
            return;
        }
        f(&mut self.inner.write());
    }

    /// Lock `dst` for writing and `src` for reading, always in address order
    /// so that opposite-direction merges cannot deadlock.
    fn lock_pair<'a>(
        dst: &'a ChiStatus,
        src: &'a ChiStatus,
    ) -> (RwLockWriteGuard<'a, StatusDocument>, RwLockReadGuard<'a, StatusDocument>) {
        if std::ptr::from_ref(dst) < std::ptr::from_ref(src) {
            let dst_guard = dst.inner.write();
            let src_guard = src.inner.read();
            (dst_guard, src_guard)
        } else {
            let src_guard = src.inner.read();
            let dst_guard = dst.inner.write();
            (dst_guard, src_guard)
        }
    }

    /// Bulk initialization at the start of a reconcile.
    ///
    /// Build info always comes from the running binary; everything else from `params`.
    pub fn fill(&self, params: FillStatusParams) {
        self.write(|s| {
            s.chop_version = version::VERSION.to_string();
            s.chop_commit = version::GIT_SHA.to_string();
            s.chop_date = version::BUILT_AT.to_string();

            s.chop_ip = params.chop_ip;
            s.clusters_count = params.clusters_count;
            s.shards_count = params.shards_count;
            s.replicas_count = params.replicas_count;
            s.hosts_count = params.hosts_count;
            s.task_id = params.task_id;
            s.hosts_updated_count = params.hosts_updated_count;
            s.hosts_added_count = params.hosts_added_count;
            s.hosts_unchanged_count = params.hosts_unchanged_count;
            s.hosts_completed_count = params.hosts_completed_count;
            s.hosts_delete_count = params.hosts_delete_count;
            s.hosts_deleted_count = params.hosts_deleted_count;
            s.pods = params.pods;
            s.pod_ips = params.pod_ips;
            s.fqdns = params.fqdns;
            s.endpoint = params.endpoint;
            s.normalized = params.normalized;
        });
    }

    /// Set the current action without recording it in the history
    pub fn set_action(&self, action: impl Into<String>) {
        let action = action.into();
        self.write(|s| s.action = action);
    }

    /// Record an action in the history (newest first, bounded)
    pub fn push_action(&self, action: impl Into<String>) {
        let action = action.into();
        self.write(|s| push_capped(&mut s.actions, action, MAX_ACTIONS));
    }

    /// Set the current error without recording it in the history
    pub fn set_error(&self, error: impl Into<String>) {
        let error = error.into();
        self.write(|s| s.error = error);
    }

    /// Record an error in the history (newest first, bounded)
    pub fn push_error(&self, error: impl Into<String>) {
        let error = error.into();
        self.write(|s| push_capped(&mut s.errors, error, MAX_ERRORS));
    }

    /// Set the current error and record it in the history
    pub fn set_and_push_error(&self, error: impl Into<String>) {
        let error = error.into();
        self.write(|s| {
            s.error.clone_from(&error);
            push_capped(&mut s.errors, error, MAX_ERRORS);
        });
    }

    /// Record that tables were created on `host`; duplicates are ignored
    pub fn push_host_tables_created(&self, host: impl Into<String>) {
        let host = host.into();
        self.write(|s| {
            if !s.hosts_with_tables_created.contains(&host) {
                s.hosts_with_tables_created.push(host);
            }
        });
    }

    /// Drop tables-created entries for hosts that are no longer part of the topology.
    ///
    /// Does nothing while the FQDN list is unknown.
    pub fn sync_host_tables_created(&self) {
        self.write(|s| {
            let Some(fqdns) = s.fqdns.as_ref() else {
                return;
            };
            let live: HashSet<&String> = fqdns.iter().collect();
            s.hosts_with_tables_created.retain(|host| live.contains(host));
        });
    }

    /// Record a template applied to this installation
    pub fn push_used_template(&self, template: TemplateRef) {
        self.write(|s| s.used_templates.push(template));
    }

    /// Number of templates applied to this installation
    pub fn used_templates_count(&self) -> usize {
        self.read(|s| s.used_templates.len())
    }

    /// Replace the pod IP list
    pub fn set_pod_ips(&self, pod_ips: Vec<String>) {
        self.write(|s| s.pod_ips = pod_ips);
    }

    /// Count a deleted host
    pub fn host_deleted(&self) {
        self.write(|s| s.hosts_deleted_count += 1);
    }

    /// Count an updated host
    pub fn host_updated(&self) {
        self.write(|s| s.hosts_updated_count += 1);
    }

    /// Count an added host
    pub fn host_added(&self) {
        self.write(|s| s.hosts_added_count += 1);
    }

    /// Count an unchanged host
    pub fn host_unchanged(&self) {
        self.write(|s| s.hosts_unchanged_count += 1);
    }

    /// Count a failed host
    pub fn host_failed(&self) {
        self.write(|s| s.hosts_failed_count += 1);
    }

    /// Count a completed host
    pub fn host_completed(&self) {
        self.write(|s| s.hosts_completed_count += 1);
    }

    /// Mark the start of a reconcile cycle.
    ///
    /// Resets the per-cycle host counters and pushes the current task id onto
    /// the started history under one lock acquisition.
    pub fn reconcile_start(&self, delete_hosts_count: u32) {
        self.write(|s| {
            s.phase = Some(StatusPhase::InProgress);
            s.reset_host_counters();
            s.hosts_delete_count = delete_hosts_count;
            s.push_task_id_started();
        });
    }

    /// Mark the successful end of a reconcile cycle
    pub fn reconcile_complete(&self) {
        self.write(|s| {
            s.phase = Some(StatusPhase::Completed);
            s.action.clear();
            s.push_task_id_completed();
        });
    }

    /// Mark an aborted reconcile cycle
    pub fn reconcile_abort(&self) {
        self.write(|s| {
            s.phase = Some(StatusPhase::Aborted);
            s.action.clear();
            s.push_task_id_completed();
        });
    }

    /// Mark the start of a deletion
    pub fn delete_start(&self) {
        self.write(|s| {
            s.phase = Some(StatusPhase::Terminating);
            s.reset_host_counters();
            s.hosts_delete_count = 0;
            s.push_task_id_started();
        });
    }

    /// Copy the field groups selected by `opts` from `from` into `self`.
    ///
    /// Both locks are held for the whole merge. Copying a status into itself
    /// is a no-op.
    pub fn copy_from(&self, from: &ChiStatus, opts: CopyStatusOptions) {
        if self.sealed || std::ptr::eq(self, from) {
            return;
        }
        let (mut dst, src) = Self::lock_pair(self, from);
        dst.copy_from(&src, opts);
    }

    /// Forget the normalized target configuration
    pub fn clear_normalized(&self) {
        self.write(|s| s.normalized = None);
    }

    /// Promote the normalized configuration to the completed one (shared, not copied)
    pub fn set_normalized_completed_from_current_normalized(&self) {
        self.write(|s| s.normalized_completed.clone_from(&s.normalized));
    }

    /// Whether a normalized configuration is recorded
    pub fn has_normalized(&self) -> bool {
        self.read(|s| s.normalized.is_some())
    }

    /// Whether a completed configuration is recorded
    pub fn has_normalized_completed(&self) -> bool {
        self.read(|s| s.normalized_completed.is_some())
    }

    /// Operator version
    pub fn chop_version(&self) -> String {
        self.read(|s| s.chop_version.clone())
    }

    /// Operator build commit
    pub fn chop_commit(&self) -> String {
        self.read(|s| s.chop_commit.clone())
    }

    /// Operator build date
    pub fn chop_date(&self) -> String {
        self.read(|s| s.chop_date.clone())
    }

    /// Operator pod IP
    pub fn chop_ip(&self) -> String {
        self.read(|s| s.chop_ip.clone())
    }

    /// Clusters count
    pub fn clusters_count(&self) -> u32 {
        self.read(|s| s.clusters_count)
    }

    /// Shards count
    pub fn shards_count(&self) -> u32 {
        self.read(|s| s.shards_count)
    }

    /// Replicas count
    pub fn replicas_count(&self) -> u32 {
        self.read(|s| s.replicas_count)
    }

    /// Hosts count
    pub fn hosts_count(&self) -> u32 {
        self.read(|s| s.hosts_count)
    }

    /// Lifecycle phase
    pub fn phase(&self) -> Option<StatusPhase> {
        self.read(|s| s.phase)
    }

    /// Current task id
    pub fn task_id(&self) -> String {
        self.read(|s| s.task_id.clone())
    }

    /// Started task ids, newest first
    pub fn task_ids_started(&self) -> Vec<String> {
        self.read(|s| s.task_ids_started.clone())
    }

    /// Completed task ids, newest first
    pub fn task_ids_completed(&self) -> Vec<String> {
        self.read(|s| s.task_ids_completed.clone())
    }

    /// Current action
    pub fn action(&self) -> String {
        self.read(|s| s.action.clone())
    }

    /// Action history, newest first
    pub fn actions(&self) -> Vec<String> {
        self.read(|s| s.actions.clone())
    }

    /// Current error
    pub fn error(&self) -> String {
        self.read(|s| s.error.clone())
    }

    /// Error history, newest first
    pub fn errors(&self) -> Vec<String> {
        self.read(|s| s.errors.clone())
    }

    /// Updated hosts counter
    pub fn hosts_updated_count(&self) -> u32 {
        self.read(|s| s.hosts_updated_count)
    }

    /// Added hosts counter
    pub fn hosts_added_count(&self) -> u32 {
        self.read(|s| s.hosts_added_count)
    }

    /// Unchanged hosts counter
    pub fn hosts_unchanged_count(&self) -> u32 {
        self.read(|s| s.hosts_unchanged_count)
    }

    /// Failed hosts counter
    pub fn hosts_failed_count(&self) -> u32 {
        self.read(|s| s.hosts_failed_count)
    }

    /// Completed hosts counter
    pub fn hosts_completed_count(&self) -> u32 {
        self.read(|s| s.hosts_completed_count)
    }

    /// Deleted hosts counter
    pub fn hosts_deleted_count(&self) -> u32 {
        self.read(|s| s.hosts_deleted_count)
    }

    /// Hosts scheduled for deletion
    pub fn hosts_delete_count(&self) -> u32 {
        self.read(|s| s.hosts_delete_count)
    }

    /// Pod names
    pub fn pods(&self) -> Vec<String> {
        self.read(|s| s.pods.clone())
    }

    /// Pod IPs
    pub fn pod_ips(&self) -> Vec<String> {
        self.read(|s| s.pod_ips.clone())
    }

    /// Host FQDNs; empty when unknown
    pub fn fqdns(&self) -> Vec<String> {
        self.read(|s| s.fqdns.clone().unwrap_or_default())
    }

    /// Whether the FQDN list has been recorded
    pub fn has_fqdns(&self) -> bool {
        self.read(|s| s.fqdns.is_some())
    }

    /// Service endpoint
    pub fn endpoint(&self) -> String {
        self.read(|s| s.endpoint.clone())
    }

    /// Normalized target configuration
    pub fn normalized(&self) -> Option<Arc<ClickHouseInstallation>> {
        self.read(|s| s.normalized.clone())
    }

    /// Last successfully applied configuration
    pub fn normalized_completed(&self) -> Option<Arc<ClickHouseInstallation>> {
        self.read(|s| s.normalized_completed.clone())
    }

    /// Hosts with tables created
    pub fn hosts_with_tables_created(&self) -> Vec<String> {
        self.read(|s| s.hosts_with_tables_created.clone())
    }

    /// Templates applied to this installation
    pub fn used_templates(&self) -> Vec<TemplateRef> {
        self.read(|s| s.used_templates.clone())
    }
}

impl Clone for ChiStatus {
    fn clone(&self) -> Self {
        Self::from_document(self.read(StatusDocument::clone))
    }
}

impl Serialize for ChiStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.inner.read().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ChiStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        StatusDocument::deserialize(deserializer).map(Self::from_document)
    }
}

impl JsonSchema for ChiStatus {
    fn schema_name() -> Cow<'static, str> {
        "ChiStatus".into()
    }

    fn json_schema(generator: &mut SchemaGenerator) -> Schema {
        StatusDocument::json_schema(generator)
    }
}
