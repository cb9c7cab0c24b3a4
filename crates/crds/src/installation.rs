//! ClickHouseInstallation CRD
//!
//! Describes a ClickHouse deployment as a set of clusters, each laid out as
//! shards × replicas. The status sub-document is the lock-protected
//! [`ChiStatus`] aggregate.

use crate::references::TemplateRef;
use crate::resource::StatusResource;
use crate::status::ChiStatus;
use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(CustomResource, Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
#[kube(
    group = "clickhouse.altinity.com",
    version = "v1",
    kind = "ClickHouseInstallation",
    plural = "clickhouseinstallations",
    shortname = "chi",
    namespaced,
    status = "ChiStatus",
    printcolumn = r#"{"name":"Clusters", "type":"integer", "jsonPath":".status.clusters"}"#,
    printcolumn = r#"{"name":"Hosts", "type":"integer", "jsonPath":".status.hosts"}"#,
    printcolumn = r#"{"name":"Status", "type":"string", "jsonPath":".status.status"}"#,
    printcolumn = r#"{"name":"Age", "type":"date", "jsonPath":".metadata.creationTimestamp"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct ClickHouseInstallationSpec {
    /// Explicit task id for the next reconcile (generated when absent)
    #[serde(default, rename = "taskID", skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,

    /// Cluster configuration
    #[serde(default)]
    pub configuration: Configuration,

    /// Templates this installation is composed from
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub use_templates: Vec<TemplateRef>,
}

/// Cluster configuration section
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    /// Clusters of this installation
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub clusters: Vec<ClusterSpec>,
}

/// A single ClickHouse cluster
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClusterSpec {
    /// Cluster name, unique within the installation
    pub name: String,

    /// Shard/replica layout
    #[serde(default)]
    pub layout: Layout,

    /// Expose TLS (9440) and HTTPS (8443) ports on every host
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secure: Option<bool>,
}

/// Shard/replica layout of a cluster
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Layout {
    /// Number of shards
    #[serde(default = "default_count")]
    pub shards_count: u32,

    /// Number of replicas per shard
    #[serde(default = "default_count")]
    pub replicas_count: u32,
}

fn default_count() -> u32 {
    1
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            shards_count: default_count(),
            replicas_count: default_count(),
        }
    }
}

impl ClickHouseInstallation {
    /// Status aggregate, or the shared empty aggregate when no status exists yet.
    pub fn status_or_empty(&self) -> &ChiStatus {
        self.status.as_ref().unwrap_or_else(|| ChiStatus::empty())
    }
}

impl StatusResource for ClickHouseInstallation {
    fn status(&self) -> Option<&ChiStatus> {
        self.status.as_ref()
    }

    fn ensure_status(&mut self) -> &ChiStatus {
        self.status.get_or_insert_with(ChiStatus::default)
    }

    fn replace_status(&mut self, status: ChiStatus) {
        self.status = Some(status);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_defaults_to_single_host() {
        let cluster: ClusterSpec = serde_json::from_value(serde_json::json!({"name": "main"})).unwrap();
        assert_eq!(cluster.layout.shards_count, 1);
        assert_eq!(cluster.layout.replicas_count, 1);
    }

    #[test]
    fn test_status_or_empty_without_status() {
        let chi = ClickHouseInstallation::new("demo", ClickHouseInstallationSpec::default());
        let status = chi.status_or_empty();
        assert_eq!(status.hosts_count(), 0);
        assert!(status.actions().is_empty());
        assert!(status.phase().is_none());
    }

    #[test]
    fn test_ensure_status_creates_once() {
        let mut chi = ClickHouseInstallation::new("demo", ClickHouseInstallationSpec::default());
        chi.ensure_status().push_action("first");
        chi.ensure_status().push_action("second");
        assert_eq!(chi.status_or_empty().actions(), vec!["second", "first"]);
    }
}
