//! Watched ClickHouseInstallation snapshot
//!
//! A flat, serializable view of an installation's addressable hosts, handed to
//! whatever consumes host lists (metrics scrapers, discovery).

use crate::installation::ClickHouseInstallation;
use crate::topology::{ClusterView, Host};
use kube::ResourceExt;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Watched installation
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct WatchedChi {
    /// Namespace of the installation
    pub namespace: String,
    /// Installation name
    pub name: String,
    /// Labels copied from the resource metadata
    pub labels: BTreeMap<String, String>,
    /// Annotations copied from the resource metadata
    pub annotations: BTreeMap<String, String>,
    /// Clusters in declaration order
    pub clusters: Vec<WatchedCluster>,
}

/// Watched cluster
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct WatchedCluster {
    /// Cluster name
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// Hosts in shard-major order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hosts: Vec<WatchedHost>,
}

/// Watched host
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WatchedHost {
    /// `{shard}-{replica}`
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// Fully qualified service name
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub hostname: String,
    /// Native protocol port
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tcp_port: Option<u16>,
    /// Native TLS port, secure clusters only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls_port: Option<u16>,
    /// HTTP port
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_port: Option<u16>,
    /// HTTPS port, secure clusters only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub https_port: Option<u16>,
}

impl WatchedChi {
    /// Snapshot an installation by walking its clusters and hosts
    pub fn from_resource(chi: &ClickHouseInstallation) -> Self {
        Self {
            namespace: chi.namespace().unwrap_or_default(),
            name: chi.name_any(),
            labels: chi.labels().clone(),
            annotations: chi.annotations().clone(),
            clusters: chi.walk_clusters().map(WatchedCluster::from_view).collect(),
        }
    }

    /// False for a snapshot with no identity and no clusters
    pub fn is_valid(&self) -> bool {
        !(self.namespace.is_empty() && self.name.is_empty() && self.clusters.is_empty())
    }

    /// `namespace:name`
    pub fn index_key(&self) -> String {
        format!("{}:{}", self.namespace, self.name)
    }

    /// Visit every host together with its owning cluster
    pub fn walk_hosts(&self) -> impl Iterator<Item = (&WatchedCluster, &WatchedHost)> {
        self.clusters
            .iter()
            .flat_map(|cluster| cluster.hosts.iter().map(move |host| (cluster, host)))
    }
}

impl fmt::Display for WatchedChi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

impl WatchedCluster {
    fn from_view(view: ClusterView<'_>) -> Self {
        Self {
            name: view.name().to_string(),
            hosts: view.walk_hosts().map(WatchedHost::from).collect(),
        }
    }
}

impl From<Host> for WatchedHost {
    fn from(host: Host) -> Self {
        Self {
            name: host.name,
            hostname: host.fqdn,
            tcp_port: Some(host.tcp_port),
            tls_port: host.tls_port,
            http_port: Some(host.http_port),
            https_port: host.https_port,
        }
    }
}
