//! Read-only walk over the cluster → shard → replica hierarchy
//!
//! Host addressing follows the per-replica StatefulSet/Service naming used by
//! the operator: one StatefulSet (and one headless Service) per host.

use crate::installation::{ClickHouseInstallation, ClusterSpec};
use kube::ResourceExt;

/// Native protocol port
pub const TCP_PORT: u16 = 9000;
/// Native protocol port over TLS
pub const TLS_PORT: u16 = 9440;
/// HTTP interface port
pub const HTTP_PORT: u16 = 8123;
/// HTTPS interface port
pub const HTTPS_PORT: u16 = 8443;

const DEFAULT_NAMESPACE: &str = "default";
const CLUSTER_DOMAIN: &str = "svc.cluster.local";

/// One cluster of an installation
#[derive(Debug, Clone, Copy)]
pub struct ClusterView<'a> {
    chi: &'a ClickHouseInstallation,
    spec: &'a ClusterSpec,
}

/// One ClickHouse host (a single replica of a single shard)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Host {
    /// `{shard}-{replica}`
    pub name: String,
    /// Name of the owning cluster
    pub cluster: String,
    /// Zero-based shard index
    pub shard_index: u32,
    /// Zero-based replica index
    pub replica_index: u32,
    /// Fully qualified service name of the host
    pub fqdn: String,
    /// Pod name (StatefulSet ordinal 0)
    pub pod_name: String,
    /// Native protocol port
    pub tcp_port: u16,
    /// Native TLS port, when the cluster is secure
    pub tls_port: Option<u16>,
    /// HTTP port
    pub http_port: u16,
    /// HTTPS port, when the cluster is secure
    pub https_port: Option<u16>,
}

impl<'a> ClusterView<'a> {
    /// Cluster name
    pub fn name(&self) -> &'a str {
        &self.spec.name
    }

    /// Number of shards
    pub fn shards_count(&self) -> u32 {
        self.spec.layout.shards_count
    }

    /// Number of replicas per shard
    pub fn replicas_count(&self) -> u32 {
        self.spec.layout.replicas_count
    }

    /// Number of hosts in the cluster, saturating at `u32::MAX`
    pub fn hosts_count(&self) -> u32 {
        self.shards_count().saturating_mul(self.replicas_count())
    }

    /// Whether TLS/HTTPS ports are exposed
    pub fn is_secure(&self) -> bool {
        self.spec.secure.unwrap_or(false)
    }

    /// Hosts in shard-major order
    pub fn walk_hosts(self) -> impl Iterator<Item = Host> + 'a {
        (0..self.shards_count()).flat_map(move |shard| {
            (0..self.replicas_count()).map(move |replica| self.host(shard, replica))
        })
    }

    fn host(&self, shard_index: u32, replica_index: u32) -> Host {
        let service = format!(
            "chi-{}-{}-{}-{}",
            self.chi.name_any(),
            self.name(),
            shard_index,
            replica_index
        );
        let secure = self.is_secure();
        Host {
            name: format!("{shard_index}-{replica_index}"),
            cluster: self.name().to_string(),
            shard_index,
            replica_index,
            fqdn: format!("{service}.{}.{CLUSTER_DOMAIN}", self.chi.namespace_or_default()),
            pod_name: format!("{service}-0"),
            tcp_port: TCP_PORT,
            tls_port: secure.then_some(TLS_PORT),
            http_port: HTTP_PORT,
            https_port: secure.then_some(HTTPS_PORT),
        }
    }
}

impl ClickHouseInstallation {
    /// Namespace of the installation, `default` when unset
    pub fn namespace_or_default(&self) -> String {
        self.namespace().unwrap_or_else(|| DEFAULT_NAMESPACE.to_string())
    }

    /// Clusters in declaration order
    pub fn walk_clusters(&self) -> impl Iterator<Item = ClusterView<'_>> {
        self.spec
            .configuration
            .clusters
            .iter()
            .map(move |spec| ClusterView { chi: self, spec })
    }

    /// All hosts of all clusters
    pub fn walk_hosts(&self) -> impl Iterator<Item = Host> + '_ {
        self.walk_clusters().flat_map(|cluster| cluster.walk_hosts())
    }

    /// Number of clusters
    pub fn clusters_count(&self) -> u32 {
        u32::try_from(self.spec.configuration.clusters.len()).unwrap_or(u32::MAX)
    }

    /// Number of shards across all clusters
    pub fn shards_count(&self) -> u32 {
        self.saturating_total(|c| c.shards_count())
    }

    /// Replicas per shard, summed over clusters
    pub fn replicas_count(&self) -> u32 {
        self.saturating_total(|c| c.replicas_count())
    }

    /// Number of hosts across all clusters
    pub fn hosts_count(&self) -> u32 {
        self.saturating_total(|c| c.hosts_count())
    }

    // Layout counts come straight from the resource, so totals saturate.
    fn saturating_total(&self, count: impl Fn(&ClusterView<'_>) -> u32) -> u32 {
        self.walk_clusters()
            .fold(0u32, |total, cluster| total.saturating_add(count(&cluster)))
    }

    /// FQDNs of all hosts
    pub fn fqdns(&self) -> Vec<String> {
        self.walk_hosts().map(|host| host.fqdn).collect()
    }

    /// Pod names of all hosts
    pub fn pod_names(&self) -> Vec<String> {
        self.walk_hosts().map(|host| host.pod_name).collect()
    }

    /// Service endpoint of the whole installation
    pub fn endpoint(&self) -> String {
        format!(
            "clickhouse-{}.{}.{CLUSTER_DOMAIN}",
            self.name_any(),
            self.namespace_or_default()
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::test_utils::create_test_chi;

    #[test]
    fn test_walk_hosts_shard_major() {
        let chi = create_test_chi("demo", "prod", &[("main", 2, 2, false)]);
        let names: Vec<String> = chi.walk_hosts().map(|h| h.name).collect();
        assert_eq!(names, vec!["0-0", "0-1", "1-0", "1-1"]);
    }

    #[test]
    fn test_host_addressing() {
        let chi = create_test_chi("demo", "prod", &[("main", 1, 1, false)]);
        let host = chi.walk_hosts().next().unwrap();
        assert_eq!(host.fqdn, "chi-demo-main-0-0.prod.svc.cluster.local");
        assert_eq!(host.pod_name, "chi-demo-main-0-0-0");
        assert_eq!(host.tcp_port, 9000);
        assert_eq!(host.http_port, 8123);
        assert_eq!(host.tls_port, None);
        assert_eq!(host.https_port, None);
        assert_eq!(chi.endpoint(), "clickhouse-demo.prod.svc.cluster.local");
    }

    #[test]
    fn test_secure_cluster_exposes_tls_ports() {
        let chi = create_test_chi("demo", "prod", &[("secure", 1, 1, true)]);
        let host = chi.walk_hosts().next().unwrap();
        assert_eq!(host.tls_port, Some(9440));
        assert_eq!(host.https_port, Some(8443));
    }

    #[test]
    fn test_counts_across_clusters() {
        let chi = create_test_chi("demo", "prod", &[("a", 2, 3, false), ("b", 1, 2, false)]);
        assert_eq!(chi.clusters_count(), 2);
        assert_eq!(chi.shards_count(), 3);
        assert_eq!(chi.replicas_count(), 5);
        assert_eq!(chi.hosts_count(), 8);
        assert_eq!(chi.fqdns().len(), 8);
        assert_eq!(chi.walk_clusters().map(|c| c.name()).collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_huge_layout_counts_saturate() {
        let chi = create_test_chi(
            "demo",
            "prod",
            &[("main", 70_000, 70_000, false), ("wide", u32::MAX, 2, false)],
        );
        let main = chi.walk_clusters().next().unwrap();
        assert_eq!(main.hosts_count(), u32::MAX);
        assert_eq!(chi.hosts_count(), u32::MAX);
        assert_eq!(chi.shards_count(), u32::MAX);
        assert_eq!(chi.replicas_count(), 70_002);
        assert_eq!(chi.clusters_count(), 2);
    }

    #[test]
    fn test_namespace_defaults() {
        let mut chi = create_test_chi("demo", "prod", &[("a", 1, 1, false)]);
        chi.metadata.namespace = None;
        assert_eq!(chi.endpoint(), "clickhouse-demo.default.svc.cluster.local");
    }
}
