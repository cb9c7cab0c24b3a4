//! Test fixtures for ClickHouseInstallation resources

use crate::installation::{ClickHouseInstallation, ClickHouseInstallationSpec, ClusterSpec, Configuration, Layout};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

/// Build an installation from `(cluster, shards, replicas, secure)` tuples
pub fn create_test_chi(
    name: &str,
    namespace: &str,
    clusters: &[(&str, u32, u32, bool)],
) -> ClickHouseInstallation {
    ClickHouseInstallation {
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            namespace: Some(namespace.to_string()),
            ..Default::default()
        },
        spec: ClickHouseInstallationSpec {
            configuration: Configuration {
                clusters: clusters
                    .iter()
                    .map(|(cluster, shards, replicas, secure)| ClusterSpec {
                        name: cluster.to_string(),
                        layout: Layout {
                            shards_count: *shards,
                            replicas_count: *replicas,
                        },
                        secure: secure.then_some(true),
                    })
                    .collect(),
            },
            ..Default::default()
        },
        status: None,
    }
}
