//! Test utilities for unit testing the reconciler

#[cfg(test)]
use crds::{ClickHouseInstallation, ClickHouseInstallationSpec, ClusterSpec, Configuration, Layout};
#[cfg(test)]
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

/// Helper to create a test ClickHouseInstallation with one cluster named `main`
#[cfg(test)]
pub fn create_test_chi(name: &str, namespace: &str, shards: u32, replicas: u32) -> ClickHouseInstallation {
    ClickHouseInstallation {
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            namespace: Some(namespace.to_string()),
            ..Default::default()
        },
        spec: ClickHouseInstallationSpec {
            configuration: Configuration {
                clusters: vec![ClusterSpec {
                    name: "main".to_string(),
                    layout: Layout {
                        shards_count: shards,
                        replicas_count: replicas,
                    },
                    secure: None,
                }],
            },
            ..Default::default()
        },
        status: None,
    }
}

/// Helper to mark a resource as being deleted
#[cfg(test)]
pub fn deleting(mut chi: ClickHouseInstallation) -> ClickHouseInstallation {
    chi.metadata.deletion_timestamp = serde_json::from_value(serde_json::json!("2024-01-01T00:00:00Z")).ok();
    assert!(chi.metadata.deletion_timestamp.is_some());
    chi
}
