//! Kubernetes-backed resource store

use crate::error::StoreError;
use crate::store::ResourceStore;
use crds::{ChiStatus, StatusResource};
use k8s_openapi::NamespaceResourceScope;
use kube::api::{Patch, PatchParams};
use kube::{Api, Client, Resource, ResourceExt};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt::Debug;
use tracing::debug;

/// Field manager name used for server-side apply
pub const FIELD_MANAGER: &str = "chi-status-controller";

/// Store backed by the Kubernetes API server
///
/// Status writes are server-side apply patches against the status
/// subresource. The patch carries `metadata.resourceVersion`, so a write based
/// on a stale read is rejected with a conflict.
#[derive(Clone)]
pub struct KubeStore {
    client: Client,
    params: PatchParams,
}

impl KubeStore {
    /// Create a store using the default field manager
    pub fn new(client: Client) -> Self {
        Self::with_field_manager(client, FIELD_MANAGER)
    }

    /// Create a store applying status as `field_manager`
    pub fn with_field_manager(client: Client, field_manager: &str) -> Self {
        Self {
            client,
            params: PatchParams::apply(field_manager).force(),
        }
    }

    fn api<K>(&self, namespace: &str) -> Api<K>
    where
        K: Resource<DynamicType = (), Scope = NamespaceResourceScope>,
    {
        Api::namespaced(self.client.clone(), namespace)
    }
}

impl std::fmt::Debug for KubeStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KubeStore")
            .field("field_manager", &self.params.field_manager)
            .finish_non_exhaustive()
    }
}

#[async_trait::async_trait]
impl<K> ResourceStore<K> for KubeStore
where
    K: StatusResource + Resource<Scope = NamespaceResourceScope> + Serialize + DeserializeOwned + Debug,
{
    async fn get(&self, namespace: &str, name: &str) -> Result<Option<K>, StoreError> {
        debug!("Fetching {}/{} ({})", namespace, name, K::kind(&()));
        Ok(self.api::<K>(namespace).get_opt(name).await?)
    }

    async fn update_status(&self, resource: &K) -> Result<(), StoreError> {
        let namespace = resource.namespace().unwrap_or_default();
        let name = resource.name_any();
        let status: &ChiStatus = resource.status().unwrap_or_else(|| ChiStatus::empty());

        let body = serde_json::json!({
            "apiVersion": K::api_version(&()),
            "kind": K::kind(&()),
            "metadata": {
                "name": name,
                "resourceVersion": resource.resource_version(),
            },
            "status": serde_json::to_value(status)?,
        });

        debug!(
            "Applying status for {}/{} at resource version {:?}",
            namespace,
            name,
            resource.resource_version()
        );
        self.api::<K>(&namespace)
            .patch_status(&name, &self.params, &Patch::Apply(&body))
            .await?;
        Ok(())
    }
}
