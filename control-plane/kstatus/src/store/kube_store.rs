use async_trait::async_trait;
use kube::Client;
use kube::api::{Api, DynamicObject};
use kube::discovery::{self, ApiResource, Scope};
use tracing::debug;

use super::{ObjectStore, StoreError};
use crate::unstructured::{ObjectRef, Unstructured};

/// Reads live objects from the Kubernetes API server through the dynamic
/// client, resolving each group/version/kind with discovery.
#[derive(Clone)]
pub struct KubeObjectStore {
    client: Client,
    default_namespace: String,
}

impl KubeObjectStore {
    pub fn new(client: Client, default_namespace: impl Into<String>) -> Self {
        Self {
            client,
            default_namespace: default_namespace.into(),
        }
    }

    fn api_for(
        &self,
        reference: &ObjectRef,
        ar: &ApiResource,
        scope: &Scope,
    ) -> Api<DynamicObject> {
        match scope {
            Scope::Namespaced => {
                let ns = reference
                    .namespace
                    .as_deref()
                    .unwrap_or(&self.default_namespace);
                Api::namespaced_with(self.client.clone(), ns, ar)
            }
            Scope::Cluster => Api::all_with(self.client.clone(), ar),
        }
    }
}

#[async_trait]
impl ObjectStore for KubeObjectStore {
    #[tracing::instrument(level = "debug", skip_all, fields(reference = %reference))]
    async fn get(&self, reference: &ObjectRef) -> Result<Unstructured, StoreError> {
        if reference.name.is_empty() {
            return Err(StoreError::MissingName);
        }
        let gvk = &reference.gvk;
        let (ar, caps) = discovery::pinned_kind(&self.client, gvk)
            .await
            .map_err(|source| StoreError::Discovery {
                gvk: format!("{}/{}, Kind={}", gvk.group, gvk.version, gvk.kind),
                source,
            })?;
        let api = self.api_for(reference, &ar, &caps.scope);
        match api.get_opt(&reference.name).await? {
            Some(obj) => {
                debug!(resource_version = ?obj.metadata.resource_version, "fetched");
                Ok(Unstructured::try_from(obj)?)
            }
            None => Err(StoreError::NotFound(reference.to_string())),
        }
    }
}
