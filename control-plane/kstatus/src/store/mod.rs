mod kube_store;
mod memory;

pub use kube_store::KubeObjectStore;
pub use memory::MemoryObjectStore;

use async_trait::async_trait;

use crate::unstructured::{ObjectRef, Unstructured};

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("{0} not found")]
    NotFound(String),
    #[error("resource has no name")]
    MissingName,
    #[error("failed to resolve api resource for {gvk}: {source}")]
    Discovery {
        gvk: String,
        #[source]
        source: kube::Error,
    },
    #[error("api error: {0}")]
    Api(#[from] kube::Error),
    #[error("failed to decode object: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Source of live resource state, keyed by group/version/kind, namespace
/// and name.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn get(&self, reference: &ObjectRef) -> Result<Unstructured, StoreError>;
}

#[async_trait]
impl<T: ObjectStore + ?Sized> ObjectStore for std::sync::Arc<T> {
    async fn get(&self, reference: &ObjectRef) -> Result<Unstructured, StoreError> {
        (**self).get(reference).await
    }
}
