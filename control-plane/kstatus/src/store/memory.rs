use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{ObjectStore, StoreError};
use crate::unstructured::{ObjectRef, Unstructured};

/// In-memory object store keyed by the object's reference. Serves tests and
/// evaluating snapshots that were captured earlier.
#[derive(Clone, Default)]
pub struct MemoryObjectStore(Arc<RwLock<HashMap<String, Unstructured>>>);

impl MemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn upsert(&self, obj: Unstructured) {
        let key = obj.object_ref().to_string();
        let mut w = self.0.write().await;
        w.insert(key, obj);
    }

    pub async fn remove(&self, reference: &ObjectRef) {
        let mut w = self.0.write().await;
        w.remove(&reference.to_string());
    }

    pub async fn count(&self) -> usize {
        self.0.read().await.len()
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn get(&self, reference: &ObjectRef) -> Result<Unstructured, StoreError> {
        if reference.name.is_empty() {
            return Err(StoreError::MissingName);
        }
        let key = reference.to_string();
        let r = self.0.read().await;
        r.get(&key).cloned().ok_or(StoreError::NotFound(key))
    }
}
