#![allow(dead_code)]

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use k8s_openapi::api::apps::v1::{
    Deployment, DeploymentCondition, DeploymentSpec, DeploymentStatus,
};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use kstatus::store::{MemoryObjectStore, ObjectStore, StoreError};
use kstatus::unstructured::{ObjectRef, Unstructured};
use serde_json::Value;

pub const NS: &str = "qual";

pub fn unstructured(v: Value) -> Unstructured {
    Unstructured::try_from(v).expect("fixture must be an object")
}

/// What a manifest would carry: identity only, no status.
pub fn reference(api_version: &str, kind: &str, name: &str) -> Unstructured {
    unstructured(serde_json::json!({
        "apiVersion": api_version,
        "kind": kind,
        "metadata": {"name": name, "namespace": NS},
    }))
}

/// Typed Deployment after a rollout where `ready` of `replicas` pods came up.
pub fn deployment(name: &str, replicas: i32, ready: i32) -> Deployment {
    let condition = |type_: &str, reason: &str| DeploymentCondition {
        type_: type_.to_string(),
        status: "True".to_string(),
        reason: Some(reason.to_string()),
        ..Default::default()
    };
    Deployment {
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            namespace: Some(NS.to_string()),
            generation: Some(1),
            ..Default::default()
        },
        spec: Some(DeploymentSpec {
            replicas: Some(replicas),
            ..Default::default()
        }),
        status: Some(DeploymentStatus {
            observed_generation: Some(1),
            replicas: Some(ready),
            updated_replicas: Some(ready),
            ready_replicas: Some(ready),
            available_replicas: Some(ready),
            conditions: Some(vec![
                condition("Progressing", "NewReplicaSetAvailable"),
                condition("Available", "MinimumReplicasAvailable"),
            ]),
            ..Default::default()
        }),
    }
}

pub fn to_unstructured(d: &Deployment) -> Unstructured {
    unstructured(serde_json::to_value(d).expect("deployment serializes"))
}

pub async fn seeded(objects: impl IntoIterator<Item = Unstructured>) -> MemoryObjectStore {
    let store = MemoryObjectStore::new();
    for obj in objects {
        store.upsert(obj).await;
    }
    store
}

/// Delays each lookup by a per-name amount before delegating.
pub struct DelayedStore {
    pub inner: MemoryObjectStore,
    pub delays_ms: HashMap<String, u64>,
}

#[async_trait]
impl ObjectStore for DelayedStore {
    async fn get(&self, reference: &ObjectRef) -> Result<Unstructured, StoreError> {
        let delay = self.delays_ms.get(&reference.name).copied().unwrap_or(0);
        tokio::time::sleep(Duration::from_millis(delay)).await;
        self.inner.get(reference).await
    }
}
