mod common;

use std::collections::HashMap;
use std::path::Path;

use common::*;
use kstatus::manifest;
use kstatus::status::{
    ConditionStatus, ConditionType, StatusError, StatusRunner, is_ready,
};
use kstatus::store::{MemoryObjectStore, StoreError};
use serde_json::json;

#[tokio::test]
async fn empty_batch_has_no_results_and_no_error() {
    let runner = StatusRunner::new(MemoryObjectStore::new());
    let (result, aggregate) = runner.run(Vec::new()).await;
    assert!(result.is_empty());
    assert!(aggregate.is_none());
}

#[tokio::test]
async fn partial_failures_keep_every_item_in_order() {
    let live = to_unstructured(&deployment("web", 2, 2));
    let svc = unstructured(json!({
        "apiVersion": "v1",
        "kind": "Service",
        "metadata": {"name": "web", "namespace": NS},
        "spec": {"type": "ClusterIP"},
    }));
    let store = seeded([live, svc]).await;

    let inputs = vec![
        reference("apps/v1", "Deployment", "web"),
        reference("apps/v1", "Deployment", "gone"),
        reference("v1", "Service", "web"),
        reference("v1", "ConfigMap", "settings"),
    ];
    let (result, aggregate) = StatusRunner::new(store).run(inputs).await;

    assert_eq!(result.len(), 4);
    let names: Vec<_> = result
        .iter()
        .map(|s| format!("{}/{}", s.resource.kind(), s.resource.name()))
        .collect();
    assert_eq!(
        names,
        ["Deployment/web", "Deployment/gone", "Service/web", "ConfigMap/settings"]
    );

    assert!(result.resources[0].is_ready());
    assert!(result.resources[2].is_ready());
    assert!(!result.all_ready());

    let aggregate = aggregate.expect("two items failed");
    assert_eq!(aggregate.len(), 2);
    for (status, err) in [&result.resources[1], &result.resources[3]]
        .into_iter()
        .zip(aggregate.errors())
    {
        let own = status.error().expect("failed item carries its error");
        assert_eq!(own.to_string(), err.to_string());
        assert!(status.conditions().is_empty());
        assert!(matches!(
            own.as_ref(),
            StatusError::Fetch { source: StoreError::NotFound(_), .. }
        ));
    }
    assert!(
        aggregate
            .to_string()
            .starts_with("[failed to fetch Deployment.apps/qual/gone")
    );
}

#[tokio::test]
async fn single_failure_displays_as_itself() {
    let inputs = vec![reference("v1", "Pod", "missing")];
    let (_, aggregate) = StatusRunner::new(MemoryObjectStore::new()).run(inputs).await;
    assert_eq!(
        aggregate.unwrap().to_string(),
        "failed to fetch Pod/qual/missing: Pod/qual/missing not found"
    );
}

#[tokio::test]
async fn nameless_reference_is_rejected_by_the_store() {
    let input = unstructured(json!({"apiVersion": "v1", "kind": "Pod", "metadata": {}}));
    let (result, aggregate) =
        StatusRunner::new(MemoryObjectStore::new()).run(vec![input]).await;
    assert_eq!(aggregate.unwrap().len(), 1);
    assert!(matches!(
        result.resources[0].error().unwrap().as_ref(),
        StatusError::Fetch { source: StoreError::MissingName, .. }
    ));
}

#[tokio::test(start_paused = true)]
async fn concurrent_fetches_preserve_input_order() {
    let names: Vec<String> = (0..6).map(|i| format!("pod-{i}")).collect();
    let live = names.iter().map(|n| {
        unstructured(json!({
            "apiVersion": "v1",
            "kind": "Pod",
            "metadata": {"name": n, "namespace": NS},
            "status": {"phase": "Running", "conditions": [{"type": "Ready", "status": "True"}]},
        }))
    });
    // Earlier items finish last.
    let delays_ms: HashMap<String, u64> = names
        .iter()
        .enumerate()
        .map(|(i, n)| (n.clone(), 60 - 10 * i as u64))
        .collect();
    let store = DelayedStore {
        inner: seeded(live).await,
        delays_ms,
    };

    let inputs = names.iter().map(|n| reference("v1", "Pod", n)).collect();
    let (result, aggregate) = StatusRunner::new(store)
        .with_concurrency(4)
        .run(inputs)
        .await;

    assert!(aggregate.is_none());
    let got: Vec<String> = result.iter().map(|s| s.resource.name()).collect();
    assert_eq!(got, names);
    assert!(result.all_ready());
}

#[tokio::test]
async fn typed_deployment_keeps_wire_shape() {
    let u = to_unstructured(&deployment("web", 3, 3));
    assert_eq!(u.api_version(), "apps/v1");
    assert_eq!(u.kind(), "Deployment");
    assert_eq!(u.object_ref().to_string(), "Deployment.apps/qual/web");

    let conditions = is_ready(&u).unwrap();
    assert_eq!(conditions.len(), 1);
    assert_eq!(conditions[0].type_, ConditionType::Ready);
    assert_eq!(conditions[0].reason, "Deployment is available. Replicas: 3");
}

#[test]
fn deployment_ready_iff_all_replicas_ready() {
    for replicas in 1..=4 {
        for ready in 0..=replicas {
            let u = to_unstructured(&deployment("web", replicas, ready));
            let ready_condition = is_ready(&u).unwrap().remove(0);
            assert_eq!(
                ready_condition.is_true(),
                ready == replicas,
                "replicas={replicas} ready={ready}: {}",
                ready_condition.reason
            );
        }
    }
}

#[test]
fn daemonset_ready_iff_every_counter_reaches_desired() {
    for desired in 1..=3i64 {
        for number_ready in 0..=desired {
            for available in 0..=desired {
                let u = unstructured(json!({
                    "apiVersion": "apps/v1",
                    "kind": "DaemonSet",
                    "metadata": {"name": "agent", "namespace": NS, "generation": 2},
                    "status": {
                        "observedGeneration": 2,
                        "desiredNumberScheduled": desired,
                        "currentNumberScheduled": desired,
                        "updatedNumberScheduled": desired,
                        "numberAvailable": available,
                        "numberReady": number_ready,
                    },
                }));
                let c = is_ready(&u).unwrap().remove(0);
                assert_eq!(c.is_true(), number_ready == desired && available == desired);
            }
        }
    }
}

#[test]
fn non_load_balancer_services_are_always_ready() {
    for type_ in ["ClusterIP", "NodePort", "ExternalName"] {
        let u = unstructured(json!({
            "apiVersion": "v1",
            "kind": "Service",
            "metadata": {"name": "web"},
            "spec": {"type": type_},
        }));
        let c = is_ready(&u).unwrap().remove(0);
        assert_eq!(c.status, ConditionStatus::True);
        assert_eq!(c.reason, format!("Always Ready. Service type: {type_}"));
    }
}

const CUSTOM_RESOURCES: &str = r#"
apiVersion: example.io/v1
kind: Widget
metadata:
  name: healthy
  namespace: qual
  generation: 3
status:
  observedGeneration: 3
  conditions:
  - type: Ready
    status: "True"
    reason: Reconciled
---
apiVersion: example.io/v1
kind: Widget
metadata:
  name: stale
  namespace: qual
  generation: 4
status:
  observedGeneration: 3
  conditions:
  - type: Ready
    status: "True"
---
apiVersion: example.io/v1
kind: Widget
metadata:
  name: bare
  namespace: qual
"#;

#[tokio::test]
async fn custom_resources_use_ready_condition() {
    let live = manifest::parse_str(CUSTOM_RESOURCES, Path::new("widgets.yaml")).unwrap();
    let inputs = live.clone();
    let (result, aggregate) = StatusRunner::new(seeded(live).await).run(inputs).await;
    assert!(aggregate.is_none());

    let ready: Vec<_> = result
        .iter()
        .map(|s| {
            let c = s.condition(ConditionType::Ready).unwrap();
            (c.status, c.reason.clone())
        })
        .collect();
    assert_eq!(ready[0], (ConditionStatus::True, "Reconciled".to_string()));
    assert_eq!(ready[1].0, ConditionStatus::False);
    assert!(ready[1].1.starts_with("Controller has not observed the latest change"));
    assert_eq!(
        ready[2],
        (ConditionStatus::True, "No Ready condition found".to_string())
    );
}

#[tokio::test]
async fn finished_job_reports_terminal_condition() {
    let job = unstructured(json!({
        "apiVersion": "batch/v1",
        "kind": "Job",
        "metadata": {"name": "migrate", "namespace": NS},
        "spec": {"completions": 2},
        "status": {
            "startTime": "2024-01-01T00:00:00Z",
            "succeeded": 2,
            "conditions": [{"type": "Complete", "status": "True"}],
        },
    }));
    let (result, _) = StatusRunner::new(seeded([job]).await)
        .run(vec![reference("batch/v1", "Job", "migrate")])
        .await;
    let status = &result.resources[0];
    assert!(status.is_ready());
    let terminal = status.terminal().unwrap();
    assert_eq!(terminal.type_, ConditionType::Completed);
    assert_eq!(terminal.reason, "Job Completed. succeeded: 2/2");
}
