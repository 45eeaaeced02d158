//! Readiness policies for the built-in workload kinds.
//!
//! Each policy mirrors what the owning upstream controller reports and reads
//! the resource only through the lenient accessors in [`crate::unstructured`],
//! so a missing or oddly-typed field falls back to its default instead of
//! failing the evaluation.

use super::condition::{Condition, ConditionType};
use super::error::StatusError;
use super::{GENERATION_MISMATCH, generation_observed};
use crate::unstructured::{
    Object, Unstructured, get_conditions, get_int_field, get_string_field,
};

type Conditions = Result<Vec<Condition>, StatusError>;

fn ready(reason: impl Into<String>) -> Conditions {
    Ok(vec![Condition::new(ConditionType::Ready, reason)])
}

fn not_ready(reason: impl Into<String>) -> Conditions {
    Ok(vec![Condition::new_false(ConditionType::Ready).with_reason(reason)])
}

/// Metadata generation vs the generation the controller last reconciled.
/// Both default to -1 so that a missing status never counts as observed
/// when the object carries a generation.
fn strict_generation_observed(obj: &Object) -> bool {
    generation_observed(obj, Some(-1))
}

/// `(type, status, reason)` of one `status.conditions` entry.
fn condition_fields(c: &Object) -> (String, String, String) {
    (
        get_string_field(c, ".type", ""),
        get_string_field(c, ".status", ""),
        get_string_field(c, ".reason", ""),
    )
}

pub fn always_ready(_u: &Unstructured) -> Conditions {
    ready("always")
}

pub fn statefulset_conditions(u: &Unstructured) -> Conditions {
    let obj = u.content();

    // A user managed rollout: the controller never replaces pods itself.
    let update_strategy = get_string_field(obj, ".spec.updateStrategy.type", "");
    if update_strategy == "ondelete" {
        return ready("ondelete strategy");
    }

    if !strict_generation_observed(obj) {
        return not_ready(GENERATION_MISMATCH);
    }

    let spec_replicas = get_int_field(obj, ".spec.replicas", 1);
    let ready_replicas = get_int_field(obj, ".status.readyReplicas", 0);
    let current_replicas = get_int_field(obj, ".status.currentReplicas", 0);
    let updated_replicas = get_int_field(obj, ".status.updatedReplicas", 0);
    let status_replicas = get_int_field(obj, ".status.replicas", 0);
    let partition =
        get_int_field(obj, ".spec.updateStrategy.rollingUpdate.partition", -1);

    if spec_replicas > status_replicas {
        return not_ready(format!(
            "Waiting for requested replicas. Replicas: {}/{}",
            status_replicas, spec_replicas
        ));
    }

    if spec_replicas > ready_replicas {
        return not_ready(format!(
            "Waiting for replicas to become Ready. Ready: {}/{}",
            ready_replicas, spec_replicas
        ));
    }

    if partition != -1 {
        let expected = spec_replicas.saturating_sub(partition);
        if updated_replicas < expected {
            return not_ready(format!(
                "Waiting for partition rollout to complete. updated: {}/{}",
                updated_replicas, expected
            ));
        }
        return ready(format!(
            "Partition rollout complete. updated: {}",
            updated_replicas
        ));
    }

    if spec_replicas > current_replicas {
        return not_ready(format!(
            "Waiting for replicas to become current. current: {}/{}",
            current_replicas, spec_replicas
        ));
    }

    let current_revision = get_string_field(obj, ".status.currentRevision", "");
    let updated_revision = get_string_field(obj, ".status.updatedRevision", "");
    if current_revision != updated_revision {
        return not_ready("Waiting for updated revision to match current");
    }

    ready(format!(
        "All replicas scheduled as expected. Replicas: {}",
        status_replicas
    ))
}

pub fn deployment_conditions(u: &Unstructured) -> Conditions {
    let obj = u.content();

    if !strict_generation_observed(obj) {
        return not_ready(GENERATION_MISMATCH);
    }

    let mut progress = false;
    let mut available = false;
    for c in get_conditions(obj) {
        let (type_, status, reason) = condition_fields(c);
        match type_.as_str() {
            "Progressing" => {
                if reason == "ProgressDeadlineExceeded" {
                    return not_ready("Progress Deadline exceeded");
                }
                if status == "True" && reason == "NewReplicaSetAvailable" {
                    progress = true;
                }
            }
            "Available" => {
                if status == "True" {
                    available = true;
                }
            }
            _ => {}
        }
    }

    let spec_replicas = get_int_field(obj, ".spec.replicas", 1);
    let status_replicas = get_int_field(obj, ".status.replicas", 0);
    let updated_replicas = get_int_field(obj, ".status.updatedReplicas", 0);
    let ready_replicas = get_int_field(obj, ".status.readyReplicas", 0);
    let available_replicas = get_int_field(obj, ".status.availableReplicas", 0);

    if spec_replicas > updated_replicas {
        return not_ready(format!(
            "Waiting for all replicas to be updated. Updated: {}/{}",
            updated_replicas, spec_replicas
        ));
    }

    if status_replicas > updated_replicas {
        return not_ready(format!(
            "Waiting for old replicas to finish termination. Pending termination: {}",
            status_replicas.saturating_sub(updated_replicas)
        ));
    }

    if updated_replicas > available_replicas {
        return not_ready(format!(
            "Waiting for all replicas to be available. Available: {}/{}",
            available_replicas, updated_replicas
        ));
    }

    if spec_replicas > ready_replicas {
        return not_ready(format!(
            "Waiting for all replicas to be ready. Ready: {}/{}",
            ready_replicas, spec_replicas
        ));
    }

    if spec_replicas > status_replicas {
        return not_ready(format!(
            "Waiting for all .status.replicas to be catchup. replicas: {}/{}",
            status_replicas, spec_replicas
        ));
    }

    if !progress {
        return not_ready("New ReplicaSet is not available");
    }
    if !available {
        return not_ready("Deployment is not Available");
    }

    ready(format!(
        "Deployment is available. Replicas: {}",
        status_replicas
    ))
}

pub fn replicaset_conditions(u: &Unstructured) -> Conditions {
    let obj = u.content();

    if !strict_generation_observed(obj) {
        return not_ready(GENERATION_MISMATCH);
    }

    for c in get_conditions(obj) {
        let (type_, status, _) = condition_fields(c);
        if type_ == "ReplicaFailure" && status == "True" {
            return not_ready("Replica Failure condition. Check Pods");
        }
    }

    let spec_replicas = get_int_field(obj, ".spec.replicas", 1);
    let status_replicas = get_int_field(obj, ".status.replicas", 0);
    let ready_replicas = get_int_field(obj, ".status.readyReplicas", 0);
    let available_replicas = get_int_field(obj, ".status.availableReplicas", 0);
    let labelled_replicas = get_int_field(obj, ".status.labelledReplicas", 0);

    if spec_replicas == 0
        && labelled_replicas == 0
        && available_replicas == 0
        && ready_replicas == 0
    {
        return not_ready("Replica is 0");
    }

    if spec_replicas > labelled_replicas {
        return not_ready(format!(
            "Waiting for all replicas to be fully-labeled. Labelled: {}/{}",
            labelled_replicas, spec_replicas
        ));
    }

    if spec_replicas > available_replicas {
        return not_ready(format!(
            "Waiting for all replicas to be available. Available: {}/{}",
            available_replicas, spec_replicas
        ));
    }

    if spec_replicas > ready_replicas {
        return not_ready(format!(
            "Waiting for all replicas to be ready. Ready: {}/{}",
            ready_replicas, spec_replicas
        ));
    }

    ready(format!(
        "ReplicaSet is available. Replicas: {}",
        status_replicas
    ))
}

pub fn daemonset_conditions(u: &Unstructured) -> Conditions {
    let obj = u.content();

    if !strict_generation_observed(obj) {
        return not_ready(GENERATION_MISMATCH);
    }

    let desired = get_int_field(obj, ".status.desiredNumberScheduled", -1);
    let current = get_int_field(obj, ".status.currentNumberScheduled", 0);
    let updated = get_int_field(obj, ".status.updatedNumberScheduled", 0);
    let available = get_int_field(obj, ".status.numberAvailable", 0);
    let number_ready = get_int_field(obj, ".status.numberReady", 0);

    if desired == -1 {
        return not_ready("Missing .status.desiredNumberScheduled");
    }

    if desired > current {
        return not_ready(format!(
            "Waiting for desired replicas to be scheduled. Current: {}/{}",
            current, desired
        ));
    }

    if desired > updated {
        return not_ready(format!(
            "Waiting for updated replicas to be scheduled. Updated: {}/{}",
            updated, desired
        ));
    }

    if desired > available {
        return not_ready(format!(
            "Waiting for replicas to be available. Available: {}/{}",
            available, desired
        ));
    }

    if desired > number_ready {
        return not_ready(format!(
            "Waiting for replicas to be ready. Ready: {}/{}",
            number_ready, desired
        ));
    }

    ready(format!(
        "All replicas scheduled as expected. Replicas: {}",
        desired
    ))
}

pub fn pvc_conditions(u: &Unstructured) -> Conditions {
    let phase = get_string_field(u.content(), ".status.phase", "unknown");
    if phase != "Bound" {
        return not_ready(format!("PVC is not Bound. phase: {}", phase));
    }
    ready("PVC is Bound")
}

pub fn pod_conditions(u: &Unstructured) -> Conditions {
    let obj = u.content();
    let phase = get_string_field(obj, ".status.phase", "unknown");

    let mut is_ready = false;
    let mut ready_reason = String::new();
    let mut terminal = None;
    for c in get_conditions(obj) {
        let (type_, status, reason) = condition_fields(c);
        if type_ != "Ready" {
            continue;
        }
        is_ready = status == "True";
        if !is_ready && reason == "PodCompleted" {
            // Containers ran to completion: the pod is done, not unhealthy.
            is_ready = true;
            terminal = Some(if phase == "Succeeded" {
                Condition::new(ConditionType::Completed, "Pod Succeeded")
            } else {
                Condition::new(
                    ConditionType::Failed,
                    format!("Pod phase: {}", phase),
                )
            });
        }
        ready_reason = reason;
    }

    let reason = if ready_reason.is_empty() {
        format!("Phase: {}", phase)
    } else {
        format!("Phase: {}, {}", phase, ready_reason)
    };
    let ready_condition = if is_ready {
        Condition::new(ConditionType::Ready, reason)
    } else {
        Condition::new_false(ConditionType::Ready).with_reason(reason)
    };

    let mut out: Vec<Condition> = terminal.into_iter().collect();
    out.push(ready_condition);
    Ok(out)
}

pub fn pdb_conditions(u: &Unstructured) -> Conditions {
    let obj = u.content();
    let current_healthy = get_int_field(obj, ".status.currentHealthy", 0);
    let desired_healthy = get_int_field(obj, ".status.desiredHealthy", -1);

    if desired_healthy == -1 {
        return not_ready("Missing .status.desiredHealthy");
    }
    if desired_healthy > current_healthy {
        return not_ready(format!(
            "Budget not met. healthy replicas: {}/{}",
            current_healthy, desired_healthy
        ));
    }

    ready(format!(
        "Budget is met. Replicas: {}/{}",
        current_healthy, desired_healthy
    ))
}

pub fn job_conditions(u: &Unstructured) -> Conditions {
    let obj = u.content();

    let parallelism = get_int_field(obj, ".spec.parallelism", 1);
    let completions = get_int_field(obj, ".spec.completions", parallelism);
    let succeeded = get_int_field(obj, ".status.succeeded", 0);
    let active = get_int_field(obj, ".status.active", 0);
    let failed = get_int_field(obj, ".status.failed", 0);
    let start_time = get_string_field(obj, ".status.startTime", "");

    for c in get_conditions(obj) {
        let (type_, status, _) = condition_fields(c);
        if status != "True" {
            continue;
        }
        match type_.as_str() {
            "Complete" => {
                let message = format!(
                    "Job Completed. succeeded: {}/{}",
                    succeeded, completions
                );
                return Ok(vec![
                    Condition::new(ConditionType::Ready, message.clone()),
                    Condition::new(ConditionType::Completed, message),
                ]);
            }
            // A failed job has finished running: Ready=True plus Failed.
            "Failed" => {
                let message =
                    format!("Job Failed. failed: {}/{}", failed, completions);
                return Ok(vec![
                    Condition::new(ConditionType::Ready, message.clone()),
                    Condition::new(ConditionType::Failed, message),
                ]);
            }
            _ => {}
        }
    }

    if start_time.is_empty() {
        return not_ready("Job not started");
    }
    ready(format!(
        "Job in progress. success:{}, active: {}, failed: {}",
        succeeded, active, failed
    ))
}

pub fn service_conditions(u: &Unstructured) -> Conditions {
    let obj = u.content();
    let spec_type = get_string_field(obj, ".spec.type", "ClusterIP");
    let cluster_ip = get_string_field(obj, ".spec.clusterIP", "");

    if spec_type == "LoadBalancer" {
        if cluster_ip.is_empty() {
            return not_ready("ClusterIP not set. Service type: LoadBalancer");
        }
        return ready(format!("ClusterIP: {}", cluster_ip));
    }

    ready(format!("Always Ready. Service type: {}", spec_type))
}

