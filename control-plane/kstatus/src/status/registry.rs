use super::builtin;
use super::condition::Condition;
use super::error::StatusError;
use super::generic::ready_condition_reader;
use crate::unstructured::Unstructured;

pub type ConditionsFn = fn(&Unstructured) -> Result<Vec<Condition>, StatusError>;

#[derive(Clone)]
pub struct ReadinessRule {
    /// API group; `""` is the core group.
    pub group: &'static str,
    pub kind: &'static str,
    pub evaluator: ConditionsFn,
}

static BUILTIN_RULES: &[ReadinessRule] = &[
    ReadinessRule {
        group: "",
        kind: "Service",
        evaluator: builtin::service_conditions,
    },
    ReadinessRule {
        group: "",
        kind: "Pod",
        evaluator: builtin::pod_conditions,
    },
    ReadinessRule {
        group: "",
        kind: "PersistentVolumeClaim",
        evaluator: builtin::pvc_conditions,
    },
    ReadinessRule {
        group: "apps",
        kind: "StatefulSet",
        evaluator: builtin::statefulset_conditions,
    },
    ReadinessRule {
        group: "apps",
        kind: "DaemonSet",
        evaluator: builtin::daemonset_conditions,
    },
    ReadinessRule {
        group: "apps",
        kind: "Deployment",
        evaluator: builtin::deployment_conditions,
    },
    ReadinessRule {
        group: "apps",
        kind: "ReplicaSet",
        evaluator: builtin::replicaset_conditions,
    },
    ReadinessRule {
        group: "policy",
        kind: "PodDisruptionBudget",
        evaluator: builtin::pdb_conditions,
    },
    ReadinessRule {
        group: "batch",
        kind: "CronJob",
        evaluator: builtin::always_ready,
    },
    ReadinessRule {
        group: "batch",
        kind: "Job",
        evaluator: builtin::job_conditions,
    },
];

pub fn builtin_rules() -> &'static [ReadinessRule] {
    BUILTIN_RULES
}

pub fn has_builtin_rule(group: &str, kind: &str) -> bool {
    builtin_fn(group, kind).is_some()
}

/// Built-in evaluator for `(group, kind)`, if one exists.
pub fn builtin_fn(group: &str, kind: &str) -> Option<ConditionsFn> {
    BUILTIN_RULES
        .iter()
        .find(|r| r.group == group && r.kind == kind)
        .map(|r| r.evaluator)
}

/// Evaluator for `u`: the built-in rule for its group/kind, else the
/// generic `Ready` condition reader.
pub fn readiness_fn(u: &Unstructured) -> ConditionsFn {
    builtin_fn(&u.group(), &u.kind()).unwrap_or(ready_condition_reader)
}

/// Computes the conditions of a single resource snapshot.
pub fn is_ready(u: &Unstructured) -> Result<Vec<Condition>, StatusError> {
    (readiness_fn(u))(u)
}
