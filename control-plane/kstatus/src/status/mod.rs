pub mod builtin;
pub mod condition;
pub mod error;
pub mod generic;
pub mod registry;
pub mod result;
pub mod runner;

pub use condition::{Condition, ConditionStatus, ConditionType, get_condition};
pub use error::{AggregateError, StatusError};
pub use registry::{
    ConditionsFn, ReadinessRule, builtin_rules, has_builtin_rule, is_ready,
    readiness_fn,
};
pub use result::{Outcome, ResourceStatus, StatusResult};
pub use runner::StatusRunner;


use crate::unstructured::{Object, get_int_field};

pub(crate) const GENERATION_MISMATCH: &str = "Controller has not observed the latest change. Status generation does not match with metadata";

/// `status.observedGeneration == metadata.generation`, where a missing
/// `metadata.generation` reads as -1 and a missing observed generation reads
/// as `observed_default`, or as the metadata generation when `None`.
pub(crate) fn generation_observed(
    obj: &Object,
    observed_default: Option<i64>,
) -> bool {
    let meta_generation = get_int_field(obj, ".metadata.generation", -1);
    let observed_generation = get_int_field(
        obj,
        ".status.observedGeneration",
        observed_default.unwrap_or(meta_generation),
    );
    observed_generation == meta_generation
}
