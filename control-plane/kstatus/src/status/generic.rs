use super::condition::{Condition, ConditionType};
use super::error::StatusError;
use super::{GENERATION_MISMATCH, generation_observed};
use crate::unstructured::{Unstructured, get_conditions, get_string_field};

/// Fallback for kinds without a built-in rule, chiefly custom resources.
///
/// Mirrors every `Ready` entry of `status.conditions` in encounter order.
/// Absence of a `Ready` entry is treated optimistically as ready.
pub fn ready_condition_reader(
    u: &Unstructured,
) -> Result<Vec<Condition>, StatusError> {
    let obj = u.content();

    // A missing observedGeneration counts as observed for unknown kinds.
    if !generation_observed(obj, None) {
        return Ok(vec![
            Condition::new(ConditionType::Ready, GENERATION_MISMATCH)
                .into_false(),
        ]);
    }

    let mut out = Vec::new();
    for c in get_conditions(obj) {
        if get_string_field(c, "type", "") != "Ready" {
            continue;
        }
        let reason = get_string_field(c, "reason", "");
        let condition = Condition::new(ConditionType::Ready, reason);
        if get_string_field(c, "status", "") == "False" {
            out.push(condition.into_false());
        } else {
            out.push(condition);
        }
    }

    if out.is_empty() {
        out.push(Condition::new(
            ConditionType::Ready,
            "No Ready condition found",
        ));
    }
    Ok(out)
}
