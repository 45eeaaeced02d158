use std::sync::Arc;

use super::condition::{Condition, ConditionType, get_condition};
use super::error::StatusError;
use crate::unstructured::Unstructured;

/// What evaluating one resource produced: its conditions, or the error that
/// prevented fetching or evaluating it.
#[derive(Debug, Clone)]
pub enum Outcome {
    Conditions(Vec<Condition>),
    Error(Arc<StatusError>),
}

#[derive(Debug, Clone)]
pub struct ResourceStatus {
    /// The live snapshot, or the input reference when the fetch failed.
    pub resource: Unstructured,
    pub outcome: Outcome,
}

impl ResourceStatus {
    pub fn evaluated(resource: Unstructured, conditions: Vec<Condition>) -> Self {
        Self {
            resource,
            outcome: Outcome::Conditions(conditions),
        }
    }

    pub fn failed(resource: Unstructured, error: StatusError) -> Self {
        Self {
            resource,
            outcome: Outcome::Error(Arc::new(error)),
        }
    }

    pub fn conditions(&self) -> &[Condition] {
        match &self.outcome {
            Outcome::Conditions(c) => c,
            Outcome::Error(_) => &[],
        }
    }

    pub fn error(&self) -> Option<&Arc<StatusError>> {
        match &self.outcome {
            Outcome::Error(e) => Some(e),
            Outcome::Conditions(_) => None,
        }
    }

    pub fn condition(&self, type_: ConditionType) -> Option<&Condition> {
        get_condition(self.conditions(), type_)
    }

    /// Ready=True was reported (errors are never ready).
    pub fn is_ready(&self) -> bool {
        self.condition(ConditionType::Ready)
            .is_some_and(Condition::is_true)
    }

    /// The `Completed` or `Failed` condition, if the resource finished running.
    pub fn terminal(&self) -> Option<&Condition> {
        self.conditions().iter().find(|c| c.type_.is_terminal())
    }
}

/// Per-resource statuses of one batch, in input order.
#[derive(Debug, Clone, Default)]
pub struct StatusResult {
    pub resources: Vec<ResourceStatus>,
}

impl StatusResult {
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ResourceStatus> {
        self.resources.iter()
    }

    pub fn all_ready(&self) -> bool {
        self.resources.iter().all(ResourceStatus::is_ready)
    }

    pub fn errors(&self) -> Vec<Arc<StatusError>> {
        self.resources
            .iter()
            .filter_map(|s| s.error().cloned())
            .collect()
    }
}

impl<'a> IntoIterator for &'a StatusResult {
    type Item = &'a ResourceStatus;
    type IntoIter = std::slice::Iter<'a, ResourceStatus>;

    fn into_iter(self) -> Self::IntoIter {
        self.resources.iter()
    }
}
