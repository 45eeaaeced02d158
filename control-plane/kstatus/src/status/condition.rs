use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "PascalCase")]
pub enum ConditionType {
    // Level conditions
    Ready,
    Settled,
    // Terminal conditions
    Failed,
    Completed,
}

impl ConditionType {
    pub fn is_terminal(self) -> bool {
        matches!(self, ConditionType::Failed | ConditionType::Completed)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ConditionType::Ready => "Ready",
            ConditionType::Settled => "Settled",
            ConditionType::Failed => "Failed",
            ConditionType::Completed => "Completed",
        }
    }
}

impl fmt::Display for ConditionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub enum ConditionStatus {
    True,
    False,
    Unknown,
}

impl ConditionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ConditionStatus::True => "True",
            ConditionStatus::False => "False",
            ConditionStatus::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for ConditionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Condition {
    #[serde(rename = "type")]
    pub type_: ConditionType,
    pub status: ConditionStatus,
    pub reason: String,
}

impl Condition {
    /// A `True` condition carrying `reason`.
    pub fn new(type_: ConditionType, reason: impl Into<String>) -> Self {
        Self {
            type_,
            status: ConditionStatus::True,
            reason: reason.into(),
        }
    }

    /// A `False` condition with an empty reason.
    pub fn new_false(type_: ConditionType) -> Self {
        Self {
            type_,
            status: ConditionStatus::False,
            reason: String::new(),
        }
    }

    pub fn into_false(mut self) -> Self {
        self.status = ConditionStatus::False;
        self
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = reason.into();
        self
    }

    pub fn is_true(&self) -> bool {
        self.status == ConditionStatus::True
    }
}

/// First condition of type `type_`, if any.
pub fn get_condition(
    conditions: &[Condition],
    type_: ConditionType,
) -> Option<&Condition> {
    conditions.iter().find(|c| c.type_ == type_)
}
