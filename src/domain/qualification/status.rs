//! QualificationStatus enum for the lifecycle of a qualification run.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::StateMachine;

/// Lifecycle status of a qualification session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum QualificationStatus {
    /// Questions are still being asked.
    #[default]
    InProgress,
    /// A product was fully cleared.
    Qualified,
    /// Every product was disqualified.
    Exhausted,
}

impl QualificationStatus {
    /// Returns true once the flow has produced its terminal result.
    pub fn is_complete(&self) -> bool {
        !matches!(self, QualificationStatus::InProgress)
    }
}

impl StateMachine for QualificationStatus {
    fn valid_transitions(&self) -> Vec<Self> {
        use QualificationStatus::*;
        match self {
            InProgress => vec![Qualified, Exhausted],
            Qualified | Exhausted => vec![],
        }
    }
}

impl fmt::Display for QualificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            QualificationStatus::InProgress => "In progress",
            QualificationStatus::Qualified => "Qualified",
            QualificationStatus::Exhausted => "Exhausted",
        };
        write!(f, "{}", s)
    }
}
