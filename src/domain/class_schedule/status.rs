//! Class lifecycle status.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{StateMachine, ValidationError};

/// Lifecycle status of a scheduled class.
///
/// Transitions are one-directional: a class leaves `Scheduled` for either
/// `Cancelled` or `Completed` and never comes back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClassStatus {
    Scheduled,
    Cancelled,
    Completed,
}

impl ClassStatus {
    /// Returns the storage representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ClassStatus::Scheduled => "SCHEDULED",
            ClassStatus::Cancelled => "CANCELLED",
            ClassStatus::Completed => "COMPLETED",
        }
    }
}

impl StateMachine for ClassStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use ClassStatus::*;
        matches!((self, target), (Scheduled, Cancelled) | (Scheduled, Completed))
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use ClassStatus::*;
        match self {
            Scheduled => vec![Cancelled, Completed],
            Cancelled => vec![],
            Completed => vec![],
        }
    }
}

impl fmt::Display for ClassStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ClassStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SCHEDULED" => Ok(ClassStatus::Scheduled),
            "CANCELLED" => Ok(ClassStatus::Cancelled),
            "COMPLETED" => Ok(ClassStatus::Completed),
            other => Err(ValidationError::invalid_format(
                "class_status",
                format!("Unknown class status: {}", other),
            )),
        }
    }
}
