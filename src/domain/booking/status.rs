//! Booking ledger status.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{StateMachine, ValidationError};

/// Status of a booking ledger entry.
///
/// A booking is Confirmed at creation and can only move to Cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Confirmed,
    Cancelled,
}

impl BookingStatus {
    /// Returns the storage representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Confirmed => "CONFIRMED",
            BookingStatus::Cancelled => "CANCELLED",
        }
    }
}

impl StateMachine for BookingStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        matches!(
            (self, target),
            (BookingStatus::Confirmed, BookingStatus::Cancelled)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        match self {
            BookingStatus::Confirmed => vec![BookingStatus::Cancelled],
            BookingStatus::Cancelled => vec![],
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CONFIRMED" => Ok(BookingStatus::Confirmed),
            "CANCELLED" => Ok(BookingStatus::Cancelled),
            other => Err(ValidationError::invalid_format(
                "booking_status",
                format!("Unknown booking status: {}", other),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confirmed_can_only_become_cancelled() {
        assert!(BookingStatus::Confirmed.can_transition_to(&BookingStatus::Cancelled));
        assert_eq!(
            BookingStatus::Confirmed.valid_transitions(),
            vec![BookingStatus::Cancelled]
        );
    }

    #[test]
    fn cancelled_is_terminal() {
        assert!(BookingStatus::Cancelled.is_terminal());
        assert!(!BookingStatus::Cancelled.can_transition_to(&BookingStatus::Confirmed));
    }

    #[test]
    fn round_trips_through_storage_string() {
        for status in [BookingStatus::Confirmed, BookingStatus::Cancelled] {
            let parsed: BookingStatus = status.as_str().parse().unwrap();
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn rejects_unknown_storage_string() {
        let result: Result<BookingStatus, _> = "PENDING".parse();
        assert!(result.is_err());
    }
}
