//! TimeRange value object.
//!
//! The scheduled window of a class: a start and end instant plus the
//! predicates the booking rules are written against.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Timestamp, ValidationError};

/// Shortest class duration accepted, in minutes.
pub const MIN_DURATION_MINUTES: i64 = 30;

/// Longest class duration accepted, in minutes.
pub const MAX_DURATION_MINUTES: i64 = 8 * 60;

/// Start and end instant of a scheduled class.
///
/// # Invariants
///
/// - `start` is strictly before `end`
/// - Duration is within `[30 minutes, 8 hours]`
/// - Immutable once constructed; equality by value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    start: Timestamp,
    end: Timestamp,
}

impl TimeRange {
    /// Creates a time range, validating ordering and duration bounds.
    pub fn new(start: Timestamp, end: Timestamp) -> Result<Self, ValidationError> {
        if !start.is_before(&end) {
            return Err(ValidationError::invalid_format(
                "time_range",
                "Start time must be before end time",
            ));
        }
        let minutes = end.duration_since(&start).num_minutes();
        if minutes < MIN_DURATION_MINUTES {
            return Err(ValidationError::invalid_format(
                "time_range",
                format!("Class duration must be at least {} minutes", MIN_DURATION_MINUTES),
            ));
        }
        if minutes > MAX_DURATION_MINUTES {
            return Err(ValidationError::invalid_format(
                "time_range",
                "Class duration cannot exceed 8 hours",
            ));
        }
        Ok(Self { start, end })
    }

    /// Returns the start instant.
    pub fn start(&self) -> Timestamp {
        self.start
    }

    /// Returns the end instant.
    pub fn end(&self) -> Timestamp {
        self.end
    }

    /// Returns the duration in minutes.
    pub fn duration_minutes(&self) -> i64 {
        self.end.duration_since(&self.start).num_minutes()
    }

    /// Checks whether this range overlaps another.
    pub fn overlaps(&self, other: &TimeRange) -> bool {
        !(self.end.is_before(&other.start) || self.start.is_after(&other.end))
    }

    /// Checks whether the class has started (start instant reached).
    pub fn has_started(&self) -> bool {
        !Timestamp::now().is_before(&self.start)
    }

    /// Checks whether the class has ended.
    pub fn has_ended(&self) -> bool {
        Timestamp::now().is_after(&self.end)
    }

    /// Checks whether the class is currently in progress.
    pub fn is_in_progress(&self) -> bool {
        let now = Timestamp::now();
        !now.is_before(&self.start) && now.is_before(&self.end)
    }

    /// Checks whether the class starts within the next `minutes`.
    pub fn is_starting_soon(&self, minutes: i64) -> bool {
        let now = Timestamp::now();
        let threshold = self.start.minus_minutes(minutes);
        !now.is_before(&threshold) && now.is_before(&self.start)
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.start, self.end)
    }
}
