//! Domain events emitted by the ClassSchedule aggregate.
//!
//! Events are returned by the aggregate's command methods and dispatched by
//! the application layer after the surrounding unit of work commits.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ClassScheduleId, EventId, Timestamp};
use crate::domain_event;

/// A seat was booked in a class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassBooked {
    pub event_id: EventId,
    pub class_schedule_id: ClassScheduleId,
    pub class_name: String,
    pub current_bookings: u32,
    pub capacity: u32,
    pub occurred_at: Timestamp,
}

impl ClassBooked {
    /// Returns the number of seats still free after this booking.
    pub fn remaining_seats(&self) -> u32 {
        self.capacity.saturating_sub(self.current_bookings)
    }

    /// Checks whether this booking filled the class.
    pub fn is_full(&self) -> bool {
        self.current_bookings >= self.capacity
    }
}

domain_event!(
    ClassBooked,
    event_type = "class.booked",
    aggregate_id = class_schedule_id,
    aggregate_type = "ClassSchedule",
    occurred_at = occurred_at,
    event_id = event_id
);

/// A class was cancelled before it started.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassCancelled {
    pub event_id: EventId,
    pub class_schedule_id: ClassScheduleId,
    pub class_name: String,
    pub current_bookings: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub occurred_at: Timestamp,
}

domain_event!(
    ClassCancelled,
    event_type = "class.cancelled",
    aggregate_id = class_schedule_id,
    aggregate_type = "ClassSchedule",
    occurred_at = occurred_at,
    event_id = event_id
);

/// A class ended and was marked completed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassCompleted {
    pub event_id: EventId,
    pub class_schedule_id: ClassScheduleId,
    pub class_name: String,
    pub final_bookings: u32,
    pub started_at: Timestamp,
    pub ended_at: Timestamp,
    pub occurred_at: Timestamp,
}

impl ClassCompleted {
    /// Returns how long the class ran, in minutes.
    pub fn duration_minutes(&self) -> i64 {
        self.ended_at.duration_since(&self.started_at).num_minutes()
    }
}

domain_event!(
    ClassCompleted,
    event_type = "class.completed",
    aggregate_id = class_schedule_id,
    aggregate_type = "ClassSchedule",
    occurred_at = occurred_at,
    event_id = event_id
);
