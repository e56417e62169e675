//! ClassSchedule aggregate entity.
//!
//! The aggregate owns the booking counter and status life cycle of a single
//! scheduled class. All mutation goes through its methods; validation happens
//! before any field is written, so a failed call leaves the aggregate
//! unchanged.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    Capacity, ClassScheduleId, DomainError, ErrorCode, EventId, InstructorId, Location,
    StateMachine, TimeRange, Timestamp, ValidationError,
};

use super::{ClassBooked, ClassCancelled, ClassCompleted, ClassStatus};

/// Longest accepted class name.
pub const MAX_NAME_LENGTH: usize = 200;

/// Validated input for a class that has not been persisted yet.
///
/// Storage assigns the identity; repositories take a `NewClassSchedule` and
/// return the full [`ClassSchedule`] aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewClassSchedule {
    pub name: String,
    pub description: String,
    pub instructor_id: InstructorId,
    pub time_range: TimeRange,
    pub capacity: Capacity,
    pub location: Location,
}

impl NewClassSchedule {
    /// Validating factory for a new class.
    ///
    /// Value objects arrive already validated; this checks the plain fields.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        instructor_id: InstructorId,
        time_range: TimeRange,
        capacity: Capacity,
        location: Location,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::empty_field("name"));
        }
        if name.chars().count() > MAX_NAME_LENGTH {
            return Err(ValidationError::invalid_format(
                "name",
                format!("Class name cannot exceed {} characters", MAX_NAME_LENGTH),
            ));
        }
        Ok(Self {
            name: name.trim().to_string(),
            description: description.into(),
            instructor_id,
            time_range,
            capacity,
            location,
        })
    }
}

/// ClassSchedule aggregate - a bookable class with a capacity limit.
///
/// # Invariants
///
/// - `0 <= current_bookings <= capacity` at all times
/// - Status transitions are one-directional (Scheduled -> Cancelled,
///   Scheduled -> Completed) and never reversed
/// - Terminal statuses freeze both the status and the booking counter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassSchedule {
    id: ClassScheduleId,
    name: String,
    description: String,
    instructor_id: InstructorId,
    time_range: TimeRange,
    capacity: Capacity,
    current_bookings: u32,
    location: Location,
    status: ClassStatus,
    created_at: Timestamp,
    updated_at: Timestamp,
    version: i64,
}

impl ClassSchedule {
    /// Reconstitute a class from persistence (no validation, no events).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: ClassScheduleId,
        name: String,
        description: String,
        instructor_id: InstructorId,
        time_range: TimeRange,
        capacity: Capacity,
        current_bookings: u32,
        location: Location,
        status: ClassStatus,
        created_at: Timestamp,
        updated_at: Timestamp,
        version: i64,
    ) -> Self {
        Self {
            id,
            name,
            description,
            instructor_id,
            time_range,
            capacity,
            current_bookings,
            location,
            status,
            created_at,
            updated_at,
            version,
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> ClassScheduleId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn instructor_id(&self) -> InstructorId {
        self.instructor_id
    }

    pub fn time_range(&self) -> &TimeRange {
        &self.time_range
    }

    pub fn capacity(&self) -> Capacity {
        self.capacity
    }

    pub fn current_bookings(&self) -> u32 {
        self.current_bookings
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn status(&self) -> ClassStatus {
        self.status
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    /// Optimistic concurrency version, bumped by storage on every update.
    pub fn version(&self) -> i64 {
        self.version
    }

    // ─────────────────────────────────────────────────────────────────────
    // Derived state
    // ─────────────────────────────────────────────────────────────────────

    /// Checks whether every seat is taken.
    pub fn is_full(&self) -> bool {
        !self.capacity.has_availability(self.current_bookings)
    }

    /// Returns the number of free seats.
    pub fn remaining_seats(&self) -> Result<u32, DomainError> {
        self.capacity.remaining(self.current_bookings)
    }

    pub fn has_started(&self) -> bool {
        self.time_range.has_started()
    }

    pub fn has_ended(&self) -> bool {
        self.time_range.has_ended()
    }

    pub fn is_in_progress(&self) -> bool {
        self.time_range.is_in_progress()
    }

    pub fn is_starting_soon(&self, minutes: i64) -> bool {
        self.time_range.is_starting_soon(minutes)
    }

    pub fn duration_minutes(&self) -> i64 {
        self.time_range.duration_minutes()
    }

    // ─────────────────────────────────────────────────────────────────────
    // Commands
    // ─────────────────────────────────────────────────────────────────────

    /// Takes one seat in the class.
    ///
    /// Preconditions: status is Scheduled, the class has not started, and a
    /// seat is free. Each failure carries a distinct code and message.
    ///
    /// # Errors
    ///
    /// - `ClassNotOpenForBooking` if the class is not Scheduled
    /// - `ClassAlreadyStarted` if the start instant has passed
    /// - `ClassFull` if every seat is taken
    pub fn book(&mut self) -> Result<ClassBooked, DomainError> {
        self.validate_booking()?;

        self.current_bookings += 1;
        self.updated_at = Timestamp::now();

        Ok(ClassBooked {
            event_id: EventId::new(),
            class_schedule_id: self.id,
            class_name: self.name.clone(),
            current_bookings: self.current_bookings,
            capacity: self.capacity.value(),
            occurred_at: self.updated_at,
        })
    }

    /// Releases one seat after a booking is cancelled.
    ///
    /// # Errors
    ///
    /// - `NoBookingsToCancel` if the counter is already zero
    /// - `ClassAlreadyEnded` if the class has ended
    pub fn cancel_booking(&mut self) -> Result<(), DomainError> {
        if self.current_bookings == 0 {
            return Err(DomainError::new(
                ErrorCode::NoBookingsToCancel,
                "No bookings to cancel",
            ));
        }
        if self.has_ended() {
            return Err(DomainError::new(
                ErrorCode::ClassAlreadyEnded,
                "Cannot cancel booking for a class that has ended",
            ));
        }

        self.current_bookings -= 1;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Cancels the whole class.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` if the class is not Scheduled
    /// - `ClassAlreadyStarted` if the class has started
    pub fn cancel(&mut self, reason: Option<String>) -> Result<ClassCancelled, DomainError> {
        if self.status != ClassStatus::Scheduled {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                "Only scheduled classes can be cancelled",
            ));
        }
        if self.has_started() {
            return Err(DomainError::new(
                ErrorCode::ClassAlreadyStarted,
                "Cannot cancel a class that has already started",
            ));
        }

        self.status = self.status.transition_to(ClassStatus::Cancelled)?;
        self.updated_at = Timestamp::now();

        Ok(ClassCancelled {
            event_id: EventId::new(),
            class_schedule_id: self.id,
            class_name: self.name.clone(),
            current_bookings: self.current_bookings,
            reason,
            occurred_at: self.updated_at,
        })
    }

    /// Marks the class completed once it has ended.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` if the class is not Scheduled or has not
    ///   ended yet
    pub fn complete(&mut self) -> Result<ClassCompleted, DomainError> {
        if self.status != ClassStatus::Scheduled {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                "Only scheduled classes can be completed",
            ));
        }
        if !self.has_ended() {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                "Class must have ended to be marked as completed",
            ));
        }

        self.status = self.status.transition_to(ClassStatus::Completed)?;
        self.updated_at = Timestamp::now();

        Ok(ClassCompleted {
            event_id: EventId::new(),
            class_schedule_id: self.id,
            class_name: self.name.clone(),
            final_bookings: self.current_bookings,
            started_at: self.time_range.start(),
            ended_at: self.time_range.end(),
            occurred_at: self.updated_at,
        })
    }

    /// Updates name, description, and location.
    pub fn update_info(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        location: Location,
    ) -> Result<(), DomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::new(
                ErrorCode::EmptyField,
                "Class name cannot be empty",
            ));
        }

        self.name = name.trim().to_string();
        self.description = description.into();
        self.location = location;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Reschedules the class.
    ///
    /// # Errors
    ///
    /// - `ClassAlreadyStarted` once the original start instant has passed
    pub fn update_time(&mut self, new_range: TimeRange) -> Result<(), DomainError> {
        if self.has_started() {
            return Err(DomainError::new(
                ErrorCode::ClassAlreadyStarted,
                "Cannot change time for a class that has already started",
            ));
        }

        self.time_range = new_range;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Resizes the class.
    ///
    /// # Errors
    ///
    /// - `CapacityBelowBookings` if the new capacity would strand existing
    ///   bookings
    pub fn update_capacity(&mut self, new_capacity: Capacity) -> Result<(), DomainError> {
        if new_capacity.value() < self.current_bookings {
            return Err(DomainError::new(
                ErrorCode::CapacityBelowBookings,
                "New capacity cannot be less than current bookings",
            ));
        }

        self.capacity = new_capacity;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Bulk update used by the administration path.
    ///
    /// Validates everything up front; nothing changes if any check fails.
    pub fn update(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        time_range: TimeRange,
        capacity: Capacity,
        location: Location,
    ) -> Result<(), DomainError> {
        if self.has_started() {
            return Err(DomainError::new(
                ErrorCode::ClassAlreadyStarted,
                "Cannot update a class that has already started",
            ));
        }
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::new(
                ErrorCode::EmptyField,
                "Class name cannot be empty",
            ));
        }
        if capacity.value() < self.current_bookings {
            return Err(DomainError::new(
                ErrorCode::CapacityBelowBookings,
                "New capacity cannot be less than current bookings",
            ));
        }

        self.name = name.trim().to_string();
        self.description = description.into();
        self.time_range = time_range;
        self.capacity = capacity;
        self.location = location;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    fn validate_booking(&self) -> Result<(), DomainError> {
        if self.status != ClassStatus::Scheduled {
            return Err(DomainError::new(
                ErrorCode::ClassNotOpenForBooking,
                "Cannot book a class that is not scheduled",
            ));
        }
        if self.has_started() {
            return Err(DomainError::new(
                ErrorCode::ClassAlreadyStarted,
                "Cannot book a class that has already started",
            ));
        }
        if self.is_full() {
            return Err(DomainError::new(ErrorCode::ClassFull, "Class is full"));
        }
        Ok(())
    }
}
