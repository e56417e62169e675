//! Foundation module - Shared domain primitives.
//!
//! Value objects, identifiers, timestamps, error types, the state machine
//! trait, and the domain event infrastructure used across all aggregates.

mod capacity;
mod email;
mod errors;
mod events;
mod ids;
mod location;
mod state_machine;
mod time_range;
mod timestamp;

pub use capacity::{Capacity, MAX_CAPACITY, MIN_CAPACITY};
pub use email::EmailAddress;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use events::{DomainEvent, EventEnvelope, EventId, EventMetadata};
pub use ids::{BookingId, ClassScheduleId, InstructorId, UserId};
pub use location::{Location, MAX_LOCATION_LENGTH};
pub use state_machine::StateMachine;
pub use time_range::{TimeRange, MAX_DURATION_MINUTES, MIN_DURATION_MINUTES};
pub use timestamp::Timestamp;
