//! Class schedule repository port (non-locking paths).
//!
//! Covers class creation, lifecycle updates, deletion, and read queries.
//! Updates are guarded by the aggregate version; the exclusive-lock path
//! used by seat mutations lives in the reservation unit of work instead.

use async_trait::async_trait;

use crate::domain::class_schedule::{ClassSchedule, ClassStatus, NewClassSchedule};
use crate::domain::foundation::{ClassScheduleId, DomainError, InstructorId, Timestamp};

/// Repository port for ClassSchedule aggregate persistence.
#[async_trait]
pub trait ClassScheduleRepository: Send + Sync {
    /// Persists a new class and returns the Scheduled aggregate with zero
    /// bookings and its assigned identity.
    async fn insert(&self, new_class: NewClassSchedule) -> Result<ClassSchedule, DomainError>;

    /// Updates an existing class.
    ///
    /// The write is guarded by the aggregate's version; a stale version
    /// means another writer got there first.
    ///
    /// # Errors
    ///
    /// - `ClassNotFound` if the class doesn't exist
    /// - `ConcurrencyConflict` if the stored version differs
    async fn update(&self, class: &ClassSchedule) -> Result<(), DomainError>;

    /// Hard-deletes a class.
    ///
    /// Callers must only delete classes with zero bookings; classes with
    /// ledger history are soft-cancelled instead.
    ///
    /// # Errors
    ///
    /// - `ClassNotFound` if the class doesn't exist
    async fn delete(&self, id: ClassScheduleId) -> Result<(), DomainError>;

    /// Finds a class by id. Returns `None` if absent.
    async fn find_by_id(&self, id: ClassScheduleId) -> Result<Option<ClassSchedule>, DomainError>;

    /// Lists classes with the given status.
    async fn find_by_status(&self, status: ClassStatus) -> Result<Vec<ClassSchedule>, DomainError>;

    /// Lists classes assigned to an instructor.
    async fn find_by_instructor(
        &self,
        instructor_id: InstructorId,
    ) -> Result<Vec<ClassSchedule>, DomainError>;

    /// Lists classes with the given status starting after `now`, soonest
    /// first.
    async fn find_upcoming_by_status(
        &self,
        status: ClassStatus,
        now: Timestamp,
    ) -> Result<Vec<ClassSchedule>, DomainError>;
}
