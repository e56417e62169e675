//! Reservation unit of work port.
//!
//! The one place where correctness under concurrent access is non-trivial:
//! every operation that mutates a class's booking counter runs inside a
//! unit of work that holds an exclusive lock on the class row from
//! `lock_class` until `commit` (or rollback on drop).
//!
//! Locking contract:
//!
//! - `lock_class` blocks until no other unit of work holds the same class,
//!   then returns the counter as the previous holder left it. Concurrent
//!   mutators of the same class are strictly serialized.
//! - All writes issued through the work are atomic: either the commit
//!   persists every one of them or none.
//! - Dropping the work without committing discards every write and
//!   releases the lock.
//!
//! The Postgres adapter realizes the lock as `SELECT ... FOR UPDATE` inside
//! a transaction; the in-memory adapter holds an owned mutex guard for the
//! lifetime of the work.

use async_trait::async_trait;

use crate::domain::booking::{Booking, NewBooking};
use crate::domain::class_schedule::ClassSchedule;
use crate::domain::foundation::{BookingId, ClassScheduleId, DomainError, UserId};

/// Factory for reservation units of work.
#[async_trait]
pub trait ReservationUnitOfWork: Send + Sync {
    /// Opens a new atomic unit of work.
    async fn begin(&self) -> Result<Box<dyn ReservationWork>, DomainError>;
}

/// One atomic reservation transaction.
#[async_trait]
pub trait ReservationWork: Send {
    /// Loads a class under an exclusive lock.
    ///
    /// Blocks until the lock is granted; the lock is held until this work
    /// commits or is dropped. Returns `None` if the class does not exist.
    async fn lock_class(
        &mut self,
        id: ClassScheduleId,
    ) -> Result<Option<ClassSchedule>, DomainError>;

    /// Finds a booking inside this work's view of the ledger.
    async fn find_booking(&mut self, id: BookingId) -> Result<Option<Booking>, DomainError>;

    /// Checks for an existing (user, class) ledger entry of any status.
    async fn booking_exists(
        &mut self,
        user_id: UserId,
        class_schedule_id: ClassScheduleId,
    ) -> Result<bool, DomainError>;

    /// Appends a ledger entry and returns it with its assigned identity.
    ///
    /// # Errors
    ///
    /// - `DuplicateBooking` if the (user, class) uniqueness constraint
    ///   rejects the insert
    async fn insert_booking(&mut self, new_booking: NewBooking) -> Result<Booking, DomainError>;

    /// Writes back a mutated ledger entry.
    async fn update_booking(&mut self, booking: &Booking) -> Result<(), DomainError>;

    /// Writes back the locked class aggregate.
    async fn update_class(&mut self, class: &ClassSchedule) -> Result<(), DomainError>;

    /// Commits every write and releases the lock.
    async fn commit(self: Box<Self>) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reservation_unit_of_work_is_object_safe() {
        fn _accepts_dyn(_uow: &dyn ReservationUnitOfWork) {}
    }
}
