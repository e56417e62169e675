//! Booking ledger port (write side).
//!
//! Ledger inserts and the paired counter update flow through the
//! reservation unit of work; this port covers the unlocked lookups the
//! handlers run before entering it.

use async_trait::async_trait;

use crate::domain::booking::Booking;
use crate::domain::foundation::{BookingId, ClassScheduleId, DomainError, UserId};

/// Repository port for booking ledger lookups.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Finds a booking by id. Returns `None` if absent.
    async fn find_by_id(&self, id: BookingId) -> Result<Option<Booking>, DomainError>;

    /// Checks whether a booking of any status exists for the pair.
    ///
    /// This is the service-level fast-fail; the storage uniqueness
    /// constraint remains the authoritative guard.
    async fn exists_by_user_and_class(
        &self,
        user_id: UserId,
        class_schedule_id: ClassScheduleId,
    ) -> Result<bool, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn booking_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn BookingRepository) {}
    }
}
