//! Booking ledger record.
//!
//! A booking ties one user to one class. At most one row may exist per
//! (user, class) pair; the storage uniqueness constraint is the
//! authoritative guard and the reservation handler checks defensively
//! before inserting.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    BookingId, ClassScheduleId, DomainError, ErrorCode, StateMachine, Timestamp, UserId,
};

use super::BookingStatus;

/// Validated input for a booking that has not been persisted yet.
///
/// Storage assigns the identity; the reservation unit of work takes a
/// `NewBooking` and returns the full [`Booking`] record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewBooking {
    pub user_id: UserId,
    pub class_schedule_id: ClassScheduleId,
    pub status: BookingStatus,
    pub booked_at: Timestamp,
    pub note: Option<String>,
}

impl NewBooking {
    /// Creates a confirmed booking for a user and class.
    pub fn confirmed(
        user_id: UserId,
        class_schedule_id: ClassScheduleId,
        note: Option<String>,
    ) -> Self {
        Self {
            user_id,
            class_schedule_id,
            status: BookingStatus::Confirmed,
            booked_at: Timestamp::now(),
            note,
        }
    }
}

/// Booking ledger entry.
///
/// # Invariants
///
/// - At most one entry per (user, class) pair, enforced at the storage
///   boundary
/// - `cancelled_at` is set exactly when status is Cancelled
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    id: BookingId,
    user_id: UserId,
    class_schedule_id: ClassScheduleId,
    status: BookingStatus,
    booked_at: Timestamp,
    cancelled_at: Option<Timestamp>,
    note: Option<String>,
    version: i64,
}

impl Booking {
    /// Reconstitute a booking from persistence.
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: BookingId,
        user_id: UserId,
        class_schedule_id: ClassScheduleId,
        status: BookingStatus,
        booked_at: Timestamp,
        cancelled_at: Option<Timestamp>,
        note: Option<String>,
        version: i64,
    ) -> Self {
        Self {
            id,
            user_id,
            class_schedule_id,
            status,
            booked_at,
            cancelled_at,
            note,
            version,
        }
    }

    pub fn id(&self) -> BookingId {
        self.id
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn class_schedule_id(&self) -> ClassScheduleId {
        self.class_schedule_id
    }

    pub fn status(&self) -> BookingStatus {
        self.status
    }

    pub fn booked_at(&self) -> Timestamp {
        self.booked_at
    }

    pub fn cancelled_at(&self) -> Option<Timestamp> {
        self.cancelled_at
    }

    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    pub fn version(&self) -> i64 {
        self.version
    }

    pub fn is_confirmed(&self) -> bool {
        self.status == BookingStatus::Confirmed
    }

    pub fn is_cancelled(&self) -> bool {
        self.status == BookingStatus::Cancelled
    }

    /// Checks whether the booking belongs to the given user.
    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.user_id == user_id
    }

    /// Cancels this booking, recording the cancellation instant.
    ///
    /// # Errors
    ///
    /// - `BookingAlreadyCancelled` if the booking is not Confirmed
    pub fn cancel(&mut self) -> Result<(), DomainError> {
        if self.status == BookingStatus::Cancelled {
            return Err(DomainError::new(
                ErrorCode::BookingAlreadyCancelled,
                "Booking is already cancelled",
            ));
        }

        self.status = self.status.transition_to(BookingStatus::Cancelled)?;
        self.cancelled_at = Some(Timestamp::now());
        Ok(())
    }
}
