//! Booking reader port (read side).
//!
//! Unlocked, side-effect-free queries that join the ledger with user and
//! class data for display. Readers tolerate staleness of at most one
//! in-flight reservation transaction.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::booking::BookingStatus;
use crate::domain::foundation::{BookingId, ClassScheduleId, DomainError, Timestamp, UserId};

/// Booking joined with the user and class it references.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingView {
    pub id: BookingId,
    pub user_id: UserId,
    pub user_email: String,
    pub class_schedule_id: ClassScheduleId,
    pub class_name: String,
    pub class_start_time: Timestamp,
    pub status: BookingStatus,
    pub booked_at: Timestamp,
    pub cancelled_at: Option<Timestamp>,
    pub note: Option<String>,
}

/// Read port over the booking ledger.
#[async_trait]
pub trait BookingReader: Send + Sync {
    /// Finds a booking view by id. Returns `None` if absent.
    async fn find_view_by_id(&self, id: BookingId) -> Result<Option<BookingView>, DomainError>;

    /// Lists every booking a user holds, newest first.
    async fn list_by_user(&self, user_id: UserId) -> Result<Vec<BookingView>, DomainError>;

    /// Lists a user's bookings with the given status, newest first.
    async fn list_by_user_and_status(
        &self,
        user_id: UserId,
        status: BookingStatus,
    ) -> Result<Vec<BookingView>, DomainError>;

    /// Lists every booking against a class, newest first.
    async fn list_by_class(
        &self,
        class_schedule_id: ClassScheduleId,
    ) -> Result<Vec<BookingView>, DomainError>;

    /// Lists the whole ledger, newest first.
    async fn list_all(&self) -> Result<Vec<BookingView>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn booking_reader_is_object_safe() {
        fn _accepts_dyn(_reader: &dyn BookingReader) {}
    }

    #[test]
    fn booking_view_serializes_round_trip() {
        let view = BookingView {
            id: BookingId::new(1),
            user_id: UserId::new(42),
            user_email: "alice@example.com".to_string(),
            class_schedule_id: ClassScheduleId::new(7),
            class_name: "Morning Yoga".to_string(),
            class_start_time: Timestamp::now(),
            status: BookingStatus::Confirmed,
            booked_at: Timestamp::now(),
            cancelled_at: None,
            note: None,
        };

        let json = serde_json::to_string(&view).unwrap();
        let restored: BookingView = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, view);
    }
}
