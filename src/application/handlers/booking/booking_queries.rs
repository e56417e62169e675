//! Read-only booking queries.
//!
//! Unlocked, side-effect-free lookups over the booking ledger. Listings
//! tolerate staleness of at most one in-flight reservation transaction.

use std::sync::Arc;

use crate::domain::booking::{BookingError, BookingStatus};
use crate::domain::foundation::{BookingId, ClassScheduleId, UserId};
use crate::ports::{BookingReader, BookingView, UserRepository};

/// Query handler over the booking ledger.
pub struct BookingQueries {
    users: Arc<dyn UserRepository>,
    reader: Arc<dyn BookingReader>,
}

impl BookingQueries {
    pub fn new(users: Arc<dyn UserRepository>, reader: Arc<dyn BookingReader>) -> Self {
        Self { users, reader }
    }

    /// Returns a single booking view.
    pub async fn get_booking(&self, id: BookingId) -> Result<BookingView, BookingError> {
        self.reader
            .find_view_by_id(id)
            .await?
            .ok_or_else(|| BookingError::not_found(id))
    }

    /// Lists every booking a user holds.
    pub async fn list_user_bookings(
        &self,
        user_id: UserId,
    ) -> Result<Vec<BookingView>, BookingError> {
        self.ensure_user_exists(user_id).await?;
        Ok(self.reader.list_by_user(user_id).await?)
    }

    /// Lists a user's confirmed bookings.
    pub async fn list_active_user_bookings(
        &self,
        user_id: UserId,
    ) -> Result<Vec<BookingView>, BookingError> {
        self.ensure_user_exists(user_id).await?;
        Ok(self
            .reader
            .list_by_user_and_status(user_id, BookingStatus::Confirmed)
            .await?)
    }

    /// Lists every booking against a class.
    pub async fn list_class_bookings(
        &self,
        class_schedule_id: ClassScheduleId,
    ) -> Result<Vec<BookingView>, BookingError> {
        Ok(self.reader.list_by_class(class_schedule_id).await?)
    }

    /// Lists the whole ledger.
    pub async fn list_all_bookings(&self) -> Result<Vec<BookingView>, BookingError> {
        Ok(self.reader.list_all().await?)
    }

    async fn ensure_user_exists(&self, user_id: UserId) -> Result<(), BookingError> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| BookingError::user_not_found(user_id))?;
        Ok(())
    }
}
