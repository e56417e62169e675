//! CancelBookingHandler - cancels a user's booking and releases the seat.
//!
//! Ownership and idempotency are checked on the unlocked path for a fast
//! fail, then re-checked under the exclusive lock before anything mutates,
//! so two concurrent cancellations of the same booking cannot both
//! decrement the counter.

use std::sync::Arc;

use tracing::info;

use crate::domain::booking::{Booking, BookingError};
use crate::domain::foundation::{BookingId, UserId};
use crate::ports::{BookingRepository, ReservationUnitOfWork};

/// Command to cancel a booking.
#[derive(Debug, Clone)]
pub struct CancelBookingCommand {
    pub user_id: UserId,
    pub booking_id: BookingId,
}

/// Handler for booking cancellations.
pub struct CancelBookingHandler {
    bookings: Arc<dyn BookingRepository>,
    unit_of_work: Arc<dyn ReservationUnitOfWork>,
}

impl CancelBookingHandler {
    pub fn new(
        bookings: Arc<dyn BookingRepository>,
        unit_of_work: Arc<dyn ReservationUnitOfWork>,
    ) -> Self {
        Self {
            bookings,
            unit_of_work,
        }
    }

    pub async fn handle(&self, cmd: CancelBookingCommand) -> Result<Booking, BookingError> {
        // 1. Fast-fail checks on the unlocked path.
        let booking = self
            .bookings
            .find_by_id(cmd.booking_id)
            .await?
            .ok_or_else(|| BookingError::not_found(cmd.booking_id))?;

        if !booking.is_owned_by(cmd.user_id) {
            return Err(BookingError::Forbidden);
        }
        if booking.is_cancelled() {
            return Err(BookingError::AlreadyCancelled);
        }

        // 2. Lock the class, then re-validate the booking under the lock.
        let mut work = self.unit_of_work.begin().await?;
        let mut class = work
            .lock_class(booking.class_schedule_id())
            .await?
            .ok_or_else(|| BookingError::class_not_found(booking.class_schedule_id()))?;

        let mut booking = work
            .find_booking(cmd.booking_id)
            .await?
            .ok_or_else(|| BookingError::not_found(cmd.booking_id))?;
        if booking.is_cancelled() {
            return Err(BookingError::AlreadyCancelled);
        }

        // 3. Mark the ledger entry cancelled and release the seat.
        booking.cancel()?;
        class.cancel_booking()?;

        work.update_booking(&booking).await?;
        work.update_class(&class).await?;
        work.commit().await?;

        info!(
            booking_id = %booking.id(),
            class_id = %class.id(),
            user_id = %cmd.user_id,
            bookings = class.current_bookings(),
            "booking cancelled"
        );

        Ok(booking)
    }
}
