//! CreateBookingHandler - reserves a seat in a class.
//!
//! This is the concurrency-critical path. The class is loaded under an
//! exclusive lock and every business check runs under that lock, so the
//! "class is full" decision is race-free: concurrent callers are strictly
//! serialized and at most `capacity` bookings can ever succeed.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::booking::{BookingError, NewBooking};
use crate::domain::foundation::{ClassScheduleId, EventEnvelope, UserId};
use crate::ports::{
    BookingView, EventPublisher, ReservationUnitOfWork, UserRepository,
};

/// Command to book a seat.
#[derive(Debug, Clone)]
pub struct CreateBookingCommand {
    pub user_id: UserId,
    pub class_schedule_id: ClassScheduleId,
    pub note: Option<String>,
}

/// Handler for seat reservations.
pub struct CreateBookingHandler {
    users: Arc<dyn UserRepository>,
    unit_of_work: Arc<dyn ReservationUnitOfWork>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl CreateBookingHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        unit_of_work: Arc<dyn ReservationUnitOfWork>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            users,
            unit_of_work,
            event_publisher,
        }
    }

    pub async fn handle(&self, cmd: CreateBookingCommand) -> Result<BookingView, BookingError> {
        // 1. Resolve the user on the unlocked path.
        let user = self
            .users
            .find_by_id(cmd.user_id)
            .await?
            .ok_or_else(|| BookingError::user_not_found(cmd.user_id))?;

        // 2. Open the unit of work and take the exclusive lock on the class.
        let mut work = self.unit_of_work.begin().await?;
        let mut class = work
            .lock_class(cmd.class_schedule_id)
            .await?
            .ok_or_else(|| BookingError::class_not_found(cmd.class_schedule_id))?;

        // 3. Re-validate under the lock. The ledger check is a fast-fail;
        //    the storage uniqueness constraint remains authoritative.
        if work.booking_exists(user.id(), class.id()).await? {
            return Err(BookingError::DuplicateBooking);
        }

        let event = class.book().map_err(|err| {
            warn!(
                class_id = %class.id(),
                user_id = %user.id(),
                code = %err.code,
                "booking rejected"
            );
            BookingError::from(err)
        })?;

        // 4. Ledger entry and counter update persist in the same work.
        let booking = work
            .insert_booking(NewBooking::confirmed(user.id(), class.id(), cmd.note))
            .await?;
        work.update_class(&class).await?;
        work.commit().await?;

        info!(
            class_id = %class.id(),
            user_id = %user.id(),
            bookings = event.current_bookings,
            capacity = event.capacity,
            "seat booked"
        );

        // 5. Dispatch the event after the commit.
        let envelope = EventEnvelope::from_event(&event).with_user_id(user.id().to_string());
        self.event_publisher.publish(envelope).await?;

        Ok(BookingView {
            id: booking.id(),
            user_id: user.id(),
            user_email: user.email().value().to_string(),
            class_schedule_id: class.id(),
            class_name: class.name().to_string(),
            class_start_time: class.time_range().start(),
            status: booking.status(),
            booked_at: booking.booked_at(),
            cancelled_at: booking.cancelled_at(),
            note: booking.note().map(str::to_string),
        })
    }
}
