//! Reservation handlers.

mod booking_queries;
mod cancel_booking;
mod create_booking;

pub use booking_queries::BookingQueries;
pub use cancel_booking::{CancelBookingCommand, CancelBookingHandler};
pub use create_booking::{CreateBookingCommand, CreateBookingHandler};
