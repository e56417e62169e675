//! Booking-specific error types.

use crate::domain::foundation::{
    BookingId, ClassScheduleId, DomainError, ErrorCode, UserId,
};

/// Errors surfaced by the reservation handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingError {
    /// Referenced user does not exist.
    UserNotFound(UserId),
    /// Referenced class does not exist.
    ClassNotFound(ClassScheduleId),
    /// Booking was not found.
    NotFound(BookingId),
    /// The user already holds a booking for this class.
    DuplicateBooking,
    /// The actor does not own the booking being mutated.
    Forbidden,
    /// The booking has already been cancelled.
    AlreadyCancelled,
    /// An aggregate precondition failed (not scheduled, started, full, ...).
    RuleViolation { code: ErrorCode, message: String },
    /// Infrastructure error.
    Infrastructure(String),
}

impl BookingError {
    pub fn user_not_found(id: UserId) -> Self {
        BookingError::UserNotFound(id)
    }

    pub fn class_not_found(id: ClassScheduleId) -> Self {
        BookingError::ClassNotFound(id)
    }

    pub fn not_found(id: BookingId) -> Self {
        BookingError::NotFound(id)
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        BookingError::Infrastructure(message.into())
    }

    /// Stable code for the transport boundary.
    pub fn code(&self) -> ErrorCode {
        match self {
            BookingError::UserNotFound(_) => ErrorCode::UserNotFound,
            BookingError::ClassNotFound(_) => ErrorCode::ClassNotFound,
            BookingError::NotFound(_) => ErrorCode::BookingNotFound,
            BookingError::DuplicateBooking => ErrorCode::DuplicateBooking,
            BookingError::Forbidden => ErrorCode::Forbidden,
            BookingError::AlreadyCancelled => ErrorCode::BookingAlreadyCancelled,
            BookingError::RuleViolation { code, .. } => *code,
            BookingError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            BookingError::UserNotFound(id) => format!("User not found: {}", id),
            BookingError::ClassNotFound(id) => format!("Class not found: {}", id),
            BookingError::NotFound(id) => format!("Booking not found: {}", id),
            BookingError::DuplicateBooking => {
                "You have already booked this class".to_string()
            }
            BookingError::Forbidden => "You can only cancel your own bookings".to_string(),
            BookingError::AlreadyCancelled => "Booking is already cancelled".to_string(),
            BookingError::RuleViolation { message, .. } => message.clone(),
            BookingError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for BookingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for BookingError {}

impl From<DomainError> for BookingError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::DuplicateBooking => BookingError::DuplicateBooking,
            ErrorCode::BookingAlreadyCancelled => BookingError::AlreadyCancelled,
            ErrorCode::Forbidden => BookingError::Forbidden,
            ErrorCode::DatabaseError | ErrorCode::InternalError => {
                BookingError::Infrastructure(err.message)
            }
            code => BookingError::RuleViolation {
                code,
                message: err.message,
            },
        }
    }
}
