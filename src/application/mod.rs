//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers drive the write paths (reservations, class lifecycle,
//! accounts); query handlers serve unlocked reads.

pub mod handlers;

pub use handlers::booking::{
    BookingQueries, CancelBookingCommand, CancelBookingHandler, CreateBookingCommand,
    CreateBookingHandler,
};
pub use handlers::class_schedule::{
    CancelClassCommand, CancelClassHandler, ClassQueries, CompleteClassCommand,
    CompleteClassHandler, CreateClassCommand, CreateClassHandler, DeleteClassCommand,
    DeleteClassHandler, DeleteClassOutcome, UpdateClassCommand, UpdateClassHandler,
};
pub use handlers::instructor::{RegisterInstructorCommand, RegisterInstructorHandler};
pub use handlers::user::{
    AuthenticateUserCommand, AuthenticateUserHandler, RegisterUserCommand, RegisterUserHandler,
    UpdateProfileCommand, UpdateProfileHandler,
};
