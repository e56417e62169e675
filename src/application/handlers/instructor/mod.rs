//! Instructor handlers.

mod register_instructor;

pub use register_instructor::{RegisterInstructorCommand, RegisterInstructorHandler};
