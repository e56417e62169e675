//! Instructor domain module.

mod aggregate;

pub use aggregate::{Instructor, InstructorProfile, NewInstructor};
