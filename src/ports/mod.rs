//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Persistence Ports
//!
//! - `UserRepository`, `InstructorRepository`, `ClassScheduleRepository` -
//!   aggregate persistence on the non-locking paths
//! - `BookingRepository` / `BookingReader` - ledger write-side lookups and
//!   read-side views
//! - `ReservationUnitOfWork` - the exclusive-lock transaction that guards
//!   every booking counter mutation
//!
//! ## Other Ports
//!
//! - `EventPublisher` - post-commit domain event dispatch
//! - `PasswordHasher` - credential hashing for the auth handlers

mod booking_reader;
mod booking_repository;
mod class_schedule_repository;
mod event_publisher;
mod instructor_repository;
mod password_hasher;
mod reservation_unit_of_work;
mod user_repository;

pub use booking_reader::{BookingReader, BookingView};
pub use booking_repository::BookingRepository;
pub use class_schedule_repository::ClassScheduleRepository;
pub use event_publisher::EventPublisher;
pub use instructor_repository::InstructorRepository;
pub use password_hasher::PasswordHasher;
pub use reservation_unit_of_work::{ReservationUnitOfWork, ReservationWork};
pub use user_repository::UserRepository;
