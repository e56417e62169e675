//! PostgreSQL persistence adapters.

mod booking_repository;
mod class_schedule_repository;
mod instructor_repository;
mod reservation_unit_of_work;
mod rows;
mod user_repository;

pub use booking_repository::PostgresBookingRepository;
pub use class_schedule_repository::PostgresClassScheduleRepository;
pub use instructor_repository::PostgresInstructorRepository;
pub use reservation_unit_of_work::PostgresReservationUnitOfWork;
pub use user_repository::PostgresUserRepository;
