//! Instructor repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, InstructorId, UserId};
use crate::domain::instructor::{Instructor, NewInstructor};

/// Repository port for Instructor aggregate persistence.
#[async_trait]
pub trait InstructorRepository: Send + Sync {
    /// Persists a new instructor and returns it with its assigned identity.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the user already has an instructor profile
    /// - `DatabaseError` on persistence failure
    async fn insert(&self, new_instructor: NewInstructor) -> Result<Instructor, DomainError>;

    /// Updates an existing instructor.
    async fn update(&self, instructor: &Instructor) -> Result<(), DomainError>;

    /// Finds an instructor by id. Returns `None` if absent.
    async fn find_by_id(&self, id: InstructorId) -> Result<Option<Instructor>, DomainError>;

    /// Finds the instructor profile referencing a user, if any.
    async fn find_by_user_id(&self, user_id: UserId) -> Result<Option<Instructor>, DomainError>;
}
