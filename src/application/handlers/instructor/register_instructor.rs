//! RegisterInstructorHandler - creates an instructor profile for a user.

use std::sync::Arc;

use tracing::info;

use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::instructor::{Instructor, NewInstructor};
use crate::domain::user::UserError;
use crate::ports::{InstructorRepository, UserRepository};

/// Command to register an instructor.
#[derive(Debug, Clone)]
pub struct RegisterInstructorCommand {
    pub user_id: UserId,
    pub bio: String,
    pub specialization: Option<String>,
}

/// Handler for instructor registration.
pub struct RegisterInstructorHandler {
    users: Arc<dyn UserRepository>,
    instructors: Arc<dyn InstructorRepository>,
}

impl RegisterInstructorHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        instructors: Arc<dyn InstructorRepository>,
    ) -> Self {
        Self { users, instructors }
    }

    pub async fn handle(&self, cmd: RegisterInstructorCommand) -> Result<Instructor, UserError> {
        let user = self
            .users
            .find_by_id(cmd.user_id)
            .await?
            .ok_or_else(|| UserError::not_found(cmd.user_id))?;

        if self
            .instructors
            .find_by_user_id(user.id())
            .await?
            .is_some()
        {
            return Err(DomainError::validation(
                "user_id",
                "User already has an instructor profile",
            )
            .into());
        }
        if !user.is_active() {
            return Err(DomainError::new(
                ErrorCode::Forbidden,
                "Deactivated users cannot become instructors",
            )
            .into());
        }

        let instructor = self
            .instructors
            .insert(NewInstructor::new(user.id(), cmd.bio, cmd.specialization))
            .await?;

        info!(
            instructor_id = %instructor.id(),
            user_id = %user.id(),
            "instructor registered"
        );

        Ok(instructor)
    }
}
