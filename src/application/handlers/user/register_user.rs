//! RegisterUserHandler - creates a new account.

use std::sync::Arc;

use secrecy::SecretString;
use tracing::info;

use crate::domain::foundation::EmailAddress;
use crate::domain::user::{NewUser, User, UserError, UserRole};
use crate::ports::{PasswordHasher, UserRepository};

/// Command to register an account.
#[derive(Debug, Clone)]
pub struct RegisterUserCommand {
    pub username: String,
    pub email: String,
    pub password: SecretString,
    pub first_name: String,
    pub last_name: String,
    pub role: UserRole,
}

/// Handler for account registration.
pub struct RegisterUserHandler {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
}

impl RegisterUserHandler {
    pub fn new(users: Arc<dyn UserRepository>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { users, hasher }
    }

    pub async fn handle(&self, cmd: RegisterUserCommand) -> Result<User, UserError> {
        let email = EmailAddress::new(cmd.email)
            .map_err(|e| UserError::validation("email", e.to_string()))?;

        // Fast-fail checks; the storage unique constraints remain the
        // authoritative guard under concurrency.
        if self.users.exists_by_email(&email).await? {
            return Err(UserError::EmailTaken);
        }
        if self.users.exists_by_username(&cmd.username).await? {
            return Err(UserError::UsernameTaken);
        }

        let password_hash = self.hasher.hash(&cmd.password)?;

        let new_user = NewUser::new(
            cmd.username,
            email,
            password_hash,
            cmd.first_name,
            cmd.last_name,
            cmd.role,
        )
        .map_err(|e| UserError::validation("user", e.to_string()))?;

        let user = self.users.insert(new_user).await?;

        info!(user_id = %user.id(), role = %user.role(), "user registered");

        Ok(user)
    }
}
