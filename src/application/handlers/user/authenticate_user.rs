//! AuthenticateUserHandler - verifies credentials.
//!
//! A missing user, wrong password, and deactivated account are all
//! reported through the same `InvalidCredentials`/`Inactive` pair; the
//! handler never reveals whether the email exists.

use std::sync::Arc;

use secrecy::SecretString;
use tracing::info;

use crate::domain::foundation::EmailAddress;
use crate::domain::user::{User, UserError};
use crate::ports::{PasswordHasher, UserRepository};

/// Command to authenticate with email and password.
#[derive(Clone)]
pub struct AuthenticateUserCommand {
    pub email: String,
    pub password: SecretString,
}

/// Handler for credential verification.
pub struct AuthenticateUserHandler {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
}

impl AuthenticateUserHandler {
    pub fn new(users: Arc<dyn UserRepository>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { users, hasher }
    }

    pub async fn handle(&self, cmd: AuthenticateUserCommand) -> Result<User, UserError> {
        let email =
            EmailAddress::new(cmd.email).map_err(|_| UserError::InvalidCredentials)?;

        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or(UserError::InvalidCredentials)?;

        if !self.hasher.verify(&cmd.password, user.password_hash())? {
            return Err(UserError::InvalidCredentials);
        }

        if !user.is_active() {
            return Err(UserError::Inactive);
        }

        info!(user_id = %user.id(), "user authenticated");

        Ok(user)
    }
}
