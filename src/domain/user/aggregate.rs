//! User aggregate entity.
//!
//! Accounts are created through the validating factory and mutated only
//! through dedicated methods; the password is stored as an opaque hash
//! produced by the hashing port.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    DomainError, EmailAddress, ErrorCode, Timestamp, UserId, ValidationError,
};

use super::UserRole;

/// Longest accepted username.
pub const MAX_USERNAME_LENGTH: usize = 50;

/// Validated input for a user that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub email: EmailAddress,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub role: UserRole,
}

impl NewUser {
    /// Validating factory for a new account.
    pub fn new(
        username: impl Into<String>,
        email: EmailAddress,
        password_hash: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        role: UserRole,
    ) -> Result<Self, ValidationError> {
        let username = username.into();
        if username.trim().is_empty() {
            return Err(ValidationError::empty_field("username"));
        }
        if username.chars().count() > MAX_USERNAME_LENGTH {
            return Err(ValidationError::invalid_format(
                "username",
                format!("Username cannot exceed {} characters", MAX_USERNAME_LENGTH),
            ));
        }
        let password_hash = password_hash.into();
        if password_hash.is_empty() {
            return Err(ValidationError::empty_field("password_hash"));
        }
        let first_name = first_name.into();
        if first_name.trim().is_empty() {
            return Err(ValidationError::empty_field("first_name"));
        }
        let last_name = last_name.into();
        if last_name.trim().is_empty() {
            return Err(ValidationError::empty_field("last_name"));
        }

        Ok(Self {
            username: username.trim().to_string(),
            email,
            password_hash,
            first_name: first_name.trim().to_string(),
            last_name: last_name.trim().to_string(),
            role,
        })
    }
}

/// User aggregate - an account that can book classes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    username: String,
    email: EmailAddress,
    password_hash: String,
    first_name: String,
    last_name: String,
    role: UserRole,
    is_active: bool,
    created_at: Timestamp,
    updated_at: Timestamp,
    version: i64,
}

impl User {
    /// Reconstitute a user from persistence.
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: UserId,
        username: String,
        email: EmailAddress,
        password_hash: String,
        first_name: String,
        last_name: String,
        role: UserRole,
        is_active: bool,
        created_at: Timestamp,
        updated_at: Timestamp,
        version: i64,
    ) -> Self {
        Self {
            id,
            username,
            email,
            password_hash,
            first_name,
            last_name,
            role,
            is_active,
            created_at,
            updated_at,
            version,
        }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn role(&self) -> UserRole {
        self.role
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    /// Optimistic concurrency version, bumped by storage on every update.
    pub fn version(&self) -> i64 {
        self.version
    }

    /// Returns "first last".
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Checks whether the user holds the given role.
    pub fn has_role(&self, role: UserRole) -> bool {
        self.role == role
    }

    /// Updates first and last name.
    pub fn update_profile(
        &mut self,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Result<(), DomainError> {
        let first_name = first_name.into();
        if first_name.trim().is_empty() {
            return Err(DomainError::new(
                ErrorCode::EmptyField,
                "First name cannot be empty",
            ));
        }
        let last_name = last_name.into();
        if last_name.trim().is_empty() {
            return Err(DomainError::new(
                ErrorCode::EmptyField,
                "Last name cannot be empty",
            ));
        }

        self.first_name = first_name.trim().to_string();
        self.last_name = last_name.trim().to_string();
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Replaces the email address.
    pub fn update_email(&mut self, new_email: EmailAddress) {
        self.email = new_email;
        self.updated_at = Timestamp::now();
    }

    /// Replaces the password hash.
    pub fn update_password(&mut self, new_hash: impl Into<String>) -> Result<(), DomainError> {
        let new_hash = new_hash.into();
        if new_hash.is_empty() {
            return Err(DomainError::new(
                ErrorCode::EmptyField,
                "Password hash cannot be empty",
            ));
        }

        self.password_hash = new_hash;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Activates the account.
    ///
    /// # Errors
    ///
    /// - `UserAlreadyActive` if the account is already active
    pub fn activate(&mut self) -> Result<(), DomainError> {
        if self.is_active {
            return Err(DomainError::new(
                ErrorCode::UserAlreadyActive,
                "User is already active",
            ));
        }

        self.is_active = true;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Deactivates the account.
    ///
    /// # Errors
    ///
    /// - `UserAlreadyInactive` if the account is already inactive
    pub fn deactivate(&mut self) -> Result<(), DomainError> {
        if !self.is_active {
            return Err(DomainError::new(
                ErrorCode::UserAlreadyInactive,
                "User is already inactive",
            ));
        }

        self.is_active = false;
        self.updated_at = Timestamp::now();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_email() -> EmailAddress {
        EmailAddress::new("alice@example.com").unwrap()
    }

    fn test_user() -> User {
        let now = Timestamp::now();
        User::reconstitute(
            UserId::new(42),
            "alice".to_string(),
            test_email(),
            "hash123".to_string(),
            "Alice".to_string(),
            "Smith".to_string(),
            UserRole::User,
            true,
            now,
            now,
            1,
        )
    }

    // Factory

    #[test]
    fn new_user_accepts_valid_input() {
        let new = NewUser::new("alice", test_email(), "hash", "Alice", "Smith", UserRole::User)
            .unwrap();
        assert_eq!(new.username, "alice");
        assert_eq!(new.role, UserRole::User);
    }

    #[test]
    fn new_user_rejects_empty_username() {
        let result = NewUser::new("  ", test_email(), "hash", "Alice", "Smith", UserRole::User);
        assert!(matches!(result, Err(ValidationError::EmptyField { .. })));
    }

    #[test]
    fn new_user_rejects_overlong_username() {
        let result = NewUser::new(
            "x".repeat(51),
            test_email(),
            "hash",
            "Alice",
            "Smith",
            UserRole::User,
        );
        assert!(result.is_err());
    }

    #[test]
    fn new_user_rejects_empty_password_hash() {
        let result = NewUser::new("alice", test_email(), "", "Alice", "Smith", UserRole::User);
        assert!(result.is_err());
    }

    #[test]
    fn new_user_rejects_blank_names() {
        assert!(NewUser::new("alice", test_email(), "hash", " ", "Smith", UserRole::User).is_err());
        assert!(NewUser::new("alice", test_email(), "hash", "Alice", " ", UserRole::User).is_err());
    }

    // Mutations

    #[test]
    fn update_profile_replaces_names() {
        let mut user = test_user();
        user.update_profile("Alicia", "Jones").unwrap();
        assert_eq!(user.full_name(), "Alicia Jones");
    }

    #[test]
    fn update_profile_rejects_empty_names() {
        let mut user = test_user();
        assert!(user.update_profile("", "Jones").is_err());
        assert!(user.update_profile("Alicia", "").is_err());
        assert_eq!(user.full_name(), "Alice Smith");
    }

    #[test]
    fn update_email_replaces_address() {
        let mut user = test_user();
        user.update_email(EmailAddress::new("new@example.com").unwrap());
        assert_eq!(user.email().value(), "new@example.com");
    }

    #[test]
    fn update_password_rejects_empty_hash() {
        let mut user = test_user();
        assert!(user.update_password("").is_err());
        assert_eq!(user.password_hash(), "hash123");
    }

    #[test]
    fn deactivate_then_activate_round_trips() {
        let mut user = test_user();

        user.deactivate().unwrap();
        assert!(!user.is_active());

        user.activate().unwrap();
        assert!(user.is_active());
    }

    #[test]
    fn activate_fails_when_already_active() {
        let mut user = test_user();
        let err = user.activate().unwrap_err();
        assert_eq!(err.code, ErrorCode::UserAlreadyActive);
    }

    #[test]
    fn deactivate_fails_when_already_inactive() {
        let mut user = test_user();
        user.deactivate().unwrap();
        let err = user.deactivate().unwrap_err();
        assert_eq!(err.code, ErrorCode::UserAlreadyInactive);
    }

    #[test]
    fn has_role_matches_assigned_role() {
        let user = test_user();
        assert!(user.has_role(UserRole::User));
        assert!(!user.has_role(UserRole::Admin));
    }
}
