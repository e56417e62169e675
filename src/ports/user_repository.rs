//! User repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, EmailAddress, UserId};
use crate::domain::user::{NewUser, User};

/// Repository port for User aggregate persistence.
///
/// Implementations must enforce the unique email and username constraints
/// and bump the aggregate version on every update.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persists a new user and returns it with its assigned identity.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the email or username is already registered
    /// - `DatabaseError` on persistence failure
    async fn insert(&self, new_user: NewUser) -> Result<User, DomainError>;

    /// Updates an existing user.
    ///
    /// The write is guarded by the aggregate's version.
    ///
    /// # Errors
    ///
    /// - `UserNotFound` if the user doesn't exist
    /// - `ConcurrencyConflict` if the stored version differs
    async fn update(&self, user: &User) -> Result<(), DomainError>;

    /// Finds a user by id. Returns `None` if absent.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError>;

    /// Finds a user by normalized email. Returns `None` if absent.
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, DomainError>;

    /// Checks whether the email is already registered.
    async fn exists_by_email(&self, email: &EmailAddress) -> Result<bool, DomainError>;

    /// Checks whether the username is already registered.
    async fn exists_by_username(&self, username: &str) -> Result<bool, DomainError>;
}
