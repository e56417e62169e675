//! Password hashing port.

use secrecy::SecretString;

use crate::domain::foundation::DomainError;

/// Port for hashing and verifying credentials.
///
/// Plaintext passwords travel as `SecretString` so they are never logged
/// or serialized by accident; only the resulting hash is stored.
pub trait PasswordHasher: Send + Sync {
    /// Hashes a plaintext password into a storable string.
    fn hash(&self, plaintext: &SecretString) -> Result<String, DomainError>;

    /// Checks a plaintext password against a stored hash.
    ///
    /// Implementations must compare in constant time.
    fn verify(&self, plaintext: &SecretString, hash: &str) -> Result<bool, DomainError>;
}
