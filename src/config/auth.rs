//! Authentication configuration.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ConfigValidationError;

/// Minimum accepted pepper length, in bytes.
const MIN_PEPPER_LENGTH: usize = 16;

/// Credential hashing configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Server-side pepper keyed into every password hash.
    pub password_pepper: SecretString,
}

impl AuthConfig {
    /// Validates hashing settings.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.password_pepper.expose_secret().len() < MIN_PEPPER_LENGTH {
            return Err(ConfigValidationError::new(
                "auth.password_pepper",
                format!("must be at least {} bytes", MIN_PEPPER_LENGTH),
            ));
        }
        Ok(())
    }
}
