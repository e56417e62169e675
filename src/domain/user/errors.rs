//! User-specific error types.

use crate::domain::foundation::{DomainError, ErrorCode, UserId};

/// Errors surfaced by the user and authentication handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserError {
    /// User was not found.
    NotFound(UserId),
    /// The email address is already registered.
    EmailTaken,
    /// The username is already registered.
    UsernameTaken,
    /// Email or password did not match.
    ///
    /// Deliberately a single variant for both causes so authentication
    /// failures cannot be used to enumerate accounts.
    InvalidCredentials,
    /// The account is deactivated.
    Inactive,
    /// The aggregate changed since it was read.
    ConcurrencyConflict,
    /// Malformed input to a value object or factory.
    ValidationFailed { field: String, message: String },
    /// An aggregate precondition failed.
    RuleViolation { code: ErrorCode, message: String },
    /// Infrastructure error.
    Infrastructure(String),
}

impl UserError {
    pub fn not_found(id: UserId) -> Self {
        UserError::NotFound(id)
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        UserError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        UserError::Infrastructure(message.into())
    }

    /// Stable code for the transport boundary.
    pub fn code(&self) -> ErrorCode {
        match self {
            UserError::NotFound(_) => ErrorCode::UserNotFound,
            UserError::EmailTaken | UserError::UsernameTaken => ErrorCode::ValidationFailed,
            UserError::InvalidCredentials => ErrorCode::Unauthorized,
            UserError::Inactive => ErrorCode::Forbidden,
            UserError::ConcurrencyConflict => ErrorCode::ConcurrencyConflict,
            UserError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            UserError::RuleViolation { code, .. } => *code,
            UserError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            UserError::NotFound(id) => format!("User not found: {}", id),
            UserError::EmailTaken => "Email is already registered".to_string(),
            UserError::UsernameTaken => "Username is already taken".to_string(),
            UserError::InvalidCredentials => "Invalid email or password".to_string(),
            UserError::Inactive => "Account is deactivated".to_string(),
            UserError::ConcurrencyConflict => {
                "Account was modified concurrently, please retry with fresh data".to_string()
            }
            UserError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            UserError::RuleViolation { message, .. } => message.clone(),
            UserError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for UserError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for UserError {}

impl From<DomainError> for UserError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ConcurrencyConflict => UserError::ConcurrencyConflict,
            ErrorCode::ValidationFailed
            | ErrorCode::EmptyField
            | ErrorCode::OutOfRange
            | ErrorCode::InvalidFormat => UserError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            ErrorCode::DatabaseError | ErrorCode::InternalError => {
                UserError::Infrastructure(err.message)
            }
            code => UserError::RuleViolation {
                code,
                message: err.message,
            },
        }
    }
}
