//! Class-scheduling error types.

use crate::domain::foundation::{ClassScheduleId, DomainError, ErrorCode, InstructorId};

/// Errors surfaced by the class lifecycle handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassScheduleError {
    /// Class was not found.
    NotFound(ClassScheduleId),
    /// Referenced instructor does not exist.
    InstructorNotFound(InstructorId),
    /// An aggregate precondition failed (not scheduled, started, capacity).
    RuleViolation { code: ErrorCode, message: String },
    /// The aggregate changed since it was read.
    ConcurrencyConflict,
    /// Malformed input to a value object or factory.
    ValidationFailed { field: String, message: String },
    /// Infrastructure error.
    Infrastructure(String),
}

impl ClassScheduleError {
    pub fn not_found(id: ClassScheduleId) -> Self {
        ClassScheduleError::NotFound(id)
    }

    pub fn instructor_not_found(id: InstructorId) -> Self {
        ClassScheduleError::InstructorNotFound(id)
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        ClassScheduleError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        ClassScheduleError::Infrastructure(message.into())
    }

    /// Stable code for the transport boundary.
    pub fn code(&self) -> ErrorCode {
        match self {
            ClassScheduleError::NotFound(_) => ErrorCode::ClassNotFound,
            ClassScheduleError::InstructorNotFound(_) => ErrorCode::InstructorNotFound,
            ClassScheduleError::RuleViolation { code, .. } => *code,
            ClassScheduleError::ConcurrencyConflict => ErrorCode::ConcurrencyConflict,
            ClassScheduleError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            ClassScheduleError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            ClassScheduleError::NotFound(id) => format!("Class not found: {}", id),
            ClassScheduleError::InstructorNotFound(id) => {
                format!("Instructor not found: {}", id)
            }
            ClassScheduleError::RuleViolation { message, .. } => message.clone(),
            ClassScheduleError::ConcurrencyConflict => {
                "Class was modified concurrently, please retry with fresh data".to_string()
            }
            ClassScheduleError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            ClassScheduleError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for ClassScheduleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ClassScheduleError {}

impl From<DomainError> for ClassScheduleError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ConcurrencyConflict => ClassScheduleError::ConcurrencyConflict,
            ErrorCode::ValidationFailed
            | ErrorCode::EmptyField
            | ErrorCode::OutOfRange
            | ErrorCode::InvalidFormat => ClassScheduleError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            ErrorCode::DatabaseError | ErrorCode::InternalError => {
                ClassScheduleError::Infrastructure(err.message)
            }
            code => ClassScheduleError::RuleViolation {
                code,
                message: err.message,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_class_not_found_code() {
        let err = ClassScheduleError::not_found(ClassScheduleId::new(4));
        assert_eq!(err.code(), ErrorCode::ClassNotFound);
        assert!(err.message().contains('4'));
    }

    #[test]
    fn rule_violation_preserves_domain_code() {
        let domain = DomainError::new(ErrorCode::ClassFull, "Class is full");
        let err: ClassScheduleError = domain.into();
        assert_eq!(err.code(), ErrorCode::ClassFull);
        assert_eq!(err.message(), "Class is full");
    }

    #[test]
    fn concurrency_conflict_maps_from_domain_error() {
        let domain = DomainError::new(ErrorCode::ConcurrencyConflict, "stale version");
        let err: ClassScheduleError = domain.into();
        assert_eq!(err, ClassScheduleError::ConcurrencyConflict);
    }

    #[test]
    fn validation_error_carries_field_detail() {
        let domain = DomainError::validation("capacity", "out of range");
        let err: ClassScheduleError = domain.into();
        assert_eq!(
            err,
            ClassScheduleError::ValidationFailed {
                field: "capacity".to_string(),
                message: "out of range".to_string(),
            }
        );
    }
}
