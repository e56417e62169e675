//! Instructor aggregate entity.
//!
//! An instructor references exactly one user account. Classes reference
//! instructors by id; an instructor may be referenced by many classes.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{InstructorId, Timestamp, UserId};
use crate::domain::user::User;

/// Input for an instructor that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewInstructor {
    pub user_id: UserId,
    pub bio: String,
    pub specialization: String,
}

impl NewInstructor {
    /// Creates a new instructor profile for an existing user.
    pub fn new(user_id: UserId, bio: impl Into<String>, specialization: Option<String>) -> Self {
        Self {
            user_id,
            bio: bio.into(),
            specialization: specialization.unwrap_or_default(),
        }
    }
}

/// Instructor aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instructor {
    id: InstructorId,
    user_id: UserId,
    bio: String,
    specialization: String,
    created_at: Timestamp,
    updated_at: Timestamp,
    version: i64,
}

impl Instructor {
    /// Reconstitute an instructor from persistence.
    pub fn reconstitute(
        id: InstructorId,
        user_id: UserId,
        bio: String,
        specialization: String,
        created_at: Timestamp,
        updated_at: Timestamp,
        version: i64,
    ) -> Self {
        Self {
            id,
            user_id,
            bio,
            specialization,
            created_at,
            updated_at,
            version,
        }
    }

    pub fn id(&self) -> InstructorId {
        self.id
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn bio(&self) -> &str {
        &self.bio
    }

    pub fn specialization(&self) -> &str {
        &self.specialization
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    pub fn version(&self) -> i64 {
        self.version
    }

    /// Updates bio and specialization.
    pub fn update_info(&mut self, bio: impl Into<String>, specialization: Option<String>) {
        self.bio = bio.into();
        self.specialization = specialization.unwrap_or_default();
        self.updated_at = Timestamp::now();
    }
}

/// Instructor joined with the user account it references.
///
/// The name, email, and active flag all come from the user; the profile
/// only adds teaching details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstructorProfile {
    pub instructor: Instructor,
    pub user: User,
}

impl InstructorProfile {
    pub fn new(instructor: Instructor, user: User) -> Self {
        Self { instructor, user }
    }

    pub fn full_name(&self) -> String {
        self.user.full_name()
    }

    pub fn email(&self) -> &str {
        self.user.email().value()
    }

    pub fn is_active(&self) -> bool {
        self.user.is_active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::EmailAddress;
    use crate::domain::user::UserRole;

    fn test_user() -> User {
        let now = Timestamp::now();
        User::reconstitute(
            UserId::new(9),
            "joe".to_string(),
            EmailAddress::new("joe@example.com").unwrap(),
            "hash".to_string(),
            "Joe".to_string(),
            "Bloggs".to_string(),
            UserRole::Instructor,
            true,
            now,
            now,
            1,
        )
    }

    fn test_instructor() -> Instructor {
        let now = Timestamp::now();
        Instructor::reconstitute(
            InstructorId::new(3),
            UserId::new(9),
            "Certified yoga teacher".to_string(),
            "Yoga".to_string(),
            now,
            now,
            1,
        )
    }

    #[test]
    fn new_instructor_defaults_specialization_to_empty() {
        let new = NewInstructor::new(UserId::new(9), "bio", None);
        assert_eq!(new.specialization, "");
    }

    #[test]
    fn update_info_replaces_fields() {
        let mut instructor = test_instructor();
        instructor.update_info("New bio", Some("Pilates".to_string()));
        assert_eq!(instructor.bio(), "New bio");
        assert_eq!(instructor.specialization(), "Pilates");
    }

    #[test]
    fn update_info_clears_specialization_when_none() {
        let mut instructor = test_instructor();
        instructor.update_info("New bio", None);
        assert_eq!(instructor.specialization(), "");
    }

    #[test]
    fn profile_delegates_to_user() {
        let profile = InstructorProfile::new(test_instructor(), test_user());
        assert_eq!(profile.full_name(), "Joe Bloggs");
        assert_eq!(profile.email(), "joe@example.com");
        assert!(profile.is_active());
    }
}
