//! Database row types shared by the PostgreSQL adapters.
//!
//! Each row converts into its domain aggregate with `TryFrom`; stored rows
//! were validated on the way in, so a conversion failure indicates a
//! corrupted row and surfaces as `DatabaseError`.

use chrono::{DateTime, Utc};

use crate::domain::booking::{Booking, BookingStatus};
use crate::domain::class_schedule::{ClassSchedule, ClassStatus};
use crate::domain::foundation::{
    BookingId, Capacity, ClassScheduleId, DomainError, EmailAddress, ErrorCode, InstructorId,
    Location, TimeRange, Timestamp, UserId,
};
use crate::domain::instructor::Instructor;
use crate::domain::user::{User, UserRole};

fn corrupt(entity: &str, id: i64, reason: impl std::fmt::Display) -> DomainError {
    DomainError::new(
        ErrorCode::DatabaseError,
        format!("Corrupted {} row {}: {}", entity, id, reason),
    )
}

/// Row shape of the `users` table.
#[derive(Debug, sqlx::FromRow)]
pub struct UserRow {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub version: i64,
}

impl TryFrom<UserRow> for User {
    type Error = DomainError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let email =
            EmailAddress::new(row.email.as_str()).map_err(|e| corrupt("user", row.id, e))?;
        let role: UserRole = row.role.parse().map_err(|e| corrupt("user", row.id, e))?;
        Ok(User::reconstitute(
            UserId::new(row.id),
            row.username,
            email,
            row.password_hash,
            row.first_name,
            row.last_name,
            role,
            row.is_active,
            Timestamp::from_datetime(row.created_at),
            Timestamp::from_datetime(row.updated_at),
            row.version,
        ))
    }
}

/// Row shape of the `instructors` table.
#[derive(Debug, sqlx::FromRow)]
pub struct InstructorRow {
    pub id: i64,
    pub user_id: i64,
    pub bio: String,
    pub specialization: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub version: i64,
}

impl From<InstructorRow> for Instructor {
    fn from(row: InstructorRow) -> Self {
        Instructor::reconstitute(
            InstructorId::new(row.id),
            UserId::new(row.user_id),
            row.bio,
            row.specialization,
            Timestamp::from_datetime(row.created_at),
            Timestamp::from_datetime(row.updated_at),
            row.version,
        )
    }
}

/// Row shape of the `class_schedules` table.
#[derive(Debug, sqlx::FromRow)]
pub struct ClassScheduleRow {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub instructor_id: i64,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub capacity: i32,
    pub current_bookings: i32,
    pub location: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub version: i64,
}

impl TryFrom<ClassScheduleRow> for ClassSchedule {
    type Error = DomainError;

    fn try_from(row: ClassScheduleRow) -> Result<Self, Self::Error> {
        let time_range = TimeRange::new(
            Timestamp::from_datetime(row.start_time),
            Timestamp::from_datetime(row.end_time),
        )
        .map_err(|e| corrupt("class_schedule", row.id, e))?;
        let capacity = u32::try_from(row.capacity)
            .map_err(|_| corrupt("class_schedule", row.id, "negative capacity"))
            .and_then(|v| Capacity::new(v).map_err(|e| corrupt("class_schedule", row.id, e)))?;
        let current_bookings = u32::try_from(row.current_bookings)
            .map_err(|_| corrupt("class_schedule", row.id, "negative booking counter"))?;
        let location = Location::new(row.location.as_str())
            .map_err(|e| corrupt("class_schedule", row.id, e))?;
        let status: ClassStatus = row
            .status
            .parse()
            .map_err(|e| corrupt("class_schedule", row.id, e))?;

        Ok(ClassSchedule::reconstitute(
            ClassScheduleId::new(row.id),
            row.name,
            row.description,
            InstructorId::new(row.instructor_id),
            time_range,
            capacity,
            current_bookings,
            location,
            status,
            Timestamp::from_datetime(row.created_at),
            Timestamp::from_datetime(row.updated_at),
            row.version,
        ))
    }
}

/// Row shape of the `bookings` table.
#[derive(Debug, sqlx::FromRow)]
pub struct BookingRow {
    pub id: i64,
    pub user_id: i64,
    pub class_schedule_id: i64,
    pub status: String,
    pub booked_at: DateTime<Utc>,
    pub cancelled_at: Option<DateTime<Utc>>,
    pub note: Option<String>,
    pub version: i64,
}

impl TryFrom<BookingRow> for Booking {
    type Error = DomainError;

    fn try_from(row: BookingRow) -> Result<Self, Self::Error> {
        let status: BookingStatus = row
            .status
            .parse()
            .map_err(|e| corrupt("booking", row.id, e))?;
        Ok(Booking::reconstitute(
            BookingId::new(row.id),
            UserId::new(row.user_id),
            ClassScheduleId::new(row.class_schedule_id),
            status,
            Timestamp::from_datetime(row.booked_at),
            row.cancelled_at.map(Timestamp::from_datetime),
            row.note,
            row.version,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn class_row() -> ClassScheduleRow {
        let now = Utc::now();
        ClassScheduleRow {
            id: 7,
            name: "Spin".to_string(),
            description: "Cycling".to_string(),
            instructor_id: 1,
            start_time: now + chrono::Duration::hours(2),
            end_time: now + chrono::Duration::hours(3),
            capacity: 10,
            current_bookings: 3,
            location: "Studio A".to_string(),
            status: "SCHEDULED".to_string(),
            created_at: now,
            updated_at: now,
            version: 2,
        }
    }

    #[test]
    fn class_row_converts_to_aggregate() {
        let class = ClassSchedule::try_from(class_row()).unwrap();
        assert_eq!(class.id(), ClassScheduleId::new(7));
        assert_eq!(class.current_bookings(), 3);
        assert_eq!(class.status(), ClassStatus::Scheduled);
        assert_eq!(class.version(), 2);
    }

    #[test]
    fn class_row_with_unknown_status_is_corrupt() {
        let mut row = class_row();
        row.status = "DRAFT".to_string();
        let err = ClassSchedule::try_from(row).unwrap_err();
        assert_eq!(err.code, ErrorCode::DatabaseError);
    }

    #[test]
    fn class_row_with_negative_counter_is_corrupt() {
        let mut row = class_row();
        row.current_bookings = -1;
        assert!(ClassSchedule::try_from(row).is_err());
    }

    #[test]
    fn booking_row_converts_to_record() {
        let now = Utc::now();
        let row = BookingRow {
            id: 5,
            user_id: 42,
            class_schedule_id: 7,
            status: "CONFIRMED".to_string(),
            booked_at: now,
            cancelled_at: None,
            note: Some("note".to_string()),
            version: 1,
        };
        let booking = Booking::try_from(row).unwrap();
        assert!(booking.is_confirmed());
        assert_eq!(booking.user_id(), UserId::new(42));
    }

    #[test]
    fn user_row_with_invalid_email_is_corrupt() {
        let now = Utc::now();
        let row = UserRow {
            id: 1,
            username: "alice".to_string(),
            email: "broken".to_string(),
            password_hash: "hash".to_string(),
            first_name: "Alice".to_string(),
            last_name: "Smith".to_string(),
            role: "USER".to_string(),
            is_active: true,
            created_at: now,
            updated_at: now,
            version: 1,
        };
        assert!(User::try_from(row).is_err());
    }
}
