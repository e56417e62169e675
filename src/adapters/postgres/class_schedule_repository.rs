//! PostgreSQL implementation of ClassScheduleRepository.
//!
//! Non-locking paths only: plain reads plus version-guarded writes. The
//! `FOR UPDATE` path lives in the reservation unit of work.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::class_schedule::{ClassSchedule, ClassStatus, NewClassSchedule};
use crate::domain::foundation::{ClassScheduleId, DomainError, ErrorCode, InstructorId, Timestamp};
use crate::ports::ClassScheduleRepository;

use super::rows::ClassScheduleRow;

const CLASS_COLUMNS: &str = "id, name, description, instructor_id, start_time, end_time, \
     capacity, current_bookings, location, status, created_at, updated_at, version";

/// PostgreSQL implementation of the ClassScheduleRepository port.
pub struct PostgresClassScheduleRepository {
    pool: PgPool,
}

impl PostgresClassScheduleRepository {
    /// Creates a repository over the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClassScheduleRepository for PostgresClassScheduleRepository {
    async fn insert(&self, new_class: NewClassSchedule) -> Result<ClassSchedule, DomainError> {
        let row: ClassScheduleRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO class_schedules (
                name, description, instructor_id, start_time, end_time,
                capacity, current_bookings, location, status,
                created_at, updated_at, version
            ) VALUES ($1, $2, $3, $4, $5, $6, 0, $7, 'SCHEDULED', NOW(), NOW(), 1)
            RETURNING {}
            "#,
            CLASS_COLUMNS
        ))
        .bind(&new_class.name)
        .bind(&new_class.description)
        .bind(new_class.instructor_id.as_i64())
        .bind(new_class.time_range.start().as_datetime())
        .bind(new_class.time_range.end().as_datetime())
        .bind(new_class.capacity.value() as i32)
        .bind(new_class.location.value())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to insert class: {}", e))
        })?;

        ClassSchedule::try_from(row)
    }

    async fn update(&self, class: &ClassSchedule) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE class_schedules SET
                name = $3,
                description = $4,
                start_time = $5,
                end_time = $6,
                capacity = $7,
                current_bookings = $8,
                location = $9,
                status = $10,
                updated_at = $11,
                version = version + 1
            WHERE id = $1 AND version = $2
            "#,
        )
        .bind(class.id().as_i64())
        .bind(class.version())
        .bind(class.name())
        .bind(class.description())
        .bind(class.time_range().start().as_datetime())
        .bind(class.time_range().end().as_datetime())
        .bind(class.capacity().value() as i32)
        .bind(class.current_bookings() as i32)
        .bind(class.location().value())
        .bind(class.status().as_str())
        .bind(class.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to update class: {}", e))
        })?;

        if result.rows_affected() == 0 {
            let exists: Option<i64> =
                sqlx::query_scalar("SELECT id FROM class_schedules WHERE id = $1")
                    .bind(class.id().as_i64())
                    .fetch_optional(&self.pool)
                    .await
                    .map_err(|e| {
                        DomainError::new(
                            ErrorCode::DatabaseError,
                            format!("Failed to check class existence: {}", e),
                        )
                    })?;
            return Err(match exists {
                Some(_) => DomainError::new(
                    ErrorCode::ConcurrencyConflict,
                    "Class was modified concurrently",
                ),
                None => DomainError::new(
                    ErrorCode::ClassNotFound,
                    format!("Class not found: {}", class.id()),
                ),
            });
        }

        Ok(())
    }

    async fn delete(&self, id: ClassScheduleId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM class_schedules WHERE id = $1")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to delete class: {}", e),
                )
            })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::ClassNotFound,
                format!("Class not found: {}", id),
            ));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: ClassScheduleId) -> Result<Option<ClassSchedule>, DomainError> {
        let row: Option<ClassScheduleRow> = sqlx::query_as(&format!(
            "SELECT {} FROM class_schedules WHERE id = $1",
            CLASS_COLUMNS
        ))
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to find class: {}", e))
        })?;

        row.map(ClassSchedule::try_from).transpose()
    }

    async fn find_by_status(&self, status: ClassStatus) -> Result<Vec<ClassSchedule>, DomainError> {
        let rows: Vec<ClassScheduleRow> = sqlx::query_as(&format!(
            "SELECT {} FROM class_schedules WHERE status = $1 ORDER BY start_time ASC",
            CLASS_COLUMNS
        ))
        .bind(status.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to list classes: {}", e))
        })?;

        rows.into_iter().map(ClassSchedule::try_from).collect()
    }

    async fn find_by_instructor(
        &self,
        instructor_id: InstructorId,
    ) -> Result<Vec<ClassSchedule>, DomainError> {
        let rows: Vec<ClassScheduleRow> = sqlx::query_as(&format!(
            "SELECT {} FROM class_schedules WHERE instructor_id = $1 ORDER BY start_time ASC",
            CLASS_COLUMNS
        ))
        .bind(instructor_id.as_i64())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to list classes: {}", e))
        })?;

        rows.into_iter().map(ClassSchedule::try_from).collect()
    }

    async fn find_upcoming_by_status(
        &self,
        status: ClassStatus,
        now: Timestamp,
    ) -> Result<Vec<ClassSchedule>, DomainError> {
        let rows: Vec<ClassScheduleRow> = sqlx::query_as(&format!(
            "SELECT {} FROM class_schedules \
             WHERE status = $1 AND start_time > $2 ORDER BY start_time ASC",
            CLASS_COLUMNS
        ))
        .bind(status.as_str())
        .bind(now.as_datetime())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to list classes: {}", e))
        })?;

        rows.into_iter().map(ClassSchedule::try_from).collect()
    }
}
