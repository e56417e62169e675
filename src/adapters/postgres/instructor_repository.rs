//! PostgreSQL implementation of InstructorRepository.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::foundation::{DomainError, ErrorCode, InstructorId, UserId};
use crate::domain::instructor::{Instructor, NewInstructor};
use crate::ports::InstructorRepository;

use super::rows::InstructorRow;

/// PostgreSQL implementation of the InstructorRepository port.
pub struct PostgresInstructorRepository {
    pool: PgPool,
}

impl PostgresInstructorRepository {
    /// Creates a repository over the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InstructorRepository for PostgresInstructorRepository {
    async fn insert(&self, new_instructor: NewInstructor) -> Result<Instructor, DomainError> {
        let row: InstructorRow = sqlx::query_as(
            r#"
            INSERT INTO instructors (user_id, bio, specialization, created_at, updated_at, version)
            VALUES ($1, $2, $3, NOW(), NOW(), 1)
            RETURNING id, user_id, bio, specialization, created_at, updated_at, version
            "#,
        )
        .bind(new_instructor.user_id.as_i64())
        .bind(&new_instructor.bio)
        .bind(&new_instructor.specialization)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.constraint() == Some("instructors_user_id_key") {
                    return DomainError::validation(
                        "user_id",
                        "User already has an instructor profile",
                    );
                }
            }
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to insert instructor: {}", e),
            )
        })?;

        Ok(Instructor::from(row))
    }

    async fn update(&self, instructor: &Instructor) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE instructors SET
                bio = $3,
                specialization = $4,
                updated_at = $5,
                version = version + 1
            WHERE id = $1 AND version = $2
            "#,
        )
        .bind(instructor.id().as_i64())
        .bind(instructor.version())
        .bind(instructor.bio())
        .bind(instructor.specialization())
        .bind(instructor.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to update instructor: {}", e),
            )
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::ConcurrencyConflict,
                "Instructor was modified concurrently or does not exist",
            ));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: InstructorId) -> Result<Option<Instructor>, DomainError> {
        let row: Option<InstructorRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, bio, specialization, created_at, updated_at, version
            FROM instructors
            WHERE id = $1
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to find instructor: {}", e),
            )
        })?;

        Ok(row.map(Instructor::from))
    }

    async fn find_by_user_id(&self, user_id: UserId) -> Result<Option<Instructor>, DomainError> {
        let row: Option<InstructorRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, bio, specialization, created_at, updated_at, version
            FROM instructors
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to find instructor: {}", e),
            )
        })?;

        Ok(row.map(Instructor::from))
    }
}
