//! PostgreSQL reservation unit of work.
//!
//! Implements the exclusive-lock contract with `SELECT ... FOR UPDATE`
//! inside a transaction: the row lock is acquired when the class is read,
//! held while the ledger entry and counter update are written, and
//! released when the transaction commits or rolls back. Concurrent
//! `book()` calls against the same class serialize on this lock, so the
//! "class is full" check always sees the counter as the previous holder
//! left it.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};

use crate::domain::booking::{Booking, NewBooking};
use crate::domain::class_schedule::ClassSchedule;
use crate::domain::foundation::{BookingId, ClassScheduleId, DomainError, ErrorCode, UserId};
use crate::ports::{ReservationUnitOfWork, ReservationWork};

use super::rows::{BookingRow, ClassScheduleRow};

/// Factory for PostgreSQL reservation transactions.
pub struct PostgresReservationUnitOfWork {
    pool: PgPool,
}

impl PostgresReservationUnitOfWork {
    /// Creates a unit-of-work factory over the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReservationUnitOfWork for PostgresReservationUnitOfWork {
    async fn begin(&self) -> Result<Box<dyn ReservationWork>, DomainError> {
        let tx = self.pool.begin().await.map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to begin transaction: {}", e),
            )
        })?;
        Ok(Box::new(PostgresReservationWork { tx }))
    }
}

/// One reservation transaction. Dropping it without commit rolls back.
struct PostgresReservationWork {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl ReservationWork for PostgresReservationWork {
    async fn lock_class(
        &mut self,
        id: ClassScheduleId,
    ) -> Result<Option<ClassSchedule>, DomainError> {
        let row: Option<ClassScheduleRow> = sqlx::query_as(
            r#"
            SELECT id, name, description, instructor_id, start_time, end_time,
                   capacity, current_bookings, location, status,
                   created_at, updated_at, version
            FROM class_schedules
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to lock class: {}", e))
        })?;

        row.map(ClassSchedule::try_from).transpose()
    }

    async fn find_booking(&mut self, id: BookingId) -> Result<Option<Booking>, DomainError> {
        let row: Option<BookingRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, class_schedule_id, status, booked_at,
                   cancelled_at, note, version
            FROM bookings
            WHERE id = $1
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to find booking: {}", e))
        })?;

        row.map(Booking::try_from).transpose()
    }

    async fn booking_exists(
        &mut self,
        user_id: UserId,
        class_schedule_id: ClassScheduleId,
    ) -> Result<bool, DomainError> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM bookings WHERE user_id = $1 AND class_schedule_id = $2)",
        )
        .bind(user_id.as_i64())
        .bind(class_schedule_id.as_i64())
        .fetch_one(&mut *self.tx)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to check booking existence: {}", e),
            )
        })?;
        Ok(exists)
    }

    async fn insert_booking(&mut self, new_booking: NewBooking) -> Result<Booking, DomainError> {
        let row: BookingRow = sqlx::query_as(
            r#"
            INSERT INTO bookings (
                user_id, class_schedule_id, status, booked_at, cancelled_at, note, version
            ) VALUES ($1, $2, $3, $4, NULL, $5, 1)
            RETURNING id, user_id, class_schedule_id, status, booked_at,
                      cancelled_at, note, version
            "#,
        )
        .bind(new_booking.user_id.as_i64())
        .bind(new_booking.class_schedule_id.as_i64())
        .bind(new_booking.status.as_str())
        .bind(new_booking.booked_at.as_datetime())
        .bind(&new_booking.note)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.constraint() == Some("bookings_user_id_class_schedule_id_key") {
                    return DomainError::new(
                        ErrorCode::DuplicateBooking,
                        "You have already booked this class",
                    );
                }
            }
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to insert booking: {}", e),
            )
        })?;

        Booking::try_from(row)
    }

    async fn update_booking(&mut self, booking: &Booking) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE bookings SET
                status = $2,
                cancelled_at = $3,
                note = $4,
                version = version + 1
            WHERE id = $1
            "#,
        )
        .bind(booking.id().as_i64())
        .bind(booking.status().as_str())
        .bind(booking.cancelled_at().map(|ts| *ts.as_datetime()))
        .bind(booking.note())
        .execute(&mut *self.tx)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to update booking: {}", e),
            )
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::BookingNotFound,
                format!("Booking not found: {}", booking.id()),
            ));
        }

        Ok(())
    }

    async fn update_class(&mut self, class: &ClassSchedule) -> Result<(), DomainError> {
        // The row lock already serializes writers; no version guard needed.
        let result = sqlx::query(
            r#"
            UPDATE class_schedules SET
                current_bookings = $2,
                status = $3,
                updated_at = $4,
                version = version + 1
            WHERE id = $1
            "#,
        )
        .bind(class.id().as_i64())
        .bind(class.current_bookings() as i32)
        .bind(class.status().as_str())
        .bind(class.updated_at().as_datetime())
        .execute(&mut *self.tx)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to update class: {}", e))
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::ClassNotFound,
                format!("Class not found: {}", class.id()),
            ));
        }

        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<(), DomainError> {
        self.tx.commit().await.map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to commit reservation: {}", e),
            )
        })
    }
}
