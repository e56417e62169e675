//! PostgreSQL implementation of BookingRepository and BookingReader.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::booking::{Booking, BookingStatus};
use crate::domain::foundation::{
    BookingId, ClassScheduleId, DomainError, ErrorCode, Timestamp, UserId,
};
use crate::ports::{BookingReader, BookingRepository, BookingView};

use super::rows::BookingRow;

/// Joined row shape backing [`BookingView`].
#[derive(Debug, sqlx::FromRow)]
struct BookingViewRow {
    id: i64,
    user_id: i64,
    user_email: String,
    class_schedule_id: i64,
    class_name: String,
    class_start_time: DateTime<Utc>,
    status: String,
    booked_at: DateTime<Utc>,
    cancelled_at: Option<DateTime<Utc>>,
    note: Option<String>,
}

impl TryFrom<BookingViewRow> for BookingView {
    type Error = DomainError;

    fn try_from(row: BookingViewRow) -> Result<Self, Self::Error> {
        let status: BookingStatus = row.status.parse().map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Corrupted booking row {}: {}", row.id, e),
            )
        })?;
        Ok(BookingView {
            id: BookingId::new(row.id),
            user_id: UserId::new(row.user_id),
            user_email: row.user_email,
            class_schedule_id: ClassScheduleId::new(row.class_schedule_id),
            class_name: row.class_name,
            class_start_time: Timestamp::from_datetime(row.class_start_time),
            status,
            booked_at: Timestamp::from_datetime(row.booked_at),
            cancelled_at: row.cancelled_at.map(Timestamp::from_datetime),
            note: row.note,
        })
    }
}

const VIEW_QUERY: &str = r#"
    SELECT b.id, b.user_id, u.email AS user_email,
           b.class_schedule_id, c.name AS class_name, c.start_time AS class_start_time,
           b.status, b.booked_at, b.cancelled_at, b.note
    FROM bookings b
    JOIN users u ON u.id = b.user_id
    JOIN class_schedules c ON c.id = b.class_schedule_id
"#;

/// PostgreSQL implementation of the booking ledger ports.
pub struct PostgresBookingRepository {
    pool: PgPool,
}

impl PostgresBookingRepository {
    /// Creates a repository over the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingRepository for PostgresBookingRepository {
    async fn find_by_id(&self, id: BookingId) -> Result<Option<Booking>, DomainError> {
        let row: Option<BookingRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, class_schedule_id, status, booked_at,
                   cancelled_at, note, version
            FROM bookings
            WHERE id = $1
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to find booking: {}", e))
        })?;

        row.map(Booking::try_from).transpose()
    }

    async fn exists_by_user_and_class(
        &self,
        user_id: UserId,
        class_schedule_id: ClassScheduleId,
    ) -> Result<bool, DomainError> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM bookings WHERE user_id = $1 AND class_schedule_id = $2)",
        )
        .bind(user_id.as_i64())
        .bind(class_schedule_id.as_i64())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to check booking existence: {}", e),
            )
        })?;
        Ok(exists)
    }
}

#[async_trait]
impl BookingReader for PostgresBookingRepository {
    async fn find_view_by_id(&self, id: BookingId) -> Result<Option<BookingView>, DomainError> {
        let row: Option<BookingViewRow> =
            sqlx::query_as(&format!("{} WHERE b.id = $1", VIEW_QUERY))
                .bind(id.as_i64())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| {
                    DomainError::new(
                        ErrorCode::DatabaseError,
                        format!("Failed to find booking: {}", e),
                    )
                })?;

        row.map(BookingView::try_from).transpose()
    }

    async fn list_by_user(&self, user_id: UserId) -> Result<Vec<BookingView>, DomainError> {
        let rows: Vec<BookingViewRow> = sqlx::query_as(&format!(
            "{} WHERE b.user_id = $1 ORDER BY b.booked_at DESC, b.id DESC",
            VIEW_QUERY
        ))
        .bind(user_id.as_i64())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to list bookings: {}", e))
        })?;

        rows.into_iter().map(BookingView::try_from).collect()
    }

    async fn list_by_user_and_status(
        &self,
        user_id: UserId,
        status: BookingStatus,
    ) -> Result<Vec<BookingView>, DomainError> {
        let rows: Vec<BookingViewRow> = sqlx::query_as(&format!(
            "{} WHERE b.user_id = $1 AND b.status = $2 ORDER BY b.booked_at DESC, b.id DESC",
            VIEW_QUERY
        ))
        .bind(user_id.as_i64())
        .bind(status.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to list bookings: {}", e))
        })?;

        rows.into_iter().map(BookingView::try_from).collect()
    }

    async fn list_by_class(
        &self,
        class_schedule_id: ClassScheduleId,
    ) -> Result<Vec<BookingView>, DomainError> {
        let rows: Vec<BookingViewRow> = sqlx::query_as(&format!(
            "{} WHERE b.class_schedule_id = $1 ORDER BY b.booked_at DESC, b.id DESC",
            VIEW_QUERY
        ))
        .bind(class_schedule_id.as_i64())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to list bookings: {}", e))
        })?;

        rows.into_iter().map(BookingView::try_from).collect()
    }

    async fn list_all(&self) -> Result<Vec<BookingView>, DomainError> {
        let rows: Vec<BookingViewRow> = sqlx::query_as(&format!(
            "{} ORDER BY b.booked_at DESC, b.id DESC",
            VIEW_QUERY
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to list bookings: {}", e))
        })?;

        rows.into_iter().map(BookingView::try_from).collect()
    }
}
