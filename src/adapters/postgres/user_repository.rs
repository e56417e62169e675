//! PostgreSQL implementation of UserRepository.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::foundation::{DomainError, EmailAddress, ErrorCode, UserId};
use crate::domain::user::{NewUser, User};
use crate::ports::UserRepository;

use super::rows::UserRow;

/// PostgreSQL implementation of the UserRepository port.
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Creates a repository over the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn insert(&self, new_user: NewUser) -> Result<User, DomainError> {
        let row: UserRow = sqlx::query_as(
            r#"
            INSERT INTO users (
                username, email, password_hash, first_name, last_name, role,
                is_active, created_at, updated_at, version
            ) VALUES ($1, $2, $3, $4, $5, $6, TRUE, NOW(), NOW(), 1)
            RETURNING id, username, email, password_hash, first_name, last_name,
                      role, is_active, created_at, updated_at, version
            "#,
        )
        .bind(&new_user.username)
        .bind(new_user.email.value())
        .bind(&new_user.password_hash)
        .bind(&new_user.first_name)
        .bind(&new_user.last_name)
        .bind(new_user.role.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                match db_err.constraint() {
                    Some("users_email_key") => {
                        return DomainError::validation("email", "Email is already registered")
                    }
                    Some("users_username_key") => {
                        return DomainError::validation("username", "Username is already taken")
                    }
                    _ => {}
                }
            }
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to insert user: {}", e))
        })?;

        User::try_from(row)
    }

    async fn update(&self, user: &User) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE users SET
                username = $3,
                email = $4,
                password_hash = $5,
                first_name = $6,
                last_name = $7,
                role = $8,
                is_active = $9,
                updated_at = $10,
                version = version + 1
            WHERE id = $1 AND version = $2
            "#,
        )
        .bind(user.id().as_i64())
        .bind(user.version())
        .bind(user.username())
        .bind(user.email().value())
        .bind(user.password_hash())
        .bind(user.first_name())
        .bind(user.last_name())
        .bind(user.role().as_str())
        .bind(user.is_active())
        .bind(user.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to update user: {}", e))
        })?;

        if result.rows_affected() == 0 {
            // Either the row is gone or another writer bumped the version.
            let exists: Option<i64> = sqlx::query_scalar("SELECT id FROM users WHERE id = $1")
                .bind(user.id().as_i64())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| {
                    DomainError::new(
                        ErrorCode::DatabaseError,
                        format!("Failed to check user existence: {}", e),
                    )
                })?;
            return Err(match exists {
                Some(_) => DomainError::new(
                    ErrorCode::ConcurrencyConflict,
                    "User was modified concurrently",
                ),
                None => DomainError::new(
                    ErrorCode::UserNotFound,
                    format!("User not found: {}", user.id()),
                ),
            });
        }

        Ok(())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
            SELECT id, username, email, password_hash, first_name, last_name,
                   role, is_active, created_at, updated_at, version
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to find user: {}", e))
        })?;

        row.map(User::try_from).transpose()
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, DomainError> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
            SELECT id, username, email, password_hash, first_name, last_name,
                   role, is_active, created_at, updated_at, version
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to find user: {}", e))
        })?;

        row.map(User::try_from).transpose()
    }

    async fn exists_by_email(&self, email: &EmailAddress) -> Result<bool, DomainError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                .bind(email.value())
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    DomainError::new(
                        ErrorCode::DatabaseError,
                        format!("Failed to check email: {}", e),
                    )
                })?;
        Ok(exists)
    }

    async fn exists_by_username(&self, username: &str) -> Result<bool, DomainError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)")
                .bind(username)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    DomainError::new(
                        ErrorCode::DatabaseError,
                        format!("Failed to check username: {}", e),
                    )
                })?;
        Ok(exists)
    }
}
