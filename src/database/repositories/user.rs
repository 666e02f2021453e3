//! User repository implementation

use sqlx::PgPool;
use chrono::{DateTime, Utc};
use crate::models::user::{User, UserRole, CreateUserRequest, UpdateUserRequest};
use crate::utils::errors::TurfBookError;

const USER_COLUMNS: &str =
    "id, name, email, password_hash, role, phone, otp_code, otp_expires_at, created_at, updated_at";

#[derive(Clone)]
#[derive(Debug)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new user
    pub async fn create(&self, request: CreateUserRequest) -> Result<User, TurfBookError> {
        let email = request.email.clone();
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, password_hash, role, phone, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, name, email, password_hash, role, phone, otp_code, otp_expires_at, created_at, updated_at
            "#
        )
        .bind(request.name)
        .bind(request.email)
        .bind(request.password_hash)
        .bind(request.role)
        .bind(request.phone)
        .bind(Utc::now())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db) = &e {
                if db.is_unique_violation() {
                    return TurfBookError::EmailTaken(email);
                }
            }
            TurfBookError::Database(e)
        })?;

        Ok(user)
    }

    /// Find user by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<User>, TurfBookError> {
        let user = sqlx::query_as::<_, User>(
            &format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1")
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Find user by email
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, TurfBookError> {
        let user = sqlx::query_as::<_, User>(
            &format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1")
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Update user profile fields
    pub async fn update(&self, id: i64, request: UpdateUserRequest) -> Result<User, TurfBookError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET name = COALESCE($2, name),
                phone = COALESCE($3, phone),
                updated_at = $4
            WHERE id = $1
            RETURNING id, name, email, password_hash, role, phone, otp_code, otp_expires_at, created_at, updated_at
            "#
        )
        .bind(id)
        .bind(request.name)
        .bind(request.phone)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    /// Store a fresh one-time code and its expiry on the user row
    pub async fn set_otp(&self, id: i64, code: &str, expires_at: DateTime<Utc>) -> Result<User, TurfBookError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET otp_code = $2, otp_expires_at = $3, updated_at = $4
            WHERE id = $1
            RETURNING id, name, email, password_hash, role, phone, otp_code, otp_expires_at, created_at, updated_at
            "#
        )
        .bind(id)
        .bind(code)
        .bind(expires_at)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    /// Atomically consume a live one-time code.
    ///
    /// The compare-and-clear UPDATE matches only while the stored code is
    /// identical and unexpired, so two concurrent verifications of the same
    /// code cannot both succeed. Returns None when the code is wrong,
    /// already used, or expired.
    pub async fn consume_otp(&self, email: &str, code: &str) -> Result<Option<User>, TurfBookError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET otp_code = NULL, otp_expires_at = NULL, updated_at = $3
            WHERE email = $1 AND otp_code = $2 AND otp_expires_at > NOW()
            RETURNING id, name, email, password_hash, role, phone, otp_code, otp_expires_at, created_at, updated_at
            "#
        )
        .bind(email)
        .bind(code)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// List all users with pagination
    pub async fn list(&self, limit: i64, offset: i64) -> Result<Vec<User>, TurfBookError> {
        let users = sqlx::query_as::<_, User>(
            &format!("SELECT {USER_COLUMNS} FROM users ORDER BY created_at DESC LIMIT $1 OFFSET $2")
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    /// Count total users
    pub async fn count(&self) -> Result<i64, TurfBookError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }

    /// Count users holding a specific role
    pub async fn count_by_role(&self, role: UserRole) -> Result<i64, TurfBookError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE role = $1")
            .bind(role)
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }

    /// Find users by name or email pattern
    pub async fn find_by_pattern(&self, pattern: &str) -> Result<Vec<User>, TurfBookError> {
        let users = sqlx::query_as::<_, User>(
            &format!("SELECT {USER_COLUMNS} FROM users WHERE name ILIKE $1 OR email ILIKE $1 ORDER BY created_at DESC")
        )
        .bind(format!("%{}%", pattern))
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }
}
