//! Wallet repository implementation

use sqlx::PgPool;
use chrono::Utc;
use crate::models::wallet::Wallet;
use crate::utils::errors::TurfBookError;

#[derive(Clone)]
#[derive(Debug)]
pub struct WalletRepository {
    pool: PgPool,
}

impl WalletRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a wallet for a user if one does not already exist
    pub async fn create_if_missing(&self, user_id: i64) -> Result<(), TurfBookError> {
        sqlx::query(
            r#"
            INSERT INTO wallets (user_id, balance, created_at, updated_at)
            VALUES ($1, 0, $2, $3)
            ON CONFLICT (user_id) DO NOTHING
            "#
        )
        .bind(user_id)
        .bind(Utc::now())
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Find wallet by owning user
    pub async fn find_by_user_id(&self, user_id: i64) -> Result<Option<Wallet>, TurfBookError> {
        let wallet = sqlx::query_as::<_, Wallet>(
            "SELECT id, user_id, balance, created_at, updated_at FROM wallets WHERE user_id = $1"
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(wallet)
    }

    /// Add credits to a wallet
    pub async fn credit(&self, user_id: i64, amount: i64) -> Result<Wallet, TurfBookError> {
        let wallet = sqlx::query_as::<_, Wallet>(
            r#"
            UPDATE wallets
            SET balance = balance + $2, updated_at = $3
            WHERE user_id = $1
            RETURNING id, user_id, balance, created_at, updated_at
            "#
        )
        .bind(user_id)
        .bind(amount)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?
        .ok_or(TurfBookError::WalletNotFound { user_id })?;

        Ok(wallet)
    }

    /// Deduct credits from a wallet.
    ///
    /// The balance guard is part of the UPDATE itself, so concurrent debits
    /// cannot drive the balance negative. Returns None when the balance is
    /// insufficient.
    pub async fn debit(&self, user_id: i64, amount: i64) -> Result<Option<Wallet>, TurfBookError> {
        let wallet = sqlx::query_as::<_, Wallet>(
            r#"
            UPDATE wallets
            SET balance = balance - $2, updated_at = $3
            WHERE user_id = $1 AND balance >= $2
            RETURNING id, user_id, balance, created_at, updated_at
            "#
        )
        .bind(user_id)
        .bind(amount)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        Ok(wallet)
    }

    /// Sum of all wallet balances (admin statistics)
    pub async fn total_balance(&self) -> Result<i64, TurfBookError> {
        let total: (Option<i64>,) = sqlx::query_as("SELECT SUM(balance) FROM wallets")
            .fetch_one(&self.pool)
            .await?;

        Ok(total.0.unwrap_or(0))
    }
}
