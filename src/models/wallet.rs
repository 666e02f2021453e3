//! Wallet model

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Wallet {
    pub id: i64,
    pub user_id: i64,
    pub balance: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body for wallet credit/debit operations; amounts are integer minor units
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletAmountRequest {
    pub amount: i64,
}
