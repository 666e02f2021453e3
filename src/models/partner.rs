//! Partner details model

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PartnerDetails {
    pub id: i64,
    pub user_id: i64,
    pub company_name: String,
    pub contact_phone: Option<String>,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePartnerDetailsRequest {
    pub user_id: i64,
    pub company_name: String,
    pub contact_phone: Option<String>,
}
