//! Partner details repository implementation

use sqlx::PgPool;
use chrono::Utc;
use crate::models::partner::{PartnerDetails, CreatePartnerDetailsRequest};
use crate::utils::errors::TurfBookError;

#[derive(Clone)]
#[derive(Debug)]
pub struct PartnerRepository {
    pool: PgPool,
}

impl PartnerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create or replace the partner details attached to a user
    pub async fn upsert(&self, request: CreatePartnerDetailsRequest) -> Result<PartnerDetails, TurfBookError> {
        let details = sqlx::query_as::<_, PartnerDetails>(
            r#"
            INSERT INTO partner_details (user_id, company_name, contact_phone, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (user_id) DO UPDATE
            SET company_name = EXCLUDED.company_name,
                contact_phone = EXCLUDED.contact_phone,
                updated_at = EXCLUDED.updated_at
            RETURNING id, user_id, company_name, contact_phone, is_verified, created_at, updated_at
            "#
        )
        .bind(request.user_id)
        .bind(request.company_name)
        .bind(request.contact_phone)
        .bind(Utc::now())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(details)
    }

    /// Find partner details by owning user
    pub async fn find_by_user_id(&self, user_id: i64) -> Result<Option<PartnerDetails>, TurfBookError> {
        let details = sqlx::query_as::<_, PartnerDetails>(
            "SELECT id, user_id, company_name, contact_phone, is_verified, created_at, updated_at FROM partner_details WHERE user_id = $1"
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(details)
    }

    /// Mark a partner as verified (admin action)
    pub async fn set_verified(&self, user_id: i64, is_verified: bool) -> Result<PartnerDetails, TurfBookError> {
        let details = sqlx::query_as::<_, PartnerDetails>(
            r#"
            UPDATE partner_details
            SET is_verified = $2, updated_at = $3
            WHERE user_id = $1
            RETURNING id, user_id, company_name, contact_phone, is_verified, created_at, updated_at
            "#
        )
        .bind(user_id)
        .bind(is_verified)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(details)
    }
}
