//! Venue repository implementation

use sqlx::PgPool;
use chrono::Utc;
use crate::models::venue::{Venue, CreateVenueRequest, UpdateVenueRequest};
use crate::utils::errors::TurfBookError;

const VENUE_COLUMNS: &str =
    "id, partner_id, name, location, sport, price_per_hour, description, amenities, is_active, created_at, updated_at";

#[derive(Clone)]
#[derive(Debug)]
pub struct VenueRepository {
    pool: PgPool,
}

impl VenueRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new venue owned by a partner
    pub async fn create(&self, partner_id: i64, request: CreateVenueRequest) -> Result<Venue, TurfBookError> {
        let venue = sqlx::query_as::<_, Venue>(
            r#"
            INSERT INTO venues (partner_id, name, location, sport, price_per_hour, description, amenities, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, partner_id, name, location, sport, price_per_hour, description, amenities, is_active, created_at, updated_at
            "#
        )
        .bind(partner_id)
        .bind(request.name)
        .bind(request.location)
        .bind(request.sport)
        .bind(request.price_per_hour)
        .bind(request.description)
        .bind(request.amenities)
        .bind(Utc::now())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(venue)
    }

    /// Find venue by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Venue>, TurfBookError> {
        let venue = sqlx::query_as::<_, Venue>(
            &format!("SELECT {VENUE_COLUMNS} FROM venues WHERE id = $1")
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(venue)
    }

    /// Update venue fields
    pub async fn update(&self, id: i64, request: UpdateVenueRequest) -> Result<Venue, TurfBookError> {
        let venue = sqlx::query_as::<_, Venue>(
            r#"
            UPDATE venues
            SET name = COALESCE($2, name),
                location = COALESCE($3, location),
                sport = COALESCE($4, sport),
                price_per_hour = COALESCE($5, price_per_hour),
                description = COALESCE($6, description),
                amenities = COALESCE($7, amenities),
                is_active = COALESCE($8, is_active),
                updated_at = $9
            WHERE id = $1
            RETURNING id, partner_id, name, location, sport, price_per_hour, description, amenities, is_active, created_at, updated_at
            "#
        )
        .bind(id)
        .bind(request.name)
        .bind(request.location)
        .bind(request.sport)
        .bind(request.price_per_hour)
        .bind(request.description)
        .bind(request.amenities)
        .bind(request.is_active)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(venue)
    }

    /// Soft-delete a venue by clearing its active flag
    pub async fn deactivate(&self, id: i64) -> Result<Venue, TurfBookError> {
        let venue = sqlx::query_as::<_, Venue>(
            r#"
            UPDATE venues
            SET is_active = false, updated_at = $2
            WHERE id = $1
            RETURNING id, partner_id, name, location, sport, price_per_hour, description, amenities, is_active, created_at, updated_at
            "#
        )
        .bind(id)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(venue)
    }

    /// List active venues with pagination and optional name/location search
    pub async fn list_active(
        &self,
        search: Option<&str>,
        sport: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Venue>, TurfBookError> {
        let venues = sqlx::query_as::<_, Venue>(
            &format!(
                r#"
                SELECT {VENUE_COLUMNS} FROM venues
                WHERE is_active = true
                  AND ($1::text IS NULL OR name ILIKE $1 OR location ILIKE $1)
                  AND ($2::text IS NULL OR sport = $2)
                ORDER BY created_at DESC
                LIMIT $3 OFFSET $4
                "#
            )
        )
        .bind(search.map(|s| format!("%{}%", s)))
        .bind(sport)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(venues)
    }

    /// Count active venues matching the same filters as list_active
    pub async fn count_active(&self, search: Option<&str>, sport: Option<&str>) -> Result<i64, TurfBookError> {
        let count: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FROM venues
            WHERE is_active = true
              AND ($1::text IS NULL OR name ILIKE $1 OR location ILIKE $1)
              AND ($2::text IS NULL OR sport = $2)
            "#
        )
        .bind(search.map(|s| format!("%{}%", s)))
        .bind(sport)
        .fetch_one(&self.pool)
        .await?;

        Ok(count.0)
    }

    /// List all venues owned by a partner, active or not
    pub async fn list_by_partner(&self, partner_id: i64) -> Result<Vec<Venue>, TurfBookError> {
        let venues = sqlx::query_as::<_, Venue>(
            &format!("SELECT {VENUE_COLUMNS} FROM venues WHERE partner_id = $1 ORDER BY created_at DESC")
        )
        .bind(partner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(venues)
    }

    /// Count total venues
    pub async fn count(&self) -> Result<i64, TurfBookError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM venues")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}
