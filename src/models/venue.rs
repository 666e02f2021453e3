//! Venue model

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Venue {
    pub id: i64,
    pub partner_id: i64,
    pub name: String,
    pub location: String,
    pub sport: String,
    pub price_per_hour: i64,
    pub description: Option<String>,
    pub amenities: Option<Vec<String>>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateVenueRequest {
    pub name: String,
    pub location: String,
    pub sport: String,
    pub price_per_hour: i64,
    pub description: Option<String>,
    pub amenities: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateVenueRequest {
    pub name: Option<String>,
    pub location: Option<String>,
    pub sport: Option<String>,
    pub price_per_hour: Option<i64>,
    pub description: Option<String>,
    pub amenities: Option<Vec<String>>,
    pub is_active: Option<bool>,
}

/// Filters for public venue listings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VenueFilter {
    pub search: Option<String>,
    pub sport: Option<String>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

/// Paginated venue listing response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VenuePage {
    pub venues: Vec<Venue>,
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
}
