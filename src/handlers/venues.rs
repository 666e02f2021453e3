//! Venue handlers
//! 
//! Controllers for venue CRUD: public browsing, partner management, and
//! admin overrides.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::middleware::auth::AuthContext;
use crate::models::user::UserRole;
use crate::models::venue::{CreateVenueRequest, UpdateVenueRequest, Venue, VenueFilter, VenuePage};
use crate::state::AppState;
use crate::utils::errors::Result;

/// POST /api/venues (partner)
pub async fn create_venue(
    State(state): State<AppState>,
    ctx: AuthContext,
    Json(request): Json<CreateVenueRequest>,
) -> Result<impl IntoResponse> {
    ctx.require_role(UserRole::Partner)?;

    let venue = state.services.venue_service.create_venue(ctx.user_id, request).await?;
    Ok((StatusCode::CREATED, Json(venue)))
}

/// GET /api/venues (public)
pub async fn list_venues(
    State(state): State<AppState>,
    Query(filter): Query<VenueFilter>,
) -> Result<Json<VenuePage>> {
    let page = state.services.venue_service.list_venues(filter).await?;
    Ok(Json(page))
}

/// GET /api/venues/:id (public)
pub async fn get_venue(
    State(state): State<AppState>,
    Path(venue_id): Path<i64>,
) -> Result<Json<Venue>> {
    let venue = state.services.venue_service.get_venue(venue_id).await?;
    Ok(Json(venue))
}

/// PUT /api/venues/:id (owning partner or admin)
pub async fn update_venue(
    State(state): State<AppState>,
    ctx: AuthContext,
    Path(venue_id): Path<i64>,
    Json(request): Json<UpdateVenueRequest>,
) -> Result<Json<Venue>> {
    ctx.require_role(UserRole::Partner)?;

    let venue = state.services.venue_service
        .update_venue(ctx.user_id, ctx.role, venue_id, request)
        .await?;
    
    Ok(Json(venue))
}

/// DELETE /api/venues/:id (owning partner or admin)
pub async fn delete_venue(
    State(state): State<AppState>,
    ctx: AuthContext,
    Path(venue_id): Path<i64>,
) -> Result<Json<Venue>> {
    ctx.require_role(UserRole::Partner)?;

    let venue = state.services.venue_service
        .deactivate_venue(ctx.user_id, ctx.role, venue_id)
        .await?;
    
    Ok(Json(venue))
}

/// GET /api/venues/mine (partner)
pub async fn my_venues(
    State(state): State<AppState>,
    ctx: AuthContext,
) -> Result<Json<Vec<Venue>>> {
    ctx.require_role(UserRole::Partner)?;

    let venues = state.services.venue_service.list_partner_venues(ctx.user_id).await?;
    Ok(Json(venues))
}
