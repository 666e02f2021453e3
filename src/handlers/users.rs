//! User handlers
//! 
//! Controllers for the authenticated profile and admin account views.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::middleware::auth::AuthContext;
use crate::models::partner::PartnerDetails;
use crate::models::user::{UpdateUserRequest, UserProfile, UserRole};
use crate::state::AppState;
use crate::utils::errors::Result;
use crate::utils::helpers::calculate_offset;

#[derive(Debug, Deserialize)]
pub struct ListUsersQuery {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
    pub search: Option<String>,
}

/// GET /api/users/me
pub async fn me(
    State(state): State<AppState>,
    ctx: AuthContext,
) -> Result<Json<UserProfile>> {
    let profile = state.services.user_service.get_profile(ctx.user_id).await?;
    Ok(Json(profile))
}

/// PUT /api/users/me
pub async fn update_me(
    State(state): State<AppState>,
    ctx: AuthContext,
    Json(request): Json<UpdateUserRequest>,
) -> Result<Json<UserProfile>> {
    let profile = state.services.user_service.update_profile(ctx.user_id, request).await?;
    Ok(Json(profile))
}

/// GET /api/users (admin)
pub async fn list_users(
    State(state): State<AppState>,
    ctx: AuthContext,
    Query(query): Query<ListUsersQuery>,
) -> Result<Json<Vec<UserProfile>>> {
    ctx.require_role(UserRole::Admin)?;

    let users = if let Some(pattern) = query.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        state.services.user_service.search_users(pattern).await?
    } else {
        let page = query.page.unwrap_or(1).max(1);
        let page_size = query.page_size.unwrap_or(20).clamp(1, 100);
        let offset = calculate_offset(page, page_size);
        state.services.user_service.list_users(page_size, offset).await?
    };

    Ok(Json(users))
}

/// POST /api/users/:id/partner/verify (admin)
pub async fn verify_partner(
    State(state): State<AppState>,
    ctx: AuthContext,
    Path(user_id): Path<i64>,
) -> Result<Json<PartnerDetails>> {
    ctx.require_role(UserRole::Admin)?;

    let details = state.services.user_service.verify_partner(user_id).await?;
    crate::utils::logging::log_admin_action(
        ctx.user_id,
        "verify_partner",
        Some(&user_id.to_string()),
        None,
    );

    Ok(Json(details))
}

/// GET /api/users/stats (admin)
pub async fn user_stats(
    State(state): State<AppState>,
    ctx: AuthContext,
) -> Result<Json<Value>> {
    ctx.require_role(UserRole::Admin)?;

    let users = state.services.user_service.get_user_statistics().await?;
    let venues = state.services.venue_service.count_venues().await?;
    let wallet_total = state.services.wallet_service.total_balance().await?;

    Ok(Json(json!({
        "users": users,
        "venues": { "total": venues },
        "wallets": { "total_balance": wallet_total },
    })))
}
