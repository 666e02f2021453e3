//! Wallet handlers
//! 
//! Controllers for wallet balance, top-ups, deductions, and admin credit
//! adjustments.

use axum::extract::{Path, State};
use axum::Json;

use crate::middleware::auth::AuthContext;
use crate::models::user::UserRole;
use crate::models::wallet::{Wallet, WalletAmountRequest};
use crate::state::AppState;
use crate::utils::errors::Result;
use crate::utils::logging::log_admin_action;

/// GET /api/wallet
pub async fn get_wallet(
    State(state): State<AppState>,
    ctx: AuthContext,
) -> Result<Json<Wallet>> {
    let wallet = state.services.wallet_service.get_wallet(ctx.user_id).await?;
    Ok(Json(wallet))
}

/// POST /api/wallet/credit
pub async fn credit(
    State(state): State<AppState>,
    ctx: AuthContext,
    Json(request): Json<WalletAmountRequest>,
) -> Result<Json<Wallet>> {
    let wallet = state.services.wallet_service.credit(ctx.user_id, request.amount).await?;
    Ok(Json(wallet))
}

/// POST /api/wallet/debit
pub async fn debit(
    State(state): State<AppState>,
    ctx: AuthContext,
    Json(request): Json<WalletAmountRequest>,
) -> Result<Json<Wallet>> {
    let wallet = state.services.wallet_service.debit(ctx.user_id, request.amount).await?;
    Ok(Json(wallet))
}

/// POST /api/users/:id/wallet/credit (admin)
pub async fn admin_credit(
    State(state): State<AppState>,
    ctx: AuthContext,
    Path(user_id): Path<i64>,
    Json(request): Json<WalletAmountRequest>,
) -> Result<Json<Wallet>> {
    ctx.require_role(UserRole::Admin)?;

    let wallet = state.services.wallet_service.credit(user_id, request.amount).await?;
    log_admin_action(
        ctx.user_id,
        "wallet_credit",
        Some(&user_id.to_string()),
        Some(&request.amount.to_string()),
    );
    
    Ok(Json(wallet))
}
