//! Authentication handlers
//! 
//! Controllers for registration, password login, and one-time code login.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use crate::models::auth::{AuthResponse, LoginRequest, OtpRequest, OtpVerifyRequest, RegisterRequest};
use crate::state::AppState;
use crate::utils::errors::Result;
use crate::utils::helpers::normalize_email;

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<impl IntoResponse> {
    let profile = state.services.auth_service.register(request).await?;
    Ok((StatusCode::CREATED, Json(profile)))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>> {
    let key = format!("login:{}", normalize_email(&request.email));
    state.rate_limiter.check_rate_limit(&key)?;

    let response = state.services.auth_service.login(request).await?;
    Ok(Json(response))
}

/// POST /api/auth/otp/request
pub async fn request_otp(
    State(state): State<AppState>,
    Json(request): Json<OtpRequest>,
) -> Result<impl IntoResponse> {
    let key = format!("otp:{}", normalize_email(&request.email));
    state.rate_limiter.check_rate_limit(&key)?;

    state.services.auth_service.request_otp(&request.email).await?;
    
    // Same response whether or not the email is registered.
    Ok((StatusCode::ACCEPTED, Json(json!({ "status": "accepted" }))))
}

/// POST /api/auth/otp/verify
pub async fn verify_otp(
    State(state): State<AppState>,
    Json(request): Json<OtpVerifyRequest>,
) -> Result<Json<AuthResponse>> {
    let response = state.services.auth_service
        .verify_otp(&request.email, &request.code)
        .await?;
    
    Ok(Json(response))
}
