//! Health check handler

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use crate::database;
use crate::state::AppState;

/// GET /health
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let database_up = database::health_check(&state.db).await.is_ok();
    let services = state.services.health_check();
    
    let status = if database_up && services.is_healthy() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    
    let body = Json(json!({
        "status": if status == StatusCode::OK { "ok" } else { "degraded" },
        "database": if database_up { "up" } else { "down" },
        "mail_enabled": services.mail_enabled,
    }));
    
    (status, body)
}
