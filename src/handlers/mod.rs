//! HTTP handlers module
//!
//! This module contains the controller layer: axum handlers grouped by
//! resource, and the router wiring them to the service layer.

pub mod auth;
pub mod health;
pub mod users;
pub mod venues;
pub mod wallets;

use axum::http::{header, HeaderValue, Method};
use axum::middleware::from_fn;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::warn;

use crate::config::ServerConfig;
use crate::middleware::logging::track_requests;
use crate::state::AppState;

/// Build the application router with all routes and layers
pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.settings.server);

    Router::new()
        .route("/health", get(health::health))
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/otp/request", post(auth::request_otp))
        .route("/api/auth/otp/verify", post(auth::verify_otp))
        .route("/api/users/me", get(users::me).put(users::update_me))
        .route("/api/users", get(users::list_users))
        .route("/api/users/stats", get(users::user_stats))
        .route("/api/users/:id/wallet/credit", post(wallets::admin_credit))
        .route("/api/users/:id/partner/verify", post(users::verify_partner))
        .route("/api/venues", post(venues::create_venue).get(venues::list_venues))
        .route("/api/venues/mine", get(venues::my_venues))
        .route(
            "/api/venues/:id",
            get(venues::get_venue)
                .put(venues::update_venue)
                .delete(venues::delete_venue),
        )
        .route("/api/wallet", get(wallets::get_wallet))
        .route("/api/wallet/credit", post(wallets::credit))
        .route("/api/wallet/debit", post(wallets::debit))
        .layer(from_fn(track_requests))
        .layer(cors)
        .with_state(state)
}

/// Build the CORS layer from configured origins
fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    if config.cors_allowed_origins.iter().any(|origin| origin == "*") {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .cors_allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Skipping unparseable CORS origin");
                None
            }
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(origins))
}
