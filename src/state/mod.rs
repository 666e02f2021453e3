//! Shared application state
//!
//! This module defines the state handed to every request handler: the
//! configuration, the database pool, the service factory, and the rate
//! limiter guarding sensitive endpoints.

use crate::config::Settings;
use crate::database::DatabasePool;
use crate::middleware::rate_limit::RateLimitMiddleware;
use crate::services::ServiceFactory;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub settings: Settings,
    pub db: DatabasePool,
    pub services: ServiceFactory,
    pub rate_limiter: RateLimitMiddleware,
}
