//! Logging configuration and setup
//! 
//! This module provides logging initialization and structured logging utilities
//! for the TurfBook application.

use tracing::{info, warn, error, debug};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use crate::config::LoggingConfig;
use crate::utils::errors::Result;

/// Initialize logging based on configuration.
///
/// The returned guard flushes the file writer on drop; the caller must keep
/// it alive for the lifetime of the process.
pub fn init_logging(config: &LoggingConfig) -> Result<tracing_appender::non_blocking::WorkerGuard> {
    let file_appender = tracing_appender::rolling::daily(&config.file_path, "turfbook.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.level))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout))
        .with(tracing_subscriber::fmt::layer().with_writer(non_blocking))
        .init();

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log authentication events with structured data
pub fn log_auth_event(user_id: Option<i64>, email: &str, action: &str, success: bool) {
    if success {
        info!(
            user_id = user_id,
            email = email,
            action = action,
            "Authentication event: success"
        );
    } else {
        warn!(
            user_id = user_id,
            email = email,
            action = action,
            "Authentication event: failure"
        );
    }
}

/// Log venue management actions
pub fn log_venue_action(venue_id: i64, action: &str, actor_id: i64, details: Option<&str>) {
    info!(
        venue_id = venue_id,
        action = action,
        actor_id = actor_id,
        details = details,
        "Venue action performed"
    );
}

/// Log wallet movements
pub fn log_wallet_movement(user_id: i64, operation: &str, amount: i64, balance_after: i64) {
    info!(
        user_id = user_id,
        operation = operation,
        amount = amount,
        balance_after = balance_after,
        "Wallet movement recorded"
    );
}

/// Log admin actions
pub fn log_admin_action(admin_id: i64, action: &str, target: Option<&str>, details: Option<&str>) {
    warn!(
        admin_id = admin_id,
        action = action,
        target = target,
        details = details,
        "Admin action performed"
    );
}

/// Log API errors with context
pub fn log_api_error(api: &str, error: &str, context: Option<&str>) {
    error!(
        api = api,
        error = error,
        context = context,
        "API error occurred"
    );
}

/// Log database operations
pub fn log_database_operation(operation: &str, table: &str, duration_ms: u64, success: bool) {
    if success {
        debug!(
            operation = operation,
            table = table,
            duration_ms = duration_ms,
            "Database operation completed"
        );
    } else {
        error!(
            operation = operation,
            table = table,
            duration_ms = duration_ms,
            "Database operation failed"
        );
    }
}
