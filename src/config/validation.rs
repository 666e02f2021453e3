//! Configuration validation module
//! 
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use url::Url;
use crate::utils::errors::{TurfBookError, Result};
use super::Settings;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_server_config(&settings.server)?;
    validate_database_config(&settings.database)?;
    validate_jwt_config(&settings.jwt)?;
    validate_otp_config(&settings.otp)?;
    validate_mail_config(&settings.mail)?;
    validate_rate_limit_config(&settings.rate_limit)?;
    validate_logging_config(&settings.logging)?;
    
    Ok(())
}

/// Validate HTTP server configuration
fn validate_server_config(config: &super::ServerConfig) -> Result<()> {
    if config.host.is_empty() {
        return Err(TurfBookError::Config(
            "Server host is required".to_string()
        ));
    }
    
    if config.port == 0 {
        return Err(TurfBookError::Config(
            "Server port must be greater than 0".to_string()
        ));
    }
    
    for origin in &config.cors_allowed_origins {
        if origin != "*" && Url::parse(origin).is_err() {
            return Err(TurfBookError::Config(
                format!("Invalid CORS origin: {}", origin)
            ));
        }
    }
    
    Ok(())
}

/// Validate database configuration
fn validate_database_config(config: &super::DatabaseConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(TurfBookError::Config(
            "Database URL is required".to_string()
        ));
    }
    
    if config.max_connections == 0 {
        return Err(TurfBookError::Config(
            "Max connections must be greater than 0".to_string()
        ));
    }
    
    if config.min_connections > config.max_connections {
        return Err(TurfBookError::Config(
            "Min connections cannot be greater than max connections".to_string()
        ));
    }
    
    Ok(())
}

/// Validate JWT configuration
fn validate_jwt_config(config: &super::JwtConfig) -> Result<()> {
    if config.secret.is_empty() {
        return Err(TurfBookError::Config(
            "JWT secret is required".to_string()
        ));
    }
    
    if config.secret.len() < 32 {
        return Err(TurfBookError::Config(
            "JWT secret must be at least 32 bytes".to_string()
        ));
    }
    
    if config.expiry_hours <= 0 {
        return Err(TurfBookError::Config(
            "JWT expiry must be greater than 0 hours".to_string()
        ));
    }
    
    Ok(())
}

/// Validate one-time password configuration
fn validate_otp_config(config: &super::OtpConfig) -> Result<()> {
    if config.ttl_minutes <= 0 {
        return Err(TurfBookError::Config(
            "OTP TTL must be greater than 0 minutes".to_string()
        ));
    }
    
    if !(4..=8).contains(&config.code_length) {
        return Err(TurfBookError::Config(
            "OTP code length must be between 4 and 8 digits".to_string()
        ));
    }
    
    Ok(())
}

/// Validate mail API configuration
fn validate_mail_config(config: &super::MailConfig) -> Result<()> {
    if !config.enabled {
        return Ok(());
    }
    
    Url::parse(&config.api_url).map_err(|_| {
        TurfBookError::Config(format!("Invalid mail API URL: {}", config.api_url))
    })?;
    
    if config.api_key.is_empty() {
        return Err(TurfBookError::Config(
            "Mail API key is required when mail delivery is enabled".to_string()
        ));
    }
    
    if config.sender.is_empty() {
        return Err(TurfBookError::Config(
            "Mail sender address is required when mail delivery is enabled".to_string()
        ));
    }
    
    if config.timeout_seconds == 0 {
        return Err(TurfBookError::Config(
            "Mail timeout must be greater than 0".to_string()
        ));
    }
    
    Ok(())
}

/// Validate rate limiting configuration
fn validate_rate_limit_config(config: &super::RateLimitSettings) -> Result<()> {
    if config.max_requests == 0 {
        return Err(TurfBookError::Config(
            "Rate limit max requests must be greater than 0".to_string()
        ));
    }
    
    if config.window_seconds == 0 {
        return Err(TurfBookError::Config(
            "Rate limit window must be greater than 0 seconds".to_string()
        ));
    }
    
    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(TurfBookError::Config(
            "Log level is required".to_string()
        ));
    }
    
    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(TurfBookError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }
    
    Ok(())
}
