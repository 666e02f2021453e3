//! Error handling for TurfBook
//! 
//! This module defines the main error types used throughout the application
//! and provides a unified error handling strategy, including the mapping of
//! errors onto HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Main error type for the TurfBook application
#[derive(Error, Debug)]
pub enum TurfBookError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    
    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
    
    #[error("Mail API error: {0}")]
    Mail(#[from] MailError),
    
    #[error("Configuration error: {0}")]
    Config(String),
    
    #[error("Permission denied: {0}")]
    PermissionDenied(String),
    
    #[error("User not found: {user_id}")]
    UserNotFound { user_id: i64 },
    
    #[error("Venue not found: {venue_id}")]
    VenueNotFound { venue_id: i64 },
    
    #[error("Wallet not found for user: {user_id}")]
    WalletNotFound { user_id: i64 },
    
    #[error("Email already registered: {0}")]
    EmailTaken(String),
    
    #[error("Invalid email or password")]
    InvalidCredentials,
    
    #[error("Invalid or expired one-time code")]
    OtpInvalid,
    
    #[error("Insufficient wallet balance for user: {user_id}")]
    InsufficientBalance { user_id: i64 },
    
    #[error("Password hashing error: {0}")]
    PasswordHash(String),
    
    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),
    
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),
    
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    
    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),
    
    #[error("Authentication error: {0}")]
    Authentication(String),
    
    #[error("Rate limit exceeded")]
    RateLimitExceeded,
    
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
}

/// Mail API specific errors
#[derive(Error, Debug)]
pub enum MailError {
    #[error("Mail API request failed: {0}")]
    RequestFailed(String),
    
    #[error("Mail API timeout")]
    Timeout,
    
    #[error("Invalid mail API response: {0}")]
    InvalidResponse(String),
    
    #[error("Mail service unavailable")]
    ServiceUnavailable,
}

/// Result type alias for TurfBook operations
pub type Result<T> = std::result::Result<T, TurfBookError>;

/// Result type alias for mail operations
pub type MailResult<T> = std::result::Result<T, MailError>;

impl TurfBookError {
    /// HTTP status code this error maps to
    pub fn status_code(&self) -> StatusCode {
        match self {
            TurfBookError::UserNotFound { .. }
            | TurfBookError::VenueNotFound { .. }
            | TurfBookError::WalletNotFound { .. } => StatusCode::NOT_FOUND,
            TurfBookError::EmailTaken(_) => StatusCode::CONFLICT,
            TurfBookError::InvalidCredentials
            | TurfBookError::OtpInvalid
            | TurfBookError::Authentication(_)
            | TurfBookError::Token(_) => StatusCode::UNAUTHORIZED,
            TurfBookError::PermissionDenied(_) => StatusCode::FORBIDDEN,
            TurfBookError::InvalidInput(_)
            | TurfBookError::InsufficientBalance { .. } => StatusCode::BAD_REQUEST,
            TurfBookError::RateLimitExceeded => StatusCode::TOO_MANY_REQUESTS,
            TurfBookError::ServiceUnavailable(_) | TurfBookError::Mail(_) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
    
    /// Stable machine-readable error code for API clients
    pub fn error_code(&self) -> &'static str {
        match self {
            TurfBookError::Database(_) => "database_error",
            TurfBookError::Migration(_) => "migration_error",
            TurfBookError::Mail(_) => "mail_error",
            TurfBookError::Config(_) => "config_error",
            TurfBookError::PermissionDenied(_) => "permission_denied",
            TurfBookError::UserNotFound { .. } => "user_not_found",
            TurfBookError::VenueNotFound { .. } => "venue_not_found",
            TurfBookError::WalletNotFound { .. } => "wallet_not_found",
            TurfBookError::EmailTaken(_) => "email_taken",
            TurfBookError::InvalidCredentials => "invalid_credentials",
            TurfBookError::OtpInvalid => "otp_invalid",
            TurfBookError::InsufficientBalance { .. } => "insufficient_balance",
            TurfBookError::PasswordHash(_) => "password_hash_error",
            TurfBookError::Token(_) => "invalid_token",
            TurfBookError::Http(_) => "http_error",
            TurfBookError::Serialization(_) => "serialization_error",
            TurfBookError::Io(_) => "io_error",
            TurfBookError::UrlParse(_) => "url_parse_error",
            TurfBookError::Authentication(_) => "authentication_error",
            TurfBookError::RateLimitExceeded => "rate_limit_exceeded",
            TurfBookError::InvalidInput(_) => "invalid_input",
            TurfBookError::ServiceUnavailable(_) => "service_unavailable",
        }
    }
}

impl IntoResponse for TurfBookError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        
        // Internal details stay in the logs, not in client responses.
        let message = if status.is_server_error() {
            error!(error = %self, code = self.error_code(), "Request failed");
            "internal server error".to_string()
        } else {
            self.to_string()
        };
        
        let body = Json(json!({
            "error": {
                "code": self.error_code(),
                "message": message,
            }
        }));
        
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code_mapping() {
        assert_eq!(
            TurfBookError::UserNotFound { user_id: 1 }.status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            TurfBookError::EmailTaken("a@b.com".to_string()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            TurfBookError::InvalidCredentials.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(TurfBookError::OtpInvalid.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            TurfBookError::PermissionDenied("nope".to_string()).status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            TurfBookError::RateLimitExceeded.status_code(),
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(
            TurfBookError::InsufficientBalance { user_id: 1 }.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            TurfBookError::Config("bad".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_codes_are_stable() {
        assert_eq!(TurfBookError::InvalidCredentials.error_code(), "invalid_credentials");
        assert_eq!(TurfBookError::OtpInvalid.error_code(), "otp_invalid");
        assert_eq!(
            TurfBookError::EmailTaken("a@b.com".to_string()).error_code(),
            "email_taken"
        );
    }
}
