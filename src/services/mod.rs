//! Services module
//!
//! This module contains business logic services

pub mod auth;
pub mod mailer;
pub mod user;
pub mod venue;
pub mod wallet;

// Re-export commonly used services
pub use auth::AuthService;
pub use mailer::{MailerService, MailMessage};
pub use user::UserService;
pub use venue::VenueService;
pub use wallet::WalletService;

use crate::config::settings::Settings;
use crate::database::DatabaseService;
use crate::utils::errors::Result;

/// Service factory for creating and managing all services
#[derive(Clone)]
pub struct ServiceFactory {
    pub auth_service: AuthService,
    pub user_service: UserService,
    pub venue_service: VenueService,
    pub wallet_service: WalletService,
    pub mailer_service: MailerService,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services initialized
    pub fn new(settings: Settings, database: DatabaseService) -> Result<Self> {
        let mailer_service = MailerService::new(settings.clone())?;
        let auth_service = AuthService::new(
            database.users.clone(),
            database.partners.clone(),
            database.wallets.clone(),
            mailer_service.clone(),
            settings.clone(),
        );
        let user_service = UserService::new(database.users.clone(), database.partners.clone());
        let venue_service = VenueService::new(database.venues.clone());
        let wallet_service = WalletService::new(database.wallets);

        Ok(Self {
            auth_service,
            user_service,
            venue_service,
            wallet_service,
            mailer_service,
        })
    }

    /// Health check for all services
    pub fn health_check(&self) -> ServiceHealthStatus {
        ServiceHealthStatus {
            mail_enabled: self.mailer_service.is_enabled(),
            auth_service_ready: true,
            user_service_ready: true,
            venue_service_ready: true,
            wallet_service_ready: true,
        }
    }
}

/// Health status for all services
#[derive(Debug, Clone)]
pub struct ServiceHealthStatus {
    pub mail_enabled: bool,
    pub auth_service_ready: bool,
    pub user_service_ready: bool,
    pub venue_service_ready: bool,
    pub wallet_service_ready: bool,
}

impl ServiceHealthStatus {
    /// Check if all critical services are healthy
    pub fn is_healthy(&self) -> bool {
        self.auth_service_ready
            && self.user_service_ready
            && self.venue_service_ready
            && self.wallet_service_ready
    }
}
