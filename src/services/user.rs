//! User service implementation
//! 
//! This service handles profile management and the admin views over the
//! account base: paginated listings, search, and aggregate statistics.

use std::collections::HashMap;
use tracing::{info, debug};
use crate::database::repositories::{PartnerRepository, UserRepository};
use crate::models::partner::PartnerDetails;
use crate::models::user::{UserProfile, UpdateUserRequest, UserRole};
use crate::utils::errors::{TurfBookError, Result};

/// User service for profile and account management
#[derive(Clone)]
pub struct UserService {
    users: UserRepository,
    partners: PartnerRepository,
}

impl UserService {
    /// Create a new UserService instance
    pub fn new(users: UserRepository, partners: PartnerRepository) -> Self {
        Self { users, partners }
    }

    /// Get a user's profile, with partner details when applicable
    pub async fn get_profile(&self, user_id: i64) -> Result<UserProfile> {
        debug!(user_id = user_id, "Fetching user profile");

        let user = self.users.find_by_id(user_id).await?
            .ok_or(TurfBookError::UserNotFound { user_id })?;

        let partner_details = if user.role == UserRole::Partner {
            self.partners.find_by_user_id(user.id).await?
        } else {
            None
        };

        Ok(UserProfile::from_user(user, partner_details))
    }

    /// Update a user's own profile fields
    pub async fn update_profile(&self, user_id: i64, request: UpdateUserRequest) -> Result<UserProfile> {
        debug!(user_id = user_id, "Updating user profile");

        if let Some(ref name) = request.name {
            if name.trim().is_empty() {
                return Err(TurfBookError::InvalidInput("Name cannot be empty".to_string()));
            }
        }

        if let Some(ref phone) = request.phone {
            if !crate::utils::helpers::is_valid_phone(phone) {
                return Err(TurfBookError::InvalidInput(format!("Invalid phone number: {}", phone)));
            }
        }

        let user = self.users.update(user_id, request).await?;
        info!(user_id = user_id, "User profile updated successfully");

        let partner_details = if user.role == UserRole::Partner {
            self.partners.find_by_user_id(user.id).await?
        } else {
            None
        };

        Ok(UserProfile::from_user(user, partner_details))
    }

    /// List users with pagination (admin)
    pub async fn list_users(&self, limit: i64, offset: i64) -> Result<Vec<UserProfile>> {
        debug!(limit = limit, offset = offset, "Listing users with pagination");

        if limit > 100 {
            return Err(TurfBookError::InvalidInput("Limit cannot exceed 100".to_string()));
        }

        let users = self.users.list(limit, offset).await?;
        Ok(users.into_iter().map(|u| UserProfile::from_user(u, None)).collect())
    }

    /// Search users by name or email pattern (admin)
    pub async fn search_users(&self, pattern: &str) -> Result<Vec<UserProfile>> {
        debug!(pattern = %pattern, "Searching users");

        if pattern.len() < 2 {
            return Err(TurfBookError::InvalidInput("Search pattern must be at least 2 characters".to_string()));
        }

        let users = self.users.find_by_pattern(pattern).await?;
        Ok(users.into_iter().map(|u| UserProfile::from_user(u, None)).collect())
    }

    /// Mark a partner account as verified (admin)
    pub async fn verify_partner(&self, user_id: i64) -> Result<PartnerDetails> {
        let user = self.users.find_by_id(user_id).await?
            .ok_or(TurfBookError::UserNotFound { user_id })?;

        if user.role != UserRole::Partner {
            return Err(TurfBookError::InvalidInput(
                format!("User {} is not a partner account", user_id)
            ));
        }

        if self.partners.find_by_user_id(user_id).await?.is_none() {
            return Err(TurfBookError::UserNotFound { user_id });
        }

        let details = self.partners.set_verified(user_id, true).await?;
        info!(user_id = user_id, "Partner account verified");

        Ok(details)
    }

    /// Get account statistics (admin)
    pub async fn get_user_statistics(&self) -> Result<HashMap<String, i64>> {
        debug!("Getting user statistics");

        let total_users = self.users.count().await?;
        let partners = self.users.count_by_role(UserRole::Partner).await?;
        let admins = self.users.count_by_role(UserRole::Admin).await?;

        let mut stats = HashMap::new();
        stats.insert("total_users".to_string(), total_users);
        stats.insert("partners".to_string(), partners);
        stats.insert("admins".to_string(), admins);
        stats.insert("players".to_string(), total_users - partners - admins);

        Ok(stats)
    }
}
