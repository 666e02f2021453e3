//! Venue service implementation
//! 
//! This service handles venue CRUD with partner ownership checks, public
//! listings with search and pagination, and soft deletion.

use tracing::{info, debug, warn};
use crate::database::repositories::VenueRepository;
use crate::models::user::UserRole;
use crate::models::venue::{Venue, CreateVenueRequest, UpdateVenueRequest, VenueFilter, VenuePage};
use crate::utils::errors::{TurfBookError, Result};
use crate::utils::helpers::calculate_offset;

const DEFAULT_PAGE_SIZE: i64 = 20;
const MAX_PAGE_SIZE: i64 = 100;

/// Venue service for catalogue management
#[derive(Clone)]
pub struct VenueService {
    venues: VenueRepository,
}

impl VenueService {
    /// Create a new VenueService instance
    pub fn new(venues: VenueRepository) -> Self {
        Self { venues }
    }

    /// Create a venue owned by the calling partner
    pub async fn create_venue(&self, partner_id: i64, request: CreateVenueRequest) -> Result<Venue> {
        debug!(partner_id = partner_id, name = %request.name, "Creating venue");

        Self::validate_fields(&request.name, &request.location, request.price_per_hour)?;

        let venue = self.venues.create(partner_id, request).await?;
        info!(venue_id = venue.id, partner_id = partner_id, "Venue created successfully");
        crate::utils::logging::log_venue_action(venue.id, "create", partner_id, None);

        Ok(venue)
    }

    /// Fetch a single active venue for public display
    pub async fn get_venue(&self, venue_id: i64) -> Result<Venue> {
        let venue = self.venues.find_by_id(venue_id).await?
            .filter(|v| v.is_active)
            .ok_or(TurfBookError::VenueNotFound { venue_id })?;

        Ok(venue)
    }

    /// Public paginated listing with optional search and sport filter
    pub async fn list_venues(&self, filter: VenueFilter) -> Result<VenuePage> {
        let page = filter.page.unwrap_or(1).max(1);
        let page_size = filter.page_size.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
        let offset = calculate_offset(page, page_size);

        let search = filter.search.as_deref().map(str::trim).filter(|s| !s.is_empty());
        let sport = filter.sport.as_deref().map(str::trim).filter(|s| !s.is_empty());

        let venues = self.venues.list_active(search, sport, page_size, offset).await?;
        let total = self.venues.count_active(search, sport).await?;

        Ok(VenuePage {
            venues,
            total,
            page,
            page_size,
        })
    }

    /// Update a venue on behalf of its owning partner or an admin
    pub async fn update_venue(
        &self,
        actor_id: i64,
        actor_role: UserRole,
        venue_id: i64,
        request: UpdateVenueRequest,
    ) -> Result<Venue> {
        self.require_ownership(actor_id, actor_role, venue_id).await?;

        if let Some(price) = request.price_per_hour {
            if price < 0 {
                return Err(TurfBookError::InvalidInput("Price per hour cannot be negative".to_string()));
            }
        }

        let venue = self.venues.update(venue_id, request).await?;
        info!(venue_id = venue_id, actor_id = actor_id, "Venue updated successfully");
        crate::utils::logging::log_venue_action(venue_id, "update", actor_id, None);

        Ok(venue)
    }

    /// Soft-delete a venue on behalf of its owning partner or an admin
    pub async fn deactivate_venue(&self, actor_id: i64, actor_role: UserRole, venue_id: i64) -> Result<Venue> {
        self.require_ownership(actor_id, actor_role, venue_id).await?;

        let venue = self.venues.deactivate(venue_id).await?;
        info!(venue_id = venue_id, actor_id = actor_id, "Venue deactivated");
        crate::utils::logging::log_venue_action(venue_id, "deactivate", actor_id, None);

        Ok(venue)
    }

    /// List every venue owned by a partner, including inactive ones
    pub async fn list_partner_venues(&self, partner_id: i64) -> Result<Vec<Venue>> {
        self.venues.list_by_partner(partner_id).await
    }

    /// Count all venues on the platform (admin statistics)
    pub async fn count_venues(&self) -> Result<i64> {
        self.venues.count().await
    }

    /// Check that the actor owns the venue or is an admin
    async fn require_ownership(&self, actor_id: i64, actor_role: UserRole, venue_id: i64) -> Result<()> {
        let venue = self.venues.find_by_id(venue_id).await?
            .ok_or(TurfBookError::VenueNotFound { venue_id })?;

        if actor_role != UserRole::Admin && venue.partner_id != actor_id {
            warn!(venue_id = venue_id, actor_id = actor_id, owner_id = venue.partner_id, "Venue ownership check failed");
            return Err(TurfBookError::PermissionDenied(
                format!("User {} does not own venue {}", actor_id, venue_id)
            ));
        }

        Ok(())
    }

    fn validate_fields(name: &str, location: &str, price_per_hour: i64) -> Result<()> {
        if name.trim().is_empty() {
            return Err(TurfBookError::InvalidInput("Venue name cannot be empty".to_string()));
        }

        if location.trim().is_empty() {
            return Err(TurfBookError::InvalidInput("Venue location cannot be empty".to_string()));
        }

        if price_per_hour < 0 {
            return Err(TurfBookError::InvalidInput("Price per hour cannot be negative".to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_fields() {
        assert!(VenueService::validate_fields("Arena One", "North End", 50000).is_ok());
        assert!(VenueService::validate_fields("", "North End", 50000).is_err());
        assert!(VenueService::validate_fields("Arena One", "  ", 50000).is_err());
        assert!(VenueService::validate_fields("Arena One", "North End", -1).is_err());
    }
}
