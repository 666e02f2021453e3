//! Data models module
//!
//! This module contains all data structures used throughout the application

pub mod auth;
pub mod partner;
pub mod user;
pub mod venue;
pub mod wallet;

// Re-export commonly used models
pub use auth::{RegisterRequest, LoginRequest, OtpRequest, OtpVerifyRequest, AuthResponse, Claims};
pub use partner::{PartnerDetails, CreatePartnerDetailsRequest};
pub use user::{User, UserRole, UserProfile, CreateUserRequest, UpdateUserRequest};
pub use venue::{Venue, CreateVenueRequest, UpdateVenueRequest, VenueFilter, VenuePage};
pub use wallet::{Wallet, WalletAmountRequest};
