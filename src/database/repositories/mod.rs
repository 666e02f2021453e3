//! Database repositories module
//! 
//! This module contains all repository implementations for data access

pub mod user;
pub mod partner;
pub mod venue;
pub mod wallet;

// Re-export repositories
pub use user::UserRepository;
pub use partner::PartnerRepository;
pub use venue::VenueRepository;
pub use wallet::WalletRepository;
