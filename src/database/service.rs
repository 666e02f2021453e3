//! Database service layer
//! 
//! This module provides a high-level interface to database operations

use crate::database::{DatabasePool, UserRepository, PartnerRepository, VenueRepository, WalletRepository};

#[derive(Debug, Clone)]
pub struct DatabaseService {
    pub users: UserRepository,
    pub partners: PartnerRepository,
    pub venues: VenueRepository,
    pub wallets: WalletRepository,
}

impl DatabaseService {
    pub fn new(pool: DatabasePool) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            partners: PartnerRepository::new(pool.clone()),
            venues: VenueRepository::new(pool.clone()),
            wallets: WalletRepository::new(pool),
        }
    }
}
