//! Wallet service implementation
//! 
//! This service handles wallet balance reads, credit top-ups, and guarded
//! debits. Wallets are created lazily for accounts that predate the wallet
//! table.

use tracing::{info, debug};
use crate::database::repositories::WalletRepository;
use crate::models::wallet::Wallet;
use crate::utils::errors::{TurfBookError, Result};

/// Wallet service for credit management
#[derive(Clone)]
pub struct WalletService {
    wallets: WalletRepository,
}

impl WalletService {
    /// Create a new WalletService instance
    pub fn new(wallets: WalletRepository) -> Self {
        Self { wallets }
    }

    /// Fetch a user's wallet, creating an empty one on first access
    pub async fn get_wallet(&self, user_id: i64) -> Result<Wallet> {
        debug!(user_id = user_id, "Fetching wallet");

        if let Some(wallet) = self.wallets.find_by_user_id(user_id).await? {
            return Ok(wallet);
        }

        self.wallets.create_if_missing(user_id).await?;
        self.wallets.find_by_user_id(user_id).await?
            .ok_or(TurfBookError::WalletNotFound { user_id })
    }

    /// Add credits to a user's wallet
    pub async fn credit(&self, user_id: i64, amount: i64) -> Result<Wallet> {
        Self::validate_amount(amount)?;

        // Make sure the wallet row exists before crediting it.
        self.wallets.create_if_missing(user_id).await?;
        let wallet = self.wallets.credit(user_id, amount).await?;

        info!(user_id = user_id, amount = amount, balance = wallet.balance, "Wallet credited");
        crate::utils::logging::log_wallet_movement(user_id, "credit", amount, wallet.balance);

        Ok(wallet)
    }

    /// Deduct credits from a user's wallet; never drives the balance negative
    pub async fn debit(&self, user_id: i64, amount: i64) -> Result<Wallet> {
        Self::validate_amount(amount)?;

        if self.wallets.find_by_user_id(user_id).await?.is_none() {
            return Err(TurfBookError::WalletNotFound { user_id });
        }

        let wallet = self.wallets.debit(user_id, amount).await?
            .ok_or(TurfBookError::InsufficientBalance { user_id })?;

        info!(user_id = user_id, amount = amount, balance = wallet.balance, "Wallet debited");
        crate::utils::logging::log_wallet_movement(user_id, "debit", amount, wallet.balance);

        Ok(wallet)
    }

    /// Sum of all balances across the platform (admin statistics)
    pub async fn total_balance(&self) -> Result<i64> {
        self.wallets.total_balance().await
    }

    fn validate_amount(amount: i64) -> Result<()> {
        if amount <= 0 {
            return Err(TurfBookError::InvalidInput("Amount must be positive".to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_amount() {
        assert!(WalletService::validate_amount(1).is_ok());
        assert!(WalletService::validate_amount(100_000).is_ok());
        assert!(WalletService::validate_amount(0).is_err());
        assert!(WalletService::validate_amount(-50).is_err());
    }
}
