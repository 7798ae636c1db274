//! Wallet service - custody wallet management

use std::sync::Arc;

use anyhow::Result;
use rand::Rng;
use rust_decimal::Decimal;

use crate::domain::result::Error;
use crate::domain::{User, Wallet};
use crate::ports::Repository;

/// Wallet service
pub struct WalletService {
    repository: Arc<dyn Repository>,
}

impl WalletService {
    pub fn new(repository: Arc<dyn Repository>) -> Self {
        Self { repository }
    }

    /// Create a wallet for the user holding `api_key`
    ///
    /// The address is minted here and the wallet starts empty; deposits
    /// are recorded later through balance updates.
    pub fn create_wallet(&self, api_key: &str) -> Result<Wallet> {
        let user = self.resolve_user(api_key)?;

        let wallet = Wallet::new(Self::generate_wallet_address(), Decimal::ZERO);
        self.repository.add_wallet(&wallet, &user)?;

        Ok(wallet)
    }

    /// Look up a wallet by address
    pub fn get_wallet(&self, wallet_address: &str) -> Result<Wallet> {
        let wallet = self
            .repository
            .get_wallet(wallet_address)?
            .ok_or_else(|| Error::not_found(format!("wallet {} not found", wallet_address)))?;
        Ok(wallet)
    }

    /// Look up a wallet together with its owner
    pub fn get_wallet_with_owner(&self, wallet_address: &str) -> Result<(Wallet, User)> {
        let wallet = self.get_wallet(wallet_address)?;
        let owner = self.repository.get_wallet_user(&wallet)?;
        Ok((wallet, owner))
    }

    /// Overwrite a wallet's balance and return the stored wallet
    pub fn set_balance(&self, wallet_address: &str, new_btc_balance: Decimal) -> Result<Wallet> {
        // Resolve first so a typo in the address is a not-found, not a
        // silent zero-row update
        self.get_wallet(wallet_address)?;
        self.repository
            .update_wallet_balance(wallet_address, new_btc_balance)?;
        self.get_wallet(wallet_address)
    }

    /// All wallets of the user holding `api_key`, oldest first
    pub fn list_wallets(&self, api_key: &str) -> Result<Vec<Wallet>> {
        let user = self.resolve_user(api_key)?;
        let wallets = self.repository.get_user_wallets(&user)?;
        Ok(wallets)
    }

    fn resolve_user(&self, api_key: &str) -> Result<User> {
        let user = self
            .repository
            .get_user(api_key)?
            .ok_or_else(|| Error::not_found("no user registered for the given API key"))?;
        Ok(user)
    }

    /// Mint a fresh wallet address: 16 random bytes, hex-encoded
    fn generate_wallet_address() -> String {
        let raw: [u8; 16] = rand::thread_rng().gen();
        hex::encode(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::MemoryRepository;

    fn seeded() -> (Arc<MemoryRepository>, WalletService, User) {
        let repository = Arc::new(MemoryRepository::new());
        let user = User::new("key-1", "owner@example.com");
        repository.register_user(&user).unwrap();
        let service = WalletService::new(repository.clone());
        (repository, service, user)
    }

    #[test]
    fn test_create_wallet_starts_empty() {
        let (repository, service, user) = seeded();

        let wallet = service.create_wallet(&user.api_key).unwrap();
        assert_eq!(wallet.btc_balance, Decimal::ZERO);
        assert_eq!(wallet.wallet_address.len(), 32);

        let stored = repository.get_wallet(&wallet.wallet_address).unwrap();
        assert_eq!(stored, Some(wallet));
    }

    #[test]
    fn test_create_wallet_for_unknown_key_fails() {
        let (_repository, service, _user) = seeded();
        let result = service.create_wallet("no-such-key");
        assert!(result.is_err());
    }

    #[test]
    fn test_minted_addresses_are_distinct() {
        let (_repository, service, user) = seeded();
        let first = service.create_wallet(&user.api_key).unwrap();
        let second = service.create_wallet(&user.api_key).unwrap();
        assert_ne!(first.wallet_address, second.wallet_address);
    }

    #[test]
    fn test_set_balance_overwrites() {
        let (_repository, service, user) = seeded();
        let wallet = service.create_wallet(&user.api_key).unwrap();

        let updated = service
            .set_balance(&wallet.wallet_address, Decimal::new(25, 1))
            .unwrap();
        assert_eq!(updated.btc_balance, Decimal::new(25, 1));

        // Last write wins, even when it lowers the balance
        let updated = service
            .set_balance(&wallet.wallet_address, Decimal::ONE)
            .unwrap();
        assert_eq!(updated.btc_balance, Decimal::ONE);
    }

    #[test]
    fn test_set_balance_on_unknown_wallet_fails() {
        let (_repository, service, _user) = seeded();
        let result = service.set_balance("missing-address", Decimal::ONE);
        assert!(result.is_err());
    }

    #[test]
    fn test_get_wallet_with_owner() {
        let (_repository, service, user) = seeded();
        let wallet = service.create_wallet(&user.api_key).unwrap();

        let (stored, owner) = service.get_wallet_with_owner(&wallet.wallet_address).unwrap();
        assert_eq!(stored, wallet);
        assert_eq!(owner, user);
    }
}
