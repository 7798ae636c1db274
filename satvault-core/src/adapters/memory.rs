//! In-memory repository implementation
//!
//! Keeps the whole ledger in process memory behind the same `Repository`
//! trait as the DuckDB backend. Used by the test suite and anywhere a
//! throwaway ledger is useful; nothing survives the process.

use std::sync::Mutex;

use rust_decimal::Decimal;

use crate::domain::result::{Error, Result};
use crate::domain::{Transaction, User, Wallet};
use crate::ports::Repository;

#[derive(Default)]
struct MemoryState {
    users: Vec<User>,
    /// Wallets paired with their owner's API key, in insertion order
    wallets: Vec<(Wallet, String)>,
    transactions: Vec<Transaction>,
}

/// In-memory repository implementation
#[derive(Default)]
pub struct MemoryRepository {
    state: Mutex<MemoryState>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Repository for MemoryRepository {
    fn ensure_schema(&self) -> Result<()> {
        // Nothing to create; state lives in the vectors above
        Ok(())
    }

    fn register_user(&self, user: &User) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if state
            .users
            .iter()
            .any(|u| u.api_key == user.api_key || u.email == user.email)
        {
            return Err(Error::database(format!(
                "duplicate user: {}",
                user.email
            )));
        }
        state.users.push(user.clone());
        Ok(())
    }

    fn get_user(&self, api_key: &str) -> Result<Option<User>> {
        let state = self.state.lock().unwrap();
        Ok(state.users.iter().find(|u| u.api_key == api_key).cloned())
    }

    fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let state = self.state.lock().unwrap();
        Ok(state.users.iter().find(|u| u.email == email).cloned())
    }

    fn add_wallet(&self, wallet: &Wallet, user: &User) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if state
            .wallets
            .iter()
            .any(|(w, _)| w.wallet_address == wallet.wallet_address)
        {
            return Err(Error::database(format!(
                "duplicate wallet address: {}",
                wallet.wallet_address
            )));
        }
        state.wallets.push((wallet.clone(), user.api_key.clone()));
        Ok(())
    }

    fn get_wallet(&self, wallet_address: &str) -> Result<Option<Wallet>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .wallets
            .iter()
            .find(|(w, _)| w.wallet_address == wallet_address)
            .map(|(w, _)| w.clone()))
    }

    fn get_wallet_user(&self, wallet: &Wallet) -> Result<User> {
        let state = self.state.lock().unwrap();
        let owner_key = state
            .wallets
            .iter()
            .find(|(w, _)| w.wallet_address == wallet.wallet_address)
            .map(|(_, key)| key.clone());

        owner_key
            .and_then(|key| state.users.iter().find(|u| u.api_key == key).cloned())
            .ok_or_else(|| {
                Error::integrity(format!(
                    "wallet {} has no registered owner",
                    wallet.wallet_address
                ))
            })
    }

    fn update_wallet_balance(
        &self,
        wallet_address: &str,
        new_btc_balance: Decimal,
    ) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        // Overwrite if present; updating an unknown address is not a fault
        if let Some((wallet, _)) = state
            .wallets
            .iter_mut()
            .find(|(w, _)| w.wallet_address == wallet_address)
        {
            wallet.btc_balance = new_btc_balance;
        }
        Ok(())
    }

    fn get_user_wallets(&self, user: &User) -> Result<Vec<Wallet>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .wallets
            .iter()
            .filter(|(_, key)| *key == user.api_key)
            .map(|(w, _)| w.clone())
            .collect())
    }

    fn add_transaction(&self, transaction: &Transaction) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.transactions.push(transaction.clone());
        Ok(())
    }

    fn fetch_all_transactions(&self) -> Result<Vec<Transaction>> {
        let state = self.state.lock().unwrap();
        Ok(state.transactions.clone())
    }

    fn get_user_transactions(&self, user: &User) -> Result<Vec<Transaction>> {
        let state = self.state.lock().unwrap();
        let owned: Vec<&str> = state
            .wallets
            .iter()
            .filter(|(_, key)| *key == user.api_key)
            .map(|(w, _)| w.wallet_address.as_str())
            .collect();

        Ok(state
            .transactions
            .iter()
            .filter(|t| {
                owned.contains(&t.wallet_address_from.as_str())
                    || owned.contains(&t.wallet_address_to.as_str())
            })
            .cloned()
            .collect())
    }

    fn get_wallet_transactions(&self, wallet_address: &str) -> Result<Vec<Transaction>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .transactions
            .iter()
            .filter(|t| {
                t.wallet_address_from == wallet_address || t.wallet_address_to == wallet_address
            })
            .cloned()
            .collect())
    }
}
