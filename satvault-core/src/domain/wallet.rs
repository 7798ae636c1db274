//! Wallet domain model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A custodial Bitcoin wallet.
///
/// Every wallet belongs to exactly one user, but the owner is a stored
/// relation maintained by the repository, not a field of the wallet
/// itself. Balances are plain decimals: nothing here prevents a caller
/// from recording an overdraw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wallet {
    pub wallet_address: String,
    pub btc_balance: Decimal,
}

impl Wallet {
    pub fn new(wallet_address: impl Into<String>, btc_balance: Decimal) -> Self {
        Self {
            wallet_address: wallet_address.into(),
            btc_balance,
        }
    }

    /// Validate wallet data
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.wallet_address.trim().is_empty() {
            return Err("wallet address cannot be empty");
        }
        Ok(())
    }
}
