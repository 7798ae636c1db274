//! Transaction domain model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A recorded transfer between two wallet addresses.
///
/// Transactions are append-only ledger entries: once recorded they are
/// never updated or deleted, and every query that returns them preserves
/// the order they were recorded in. A transfer from an address to itself
/// is a legitimate entry. Amounts, fees and rates are recorded as given,
/// with no consistency checks against wallet balances.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub wallet_address_from: String,
    pub wallet_address_to: String,
    pub btc_amount: Decimal,
    /// Fee charged on the transfer, as a percentage of the amount
    pub fee_pct: Decimal,
    /// BTC/fiat rate at the time the transfer was recorded
    pub exchange_rate: Decimal,
}

impl Transaction {
    pub fn new(
        wallet_address_from: impl Into<String>,
        wallet_address_to: impl Into<String>,
        btc_amount: Decimal,
        fee_pct: Decimal,
        exchange_rate: Decimal,
    ) -> Self {
        Self {
            wallet_address_from: wallet_address_from.into(),
            wallet_address_to: wallet_address_to.into(),
            btc_amount,
            fee_pct,
            exchange_rate,
        }
    }

    /// True if the transfer sends funds back to the sending address
    pub fn is_self_transfer(&self) -> bool {
        self.wallet_address_from == self.wallet_address_to
    }

    /// Validate transaction data
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.wallet_address_from.trim().is_empty() {
            return Err("sending wallet address cannot be empty");
        }
        if self.wallet_address_to.trim().is_empty() {
            return Err("receiving wallet address cannot be empty");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transaction_creation() {
        let tx = Transaction::new(
            "addr-from",
            "addr-to",
            Decimal::new(5, 1),
            Decimal::new(1, 0),
            Decimal::new(42000, 0),
        );
        assert_eq!(tx.wallet_address_from, "addr-from");
        assert_eq!(tx.wallet_address_to, "addr-to");
        assert_eq!(tx.btc_amount.to_string(), "0.5");
        assert!(!tx.is_self_transfer());
    }

    #[test]
    fn test_self_transfer_is_valid() {
        let tx = Transaction::new(
            "addr-1",
            "addr-1",
            Decimal::ONE,
            Decimal::ZERO,
            Decimal::ZERO,
        );
        assert!(tx.is_self_transfer());
        assert!(tx.validate().is_ok());
    }

    #[test]
    fn test_transaction_validation() {
        let tx = Transaction::new("", "addr-to", Decimal::ONE, Decimal::ZERO, Decimal::ZERO);
        assert!(tx.validate().is_err());
    }
}
