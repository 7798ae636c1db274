//! Transfer service - records transfers between wallets

use std::sync::Arc;

use anyhow::Result;
use rust_decimal::Decimal;

use crate::domain::result::Error;
use crate::domain::Transaction;
use crate::ports::Repository;

/// Transfer service
///
/// Appends transfer records to the ledger. Balances are not touched and
/// not checked: the ledger happily records an amount the sending wallet
/// does not hold. Both addresses must exist, and a wallet may send to
/// itself.
pub struct TransferService {
    repository: Arc<dyn Repository>,
    default_fee_pct: Decimal,
    default_exchange_rate: Decimal,
}

impl TransferService {
    pub fn new(
        repository: Arc<dyn Repository>,
        default_fee_pct: Decimal,
        default_exchange_rate: Decimal,
    ) -> Self {
        Self {
            repository,
            default_fee_pct,
            default_exchange_rate,
        }
    }

    /// Record a transfer
    ///
    /// `fee_pct` and `exchange_rate` fall back to the configured defaults
    /// when the caller does not supply them.
    pub fn record_transfer(
        &self,
        from_address: &str,
        to_address: &str,
        btc_amount: Decimal,
        fee_pct: Option<Decimal>,
        exchange_rate: Option<Decimal>,
    ) -> Result<Transaction> {
        if self.repository.get_wallet(from_address)?.is_none() {
            return Err(
                Error::not_found(format!("sending wallet {} not found", from_address)).into(),
            );
        }
        if self.repository.get_wallet(to_address)?.is_none() {
            return Err(
                Error::not_found(format!("receiving wallet {} not found", to_address)).into(),
            );
        }

        let transaction = Transaction::new(
            from_address,
            to_address,
            btc_amount,
            fee_pct.unwrap_or(self.default_fee_pct),
            exchange_rate.unwrap_or(self.default_exchange_rate),
        );
        self.repository.add_transaction(&transaction)?;

        Ok(transaction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::MemoryRepository;
    use crate::domain::{User, Wallet};

    fn seeded() -> (Arc<MemoryRepository>, TransferService) {
        let repository = Arc::new(MemoryRepository::new());
        let user = User::new("key-1", "owner@example.com");
        repository.register_user(&user).unwrap();
        repository
            .add_wallet(&Wallet::new("addr-a", Decimal::ONE), &user)
            .unwrap();
        repository
            .add_wallet(&Wallet::new("addr-b", Decimal::TWO), &user)
            .unwrap();

        let service = TransferService::new(
            repository.clone(),
            Decimal::new(15, 1),      // 1.5 % fee
            Decimal::new(42_000, 0),  // BTC/fiat rate
        );
        (repository, service)
    }

    #[test]
    fn test_transfer_is_appended_to_ledger() {
        let (repository, service) = seeded();

        let tx = service
            .record_transfer("addr-a", "addr-b", Decimal::new(5, 1), None, None)
            .unwrap();
        assert_eq!(tx.fee_pct, Decimal::new(15, 1));
        assert_eq!(tx.exchange_rate, Decimal::new(42_000, 0));

        let ledger = repository.fetch_all_transactions().unwrap();
        assert_eq!(ledger, vec![tx]);
    }

    #[test]
    fn test_explicit_fee_and_rate_override_defaults() {
        let (_repository, service) = seeded();

        let tx = service
            .record_transfer(
                "addr-a",
                "addr-b",
                Decimal::ONE,
                Some(Decimal::ZERO),
                Some(Decimal::new(39_500, 0)),
            )
            .unwrap();
        assert_eq!(tx.fee_pct, Decimal::ZERO);
        assert_eq!(tx.exchange_rate, Decimal::new(39_500, 0));
    }

    #[test]
    fn test_self_transfer_is_recorded() {
        let (repository, service) = seeded();

        let tx = service
            .record_transfer("addr-a", "addr-a", Decimal::ONE, None, None)
            .unwrap();
        assert!(tx.is_self_transfer());
        assert_eq!(repository.fetch_all_transactions().unwrap().len(), 1);
    }

    #[test]
    fn test_overdraw_is_not_rejected() {
        let (_repository, service) = seeded();

        // addr-a holds 1 BTC; the ledger records the transfer anyway
        let result =
            service.record_transfer("addr-a", "addr-b", Decimal::new(1_000, 0), None, None);
        assert!(result.is_ok());
    }

    #[test]
    fn test_unknown_wallets_are_rejected() {
        let (repository, service) = seeded();

        assert!(service
            .record_transfer("missing", "addr-b", Decimal::ONE, None, None)
            .is_err());
        assert!(service
            .record_transfer("addr-a", "missing", Decimal::ONE, None, None)
            .is_err());
        assert!(repository.fetch_all_transactions().unwrap().is_empty());
    }
}
