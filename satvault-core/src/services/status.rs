//! Status service - ledger summary

use std::sync::Arc;

use anyhow::Result;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::adapters::duckdb::DuckDbRepository;

/// Status service for ledger summaries
///
/// Reports on the concrete DuckDB store (file path, size), so unlike the
/// use-case services it holds the backend directly instead of the trait.
pub struct StatusService {
    repository: Arc<DuckDbRepository>,
}

impl StatusService {
    pub fn new(repository: Arc<DuckDbRepository>) -> Self {
        Self { repository }
    }

    /// Get overall status summary
    pub fn get_status(&self) -> Result<StatusSummary> {
        let total_users = self.repository.count_users()?;
        let total_wallets = self.repository.count_wallets()?;
        let total_transactions = self.repository.count_transactions()?;
        let total_btc_in_custody = self.repository.total_btc_balance()?;

        let db_path = self.repository.db_path().to_path_buf();
        let db_size_bytes = std::fs::metadata(&db_path).ok().map(|m| m.len());

        Ok(StatusSummary {
            total_users,
            total_wallets,
            total_transactions,
            total_btc_in_custody,
            db_path: db_path.display().to_string(),
            db_size_bytes,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct StatusSummary {
    pub total_users: i64,
    pub total_wallets: i64,
    pub total_transactions: i64,
    pub total_btc_in_custody: Decimal,
    pub db_path: String,
    pub db_size_bytes: Option<u64>,
}
