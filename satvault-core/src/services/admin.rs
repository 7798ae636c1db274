//! Admin service - whole-ledger views and exports

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::domain::Transaction;
use crate::ports::Repository;

/// Admin service
///
/// Back-office reads over the whole ledger, with no per-user scoping.
/// The only write it ever does is the export file.
pub struct AdminService {
    repository: Arc<dyn Repository>,
}

/// Result of exporting the ledger to CSV
#[derive(Debug, Serialize)]
pub struct CsvExportResult {
    pub path: PathBuf,
    pub rows: usize,
}

impl AdminService {
    pub fn new(repository: Arc<dyn Repository>) -> Self {
        Self { repository }
    }

    /// The full transaction ledger, oldest first
    pub fn fetch_all_transactions(&self) -> Result<Vec<Transaction>> {
        let transactions = self.repository.fetch_all_transactions()?;
        Ok(transactions)
    }

    /// Write the full ledger to a CSV file, one row per transaction,
    /// preserving ledger order
    pub fn export_csv(&self, path: &Path) -> Result<CsvExportResult> {
        let transactions = self.fetch_all_transactions()?;

        let mut writer = csv::Writer::from_path(path)
            .with_context(|| format!("Failed to create CSV file at {}", path.display()))?;
        for transaction in &transactions {
            writer.serialize(transaction)?;
        }
        writer.flush()?;

        Ok(CsvExportResult {
            path: path.to_path_buf(),
            rows: transactions.len(),
        })
    }
}
