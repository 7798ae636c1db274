//! DuckDB repository implementation

use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::thread;
use std::time::Duration;

use duckdb::{params, Connection};
use rust_decimal::Decimal;

use crate::domain::result::{Error, Result};
use crate::domain::{Transaction, User, Wallet};
use crate::ports::Repository;
use crate::services::MigrationService;

/// Maximum number of retries when database file is locked
const MAX_RETRIES: u32 = 5;

/// Initial retry delay in milliseconds (doubles each retry: 50, 100, 200, 400, 800ms)
const INITIAL_RETRY_DELAY_MS: u64 = 50;

/// Check if an error message indicates a file locking issue that should be retried
fn is_retryable_error(err_msg: &str) -> bool {
    let lower = err_msg.to_lowercase();
    // Windows error messages
    lower.contains("being used by another process")
        || lower.contains("cannot access the file")
        // Unix/macOS error messages
        || lower.contains("resource temporarily unavailable")
        || lower.contains("database is locked")
        || lower.contains("file is already open")
}

/// DuckDB repository implementation
///
/// Owns a single connection for its whole lifetime. The connection closes
/// when the repository is dropped, on success and failure paths alike.
pub struct DuckDbRepository {
    conn: Mutex<Connection>,
    db_path: PathBuf,
}

impl DuckDbRepository {
    /// Open (or create) the ledger database at `db_path`.
    ///
    /// Includes retry logic with exponential backoff for file locking
    /// errors, which occur when another satvault process still holds the
    /// file. Only the open is ever retried; ledger operations run at most
    /// once.
    pub fn new(db_path: &Path) -> Result<Self> {
        let mut last_error = None;

        for attempt in 0..MAX_RETRIES {
            match Self::try_open_connection(db_path) {
                Ok(conn) => {
                    return Ok(Self {
                        conn: Mutex::new(conn),
                        db_path: db_path.to_path_buf(),
                    });
                }
                Err(e) => {
                    let err_msg = e.to_string();
                    if is_retryable_error(&err_msg) && attempt < MAX_RETRIES - 1 {
                        let delay =
                            Duration::from_millis(INITIAL_RETRY_DELAY_MS * 2u64.pow(attempt));
                        eprintln!(
                            "[satvault] Database busy, retrying in {}ms (attempt {}/{}): {}",
                            delay.as_millis(),
                            attempt + 1,
                            MAX_RETRIES,
                            err_msg
                        );
                        thread::sleep(delay);
                        last_error = Some(e);
                        continue;
                    }
                    return Err(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            Error::database(format!("Failed to open database after {} retries", MAX_RETRIES))
        }))
    }

    /// Attempt to open a database connection (called by new() with retry logic)
    fn try_open_connection(db_path: &Path) -> Result<Connection> {
        // IMPORTANT: Disable extension autoloading to avoid macOS code signing issues
        // (cached extensions in ~/.duckdb/extensions may have different Team IDs)
        let config = duckdb::Config::default().enable_autoload_extension(false)?;
        let conn = Connection::open_with_flags(db_path, config)?;
        Ok(conn)
    }

    /// Run database migrations using the MigrationService
    ///
    /// Returns the migration result showing what was applied.
    pub fn run_migrations(&self) -> Result<crate::services::MigrationResult> {
        let conn = self.conn.lock().unwrap();
        let migration_service = MigrationService::new(&conn);
        migration_service
            .run_pending()
            .map_err(|e| Error::database(e.to_string()))
    }

    /// Path of the backing database file
    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    // === Status counters (not part of the repository contract) ===

    pub fn count_users(&self) -> Result<i64> {
        let conn = self.conn.lock().unwrap();
        let count = conn.query_row("SELECT COUNT(*) FROM sys_users", [], |row| row.get(0))?;
        Ok(count)
    }

    pub fn count_wallets(&self) -> Result<i64> {
        let conn = self.conn.lock().unwrap();
        let count = conn.query_row("SELECT COUNT(*) FROM sys_wallets", [], |row| row.get(0))?;
        Ok(count)
    }

    pub fn count_transactions(&self) -> Result<i64> {
        let conn = self.conn.lock().unwrap();
        let count = conn.query_row("SELECT COUNT(*) FROM sys_transactions", [], |row| {
            row.get(0)
        })?;
        Ok(count)
    }

    /// Sum of all wallet balances held in custody
    pub fn total_btc_balance(&self) -> Result<Decimal> {
        let conn = self.conn.lock().unwrap();
        // Cast to VARCHAR so the sum can be read as a string with full precision
        let total: Option<String> = conn.query_row(
            "SELECT SUM(btc_balance)::VARCHAR FROM sys_wallets",
            [],
            |row| row.get(0),
        )?;
        Ok(total
            .map(|s| Decimal::from_str_exact(&s).unwrap_or_default())
            .unwrap_or_default())
    }

    // === Row mapping ===

    fn row_to_user(&self, row: &duckdb::Row) -> User {
        // Column indices from SELECT: 0: api_key, 1: email
        User {
            api_key: row.get(0).unwrap_or_default(),
            email: row.get(1).unwrap_or_default(),
        }
    }

    fn row_to_wallet(&self, row: &duckdb::Row) -> Wallet {
        // Column indices from SELECT: 0: wallet_address, 1: btc_balance::VARCHAR
        let balance_str: String = row.get(1).unwrap_or_default();
        Wallet {
            wallet_address: row.get(0).unwrap_or_default(),
            btc_balance: Decimal::from_str_exact(&balance_str).unwrap_or_default(),
        }
    }

    fn row_to_transaction(&self, row: &duckdb::Row) -> Transaction {
        // Column indices from SELECT:
        // 0: wallet_address_from, 1: wallet_address_to,
        // 2: btc_amount::VARCHAR, 3: fee_pct::VARCHAR, 4: exchange_rate::VARCHAR
        let amount_str: String = row.get(2).unwrap_or_default();
        let fee_str: String = row.get(3).unwrap_or_default();
        let rate_str: String = row.get(4).unwrap_or_default();
        Transaction {
            wallet_address_from: row.get(0).unwrap_or_default(),
            wallet_address_to: row.get(1).unwrap_or_default(),
            btc_amount: Decimal::from_str_exact(&amount_str).unwrap_or_default(),
            fee_pct: Decimal::from_str_exact(&fee_str).unwrap_or_default(),
            exchange_rate: Decimal::from_str_exact(&rate_str).unwrap_or_default(),
        }
    }
}

impl Repository for DuckDbRepository {
    fn ensure_schema(&self) -> Result<()> {
        self.run_migrations()?;
        Ok(())
    }

    fn register_user(&self, user: &User) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO sys_users (api_key, email) VALUES (?, ?)",
            params![user.api_key, user.email],
        )?;
        Ok(())
    }

    fn get_user(&self, api_key: &str) -> Result<Option<User>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare("SELECT api_key, email FROM sys_users WHERE api_key = ?")?;

        let user = stmt
            .query_row([api_key], |row| Ok(self.row_to_user(row)))
            .ok();

        Ok(user)
    }

    fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare("SELECT api_key, email FROM sys_users WHERE email = ?")?;

        let user = stmt
            .query_row([email], |row| Ok(self.row_to_user(row)))
            .ok();

        Ok(user)
    }

    fn add_wallet(&self, wallet: &Wallet, user: &User) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        // Balances travel as strings; DuckDB casts them into the DECIMAL column
        conn.execute(
            "INSERT INTO sys_wallets (wallet_address, btc_balance, owner_api_key)
             VALUES (?, ?, ?)",
            params![
                wallet.wallet_address,
                wallet.btc_balance.to_string(),
                user.api_key
            ],
        )?;
        Ok(())
    }

    fn get_wallet(&self, wallet_address: &str) -> Result<Option<Wallet>> {
        let conn = self.conn.lock().unwrap();
        // Cast balance to VARCHAR so it can be read as a string with full precision
        let mut stmt = conn.prepare(
            "SELECT wallet_address, btc_balance::VARCHAR
             FROM sys_wallets WHERE wallet_address = ?",
        )?;

        let wallet = stmt
            .query_row([wallet_address], |row| Ok(self.row_to_wallet(row)))
            .ok();

        Ok(wallet)
    }

    fn get_wallet_user(&self, wallet: &Wallet) -> Result<User> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT u.api_key, u.email
             FROM sys_users u
             JOIN sys_wallets w ON w.owner_api_key = u.api_key
             WHERE w.wallet_address = ?",
        )?;

        match stmt.query_row([wallet.wallet_address.as_str()], |row| {
            Ok(self.row_to_user(row))
        }) {
            Ok(user) => Ok(user),
            Err(duckdb::Error::QueryReturnedNoRows) => Err(Error::integrity(format!(
                "wallet {} has no registered owner",
                wallet.wallet_address
            ))),
            Err(e) => Err(e.into()),
        }
    }

    fn update_wallet_balance(
        &self,
        wallet_address: &str,
        new_btc_balance: Decimal,
    ) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        // Unconditional overwrite. Updating an address with no wallet row
        // touches zero rows and is not a fault.
        conn.execute(
            "UPDATE sys_wallets SET btc_balance = ? WHERE wallet_address = ?",
            params![new_btc_balance.to_string(), wallet_address],
        )?;
        Ok(())
    }

    fn get_user_wallets(&self, user: &User) -> Result<Vec<Wallet>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT wallet_address, btc_balance::VARCHAR
             FROM sys_wallets
             WHERE owner_api_key = ?
             ORDER BY wallet_seq",
        )?;

        let wallets = stmt
            .query_map([user.api_key.as_str()], |row| Ok(self.row_to_wallet(row)))?
            .filter_map(|r| r.ok())
            .collect();

        Ok(wallets)
    }

    fn add_transaction(&self, transaction: &Transaction) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO sys_transactions
                 (wallet_address_from, wallet_address_to, btc_amount, fee_pct, exchange_rate)
             VALUES (?, ?, ?, ?, ?)",
            params![
                transaction.wallet_address_from,
                transaction.wallet_address_to,
                transaction.btc_amount.to_string(),
                transaction.fee_pct.to_string(),
                transaction.exchange_rate.to_string()
            ],
        )?;
        Ok(())
    }

    fn fetch_all_transactions(&self) -> Result<Vec<Transaction>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT wallet_address_from, wallet_address_to,
                    btc_amount::VARCHAR, fee_pct::VARCHAR, exchange_rate::VARCHAR
             FROM sys_transactions
             ORDER BY tx_seq",
        )?;

        let transactions = stmt
            .query_map([], |row| Ok(self.row_to_transaction(row)))?
            .filter_map(|r| r.ok())
            .collect();

        Ok(transactions)
    }

    fn get_user_transactions(&self, user: &User) -> Result<Vec<Transaction>> {
        let conn = self.conn.lock().unwrap();
        // EXISTS rather than JOIN: a transfer between two wallets of the
        // same user must still appear exactly once.
        let mut stmt = conn.prepare(
            "SELECT t.wallet_address_from, t.wallet_address_to,
                    t.btc_amount::VARCHAR, t.fee_pct::VARCHAR, t.exchange_rate::VARCHAR
             FROM sys_transactions t
             WHERE EXISTS (
                 SELECT 1 FROM sys_wallets w
                 WHERE w.owner_api_key = ?
                   AND (w.wallet_address = t.wallet_address_from
                        OR w.wallet_address = t.wallet_address_to)
             )
             ORDER BY t.tx_seq",
        )?;

        let transactions = stmt
            .query_map([user.api_key.as_str()], |row| {
                Ok(self.row_to_transaction(row))
            })?
            .filter_map(|r| r.ok())
            .collect();

        Ok(transactions)
    }

    fn get_wallet_transactions(&self, wallet_address: &str) -> Result<Vec<Transaction>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT wallet_address_from, wallet_address_to,
                    btc_amount::VARCHAR, fee_pct::VARCHAR, exchange_rate::VARCHAR
             FROM sys_transactions
             WHERE wallet_address_from = ? OR wallet_address_to = ?
             ORDER BY tx_seq",
        )?;

        let transactions = stmt
            .query_map(params![wallet_address, wallet_address], |row| {
                Ok(self.row_to_transaction(row))
            })?
            .filter_map(|r| r.ok())
            .collect();

        Ok(transactions)
    }
}
