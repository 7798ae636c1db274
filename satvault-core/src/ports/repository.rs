//! Repository port
//!
//! Defines the persistence interface for users, wallets and transactions.
//! Services depend only on this trait, so the durable DuckDB backend and
//! the in-memory backend are interchangeable behind `Arc<dyn Repository>`.

use rust_decimal::Decimal;

use crate::domain::result::Result;
use crate::domain::{Transaction, User, Wallet};

/// Persistence contract for the custody ledger
///
/// Conventions shared by every implementation:
/// - Single-entity lookups return `Ok(None)` when nothing matches; absence
///   is an answer, not a fault.
/// - Every method returning a `Vec` yields rows in the order they were
///   first persisted, regardless of which entity the query filters by.
/// - Write methods do not re-validate business rules. Uniqueness of emails
///   is checked by the registration service before it calls
///   `register_user`; the store's own constraints are a last line that
///   surfaces as `Error::Database`.
pub trait Repository: Send + Sync {
    /// Create the backing schema if it does not exist yet. Safe to call on
    /// every startup.
    fn ensure_schema(&self) -> Result<()>;

    /// Persist a new user
    fn register_user(&self, user: &User) -> Result<()>;

    /// Look up a user by API key
    fn get_user(&self, api_key: &str) -> Result<Option<User>>;

    /// Look up a user by email
    fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Persist a new wallet owned by `user`
    fn add_wallet(&self, wallet: &Wallet, user: &User) -> Result<()>;

    /// Look up a wallet by address
    fn get_wallet(&self, wallet_address: &str) -> Result<Option<Wallet>>;

    /// Resolve the owner of a wallet
    ///
    /// Every persisted wallet has an owner, so a wallet that resolves to no
    /// user is corrupt state: implementations return `Error::Integrity`
    /// rather than `Ok(None)`.
    fn get_wallet_user(&self, wallet: &Wallet) -> Result<User>;

    /// Overwrite a wallet's balance. Last write wins; no delta arithmetic
    /// and no check against the previous value.
    fn update_wallet_balance(&self, wallet_address: &str, new_btc_balance: Decimal)
        -> Result<()>;

    /// All wallets owned by `user`, oldest first
    fn get_user_wallets(&self, user: &User) -> Result<Vec<Wallet>>;

    /// Append a transaction to the ledger
    fn add_transaction(&self, transaction: &Transaction) -> Result<()>;

    /// The full ledger, oldest first
    fn fetch_all_transactions(&self) -> Result<Vec<Transaction>>;

    /// Every transaction in which any of `user`'s wallets appears as
    /// sender or receiver, oldest first
    fn get_user_transactions(&self, user: &User) -> Result<Vec<Transaction>>;

    /// Every transaction in which `wallet_address` appears as sender or
    /// receiver, oldest first
    fn get_wallet_transactions(&self, wallet_address: &str) -> Result<Vec<Transaction>>;
}
