//! Repository contract tests
//!
//! Every backend behind the `Repository` trait must show the same
//! observable behavior. Each scenario here is written once against the
//! trait object and runs against both the DuckDB backend and the
//! in-memory backend.
//!
//! Run with: cargo test --test repository_contract_tests -- --nocapture

use rust_decimal::Decimal;
use std::sync::Arc;
use tempfile::TempDir;

use satvault_core::adapters::duckdb::DuckDbRepository;
use satvault_core::adapters::memory::MemoryRepository;
use satvault_core::domain::{Transaction, User, Wallet};
use satvault_core::ports::Repository;
use satvault_core::Error;

// ============================================================================
// Harness
// ============================================================================

/// One fresh instance of every backend, schema ready. The TempDir holds
/// the DuckDB file and must outlive the returned repositories.
fn backends(temp_dir: &TempDir) -> Vec<(&'static str, Arc<dyn Repository>)> {
    let db_path = temp_dir.path().join("contract.duckdb");
    let duckdb = DuckDbRepository::new(&db_path).expect("Failed to open DuckDB backend");

    let backends: Vec<(&'static str, Arc<dyn Repository>)> = vec![
        ("duckdb", Arc::new(duckdb)),
        ("memory", Arc::new(MemoryRepository::new())),
    ];
    for (name, repo) in &backends {
        repo.ensure_schema()
            .unwrap_or_else(|e| panic!("{}: schema setup failed: {}", name, e));
    }
    backends
}

fn transfer(from: &str, to: &str, n: i64) -> Transaction {
    let n = Decimal::from(n);
    Transaction::new(from, to, n, n, n)
}

// ============================================================================
// Lookup Semantics
// ============================================================================

/// Absence is an answer: unknown identifiers come back as None, never as
/// an error
#[test]
fn test_absent_lookups_return_none() {
    let temp_dir = TempDir::new().unwrap();
    for (name, repo) in backends(&temp_dir) {
        assert_eq!(repo.get_user("missing-key").unwrap(), None, "{}", name);
        assert_eq!(
            repo.get_user_by_email("missing@example.com").unwrap(),
            None,
            "{}",
            name
        );
        assert_eq!(repo.get_wallet("missing-address").unwrap(), None, "{}", name);
    }
}

/// A registered user is found through both lookup paths
#[test]
fn test_user_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    for (name, repo) in backends(&temp_dir) {
        let user = User::new("key-1", "roundtrip@example.com");
        repo.register_user(&user).unwrap();

        assert_eq!(repo.get_user("key-1").unwrap(), Some(user.clone()), "{}", name);
        assert_eq!(
            repo.get_user_by_email("roundtrip@example.com").unwrap(),
            Some(user),
            "{}",
            name
        );
    }
}

// ============================================================================
// Uniqueness
// ============================================================================

/// Registering the same email twice is a storage fault on every backend
#[test]
fn test_duplicate_user_is_a_storage_fault() {
    let temp_dir = TempDir::new().unwrap();
    for (name, repo) in backends(&temp_dir) {
        repo.register_user(&User::new("key-1", "dup@example.com"))
            .unwrap();
        let result = repo.register_user(&User::new("key-2", "dup@example.com"));
        assert!(
            matches!(result, Err(Error::Database(_))),
            "{}: duplicate email should be a storage fault",
            name
        );
    }
}

/// Recording the same wallet address twice is a storage fault on every
/// backend
#[test]
fn test_duplicate_wallet_is_a_storage_fault() {
    let temp_dir = TempDir::new().unwrap();
    for (name, repo) in backends(&temp_dir) {
        let user = User::new("key-1", "owner@example.com");
        repo.register_user(&user).unwrap();
        repo.add_wallet(&Wallet::new("wallet-1", Decimal::ZERO), &user)
            .unwrap();

        let result = repo.add_wallet(&Wallet::new("wallet-1", Decimal::ONE), &user);
        assert!(
            matches!(result, Err(Error::Database(_))),
            "{}: duplicate address should be a storage fault",
            name
        );
    }
}

// ============================================================================
// Ownership
// ============================================================================

/// Every wallet resolves to the user it was recorded against
#[test]
fn test_wallet_owner_resolution() {
    let temp_dir = TempDir::new().unwrap();
    for (name, repo) in backends(&temp_dir) {
        let user = User::new("key-1", "owner@example.com");
        repo.register_user(&user).unwrap();
        let wallet = Wallet::new("wallet-1", Decimal::new(5, 1));
        repo.add_wallet(&wallet, &user).unwrap();

        let stored = repo.get_wallet("wallet-1").unwrap();
        assert_eq!(stored, Some(wallet.clone()), "{}", name);
        assert_eq!(repo.get_wallet_user(&wallet).unwrap(), user, "{}", name);
    }
}

/// A wallet recorded against a user that was never registered faults on
/// owner resolution
#[test]
fn test_ownerless_wallet_faults() {
    let temp_dir = TempDir::new().unwrap();
    for (name, repo) in backends(&temp_dir) {
        let ghost = User::new("never-registered", "ghost@example.com");
        let wallet = Wallet::new("orphan", Decimal::ZERO);
        repo.add_wallet(&wallet, &ghost).unwrap();

        let result = repo.get_wallet_user(&wallet);
        assert!(
            matches!(result, Err(Error::Integrity(_))),
            "{}: ownerless wallet must be an integrity fault",
            name
        );
    }
}

// ============================================================================
// Balance Updates
// ============================================================================

/// Balance updates overwrite whatever was stored, and an unknown address
/// is silently skipped
#[test]
fn test_balance_overwrite_semantics() {
    let temp_dir = TempDir::new().unwrap();
    for (name, repo) in backends(&temp_dir) {
        let user = User::new("key-1", "owner@example.com");
        repo.register_user(&user).unwrap();
        repo.add_wallet(&Wallet::new("wallet-1", Decimal::ONE), &user)
            .unwrap();

        repo.update_wallet_balance("wallet-1", Decimal::new(75, 1))
            .unwrap();
        let balance = repo.get_wallet("wallet-1").unwrap().unwrap().btc_balance;
        assert_eq!(balance, Decimal::new(75, 1), "{}", name);

        repo.update_wallet_balance("wallet-1", Decimal::ZERO).unwrap();
        let balance = repo.get_wallet("wallet-1").unwrap().unwrap().btc_balance;
        assert_eq!(balance, Decimal::ZERO, "{}: lowering is also valid", name);

        repo.update_wallet_balance("unknown", Decimal::from(9)).unwrap();
        let balance = repo.get_wallet("wallet-1").unwrap().unwrap().btc_balance;
        assert_eq!(balance, Decimal::ZERO, "{}: unknown address is a no-op", name);
    }
}

// ============================================================================
// Ordering
// ============================================================================

/// A user's wallets list in the order they were added
#[test]
fn test_wallet_list_order() {
    let temp_dir = TempDir::new().unwrap();
    for (name, repo) in backends(&temp_dir) {
        let user = User::new("key-1", "owner@example.com");
        repo.register_user(&user).unwrap();
        for addr in ["w-first", "w-second", "w-third"] {
            repo.add_wallet(&Wallet::new(addr, Decimal::ZERO), &user)
                .unwrap();
        }

        let wallets = repo.get_user_wallets(&user).unwrap();
        let addresses: Vec<&str> = wallets.iter().map(|w| w.wallet_address.as_str()).collect();
        assert_eq!(addresses, vec!["w-first", "w-second", "w-third"], "{}", name);
    }
}

/// All three ledger views preserve insertion order and agree on which
/// transfers belong to whom
#[test]
fn test_ledger_views_preserve_insertion_order() {
    let temp_dir = TempDir::new().unwrap();
    for (name, repo) in backends(&temp_dir) {
        let alice = User::new("key-alice", "alice@example.com");
        let bob = User::new("key-bob", "bob@example.com");
        repo.register_user(&alice).unwrap();
        repo.register_user(&bob).unwrap();
        repo.add_wallet(&Wallet::new("wallet-a", Decimal::ONE), &alice)
            .unwrap();
        repo.add_wallet(&Wallet::new("wallet-b", Decimal::TWO), &bob)
            .unwrap();

        repo.add_transaction(&transfer("wallet-a", "wallet-b", 1)).unwrap();
        repo.add_transaction(&transfer("wallet-a", "wallet-a", 2)).unwrap();
        repo.add_transaction(&transfer("wallet-b", "wallet-a", 3)).unwrap();
        repo.add_transaction(&transfer("wallet-b", "wallet-b", 4)).unwrap();

        let amounts =
            |txs: &[Transaction]| -> Vec<Decimal> { txs.iter().map(|t| t.btc_amount).collect() };
        let expected =
            |ns: &[i64]| -> Vec<Decimal> { ns.iter().map(|&n| Decimal::from(n)).collect() };

        let ledger = repo.fetch_all_transactions().unwrap();
        assert_eq!(amounts(&ledger), expected(&[1, 2, 3, 4]), "{}: full ledger", name);

        let view = repo.get_wallet_transactions("wallet-a").unwrap();
        assert_eq!(amounts(&view), expected(&[1, 2, 3]), "{}: wallet-a view", name);

        let view = repo.get_wallet_transactions("wallet-b").unwrap();
        assert_eq!(amounts(&view), expected(&[1, 3, 4]), "{}: wallet-b view", name);

        let view = repo.get_user_transactions(&alice).unwrap();
        assert_eq!(amounts(&view), expected(&[1, 2, 3]), "{}: alice's view", name);

        let view = repo.get_user_transactions(&bob).unwrap();
        assert_eq!(amounts(&view), expected(&[1, 3, 4]), "{}: bob's view", name);
    }
}

/// A transfer between two wallets of the same user shows up exactly once
/// in that user's view
#[test]
fn test_self_owned_transfer_listed_once() {
    let temp_dir = TempDir::new().unwrap();
    for (name, repo) in backends(&temp_dir) {
        let user = User::new("key-1", "hoarder@example.com");
        repo.register_user(&user).unwrap();
        repo.add_wallet(&Wallet::new("cold", Decimal::from(10)), &user)
            .unwrap();
        repo.add_wallet(&Wallet::new("hot", Decimal::ZERO), &user)
            .unwrap();

        repo.add_transaction(&transfer("cold", "hot", 1)).unwrap();
        repo.add_transaction(&transfer("hot", "hot", 2)).unwrap();

        let view = repo.get_user_transactions(&user).unwrap();
        assert_eq!(view.len(), 2, "{}: each transfer listed once", name);
    }
}

/// Parties with no ledger involvement see empty views, not errors
#[test]
fn test_uninvolved_parties_see_empty_views() {
    let temp_dir = TempDir::new().unwrap();
    for (name, repo) in backends(&temp_dir) {
        let user = User::new("key-1", "nowallets@example.com");
        repo.register_user(&user).unwrap();

        assert!(repo.get_user_wallets(&user).unwrap().is_empty(), "{}", name);
        assert!(repo.get_user_transactions(&user).unwrap().is_empty(), "{}", name);
        assert!(
            repo.get_wallet_transactions("never-used").unwrap().is_empty(),
            "{}",
            name
        );
        assert!(repo.fetch_all_transactions().unwrap().is_empty(), "{}", name);
    }
}
