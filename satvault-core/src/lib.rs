//! Satvault Core - Business logic for a custodial Bitcoin wallet ledger
//!
//! This crate implements the core domain logic following hexagonal architecture:
//!
//! - **domain**: Core business entities (User, Wallet, Transaction)
//! - **ports**: Trait definitions for external dependencies (Repository)
//! - **services**: Business logic orchestration
//! - **adapters**: Concrete repository backends (DuckDB, in-memory)

pub mod adapters;
pub mod config;
pub mod domain;
pub mod log_migrations;
pub mod migrations;
pub mod ports;
pub mod services;

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;

use adapters::duckdb::DuckDbRepository;
use config::Config;
use ports::Repository;
use services::*;

// Re-export commonly used types at crate root
pub use domain::result::Error;
pub use domain::{RegisterUserResponse, Response, Transaction, User, Wallet};
pub use services::{EntryPoint, LogEvent, LoggingService};

/// Main context for Satvault operations
///
/// This is the primary entry point for all business logic. It holds
/// the database connection, configuration, and all services.
pub struct SatvaultContext {
    pub config: Config,
    pub repository: Arc<DuckDbRepository>,
    pub registration_service: RegistrationService,
    pub wallet_service: WalletService,
    pub transfer_service: TransferService,
    pub admin_service: AdminService,
    pub status_service: StatusService,
}

impl SatvaultContext {
    /// Create a new Satvault context
    pub fn new(satvault_dir: &Path) -> Result<Self> {
        let config = Config::load(satvault_dir)?;

        // Determine which database file to use
        let db_filename = if config.sandbox_mode {
            "sandbox.duckdb"
        } else {
            "satvault.duckdb"
        };

        let db_path = satvault_dir.join(db_filename);
        let repository = Arc::new(DuckDbRepository::new(&db_path)?);

        // Initialize schema
        repository.ensure_schema()?;

        // Use-case services see the repository through the trait, so they
        // run unchanged against any backend
        let ledger: Arc<dyn Repository> = Arc::clone(&repository);

        let registration_service = RegistrationService::new(Arc::clone(&ledger));
        let wallet_service = WalletService::new(Arc::clone(&ledger));
        let transfer_service = TransferService::new(
            Arc::clone(&ledger),
            config.default_fee_pct,
            config.default_exchange_rate,
        );
        let admin_service = AdminService::new(Arc::clone(&ledger));
        let status_service = StatusService::new(Arc::clone(&repository));

        Ok(Self {
            config,
            repository,
            registration_service,
            wallet_service,
            transfer_service,
            admin_service,
            status_service,
        })
    }
}
