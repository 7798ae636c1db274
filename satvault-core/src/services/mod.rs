//! Service layer - business logic orchestration
//!
//! Services coordinate domain logic and repository interactions. Each
//! service focuses on a specific use case or feature area.

mod admin;
pub mod logging;
pub mod migration;
mod registration;
mod sandbox;
mod status;
mod transfer;
mod wallet;

pub use admin::{AdminService, CsvExportResult};
pub use logging::{EntryPoint, LogEntry, LogEvent, LoggingService};
pub use migration::{MigrationResult, MigrationService};
pub use registration::RegistrationService;
pub use sandbox::SandboxService;
pub use status::{StatusService, StatusSummary};
pub use transfer::TransferService;
pub use wallet::WalletService;
