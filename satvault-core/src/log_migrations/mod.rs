//! Log database migrations - embedded SQL files
//!
//! The logs database lives apart from the ledger and keeps its own
//! migration history, so log maintenance can never touch custody data.

/// All log database migrations, embedded at compile time.
/// Format: (filename, sql_content)
pub const LOG_MIGRATIONS: &[(&str, &str)] = &[
    ("000_migrations.sql", include_str!("000_migrations.sql")),
    ("001_logs_schema.sql", include_str!("001_logs_schema.sql")),
];
