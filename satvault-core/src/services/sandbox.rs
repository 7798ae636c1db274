//! Sandbox service - manage sandbox mode
//!
//! Sandbox mode points the CLI at a scratch ledger (sandbox.duckdb) so
//! experiments never touch custody data.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::adapters::duckdb::DuckDbRepository;
use crate::config::Config;
use crate::ports::Repository;

/// Sandbox service for managing sandbox mode
pub struct SandboxService {
    satvault_dir: PathBuf,
}

impl SandboxService {
    pub fn new(satvault_dir: &Path) -> Self {
        Self {
            satvault_dir: satvault_dir.to_path_buf(),
        }
    }

    /// Check if sandbox mode is currently enabled
    pub fn is_enabled(&self) -> Result<bool> {
        let config = Config::load(&self.satvault_dir)?;
        Ok(config.sandbox_mode)
    }

    /// Enable sandbox mode
    ///
    /// This will:
    /// 1. Delete any existing sandbox ledger (fresh start)
    /// 2. Enable sandbox mode in config
    /// 3. Create an empty sandbox ledger with the schema in place
    pub fn enable(&self) -> Result<()> {
        // Delete the existing sandbox ledger for a fresh start
        let sandbox_db = self.satvault_dir.join("sandbox.duckdb");
        let sandbox_wal = self.satvault_dir.join("sandbox.duckdb.wal");
        if sandbox_db.exists() {
            std::fs::remove_file(&sandbox_db)?;
        }
        if sandbox_wal.exists() {
            std::fs::remove_file(&sandbox_wal)?;
        }

        // Enable sandbox mode in config
        let mut config = Config::load(&self.satvault_dir).unwrap_or_default();
        config.enable_sandbox_mode();
        config.save(&self.satvault_dir)?;

        // Create the sandbox ledger so the first command finds the schema
        let repository = DuckDbRepository::new(&sandbox_db)?;
        repository.ensure_schema()?;

        Ok(())
    }

    /// Disable sandbox mode
    ///
    /// This will:
    /// 1. Disable sandbox mode in config
    /// 2. Optionally delete the sandbox ledger (if clean = true)
    pub fn disable(&self, clean: bool) -> Result<()> {
        // Disable sandbox mode in config
        let mut config = Config::load(&self.satvault_dir).unwrap_or_default();
        config.disable_sandbox_mode();
        config.save(&self.satvault_dir)?;

        // Optionally clean up the sandbox ledger
        if clean {
            let sandbox_db = self.satvault_dir.join("sandbox.duckdb");
            let sandbox_wal = self.satvault_dir.join("sandbox.duckdb.wal");
            if sandbox_db.exists() {
                std::fs::remove_file(&sandbox_db)?;
            }
            if sandbox_wal.exists() {
                std::fs::remove_file(&sandbox_wal)?;
            }
        }

        Ok(())
    }
}
