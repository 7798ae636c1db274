//! Configuration management
//!
//! settings.json in the satvault directory:
//! ```json
//! {
//!   "app": { "sandboxMode": false, ... },
//!   "transfers": { "defaultFeePct": "1", "defaultExchangeRate": "1" }
//! }
//! ```
//! Sections other front ends may add are preserved on save.

use std::collections::HashMap;
use std::path::Path;

use anyhow::Result;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Raw settings.json structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    #[serde(default)]
    app: AppSettings,
    #[serde(default)]
    transfers: TransferSettings,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AppSettings {
    #[serde(default)]
    sandbox_mode: bool,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TransferSettings {
    #[serde(default = "default_fee_pct")]
    default_fee_pct: Decimal,
    #[serde(default = "default_exchange_rate")]
    default_exchange_rate: Decimal,
}

fn default_fee_pct() -> Decimal {
    Decimal::ONE
}

fn default_exchange_rate() -> Decimal {
    Decimal::ONE
}

impl Default for TransferSettings {
    fn default() -> Self {
        Self {
            default_fee_pct: default_fee_pct(),
            default_exchange_rate: default_exchange_rate(),
        }
    }
}

/// Satvault configuration (simplified view of settings)
#[derive(Debug, Clone)]
pub struct Config {
    /// When set, the context opens sandbox.duckdb instead of the real
    /// ledger, so experiments never touch custody data
    pub sandbox_mode: bool,
    /// Fee percentage applied to transfers recorded without an explicit fee
    pub default_fee_pct: Decimal,
    /// Exchange rate recorded on transfers without an explicit rate
    pub default_exchange_rate: Decimal,
    // Keep the raw settings for preservation when saving
    _raw_settings: SettingsFile,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sandbox_mode: false,
            default_fee_pct: default_fee_pct(),
            default_exchange_rate: default_exchange_rate(),
            _raw_settings: SettingsFile::default(),
        }
    }
}

impl Config {
    /// Load config from the satvault directory
    ///
    /// Sandbox mode can be enabled via:
    /// 1. Settings file (sv sandbox on)
    /// 2. Environment variable SATVAULT_SANDBOX (for CI/testing)
    pub fn load(satvault_dir: &Path) -> Result<Self> {
        let settings_path = satvault_dir.join("settings.json");

        let raw: SettingsFile = if settings_path.exists() {
            let content = std::fs::read_to_string(&settings_path)?;
            serde_json::from_str(&content).unwrap_or_default()
        } else {
            SettingsFile::default()
        };

        // Check env var for sandbox mode override (for CI/testing)
        let sandbox_mode = match std::env::var("SATVAULT_SANDBOX").ok().as_deref() {
            Some("true" | "1" | "yes" | "TRUE" | "YES") => true,
            Some("false" | "0" | "no" | "FALSE" | "NO") => false,
            _ => raw.app.sandbox_mode,
        };

        Ok(Self {
            sandbox_mode,
            default_fee_pct: raw.transfers.default_fee_pct,
            default_exchange_rate: raw.transfers.default_exchange_rate,
            _raw_settings: raw,
        })
    }

    /// Save config to the satvault directory
    /// Preserves other settings that the CLI doesn't manage
    pub fn save(&self, satvault_dir: &Path) -> Result<()> {
        let settings_path = satvault_dir.join("settings.json");

        // Load existing settings to preserve fields we don't manage
        let mut settings = if settings_path.exists() {
            let content = std::fs::read_to_string(&settings_path)?;
            serde_json::from_str::<SettingsFile>(&content).unwrap_or_default()
        } else {
            SettingsFile::default()
        };

        settings.app.sandbox_mode = self.sandbox_mode;
        settings.transfers.default_fee_pct = self.default_fee_pct;
        settings.transfers.default_exchange_rate = self.default_exchange_rate;

        let content = serde_json::to_string_pretty(&settings)?;
        std::fs::write(&settings_path, content)?;
        Ok(())
    }

    /// Enable sandbox mode
    pub fn enable_sandbox_mode(&mut self) {
        self.sandbox_mode = true;
    }

    /// Disable sandbox mode
    pub fn disable_sandbox_mode(&mut self) {
        self.sandbox_mode = false;
    }
}
