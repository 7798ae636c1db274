//! Sandbox command - manage sandbox mode

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;
use serde::Serialize;

use super::get_satvault_dir;
use satvault_core::services::SandboxService;

/// JSON output structure for sandbox state
#[derive(Serialize)]
struct SandboxOutput {
    sandbox_mode: bool,
    database: String,
}

impl SandboxOutput {
    fn new(sandbox_mode: bool) -> Self {
        let database = if sandbox_mode {
            "sandbox.duckdb"
        } else {
            "satvault.duckdb"
        };
        Self {
            sandbox_mode,
            database: database.to_string(),
        }
    }
}

#[derive(Subcommand)]
pub enum SandboxCommands {
    /// Enable sandbox mode (starts a fresh sandbox ledger)
    #[command(name = "on")]
    On {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Disable sandbox mode (the sandbox ledger is kept)
    #[command(name = "off")]
    Off {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show sandbox mode status
    Status {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn print_status(sandbox_service: &SandboxService, json: bool) -> Result<()> {
    let enabled = sandbox_service.is_enabled()?;
    if json {
        println!("{}", serde_json::to_string_pretty(&SandboxOutput::new(enabled))?);
    } else if enabled {
        println!("Sandbox mode is {}", "ON".green());
    } else {
        println!("Sandbox mode is {}", "OFF".yellow());
    }
    Ok(())
}

pub fn run(command: Option<SandboxCommands>) -> Result<()> {
    let satvault_dir = get_satvault_dir();
    std::fs::create_dir_all(&satvault_dir)?;
    let sandbox_service = SandboxService::new(&satvault_dir);

    match command {
        Some(SandboxCommands::On { json }) => {
            sandbox_service.enable()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&SandboxOutput::new(true))?);
                return Ok(());
            }
            println!("{}", "Sandbox mode enabled".green());
            println!("A fresh sandbox ledger is ready. Run 'sv status' to see the active database.");
            Ok(())
        }
        Some(SandboxCommands::Off { json }) => {
            sandbox_service.disable(false)?; // Keep the sandbox ledger by default
            if json {
                println!("{}", serde_json::to_string_pretty(&SandboxOutput::new(false))?);
                return Ok(());
            }
            println!("{}", "Sandbox mode disabled".yellow());
            Ok(())
        }
        Some(SandboxCommands::Status { json }) => print_status(&sandbox_service, json),
        None => print_status(&sandbox_service, false),
    }
}
