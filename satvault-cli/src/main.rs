//! Satvault CLI - custodial Bitcoin wallet ledger in your terminal

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod output;

use commands::{logs, register, sandbox, send, status, transactions, wallet};

/// Satvault - custodial Bitcoin wallet ledger in your terminal
#[derive(Parser)]
#[command(name = "sv", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Register a new user and receive an API key
    Register {
        /// Email address (prompted for if not given)
        email: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage wallets
    Wallet {
        #[command(subcommand)]
        command: wallet::WalletCommands,
    },

    /// Record a transfer between two wallets
    Send {
        /// Sending wallet address
        #[arg(long)]
        from: String,
        /// Receiving wallet address
        #[arg(long)]
        to: String,
        /// Amount in BTC
        #[arg(long)]
        amount: String,
        /// Fee percentage (falls back to the configured default)
        #[arg(long)]
        fee_pct: Option<String>,
        /// Exchange rate (falls back to the configured default)
        #[arg(long)]
        exchange_rate: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the transaction ledger
    Transactions {
        /// Only transactions involving this user's wallets
        #[arg(long)]
        api_key: Option<String>,
        /// Only transactions involving this wallet address
        #[arg(long)]
        wallet: Option<String>,
        /// Export the full ledger to a CSV file
        #[arg(long)]
        export: Option<PathBuf>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show ledger status and summary
    Status {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage sandbox mode
    Sandbox {
        #[command(subcommand)]
        command: Option<sandbox::SandboxCommands>,
    },

    /// View and manage application logs
    Logs {
        #[command(subcommand)]
        command: logs::LogsCommands,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = run(cli);

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Register { email, json } => register::run(email, json),
        Commands::Wallet { command } => wallet::run(command),
        Commands::Send { from, to, amount, fee_pct, exchange_rate, json } => send::run(
            &from,
            &to,
            &amount,
            fee_pct.as_deref(),
            exchange_rate.as_deref(),
            json,
        ),
        Commands::Transactions { api_key, wallet, export, json } => {
            transactions::run(api_key.as_deref(), wallet.as_deref(), export.as_deref(), json)
        }
        Commands::Status { json } => status::run(json),
        Commands::Sandbox { command } => sandbox::run(command),
        Commands::Logs { command } => logs::run(command),
    }
}
