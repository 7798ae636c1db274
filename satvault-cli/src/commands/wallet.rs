//! Wallet command - create and inspect custody wallets

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;
use dialoguer::Confirm;
use rust_decimal::Decimal;
use satvault_core::LogEvent;

use super::{get_context, get_logger, log_event};
use crate::output;

#[derive(Subcommand)]
pub enum WalletCommands {
    /// Create a new wallet for a registered user
    New {
        /// API key of the owning user
        #[arg(long)]
        api_key: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show a wallet by address
    Show {
        /// Wallet address
        address: String,
        /// Also resolve and show the owning user
        #[arg(long)]
        owner: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Overwrite a wallet's balance
    SetBalance {
        /// Wallet address
        address: String,
        /// New balance in BTC
        amount: String,
        /// Skip confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List a user's wallets in creation order
    List {
        /// API key of the owning user
        #[arg(long)]
        api_key: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(command: WalletCommands) -> Result<()> {
    match command {
        WalletCommands::New { api_key, json } => run_new(&api_key, json),
        WalletCommands::Show { address, owner, json } => run_show(&address, owner, json),
        WalletCommands::SetBalance { address, amount, yes, json } => {
            run_set_balance(&address, &amount, yes, json)
        }
        WalletCommands::List { api_key, json } => run_list(&api_key, json),
    }
}

fn run_new(api_key: &str, json: bool) -> Result<()> {
    let logger = get_logger();
    log_event(&logger, LogEvent::new("command").with_command("wallet new"));

    let ctx = get_context()?;
    let wallet = ctx.wallet_service.create_wallet(api_key)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&wallet)?);
    } else {
        output::success("Wallet created");
        println!("  Address: {}", wallet.wallet_address.bold());
        println!("  Balance: {} BTC", wallet.btc_balance);
    }

    Ok(())
}

fn run_show(address: &str, owner: bool, json: bool) -> Result<()> {
    let ctx = get_context()?;

    if owner {
        let (wallet, user) = ctx.wallet_service.get_wallet_with_owner(address)?;
        if json {
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({
                    "wallet": wallet,
                    "owner": user,
                }))?
            );
        } else {
            println!("  Address: {}", wallet.wallet_address.bold());
            println!("  Balance: {} BTC", wallet.btc_balance);
            println!("  Owner:   {} ({})", user.email, user.api_key.dimmed());
        }
        return Ok(());
    }

    let wallet = ctx.wallet_service.get_wallet(address)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&wallet)?);
    } else {
        println!("  Address: {}", wallet.wallet_address.bold());
        println!("  Balance: {} BTC", wallet.btc_balance);
    }

    Ok(())
}

fn run_set_balance(address: &str, amount: &str, yes: bool, json: bool) -> Result<()> {
    let logger = get_logger();
    log_event(
        &logger,
        LogEvent::new("command").with_command("wallet set-balance"),
    );

    let new_balance: Decimal = amount
        .parse()
        .map_err(|_| anyhow::anyhow!("Invalid balance amount"))?;

    let ctx = get_context()?;
    let current = ctx.wallet_service.get_wallet(address)?;

    // Confirm the overwrite unless --yes (or JSON mode, which is scripted)
    if !yes && !json {
        println!(
            "\n{}",
            format!(
                "This will overwrite the balance of '{}': {} BTC -> {} BTC",
                address, current.btc_balance, new_balance
            )
            .yellow()
        );
        if !Confirm::new()
            .with_prompt("Are you sure?")
            .default(false)
            .interact()?
        {
            println!("{}\n", "Cancelled".dimmed());
            return Ok(());
        }
    }

    let wallet = ctx.wallet_service.set_balance(address, new_balance)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&wallet)?);
    } else {
        output::success("Balance updated");
        println!("  Address: {}", wallet.wallet_address.bold());
        println!("  Balance: {} BTC", wallet.btc_balance);
    }

    Ok(())
}

fn run_list(api_key: &str, json: bool) -> Result<()> {
    let ctx = get_context()?;
    let wallets = ctx.wallet_service.list_wallets(api_key)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&wallets)?);
        return Ok(());
    }

    if wallets.is_empty() {
        println!("No wallets found.");
        return Ok(());
    }

    let mut table = output::create_table();
    table.set_header(vec!["Address", "Balance (BTC)"]);
    for wallet in &wallets {
        table.add_row(vec![
            wallet.wallet_address.clone(),
            wallet.btc_balance.to_string(),
        ]);
    }

    println!("{}", table);
    println!();
    println!("{} wallet(s)", wallets.len());

    Ok(())
}
